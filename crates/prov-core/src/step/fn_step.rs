use std::fmt;

use super::{StepContext, StepDefinition, StepKind, StepRunResult};

/// Step declarado como dato: un id y una closure.
///
/// ```ignore
/// let step = FnStep::new("create_user", |_ctx| StepRunResult::Success)
///     .with_kind(StepKind::Account);
/// ```
pub struct FnStep<F> {
    id: String,
    kind: StepKind,
    action: F,
}

impl<F> FnStep<F> where F: Fn(&StepContext<'_>) -> StepRunResult
{
    pub fn new(id: impl Into<String>, action: F) -> Self {
        Self { id: id.into(),
               kind: StepKind::Generic,
               action }
    }

    pub fn with_kind(mut self, kind: StepKind) -> Self {
        self.kind = kind;
        self
    }
}

impl<F> StepDefinition for FnStep<F> where F: Fn(&StepContext<'_>) -> StepRunResult
{
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StepKind {
        self.kind
    }

    fn run(&self, ctx: &StepContext<'_>) -> StepRunResult {
        (self.action)(ctx)
    }
}

impl<F> fmt::Debug for FnStep<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep").field("id", &self.id).field("kind", &self.kind).finish()
    }
}

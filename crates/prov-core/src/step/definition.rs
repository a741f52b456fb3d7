use serde::{Deserialize, Serialize};

use super::context::StepContext;
use super::run_result::StepRunResult;

/// Categoría de la mutación que un step aplica sobre el host. Sólo informativa
/// (status, journal); el engine no cambia su comportamiento según el kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Package,
    Service,
    Filesystem,
    Account,
    Credential,
    Certificate,
    Check,
    #[default]
    Generic,
}

/// Trait que define un Step.
///
/// La acción debe ser idempotente o estar protegida (guard) para poder
/// re-ejecutarse: si el proceso se interrumpe a mitad de un step, el siguiente
/// run lo vuelve a ejecutar completo.
pub trait StepDefinition {
    /// Identificador estable y único dentro del Flow. Es lo que se persiste en
    /// el checkpoint.
    fn id(&self) -> &str;

    /// Nombre opcional amigable.
    fn name(&self) -> &str {
        self.id()
    }

    /// Tipo general del step.
    fn kind(&self) -> StepKind {
        StepKind::Generic
    }

    /// Ejecuta la acción sobre el host.
    fn run(&self, ctx: &StepContext<'_>) -> StepRunResult;
}

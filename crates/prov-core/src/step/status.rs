/// Estado de un Step dentro de un `FlowInstance`.
///
/// El checkpoint sólo distingue `Pending` y `FinishedOk`. `Failed` lo asigna
/// quien conoce el último run (p. ej. el journal) con
/// `FlowInstance::mark_failed`; el step sigue pendiente a efectos de
/// reanudación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// El paso está pendiente de ejecución.
    Pending,
    /// El paso finalizó correctamente (o un run anterior lo completó).
    FinishedOk,
    /// El último run se detuvo en este paso.
    Failed,
}

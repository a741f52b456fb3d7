use crate::errors::StoreError;

/// Almacenamiento del checkpoint: un único valor de texto.
///
/// Contrato:
/// - `read_current` devuelve `None` si nunca se escribió (equivale a `start`).
/// - `write_new` reemplaza el valor; sólo se llama después de que la acción
///   del step terminó con éxito (la escritura es la señal de commit).
/// - `clear` descarta el valor y devuelve el anterior tal como estaba
///   almacenado (igual que `read_current`).
pub trait CheckpointStore {
    fn read_current(&self) -> Result<Option<String>, StoreError>;
    fn write_new(&mut self, value: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<Option<String>, StoreError>;

    /// `clear` para el operador: devuelve el valor anterior sin espacios ni
    /// salto de línea final. No lo valida; sirve también para descartar un
    /// checkpoint corrupto o desconocido.
    fn discard(&mut self) -> Result<Option<String>, StoreError> {
        Ok(self.clear()?.map(|raw| raw.trim().to_string()))
    }
}

/// Store en memoria para tests. Guarda el historial de escrituras para poder
/// verificar el orden de commits.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCheckpointStore {
    pub value: Option<String>,
    pub writes: Vec<String>,
}

impl InMemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store precargado con un valor crudo (simula un checkpoint previo).
    pub fn with_value(value: impl Into<String>) -> Self {
        Self { value: Some(value.into()),
               writes: Vec::new() }
    }
}

impl CheckpointStore for InMemoryCheckpointStore {
    fn read_current(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.clone())
    }

    fn write_new(&mut self, value: &str) -> Result<(), StoreError> {
        self.value = Some(value.to_string());
        self.writes.push(value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<Option<String>, StoreError> {
        Ok(self.value.take())
    }
}

//! Hash helpers – abstracción para permitir cambiar de algoritmo sin tocar resto del core.

use blake3::Hasher;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Hash de la secuencia ordenada de nombres de steps. Los nombres no pueden
/// contener saltos de línea, así que `\n` es un separador sin ambigüedad.
pub fn definition_hash<'a>(step_ids: impl IntoIterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = step_ids.into_iter().collect();
    hash_str(&joined.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_hex() {
        let h = hash_str("abc");
        assert_eq!(h.len(), 64);
        assert_eq!(h, hash_str("abc"));
    }

    #[test]
    fn definition_hash_separates_names() {
        assert_ne!(definition_hash(["ab", "c"]), definition_hash(["a", "bc"]));
    }
}

//! Hashing de la definición del flow.

pub mod hash;

pub use hash::{definition_hash, hash_str};

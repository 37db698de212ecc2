//! Service layer for the `usuarios` records.
//! - `UsuarioService` owns the validation and affected-row rules.
//! - Storage sits behind the `UsuarioRepository` trait so handlers never
//!   touch the pool directly.

pub mod errors;
pub mod usuario;
#[cfg(test)]
pub mod test_support;

pub use usuario::{UsuarioRepository, UsuarioService};

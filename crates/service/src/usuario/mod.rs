//! User records: domain inputs, storage abstraction and the service.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{NewUsuario, UsuarioPatch};
pub use repository::{SeaOrmUsuarioRepository, UsuarioRepository};
pub use service::UsuarioService;

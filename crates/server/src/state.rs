use service::UsuarioService;

/// Shared handler state. Cloned per request; the pool lives behind the
/// service's repository.
#[derive(Clone)]
pub struct AppState {
    pub usuarios: UsuarioService,
    /// Include raw storage error text in error bodies.
    pub expose_error_detail: bool,
}

impl AppState {
    pub fn new(usuarios: UsuarioService, expose_error_detail: bool) -> Self {
        Self { usuarios, expose_error_detail }
    }
}

use std::sync::Arc;
use tracing::{info, instrument, warn};

use models::usuario;
use crate::errors::ServiceError;
use crate::usuario::domain::{NewUsuario, UsuarioPatch};
use crate::usuario::repository::UsuarioRepository;

/// Application service for user records.
///
/// Validation happens before any storage call. Each operation issues at
/// most one statement through the injected repository.
#[derive(Clone)]
pub struct UsuarioService {
    repo: Arc<dyn UsuarioRepository>,
}

impl UsuarioService {
    pub fn new(repo: Arc<dyn UsuarioRepository>) -> Self { Self { repo } }

    /// All records, newest first.
    pub async fn list(&self) -> Result<Vec<usuario::Model>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id_expediente: &str) -> Result<usuario::Model, ServiceError> {
        self.repo
            .find(id_expediente)
            .await?
            .ok_or_else(|| ServiceError::not_found("usuario"))
    }

    #[instrument(skip(self, input), fields(id_expediente = ?input.id_expediente))]
    pub async fn create(&self, input: NewUsuario) -> Result<(), ServiceError> {
        let (id, nombre, area) = usuario::validate_new(
            input.id_expediente.as_deref(),
            input.nombre.as_deref(),
            input.area.as_deref(),
        )?;

        match self.repo.insert(id, nombre, area).await? {
            1 => {
                info!(id_expediente = %id, "usuario created");
                Ok(())
            }
            n => {
                warn!(id_expediente = %id, rows_affected = n, "insert did not affect exactly one row");
                Err(ServiceError::Internal(format!("expected 1 inserted row, got {n}")))
            }
        }
    }

    /// Apply the supplied fields; blank values count as absent. Rows are
    /// counted as matched, so zero means no such key and is `NotFound`.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id_expediente: &str, patch: UsuarioPatch) -> Result<(), ServiceError> {
        let nombre = usuario::present(patch.nombre.as_deref());
        let area = usuario::present(patch.area.as_deref());
        usuario::validate_patch(nombre, area)?;

        match self.repo.update(id_expediente, nombre, area).await? {
            1 => {
                info!(%id_expediente, "usuario updated");
                Ok(())
            }
            0 => Err(ServiceError::not_found("usuario")),
            n => Err(ServiceError::Internal(format!("expected 1 updated row, got {n}"))),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id_expediente: &str) -> Result<(), ServiceError> {
        match self.repo.delete(id_expediente).await? {
            1 => {
                info!(%id_expediente, "usuario deleted");
                Ok(())
            }
            0 => Err(ServiceError::not_found("usuario")),
            n => Err(ServiceError::Internal(format!("expected 1 deleted row, got {n}"))),
        }
    }
}

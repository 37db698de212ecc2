use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use common::types::Message;
use models::usuario;
use service::errors::ServiceError;
use service::usuario::{NewUsuario, UsuarioPatch};

use crate::{errors::ApiError, state::AppState};

/// The five operations, each with its own client-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Op {
    fn failed(self) -> &'static str {
        match self {
            Op::List => "Error al listar usuarios",
            Op::Get => "Error al buscar el usuario",
            Op::Create => "Error al insertar el usuario.",
            Op::Update => "Error al actualizar el usuario.",
            Op::Delete => "Error al eliminar el usuario.",
        }
    }

    fn not_found(self) -> &'static str {
        match self {
            Op::Update => "Usuario no encontrado o no modificado.",
            Op::Delete => "Usuario no encontrado.",
            _ => "Usuario no encontrado",
        }
    }

    fn invalid(self) -> &'static str {
        match self {
            Op::Update => "Error: Debe enviar al menos un campo para actualizar.",
            _ => "Error: Todos los campos son obligatorios.",
        }
    }

    fn unexpected(self) -> &'static str {
        match self {
            Op::Create => "Error: No se pudo registrar el usuario.",
            other => other.failed(),
        }
    }
}

/// Translate a service failure into the HTTP response for `op`. Storage
/// detail is always logged and only returned when `expose` is set.
pub fn service_error(op: Op, e: ServiceError, expose: bool) -> ApiError {
    let detail = e.to_string();
    match e {
        ServiceError::Validation(_) | ServiceError::Model(_) => {
            info!(?op, err = %detail, "rejected invalid input");
            ApiError::new(StatusCode::BAD_REQUEST, e.kind(), op.invalid())
        }
        ServiceError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, e.kind(), op.not_found()),
        ServiceError::Internal(_) => {
            error!(?op, err = %detail, "unexpected storage result");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.kind(), op.unexpected()).with_detail(detail, expose)
        }
        ServiceError::Db(_) => {
            error!(?op, err = %detail, "storage failure");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.kind(), op.failed()).with_detail(detail, expose)
        }
    }
}

/// Undecodable bodies are incomplete input for `op`.
fn body_error(op: Op, rejection: JsonRejection) -> ApiError {
    info!(?op, err = %rejection.body_text(), "rejected request body");
    ApiError::new(StatusCode::BAD_REQUEST, "validation_error", op.invalid())
}

#[utoipa::path(
    get, path = "/api/usuarios", tag = "usuarios",
    responses(
        (status = 200, description = "All records, newest first", body = [crate::openapi::UsuarioDoc]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_usuarios(State(state): State<AppState>) -> Result<Json<Vec<usuario::Model>>, ApiError> {
    match state.usuarios.list().await {
        Ok(list) => {
            info!(count = list.len(), "list usuarios");
            Ok(Json(list))
        }
        Err(e) => Err(service_error(Op::List, e, state.expose_error_detail)),
    }
}

#[utoipa::path(
    get, path = "/api/usuarios/{id}", tag = "usuarios",
    params(("id" = String, Path, description = "id_expediente")),
    responses(
        (status = 200, description = "The record", body = crate::openapi::UsuarioDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<usuario::Model>, ApiError> {
    state
        .usuarios
        .get(&id)
        .await
        .map(Json)
        .map_err(|e| service_error(Op::Get, e, state.expose_error_detail))
}

#[utoipa::path(
    post, path = "/api/usuarios", tag = "usuarios",
    request_body = crate::openapi::CreateUsuarioDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MessageDoc),
        (status = 400, description = "Missing field", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure, including a duplicate id_expediente", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_usuario(
    State(state): State<AppState>,
    payload: Result<Json<NewUsuario>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let Json(input) = payload.map_err(|r| body_error(Op::Create, r))?;
    state
        .usuarios
        .create(input)
        .await
        .map_err(|e| service_error(Op::Create, e, state.expose_error_detail))?;
    Ok((StatusCode::CREATED, Json(Message::new("Usuario registrado correctamente."))))
}

#[utoipa::path(
    patch, path = "/api/usuarios/{id}", tag = "usuarios",
    params(("id" = String, Path, description = "id_expediente")),
    request_body = crate::openapi::UpdateUsuarioDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 400, description = "No fields supplied", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found or not modified", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UsuarioPatch>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Json(patch) = payload.map_err(|r| body_error(Op::Update, r))?;
    state
        .usuarios
        .update(&id, patch)
        .await
        .map_err(|e| service_error(Op::Update, e, state.expose_error_detail))?;
    Ok(Json(Message::new("Usuario actualizado correctamente.")))
}

#[utoipa::path(
    delete, path = "/api/usuarios/{id}", tag = "usuarios",
    params(("id" = String, Path, description = "id_expediente")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    state
        .usuarios
        .delete(&id)
        .await
        .map_err(|e| service_error(Op::Delete, e, state.expose_error_detail))?;
    Ok(Json(Message::new("Usuario eliminado correctamente.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_failures_are_500_with_operation_message() {
        let e = service_error(Op::List, ServiceError::Db("timeout".into()), false);
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Error al listar usuarios");
        assert_eq!(e.detail, None);
    }

    #[test]
    fn unexpected_insert_count_uses_registration_message() {
        let e = service_error(Op::Create, ServiceError::Internal("0 rows".into()), true);
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Error: No se pudo registrar el usuario.");
        assert!(e.detail.unwrap().contains("0 rows"));
    }

    #[test]
    fn not_found_wording_depends_on_operation() {
        let get = service_error(Op::Get, ServiceError::not_found("usuario"), false);
        let upd = service_error(Op::Update, ServiceError::not_found("usuario"), false);
        assert_eq!(get.status, StatusCode::NOT_FOUND);
        assert_eq!(get.message, "Usuario no encontrado");
        assert_eq!(upd.message, "Usuario no encontrado o no modificado.");
    }

    #[test]
    fn duplicate_key_on_create_is_500_with_insert_message() {
        let e = service_error(
            Op::Create,
            ServiceError::Db("Duplicate entry 'E1' for key 'usuarios.PRIMARY'".into()),
            true,
        );
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.kind, "internal_error");
        assert_eq!(e.message, "Error al insertar el usuario.");
        assert!(e.detail.unwrap().contains("Duplicate entry"));
    }
}

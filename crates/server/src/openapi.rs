use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub ok: bool, pub message: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub message: String,
    /// One of `validation_error`, `not_found`, `internal_error`.
    pub error: String,
    /// Storage error text; omitted when the server hides it.
    pub detalle: Option<String>,
}

#[derive(ToSchema)]
pub struct UsuarioDoc {
    pub id_expediente: String,
    pub nombre: String,
    pub area: String,
    /// RFC 3339 timestamp assigned by the database.
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct CreateUsuarioDoc { pub id_expediente: String, pub nombre: String, pub area: String }

#[derive(ToSchema)]
pub struct UpdateUsuarioDoc { pub nombre: Option<String>, pub area: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::usuarios::list_usuarios,
        crate::routes::usuarios::get_usuario,
        crate::routes::usuarios::create_usuario,
        crate::routes::usuarios::update_usuario,
        crate::routes::usuarios::delete_usuario,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ErrorDoc,
            UsuarioDoc,
            CreateUsuarioDoc,
            UpdateUsuarioDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "usuarios")
    )
)]
pub struct ApiDoc;

//! `usuarios` table: one row per record, keyed by the externally supplied
//! `id_expediente`.

use sea_orm::{entity::prelude::*, ConnectionTrait, DbBackend, NotSet, QueryOrder, Set, Statement, Value};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_expediente: String,
    pub nombre: String,
    pub area: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Omitted columns keep their stored value through `COALESCE`.
pub const UPDATE_SQL: &str =
    "UPDATE usuarios SET nombre = COALESCE(?, nombre), area = COALESCE(?, area) WHERE id_expediente = ?";

/// `None` for absent or whitespace-only input, otherwise the value as given.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn validate_required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ModelError> {
    present(value).ok_or_else(|| ModelError::Validation(format!("{field} is required")))
}

/// All three creation fields must be present and non-blank. Returns them in
/// `(id_expediente, nombre, area)` order.
pub fn validate_new<'a>(
    id_expediente: Option<&'a str>,
    nombre: Option<&'a str>,
    area: Option<&'a str>,
) -> Result<(&'a str, &'a str, &'a str), ModelError> {
    Ok((
        validate_required("id_expediente", id_expediente)?,
        validate_required("nombre", nombre)?,
        validate_required("area", area)?,
    ))
}

/// At least one of `nombre`/`area` must carry a value.
pub fn validate_patch(nombre: Option<&str>, area: Option<&str>) -> Result<(), ModelError> {
    if present(nombre).is_none() && present(area).is_none() {
        return Err(ModelError::Validation("nombre or area is required".into()));
    }
    Ok(())
}

pub async fn list_newest_first<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
    Entity::find().order_by_desc(Column::CreatedAt).all(db).await
}

pub async fn find<C: ConnectionTrait>(db: &C, id_expediente: &str) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id_expediente.to_string()).one(db).await
}

/// Insert a row, leaving `created_at` to the column default. Returns rows affected.
pub async fn insert<C: ConnectionTrait>(db: &C, id_expediente: &str, nombre: &str, area: &str) -> Result<u64, DbErr> {
    let am = ActiveModel {
        id_expediente: Set(id_expediente.to_string()),
        nombre: Set(nombre.to_string()),
        area: Set(area.to_string()),
        created_at: NotSet,
    };
    Entity::insert(am).exec_without_returning(db).await
}

/// Run [`UPDATE_SQL`]. Returns rows affected. The MySQL driver connects with
/// `CLIENT_FOUND_ROWS`, so this counts matched rows: 0 only for a missing key,
/// 1 for an existing key even when the values did not change.
pub async fn update_fields<C: ConnectionTrait>(
    db: &C,
    id_expediente: &str,
    nombre: Option<&str>,
    area: Option<&str>,
) -> Result<u64, DbErr> {
    let stmt = update_statement(id_expediente, nombre, area);
    let res = db.execute(stmt).await?;
    Ok(res.rows_affected())
}

pub fn update_statement(id_expediente: &str, nombre: Option<&str>, area: Option<&str>) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::MySql,
        UPDATE_SQL,
        [
            Value::from(nombre.map(str::to_string)),
            Value::from(area.map(str::to_string)),
            Value::from(id_expediente.to_string()),
        ],
    )
}

pub async fn delete<C: ConnectionTrait>(db: &C, id_expediente: &str) -> Result<u64, DbErr> {
    let res = Entity::delete_by_id(id_expediente.to_string()).exec(db).await?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_not_present() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("  \t")), None);
        assert_eq!(present(Some("Ventas")), Some("Ventas"));
    }

    #[test]
    fn validate_new_names_the_first_missing_field() {
        assert_eq!(validate_new(Some("E1"), Some("Ana"), Some("Ventas")), Ok(("E1", "Ana", "Ventas")));
        assert_eq!(
            validate_new(Some("E1"), Some(""), Some("Ventas")),
            Err(ModelError::Validation("nombre is required".into()))
        );
        assert_eq!(
            validate_new(None, Some("Ana"), None),
            Err(ModelError::Validation("id_expediente is required".into()))
        );
    }

    #[test]
    fn validate_patch_needs_one_field() {
        assert!(validate_patch(Some("Ana"), None).is_ok());
        assert!(validate_patch(None, Some("Ventas")).is_ok());
        assert!(validate_patch(None, None).is_err());
        assert!(validate_patch(Some(" "), Some("")).is_err());
    }

    #[test]
    fn update_statement_binds_every_value() {
        let stmt = update_statement("E1", Some("B"), None);
        assert_eq!(stmt.sql, UPDATE_SQL);
        assert!(!stmt.sql.contains("E1"));
        let values = stmt.values.expect("bound values").0;
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], Value::from(Some("B".to_string())));
        assert_eq!(values[1], Value::from(None::<String>));
        assert_eq!(values[2], Value::from("E1".to_string()));
    }
}

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::usuario;
use crate::errors::ServiceError;

/// Storage capability for user records. Every call is a single statement;
/// writes report the number of rows affected and leave interpretation to
/// the service.
#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<usuario::Model>, ServiceError>;
    async fn find(&self, id_expediente: &str) -> Result<Option<usuario::Model>, ServiceError>;
    async fn insert(&self, id_expediente: &str, nombre: &str, area: &str) -> Result<u64, ServiceError>;
    async fn update(&self, id_expediente: &str, nombre: Option<&str>, area: Option<&str>) -> Result<u64, ServiceError>;
    async fn delete(&self, id_expediente: &str) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmUsuarioRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUsuarioRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl UsuarioRepository for SeaOrmUsuarioRepository {
    async fn list(&self) -> Result<Vec<usuario::Model>, ServiceError> {
        usuario::list_newest_first(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn find(&self, id_expediente: &str) -> Result<Option<usuario::Model>, ServiceError> {
        usuario::find(&self.db, id_expediente).await.map_err(ServiceError::from_db)
    }

    async fn insert(&self, id_expediente: &str, nombre: &str, area: &str) -> Result<u64, ServiceError> {
        usuario::insert(&self.db, id_expediente, nombre, area).await.map_err(ServiceError::from_db)
    }

    async fn update(&self, id_expediente: &str, nombre: Option<&str>, area: Option<&str>) -> Result<u64, ServiceError> {
        usuario::update_fields(&self.db, id_expediente, nombre, area).await.map_err(ServiceError::from_db)
    }

    async fn delete(&self, id_expediente: &str) -> Result<u64, ServiceError> {
        usuario::delete(&self.db, id_expediente).await.map_err(ServiceError::from_db)
    }
}

/// In-memory repository for tests and local runs without MySQL.
/// Mirrors the driver's affected-row reporting: the MySQL connection counts
/// matched rows, so an update of an existing key reports 1 even when the
/// values are unchanged.
pub mod mock {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct Table {
        rows: HashMap<String, usuario::Model>,
        last_created: Option<DateTime<Utc>>,
    }

    #[derive(Default)]
    pub struct InMemoryUsuarioRepository {
        table: RwLock<Table>,
        calls: AtomicUsize,
        unavailable: Option<String>,
    }

    impl InMemoryUsuarioRepository {
        pub fn new() -> Self { Self::default() }

        /// A repository whose every call fails like an unreachable database.
        pub fn unavailable(reason: &str) -> Self {
            Self { unavailable: Some(reason.to_string()), ..Self::default() }
        }

        /// Number of storage calls made so far.
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        fn enter(&self) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.unavailable {
                Some(reason) => Err(ServiceError::Db(reason.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl UsuarioRepository for InMemoryUsuarioRepository {
        async fn list(&self) -> Result<Vec<usuario::Model>, ServiceError> {
            self.enter()?;
            let table = self.table.read().await;
            let mut rows: Vec<usuario::Model> = table.rows.values().cloned().collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn find(&self, id_expediente: &str) -> Result<Option<usuario::Model>, ServiceError> {
            self.enter()?;
            Ok(self.table.read().await.rows.get(id_expediente).cloned())
        }

        async fn insert(&self, id_expediente: &str, nombre: &str, area: &str) -> Result<u64, ServiceError> {
            self.enter()?;
            let mut table = self.table.write().await;
            if table.rows.contains_key(id_expediente) {
                return Err(ServiceError::Db(format!("Duplicate entry '{id_expediente}' for key 'usuarios.PRIMARY'")));
            }
            // Strictly increasing timestamps keep newest-first ordering total.
            let mut created_at = Utc::now();
            if let Some(last) = table.last_created {
                if created_at <= last {
                    created_at = last + Duration::microseconds(1);
                }
            }
            table.last_created = Some(created_at);
            table.rows.insert(
                id_expediente.to_string(),
                usuario::Model {
                    id_expediente: id_expediente.to_string(),
                    nombre: nombre.to_string(),
                    area: area.to_string(),
                    created_at,
                },
            );
            Ok(1)
        }

        async fn update(&self, id_expediente: &str, nombre: Option<&str>, area: Option<&str>) -> Result<u64, ServiceError> {
            self.enter()?;
            let mut table = self.table.write().await;
            let Some(row) = table.rows.get_mut(id_expediente) else { return Ok(0) };
            if let Some(nombre) = nombre { row.nombre = nombre.to_string(); }
            if let Some(area) = area { row.area = area.to_string(); }
            Ok(1)
        }

        async fn delete(&self, id_expediente: &str) -> Result<u64, ServiceError> {
            self.enter()?;
            let removed = self.table.write().await.rows.remove(id_expediente);
            Ok(u64::from(removed.is_some()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    #[tokio::test]
    async fn seaorm_repository_maps_storage_failures_to_db_errors() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal("refused".into()))])
            .into_connection();
        let repo = SeaOrmUsuarioRepository::new(db);

        let err = repo.list().await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(ref m) if m.contains("refused")), "{err:?}");
    }

    #[tokio::test]
    async fn seaorm_repository_passes_rows_affected_through() -> Result<(), ServiceError> {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 0 },
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
            ])
            .into_connection();
        let repo = SeaOrmUsuarioRepository::new(db);

        assert_eq!(repo.insert("E1", "Ana", "Ventas").await?, 1);
        assert_eq!(repo.update("E404", Some("Ana"), None).await?, 0);
        assert_eq!(repo.delete("E1").await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn in_memory_update_counts_matched_rows() -> Result<(), ServiceError> {
        let repo = mock::InMemoryUsuarioRepository::new();
        repo.insert("E1", "A", "X").await?;

        assert_eq!(repo.update("E1", Some("A"), None).await?, 1);
        assert_eq!(repo.update("E1", None, Some("Y")).await?, 1);
        assert_eq!(repo.update("E404", Some("A"), None).await?, 0);

        let row = repo.find("E1").await?.expect("row");
        assert_eq!((row.nombre.as_str(), row.area.as_str()), ("A", "Y"));
        Ok(())
    }

    #[tokio::test]
    async fn in_memory_duplicate_insert_is_a_storage_error() -> Result<(), ServiceError> {
        let repo = mock::InMemoryUsuarioRepository::new();
        repo.insert("E1", "A", "X").await?;
        let err = repo.insert("E1", "B", "Y").await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(ref m) if m.contains("Duplicate entry")), "{err:?}");
        assert_eq!(repo.find("E1").await?.expect("row").nombre, "A");
        Ok(())
    }
}

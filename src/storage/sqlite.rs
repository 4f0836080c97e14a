//! SQLite backend for a local file. Creates the file and table on first use.

use async_trait::async_trait;
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use super::{
    DELETE_ALL, DELETE_BY_ID, INSERT, SELECT_ALL, StorageError, TodoRow, TodoStore,
    UPDATE_COMPLETED, release,
};
use crate::core::todo::Todo;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Todos (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Text TEXT NOT NULL,
    IsCompleted BOOLEAN NOT NULL DEFAULT 0
)
"#;

pub struct SqliteStore {
    options: SqliteConnectOptions,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file and ensures the table exists.
    pub async fn create(options: SqliteConnectOptions) -> Result<Self, StorageError> {
        let store = Self {
            options: options.create_if_missing(true),
        };
        let mut conn = store.connect().await?;
        sqlx::query(CREATE_TABLE).execute(&mut conn).await?;
        conn.close().await?;
        info!("SQLite todo table ready at {}", store.options.get_filename().display());
        Ok(store)
    }

    async fn connect(&self) -> Result<SqliteConnection, StorageError> {
        self.options
            .connect()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl TodoStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn load_all(&self) -> Result<Vec<Todo>, StorageError> {
        let mut conn = self.connect().await?;
        let rows: Vec<TodoRow> = sqlx::query_as(SELECT_ALL).fetch_all(&mut conn).await?;
        release(conn).await;
        debug!("Loaded {} todos", rows.len());
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn insert(&self, text: &str) -> Result<Todo, StorageError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(INSERT)
            .bind(text)
            .bind(false)
            .execute(&mut conn)
            .await?;
        release(conn).await;
        let id = result.last_insert_rowid();
        debug!("Inserted todo {}", id);
        Ok(Todo::new(id, text))
    }

    async fn set_completed(&self, id: i64, completed: bool) -> Result<(), StorageError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(UPDATE_COMPLETED)
            .bind(completed)
            .bind(id)
            .execute(&mut conn)
            .await?;
        release(conn).await;
        debug!("Set todo {} completed={} ({} rows)", id, completed, result.rows_affected());
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(DELETE_BY_ID).bind(id).execute(&mut conn).await?;
        release(conn).await;
        debug!("Deleted todo {} ({} rows)", id, result.rows_affected());
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(DELETE_ALL).execute(&mut conn).await?;
        release(conn).await;
        debug!("Deleted all todos ({} rows)", result.rows_affected());
        Ok(())
    }
}

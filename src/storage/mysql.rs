//! MySQL backend. The table is expected to exist on the server.

use async_trait::async_trait;
use log::debug;
use sqlx::ConnectOptions;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};

use super::{
    DELETE_ALL, DELETE_BY_ID, INSERT, SELECT_ALL, StorageError, TodoRow, TodoStore,
    UPDATE_COMPLETED, release,
};
use crate::core::todo::Todo;

pub struct MySqlStore {
    options: MySqlConnectOptions,
}

impl MySqlStore {
    pub fn new(options: MySqlConnectOptions) -> Self {
        Self { options }
    }

    async fn connect(&self) -> Result<MySqlConnection, StorageError> {
        self.options
            .connect()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl TodoStore for MySqlStore {
    fn name(&self) -> &str {
        "mysql"
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
        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| StorageError::Query("inserted id out of range".to_string()))?;
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

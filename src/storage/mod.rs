//! # Storage Gateway
//!
//! Persists todos to the `Todos` table:
//!
//! ```text
//! Todos(Id integer primary key autoincrement,
//!       Text string not null,
//!       IsCompleted boolean not null default false)
//! ```
//!
//! Every operation opens its own connection, runs one statement and closes
//! the connection again. Nothing is pooled or cached. If a statement fails
//! the connection is dropped on the way out, which closes it as well. Once a
//! statement has succeeded its result stands: a failed close is only logged.
//!
//! Two backends implement [`TodoStore`]: MySQL for a shared server and
//! SQLite for a local file. [`open`] picks one from a [`DatabaseTarget`].

mod mysql;
mod sqlite;

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use log::{info, warn};
use sqlx::Connection;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::sqlite::SqliteConnectOptions;

use crate::core::action::{StoreOutcome, StoreRequest};
use crate::core::config::DatabaseTarget;
use crate::core::todo::Todo;

pub use mysql::MySqlStore;
pub use sqlite::SqliteStore;

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Target misconfigured (unknown scheme, malformed URL).
    Config(String),
    /// Could not reach the database.
    Connection(String),
    /// The statement itself failed.
    Query(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Config(msg) => write!(f, "database config error: {msg}"),
            StorageError::Connection(msg) => write!(f, "database unreachable: {msg}"),
            StorageError::Query(msg) => write!(f, "query failed: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Configuration(_) => StorageError::Config(e.to_string()),
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut => {
                StorageError::Connection(e.to_string())
            }
            _ => StorageError::Query(e.to_string()),
        }
    }
}

/// Row-level access to the todo table.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Short backend name for logs and the status bar.
    fn name(&self) -> &str;

    /// Every row, ordered by `Id`.
    async fn load_all(&self) -> Result<Vec<Todo>, StorageError>;

    /// Inserts an open todo and returns it with its assigned id.
    async fn insert(&self, text: &str) -> Result<Todo, StorageError>;

    /// Updates one row. An unknown id is not an error.
    async fn set_completed(&self, id: i64, completed: bool) -> Result<(), StorageError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError>;

    async fn delete_all(&self) -> Result<(), StorageError>;
}

/// Column mapping shared by both backends.
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    #[sqlx(rename = "Id")]
    id: i64,
    #[sqlx(rename = "Text")]
    text: String,
    #[sqlx(rename = "IsCompleted")]
    is_completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            text: row.text,
            completed: row.is_completed,
        }
    }
}

const SELECT_ALL: &str = "SELECT Id, Text, IsCompleted FROM Todos ORDER BY Id";
const INSERT: &str = "INSERT INTO Todos (Text, IsCompleted) VALUES (?, ?)";
const UPDATE_COMPLETED: &str = "UPDATE Todos SET IsCompleted = ? WHERE Id = ?";
const DELETE_BY_ID: &str = "DELETE FROM Todos WHERE Id = ?";
const DELETE_ALL: &str = "DELETE FROM Todos";

/// Close a connection whose statement already succeeded.
async fn release<C: Connection>(conn: C) {
    settle_close(conn.close()).await;
}

/// Await a close, logging instead of returning its error. Returns whether the
/// connection closed cleanly.
async fn settle_close(close: impl Future<Output = Result<(), sqlx::Error>>) -> bool {
    match close.await {
        Ok(()) => true,
        Err(e) => {
            warn!("Closing database connection failed after a successful statement: {}", e);
            false
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            StorageError::Config(format!("cannot create {}: {e}", parent.display()))
        })?;
    }
    Ok(())
}

/// Build the backend for a resolved target.
///
/// SQLite targets are created on demand and get the table bootstrapped, so
/// this may touch the filesystem. MySQL targets are not contacted until the
/// first operation.
pub async fn open(target: &DatabaseTarget) -> Result<Box<dyn TodoStore>, StorageError> {
    let store: Box<dyn TodoStore> = match target {
        DatabaseTarget::Url(url) if url.starts_with("mysql:") => {
            let options = MySqlConnectOptions::from_str(url)?;
            Box::new(MySqlStore::new(options))
        }
        DatabaseTarget::Url(url) if url.starts_with("sqlite:") => {
            let options = SqliteConnectOptions::from_str(url)?;
            ensure_parent_dir(options.get_filename())?;
            Box::new(SqliteStore::create(options).await?)
        }
        DatabaseTarget::Url(url) => {
            let scheme = url.split(':').next().unwrap_or_default();
            return Err(StorageError::Config(format!(
                "unsupported database scheme '{scheme}' (expected mysql or sqlite)"
            )));
        }
        DatabaseTarget::MySql(params) => {
            let mut options = MySqlConnectOptions::new()
                .host(&params.host)
                .port(params.port);
            if let Some(ref user) = params.user {
                options = options.username(user);
            }
            if let Some(ref password) = params.password {
                options = options.password(password);
            }
            if let Some(ref database) = params.database {
                options = options.database(database);
            }
            Box::new(MySqlStore::new(options))
        }
        DatabaseTarget::SqliteFile(path) => {
            ensure_parent_dir(path)?;
            let options = SqliteConnectOptions::new().filename(path);
            Box::new(SqliteStore::create(options).await?)
        }
    };
    info!("Opened {} todo store", store.name());
    Ok(store)
}

/// Run one mutation against the store and describe what happened.
pub async fn execute(
    store: &dyn TodoStore,
    request: StoreRequest,
) -> Result<StoreOutcome, StorageError> {
    match request {
        StoreRequest::Insert { text } => store.insert(&text).await.map(StoreOutcome::Inserted),
        StoreRequest::SetCompleted { id, completed } => {
            store.set_completed(id, completed).await?;
            Ok(StoreOutcome::CompletedSet { id, completed })
        }
        StoreRequest::DeleteById { id } => {
            store.delete_by_id(id).await?;
            Ok(StoreOutcome::Deleted { id })
        }
        StoreRequest::DeleteAll => {
            store.delete_all().await?;
            Ok(StoreOutcome::Cleared)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStore;

    #[tokio::test]
    async fn test_execute_insert_returns_assigned_id() {
        let store = MemoryStore::new();
        let outcome = execute(
            &store,
            StoreRequest::Insert {
                text: "Write report".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, StoreOutcome::Inserted(Todo::new(1, "Write report")));
        assert_eq!(store.rows(), vec![Todo::new(1, "Write report")]);
    }

    #[tokio::test]
    async fn test_execute_set_completed_and_delete() {
        let store = MemoryStore::with_rows(vec![Todo::new(1, "a"), Todo::new(2, "b")]);

        let outcome = execute(&store, StoreRequest::SetCompleted { id: 2, completed: true })
            .await
            .unwrap();
        assert_eq!(outcome, StoreOutcome::CompletedSet { id: 2, completed: true });
        assert!(store.rows()[1].completed);

        let outcome = execute(&store, StoreRequest::DeleteById { id: 1 }).await.unwrap();
        assert_eq!(outcome, StoreOutcome::Deleted { id: 1 });
        assert_eq!(store.rows().len(), 1);

        let outcome = execute(&store, StoreRequest::DeleteAll).await.unwrap();
        assert_eq!(outcome, StoreOutcome::Cleared);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_execute_propagates_failure() {
        let store = MemoryStore::new();
        store.set_failing(true);
        let result = execute(&store, StoreRequest::DeleteAll).await;
        assert!(matches!(result, Err(StorageError::Connection(_))));
    }

    #[tokio::test]
    async fn test_open_rejects_unknown_scheme() {
        let result = open(&DatabaseTarget::Url("postgres://localhost/todos".to_string())).await;
        match result {
            Err(StorageError::Config(msg)) => assert!(msg.contains("postgres")),
            Err(other) => panic!("Expected Config error, got {other}"),
            Ok(_) => panic!("Expected Config error, got a store"),
        }
    }

    #[tokio::test]
    async fn test_failed_close_is_not_an_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "link dropped");
        assert!(!settle_close(async { Err(sqlx::Error::Io(io)) }).await);
        assert!(settle_close(async { Ok(()) }).await);
    }

    #[tokio::test]
    async fn test_release_closes_real_connection() {
        use sqlx::ConnectOptions;
        let conn = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .connect()
            .await
            .unwrap();
        release(conn).await;
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a").join("b").join("todos.db");
        ensure_parent_dir(&file).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
        ensure_parent_dir(Path::new("todos.db")).unwrap();
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            StorageError::Connection("refused".to_string()).to_string(),
            "database unreachable: refused"
        );
        assert_eq!(
            StorageError::Query("syntax".to_string()).to_string(),
            "query failed: syntax"
        );
    }

    #[test]
    fn test_sqlx_io_error_maps_to_connection() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StorageError::from(sqlx::Error::Io(io));
        assert!(matches!(err, StorageError::Connection(_)));

        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::Query(_)));
    }
}

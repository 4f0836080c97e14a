//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::core::state::App;
use crate::core::todo::Todo;
use crate::storage::{StorageError, TodoStore};

/// An in-memory store for tests that don't need a real database.
///
/// `set_failing(true)` makes every operation fail with a connection error,
/// leaving the rows untouched.
pub struct MemoryStore {
    rows: Mutex<Vec<Todo>>,
    next_id: Mutex<i64>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<Todo>) -> Self {
        let next_id = rows.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(rows),
            next_id: Mutex::new(next_id),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the stored rows.
    pub fn rows(&self) -> Vec<Todo> {
        self.rows.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::Connection("store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load_all(&self) -> Result<Vec<Todo>, StorageError> {
        self.check()?;
        Ok(self.rows())
    }

    async fn insert(&self, text: &str) -> Result<Todo, StorageError> {
        self.check()?;
        let mut next_id = self.next_id.lock().unwrap();
        let todo = Todo::new(*next_id, text);
        *next_id += 1;
        self.rows.lock().unwrap().push(todo.clone());
        Ok(todo)
    }

    async fn set_completed(&self, id: i64, completed: bool) -> Result<(), StorageError> {
        self.check()?;
        if let Some(todo) = self.rows.lock().unwrap().iter_mut().find(|t| t.id == id) {
            todo.completed = completed;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
        self.check()?;
        self.rows.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        self.check()?;
        self.rows.lock().unwrap().clear();
        Ok(())
    }
}

/// `count` open todos with ids `1..=count` and texts `Todo 0`, `Todo 1`, ...
pub fn sample_todos(count: usize) -> Vec<Todo> {
    (0..count)
        .map(|i| Todo::new(i as i64 + 1, format!("Todo {i}")))
        .collect()
}

/// Creates a test App holding `sample_todos(count)`.
pub fn test_app(count: usize) -> App {
    App::new(sample_todos(count))
}

//! SQLite-backed task store via libsql. Implements TaskStorePort.
//!
//! Single `tasks` table keyed by uuid; every mutation commits before the call
//! returns, so a reopened store sees all previously committed tasks. WAL mode
//! allows concurrent readers while SQLite serializes writers, which gives
//! same-id mutations last-committed-wins without torn rows.

use crate::domain::{DomainError, Priority, Task, TaskDraft, TaskFilter, TaskPatch};
use crate::ports::TaskStorePort;
use chrono::NaiveDate;
use libsql::{params, params_from_iter, Database, Row, Value};
use std::path::Path;
use tracing::info;

const DATE_FMT: &str = "%Y-%m-%d";

const TASKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    due_date TEXT NOT NULL,
    priority TEXT NOT NULL DEFAULT 'medium',
    completed INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
)"#;
const TASKS_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_tasks_due ON tasks (due_date)";

/// SQLite task store. One database file (todo.db) in the given base directory.
pub struct SqliteTaskStore {
    db: Database,
}

impl SqliteTaskStore {
    /// Connect to (or create) the database and ensure the schema exists.
    /// Call once at startup; the returned store is safe to share via Arc.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Store(e.to_string()))?;
        let db_path = base.join("todo.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Store(e.to_string()))?;

        // WAL enables concurrent readers + one writer; synchronous=NORMAL is
        // safe with WAL. PRAGMA returns a row, so query and drain it.
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            let mut rows = conn
                .query(pragma, ())
                .await
                .map_err(|e| DomainError::Store(format!("pragma failed: {}", e)))?;
            while rows
                .next()
                .await
                .map_err(|e| DomainError::Store(e.to_string()))?
                .is_some()
            {}
        }

        conn.execute(TASKS_TABLE, ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        conn.execute(TASKS_INDEX, ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        info!(path = %db_path.display(), "task store connected with WAL mode");

        Ok(Self { db })
    }

    fn conn(&self) -> Result<libsql::Connection, DomainError> {
        self.db.connect().map_err(|e| DomainError::Store(e.to_string()))
    }

    fn row_to_task(row: &Row) -> Result<Task, DomainError> {
        let id: String = row.get(0).map_err(|e| DomainError::Store(e.to_string()))?;
        let title: String = row.get(1).map_err(|e| DomainError::Store(e.to_string()))?;
        let description: String = row.get::<String>(2).unwrap_or_default();
        let due_raw: String = row.get(3).map_err(|e| DomainError::Store(e.to_string()))?;
        let priority_raw: String = row.get(4).map_err(|e| DomainError::Store(e.to_string()))?;
        let completed: i64 = row.get(5).map_err(|e| DomainError::Store(e.to_string()))?;
        let created_at: i64 = row.get(6).map_err(|e| DomainError::Store(e.to_string()))?;
        let updated_at: i64 = row.get(7).map_err(|e| DomainError::Store(e.to_string()))?;

        let due_date = NaiveDate::parse_from_str(&due_raw, DATE_FMT)
            .map_err(|e| DomainError::Store(format!("corrupt due_date '{}': {}", due_raw, e)))?;
        let priority = Priority::parse(&priority_raw)
            .ok_or_else(|| DomainError::Store(format!("corrupt priority '{}'", priority_raw)))?;

        Ok(Task {
            id,
            title,
            description,
            due_date,
            priority,
            completed: completed != 0,
            created_at,
            updated_at,
        })
    }

    fn now_epoch() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, due_date, priority, completed, created_at, updated_at FROM tasks";

#[async_trait::async_trait]
impl TaskStorePort for SqliteTaskStore {
    async fn add(&self, draft: TaskDraft) -> Result<Task, DomainError> {
        let conn = self.conn()?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = Self::now_epoch();
        let task = Task {
            id: id.clone(),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            completed: false,
            created_at: now,
            updated_at: now,
        };

        conn.execute(
            r#"
            INSERT INTO tasks (id, title, description, due_date, priority, completed, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                task.id.as_str(),
                task.title.as_str(),
                task.description.as_str(),
                task.due_date.format(DATE_FMT).to_string(),
                task.priority.as_str(),
                i64::from(task.completed),
                task.created_at,
                task.updated_at
            ],
        )
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;

        info!(task_id = %id, title = %task.title, "task added");
        Ok(task)
    }

    async fn get(&self, id: &str) -> Result<Task, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(&format!("{} WHERE id = ?1", SELECT_COLUMNS), params![id])
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        match rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            Some(row) => Self::row_to_task(&row),
            None => Err(DomainError::NotFound(format!("task '{}'", id))),
        }
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, DomainError> {
        // Read-modify-write inside a transaction. SQLite serializes writers,
        // so concurrent same-id updates commit last-wins without torn rows.
        let conn = self.conn()?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        let mut rows = tx
            .query(&format!("{} WHERE id = ?1", SELECT_COLUMNS), params![id])
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let row = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("task '{}'", id)))?;
        let mut task = Self::row_to_task(&row)?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task.updated_at = Self::now_epoch();

        tx.execute(
            r#"
            UPDATE tasks
            SET title = ?2, description = ?3, due_date = ?4, priority = ?5, completed = ?6, updated_at = ?7
            WHERE id = ?1
            "#,
            params![
                task.id.as_str(),
                task.title.as_str(),
                task.description.as_str(),
                task.due_date.format(DATE_FMT).to_string(),
                task.priority.as_str(),
                i64::from(task.completed),
                task.updated_at
            ],
        )
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        Ok(task)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let affected = conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        if affected == 0 {
            return Err(DomainError::NotFound(format!("task '{}'", id)));
        }
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, DomainError> {
        let mut sql = format!("{} WHERE 1=1", SELECT_COLUMNS);
        let mut values: Vec<Value> = Vec::new();

        if let Some(completed) = filter.completed {
            sql.push_str(&format!(" AND completed = ?{}", values.len() + 1));
            values.push(Value::from(i64::from(completed)));
        }
        if let Some(due_before) = filter.due_before {
            sql.push_str(&format!(" AND due_date < ?{}", values.len() + 1));
            values.push(Value::from(due_before.format(DATE_FMT).to_string()));
        }
        if let Some(priority) = filter.priority {
            sql.push_str(&format!(" AND priority = ?{}", values.len() + 1));
            values.push(Value::from(priority.as_str().to_string()));
        }
        sql.push_str(
            " ORDER BY due_date ASC, CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END",
        );

        let conn = self.conn()?;
        let mut rows = conn
            .query(&sql, params_from_iter(values))
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        let mut tasks = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            tasks.push(Self::row_to_task(&row)?);
        }
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn draft(title: &str, due: NaiveDate, priority: Priority) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: "desc".to_string(),
            due_date: due,
            priority,
        }
    }

    #[tokio::test]
    async fn add_then_get_returns_committed_task() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTaskStore::connect(dir.path()).await.unwrap();

        let task = store
            .add(draft("Complete project", date(1), Priority::High))
            .await
            .unwrap();
        let fetched = store.get(&task.id).await.unwrap();
        assert_eq!(fetched, task);
        assert!(!fetched.completed);
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTaskStore::connect(dir.path()).await.unwrap();

        let task = store
            .add(draft("Write docs", date(3), Priority::Low))
            .await
            .unwrap();
        let patch = TaskPatch {
            priority: Some(Priority::High),
            ..Default::default()
        };
        let updated = store.update(&task.id, patch).await.unwrap();

        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.title, task.title);
        assert_eq!(updated.description, task.description);
        assert_eq!(updated.due_date, task.due_date);
        assert_eq!(updated.completed, task.completed);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found_and_second_delete_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTaskStore::connect(dir.path()).await.unwrap();

        let task = store.add(draft("Temp", date(2), Priority::Medium)).await.unwrap();
        store.delete(&task.id).await.unwrap();

        assert!(matches!(
            store.get(&task.id).await.unwrap_err(),
            DomainError::NotFound(_)
        ));
        assert!(matches!(
            store.delete(&task.id).await.unwrap_err(),
            DomainError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn list_combines_filters_with_and_semantics() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTaskStore::connect(dir.path()).await.unwrap();

        let a = store.add(draft("a", date(1), Priority::High)).await.unwrap();
        let b = store.add(draft("b", date(1), Priority::Low)).await.unwrap();
        let c = store.add(draft("c", date(9), Priority::High)).await.unwrap();
        store
            .update(
                &b.id,
                TaskPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let all = store.list(&TaskFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let filter = TaskFilter {
            completed: Some(false),
            due_before: Some(date(2)),
            priority: Some(Priority::High),
        };
        let matching = store.list(&filter).await.unwrap();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, a.id);

        let due_filter = TaskFilter {
            due_before: Some(date(2)),
            ..Default::default()
        };
        let due = store.list(&due_filter).await.unwrap();
        assert_eq!(due.len(), 2);
        assert!(due.iter().all(|t| t.id != c.id));
    }

    #[tokio::test]
    async fn store_survives_reopen_with_same_ids() {
        let dir = tempfile::tempdir().unwrap();
        let task = {
            let store = SqliteTaskStore::connect(dir.path()).await.unwrap();
            store
                .add(draft("Durable", date(7), Priority::Medium))
                .await
                .unwrap()
        };

        let reopened = SqliteTaskStore::connect(dir.path()).await.unwrap();
        let fetched = reopened.get(&task.id).await.unwrap();
        assert_eq!(fetched, task);
    }
}

//! The task record.

/// A single to-do item.
///
/// `id` and `created_at` are assigned at creation and never change; `title`
/// and `completed` are mutable through the update endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Task {
    /// Create a task stamped with the current wall-clock time.
    pub fn new(id: u64, title: String, completed: bool) -> Self {
        Self {
            id,
            title,
            completed,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

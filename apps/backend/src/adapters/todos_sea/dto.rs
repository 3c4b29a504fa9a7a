//! DTOs for todos_sea adapter.

#[derive(Debug, Clone)]
pub struct TodoCreate {
    pub user_id: String,
    pub title: String,
    pub completed: bool,
}

/// Partial update; `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

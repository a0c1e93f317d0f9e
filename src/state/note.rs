use chrono::{DateTime, Local};

/// A single note in the demo list
#[derive(Debug, Clone)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Local>,
}

impl Note {
    pub fn new(id: u64, title: &str, body: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            body: body.to_string(),
            created_at: Local::now(),
        }
    }

    /// Creation time as HH:MM:SS
    pub fn created_display(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Video row joined with author and category names.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VideoRow {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub youtube_id: String,
    pub description: String,
    pub thumbnail: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub category: String,
    pub category_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub youtube_id: String,
    pub description: String,
    pub thumbnail: String,
    pub category_id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub youtube_id: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub category_id: Option<i32>,
    pub status: Option<String>,
}

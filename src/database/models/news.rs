use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Flat row shape produced by the news list/detail queries, which join the
/// author and category names.
#[derive(Debug, Clone, FromRow)]
pub struct NewsRow {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub category: String,
    pub category_id: i32,
    pub video_id: Option<String>,
    pub video_title: Option<String>,
    pub video_description: Option<String>,
}

/// Client-facing article shape; the optional embedded video is nested the way
/// the admin frontend expects it.
#[derive(Debug, Clone, Serialize)]
pub struct NewsResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub category: String,
    pub category_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<EmbeddedVideo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbeddedVideo {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<NewsRow> for NewsResponse {
    fn from(row: NewsRow) -> Self {
        let video = row.video_id.map(|id| EmbeddedVideo {
            id,
            title: row.video_title,
            description: row.video_description,
        });
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt,
            content: row.content,
            image: row.image,
            author: row.author,
            created_at: row.created_at,
            status: row.status,
            category: row.category,
            category_id: row.category_id,
            video,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateNews {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub category_id: i32,
    pub video_id: Option<String>,
    pub video_title: Option<String>,
    pub video_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    pub status: Option<String>,
    pub video_id: Option<String>,
    pub video_title: Option<String>,
    pub video_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(video_id: Option<&str>) -> NewsRow {
        NewsRow {
            id: 1,
            title: "t".into(),
            slug: "t--20240101000000".into(),
            excerpt: String::new(),
            content: String::new(),
            image: String::new(),
            author: "Ana".into(),
            created_at: Utc::now(),
            status: "draft".into(),
            category: "General".into(),
            category_id: 1,
            video_id: video_id.map(String::from),
            video_title: video_id.map(|_| "clip".to_string()),
            video_description: None,
        }
    }

    #[test]
    fn embedded_video_nests_only_when_present() {
        let with = NewsResponse::from(row(Some("yt123")));
        let without = NewsResponse::from(row(None));
        assert_eq!(with.video.as_ref().map(|v| v.id.as_str()), Some("yt123"));
        assert!(without.video.is_none());
    }
}

pub mod category;
pub mod news;
pub mod user;
pub mod video;

use serde::{Deserialize, Serialize};

/// Lifecycle state for content records. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

/// Activation state for users and categories. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_status_round_trips() {
        for s in ["draft", "published", "archived"] {
            assert_eq!(ContentStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(ContentStatus::parse("borrador").is_none());
        assert!(ContentStatus::parse("").is_none());
    }

    #[test]
    fn account_status_round_trips() {
        for s in ["active", "inactive"] {
            assert_eq!(AccountStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(AccountStatus::parse("disabled").is_none());
    }
}

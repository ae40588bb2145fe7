pub mod auth;
pub mod categories;
pub mod news;
pub mod users;
pub mod videos;

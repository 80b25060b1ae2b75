pub mod root;
pub mod auth;
pub mod users;
pub mod announcements;
pub mod comments;
pub mod stories;
pub mod events;

pub mod activity;
pub mod album;
pub mod app_user;
pub mod collaboration;
pub mod playlist;
pub mod queue_message;
pub mod song;

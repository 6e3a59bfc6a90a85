pub mod access;
pub mod album;
pub mod auth;
pub mod collaboration;
pub mod export;
pub mod playlist;

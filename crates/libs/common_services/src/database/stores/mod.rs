pub mod activity_store;
pub mod album_store;
pub mod collaboration_store;
pub mod playlist_store;
pub mod song_store;
pub mod user_store;

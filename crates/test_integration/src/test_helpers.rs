use crate::runner::context::test_context::TestContext;
use async_trait::async_trait;
use color_eyre::Result;
use common_services::api::auth::token::create_access_token;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use worker::mailer::{ExportMail, MailTransport};

pub const ALICE: &str = "user-alice";
pub const BOB: &str = "user-bob";
pub const CAROL: &str = "user-carol";
pub const SONG_ONE: &str = "song-1";
pub const SONG_TWO: &str = "song-2";
pub const ALBUM: &str = "album-1";

/// Inserts the users, album and songs that the catalog and credential services would own.
pub async fn seed_catalog(pool: &PgPool) -> Result<()> {
    for (id, username) in [(ALICE, "alice"), (BOB, "bob"), (CAROL, "carol")] {
        sqlx::query(
            "INSERT INTO users (id, username, password, fullname) VALUES ($1, $2, 'x', $2)",
        )
        .bind(id)
        .bind(username)
        .execute(pool)
        .await?;
    }

    sqlx::query("INSERT INTO albums (id, name, year) VALUES ($1, 'Viva la Vida', 2008)")
        .bind(ALBUM)
        .execute(pool)
        .await?;

    for (id, title, performer) in [(SONG_ONE, "A", "X"), (SONG_TWO, "B", "Y")] {
        sqlx::query(
            r"
            INSERT INTO songs (id, title, year, genre, performer, album_id)
            VALUES ($1, $2, 2008, 'Pop', $3, $4)
            ",
        )
        .bind(id)
        .bind(title)
        .bind(performer)
        .bind(ALBUM)
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub fn token_for(context: &TestContext, user_id: &str) -> Result<String> {
    Ok(create_access_token(
        user_id,
        &context.settings.secrets.jwt,
        chrono::Duration::minutes(10),
    )?)
}

pub fn url(context: &TestContext, path: &str) -> String {
    format!("{}{path}", context.base_url)
}

/// Creates a playlist through the API and returns its id.
pub async fn create_playlist(context: &TestContext, token: &str, name: &str) -> Result<String> {
    let response = context
        .http_client
        .post(url(context, "/playlists"))
        .bearer_auth(token)
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await?
        .error_for_status()?;
    let body: serde_json::Value = response.json().await?;
    Ok(body["playlistId"].as_str().unwrap_or_default().to_owned())
}

/// Keeps every mail instead of sending it.
#[derive(Default, Clone)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<ExportMail>>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<ExportMail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, mail: ExportMail) -> Result<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(mail);
        }
        Ok(())
    }
}

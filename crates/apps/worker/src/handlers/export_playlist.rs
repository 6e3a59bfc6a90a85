//! Consumer side of the playlist export pipeline.
//!
//! A message moves `Idle -> FetchingData -> Sending -> Ack` on success. Any failure moves it
//! to `Fail -> NackDiscard`: it is rejected and never requeued.

use crate::context::WorkerContext;
use crate::handlers::Disposition;
use crate::mailer::{ExportMail, MailTransport};
use async_trait::async_trait;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use common_services::database::playlist::Playlist;
use common_services::database::playlist_store::PlaylistStore;
use common_services::database::queue_message::QueueMessage;
use common_services::database::song::SongSummary;
use common_types::{ExportPlaylistPayload, ExportedPlaylist, PlaylistExport};
use sqlx::PgPool;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Read access to the playlist data an export needs.
#[async_trait]
pub trait ExportSource: Send + Sync {
    async fn find_playlist(&self, playlist_id: &str) -> Result<Option<Playlist>>;
    async fn list_songs(&self, playlist_id: &str) -> Result<Vec<SongSummary>>;
}

#[async_trait]
impl ExportSource for PgPool {
    async fn find_playlist(&self, playlist_id: &str) -> Result<Option<Playlist>> {
        Ok(PlaylistStore::find_by_id(self, playlist_id).await?)
    }

    async fn list_songs(&self, playlist_id: &str) -> Result<Vec<SongSummary>> {
        Ok(PlaylistStore::list_songs(self, playlist_id).await?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    FetchingData,
    Sending,
    Ack,
    Fail,
    NackDiscard,
}

/// The states one message went through, and why it failed if it did.
#[derive(Debug)]
pub struct ExportRun {
    pub states: Vec<ExportState>,
    pub error: Option<String>,
}

impl ExportRun {
    fn new() -> Self {
        Self {
            states: vec![ExportState::Idle],
            error: None,
        }
    }

    fn transition(&mut self, next: ExportState) {
        debug!("Export state {:?} -> {:?}", self.state(), next);
        self.states.push(next);
    }

    #[must_use]
    pub fn state(&self) -> ExportState {
        self.states.last().copied().unwrap_or(ExportState::Idle)
    }

    #[must_use]
    pub fn disposition(self) -> Disposition {
        match self.state() {
            ExportState::Ack => Disposition::Ack,
            _ => Disposition::Reject(
                self.error
                    .unwrap_or_else(|| "export did not complete".to_owned()),
            ),
        }
    }
}

pub async fn handle(context: &WorkerContext, message: &QueueMessage) -> ExportRun {
    process_export(
        &context.pool,
        context.mailer.as_ref(),
        &context.settings.mail.from,
        &message.body,
        context.settings.consumer.delivery_timeout,
    )
    .await
}

/// Runs one export message through the state machine. Never panics on bad input.
pub async fn process_export(
    source: &dyn ExportSource,
    mailer: &dyn MailTransport,
    from: &str,
    body: &[u8],
    delivery_timeout: Duration,
) -> ExportRun {
    let mut run = ExportRun::new();
    match export(&mut run, source, mailer, from, body, delivery_timeout).await {
        Ok(()) => run.transition(ExportState::Ack),
        Err(e) => {
            warn!("Export failed: {:#}", e);
            run.transition(ExportState::Fail);
            run.error = Some(format!("{e:#}"));
            run.transition(ExportState::NackDiscard);
        }
    }
    run
}

async fn export(
    run: &mut ExportRun,
    source: &dyn ExportSource,
    mailer: &dyn MailTransport,
    from: &str,
    body: &[u8],
    delivery_timeout: Duration,
) -> Result<()> {
    let payload = ExportPlaylistPayload::from_body(body).wrap_err("Malformed export message")?;

    run.transition(ExportState::FetchingData);
    let playlist = source
        .find_playlist(&payload.playlist_id)
        .await?
        .ok_or_else(|| eyre!("Playlist {} not found", payload.playlist_id))?;
    let songs = source.list_songs(&playlist.id).await?;

    let export = PlaylistExport {
        playlist: ExportedPlaylist {
            id: playlist.id,
            name: playlist.name,
            songs: songs.into_iter().map(Into::into).collect(),
        },
    };
    let mail = ExportMail::playlist_export(from, &payload.target_email, export.to_attachment()?);

    run.transition(ExportState::Sending);
    timeout(delivery_timeout, mailer.send(mail))
        .await
        .map_err(|_| eyre!("Mail delivery timed out after {:?}", delivery_timeout))?
        .wrap_err("Mail delivery failed")?;

    info!(
        "📨 Sent export of {} to {}",
        payload.playlist_id, payload.target_email
    );
    Ok(())
}

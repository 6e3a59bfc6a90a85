use crate::runner::context::test_context::TestContext;
use crate::test_helpers::{ALICE, BOB, RecordingMailer, SONG_ONE, create_playlist, token_for, url};
use color_eyre::Result;
use common_services::job_queue::{declare_queue, publish};
use common_types::PlaylistExport;
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use worker::jobs::management::{ack_message, claim_messages, reject_message};
use worker::mailer::{EXPORT_ATTACHMENT_NAME, EXPORT_SUBJECT};
use worker::worker::create_worker;

/// Runs one worker until the queue is empty, delivering into `mailer`.
async fn drain_queue(context: &TestContext, mailer: &RecordingMailer) -> Result<()> {
    create_worker(
        context.pool.clone(),
        context.settings.clone(),
        Arc::new(mailer.clone()),
        true,
    )
    .await
}

async fn pending_messages(context: &TestContext) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM queue_message WHERE queue = $1 AND status <> 'rejected'",
    )
    .bind(&context.settings.queue.export_queue)
    .fetch_one(&context.pool)
    .await?)
}

pub async fn test_export_requires_owner(context: &TestContext) -> Result<()> {
    // ARRANGE
    let alice = token_for(context, ALICE)?;
    let bob = token_for(context, BOB)?;
    let playlist_id = create_playlist(context, &alice, "Private").await?;
    let export_url = url(context, &format!("/export/playlists/{playlist_id}"));
    let body = json!({ "targetEmail": "bob@example.com" });

    // ACT
    let by_stranger = context
        .http_client
        .post(&export_url)
        .bearer_auth(&bob)
        .json(&body)
        .send()
        .await?;
    let unknown_playlist = context
        .http_client
        .post(url(context, "/export/playlists/playlist-does-not-exist"))
        .bearer_auth(&alice)
        .json(&body)
        .send()
        .await?;
    let bad_email = context
        .http_client
        .post(&export_url)
        .bearer_auth(&alice)
        .json(&json!({ "targetEmail": "not-an-email" }))
        .send()
        .await?;

    // ASSERT
    assert_eq!(by_stranger.status(), StatusCode::FORBIDDEN);
    assert_eq!(unknown_playlist.status(), StatusCode::NOT_FOUND);
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);
    assert_eq!(pending_messages(context).await?, 0);

    Ok(())
}

pub async fn test_export_delivery(context: &TestContext) -> Result<()> {
    // ARRANGE
    let alice = token_for(context, ALICE)?;
    let playlist_id = create_playlist(context, &alice, "Export me").await?;
    context
        .http_client
        .post(url(context, &format!("/playlists/{playlist_id}/songs")))
        .bearer_auth(&alice)
        .json(&json!({ "songId": SONG_ONE }))
        .send()
        .await?
        .error_for_status()?;
    let mailer = RecordingMailer::default();

    // ACT
    let accepted = context
        .http_client
        .post(url(context, &format!("/export/playlists/{playlist_id}")))
        .bearer_auth(&alice)
        .json(&json!({ "targetEmail": "alice@example.com" }))
        .send()
        .await?;
    let status = accepted.status();
    let accepted_body: serde_json::Value = accepted.json().await?;
    let queued = pending_messages(context).await?;
    drain_queue(context, &mailer).await?;

    // ASSERT
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(accepted_body["status"], "success");
    assert_eq!(queued, 1);
    assert_eq!(pending_messages(context).await?, 0);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(sent[0].from, context.settings.mail.from);
    assert_eq!(sent[0].subject, EXPORT_SUBJECT);
    assert_eq!(sent[0].attachment_name, EXPORT_ATTACHMENT_NAME);

    let export: PlaylistExport = serde_json::from_str(&sent[0].attachment)?;
    assert_eq!(export.playlist.id, playlist_id);
    assert_eq!(export.playlist.name, "Export me");
    assert_eq!(export.playlist.songs.len(), 1);
    assert_eq!(export.playlist.songs[0].id, SONG_ONE);
    assert_eq!(export.playlist.songs[0].title, "A");
    assert_eq!(export.playlist.songs[0].performer, "X");

    Ok(())
}

pub async fn test_malformed_message_is_dead_lettered(context: &TestContext) -> Result<()> {
    // ARRANGE
    let queue = &context.settings.queue.export_queue;
    declare_queue(&context.pool, queue).await?;
    let message_id = publish(&context.pool, queue, b"definitely not json").await?;
    let mailer = RecordingMailer::default();

    // ACT
    drain_queue(context, &mailer).await?;

    // ASSERT
    let (status, last_error): (String, Option<String>) =
        sqlx::query_as("SELECT status, last_error FROM queue_message WHERE id = $1")
            .bind(message_id)
            .fetch_one(&context.pool)
            .await?;
    assert_eq!(status, "rejected");
    assert!(last_error.is_some());
    assert!(mailer.sent().is_empty());
    assert_eq!(pending_messages(context).await?, 0);

    Ok(())
}

pub async fn test_declare_queue_is_idempotent(context: &TestContext) -> Result<()> {
    // ARRANGE
    let queue = "export:integration-declare";

    // ACT
    let first = declare_queue(&context.pool, queue).await?;
    let second = declare_queue(&context.pool, queue).await?;

    // ASSERT
    assert!(first);
    assert!(!second);

    Ok(())
}

pub async fn test_stale_delivery_is_redelivered(context: &TestContext) -> Result<()> {
    // ARRANGE
    let queue = "export:integration-redelivery";
    let timeout = Duration::from_secs(60);
    declare_queue(&context.pool, queue).await?;
    let message_id = publish(&context.pool, queue, b"{}").await?;
    let first = claim_messages(&context.pool, queue, "worker-a", 1, timeout).await?;

    // ACT
    let while_alive = claim_messages(&context.pool, queue, "worker-b", 1, timeout).await?;
    sqlx::query(
        "UPDATE queue_message SET last_heartbeat = now() - interval '10 minutes' WHERE id = $1",
    )
    .bind(message_id)
    .execute(&context.pool)
    .await?;
    let after_stale = claim_messages(&context.pool, queue, "worker-b", 1, timeout).await?;
    let late_ack = ack_message(&context.pool, &first[0], "worker-a").await?;
    let rejected = reject_message(&context.pool, &after_stale[0], "worker-b", "test").await?;
    let after_reject = claim_messages(&context.pool, queue, "worker-c", 1, Duration::ZERO).await?;

    // ASSERT
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].delivery_count, 1);
    assert!(while_alive.is_empty());
    assert_eq!(after_stale.len(), 1);
    assert_eq!(after_stale[0].id, message_id);
    assert_eq!(after_stale[0].delivery_count, 2);
    assert!(!late_ack);
    assert!(rejected);
    assert!(after_reject.is_empty());

    Ok(())
}

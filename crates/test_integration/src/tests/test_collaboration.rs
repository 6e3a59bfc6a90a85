use crate::runner::context::test_context::TestContext;
use crate::test_helpers::{ALICE, BOB, CAROL, SONG_ONE, create_playlist, token_for, url};
use color_eyre::Result;
use common_services::api::access::guard::{PlaylistRole, can_mutate};
use reqwest::StatusCode;
use serde_json::json;

pub async fn test_grant_and_revoke(context: &TestContext) -> Result<()> {
    // ARRANGE
    let alice = token_for(context, ALICE)?;
    let bob = token_for(context, BOB)?;
    let playlist_id = create_playlist(context, &alice, "Shared").await?;
    let grant = json!({ "playlistId": playlist_id, "userId": BOB });
    let songs_url = url(context, &format!("/playlists/{playlist_id}/songs"));

    // ACT
    let granted = context
        .http_client
        .post(url(context, "/collaborations"))
        .bearer_auth(&alice)
        .json(&grant)
        .send()
        .await?;
    let granted_twice = context
        .http_client
        .post(url(context, "/collaborations"))
        .bearer_auth(&alice)
        .json(&grant)
        .send()
        .await?;
    let bob_grants_carol = context
        .http_client
        .post(url(context, "/collaborations"))
        .bearer_auth(&bob)
        .json(&json!({ "playlistId": playlist_id, "userId": CAROL }))
        .send()
        .await?;
    let bob_adds = context
        .http_client
        .post(&songs_url)
        .bearer_auth(&bob)
        .json(&json!({ "songId": SONG_ONE }))
        .send()
        .await?;
    let bob_may_mutate =
        can_mutate(&context.pool, &playlist_id, BOB, PlaylistRole::OwnerOrCollaborator).await?;
    let revoked = context
        .http_client
        .delete(url(context, "/collaborations"))
        .bearer_auth(&alice)
        .json(&grant)
        .send()
        .await?;
    let bob_adds_after_revoke = context
        .http_client
        .post(&songs_url)
        .bearer_auth(&bob)
        .json(&json!({ "songId": SONG_ONE }))
        .send()
        .await?;
    let bob_may_mutate_after_revoke =
        can_mutate(&context.pool, &playlist_id, BOB, PlaylistRole::OwnerOrCollaborator).await?;

    // ASSERT
    assert_eq!(granted.status(), StatusCode::CREATED);
    assert_eq!(granted_twice.status(), StatusCode::CONFLICT);
    assert_eq!(bob_grants_carol.status(), StatusCode::FORBIDDEN);
    assert_eq!(bob_adds.status(), StatusCode::CREATED);
    assert!(bob_may_mutate);
    assert_eq!(revoked.status(), StatusCode::OK);
    assert_eq!(bob_adds_after_revoke.status(), StatusCode::FORBIDDEN);
    assert!(!bob_may_mutate_after_revoke);

    Ok(())
}

pub async fn test_grant_unknown_user(context: &TestContext) -> Result<()> {
    // ARRANGE
    let alice = token_for(context, ALICE)?;
    let playlist_id = create_playlist(context, &alice, "Nobody").await?;

    // ACT
    let unknown_user = context
        .http_client
        .post(url(context, "/collaborations"))
        .bearer_auth(&alice)
        .json(&json!({ "playlistId": playlist_id, "userId": "user-nobody" }))
        .send()
        .await?;
    let revoke_missing = context
        .http_client
        .delete(url(context, "/collaborations"))
        .bearer_auth(&alice)
        .json(&json!({ "playlistId": playlist_id, "userId": CAROL }))
        .send()
        .await?;

    // ASSERT
    assert_eq!(unknown_user.status(), StatusCode::NOT_FOUND);
    assert_eq!(revoke_missing.status(), StatusCode::NOT_FOUND);

    Ok(())
}

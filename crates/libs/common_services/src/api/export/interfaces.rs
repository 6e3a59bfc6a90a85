use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, Validate, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlaylistRequest {
    /// Where the export is mailed.
    #[validate(email)]
    #[schema(format = "email", example = "alice@example.com")]
    pub target_email: String,
}

/// Returned as soon as the job is on the queue. Delivery happens later.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequestAccepted {
    pub status: String,
    pub message: String,
}

impl Default for ExportRequestAccepted {
    fn default() -> Self {
        Self {
            status: "success".to_owned(),
            message: "Your export request is being processed".to_owned(),
        }
    }
}

#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod context;
pub mod handlers;
pub mod jobs;
pub mod mailer;
pub mod worker;

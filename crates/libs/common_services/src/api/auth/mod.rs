pub mod error;
pub mod interfaces;
pub mod token;

//! Dataset — the Job Store Gateway over the external scraper/dataset service.
//!
//! The service owns persistence; this side only reads the job list, reports
//! dataset presence and relays scrape control.

pub mod gateway;
pub mod handlers;

use thiserror::Error;

pub use gateway::{DatasetFetch, DatasetGateway};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dataset service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response could not be read as a job list. Distinct from a missing dataset.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

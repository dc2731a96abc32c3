use engine::EngineError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::Kind;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to fetch {kind} data. HTTP Status Code: {}", .status.as_u16())]
    Status { kind: Kind, status: StatusCode },
    #[error("Error fetching {kind} data: {source}")]
    Transport {
        kind: Kind,
        #[source]
        source: reqwest::Error,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

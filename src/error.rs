use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Malformed JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Request rejected by middleware: {0}")]
    Rejected(String),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("No page matches path: {0}")]
    RouteNotFound(String),

    #[error("Route {route} requires parameter '{param}'")]
    MissingRouteParam { route: &'static str, param: String },

    #[error("Invalid {field} for a request path: '{value}'")]
    InvalidSegment { field: &'static str, value: String },

    #[error("Parameter {param}='{value}' of route {route} would open a different page")]
    AmbiguousRouteParam {
        route: &'static str,
        param: String,
        value: String,
    },

    #[error("Invalid project payload: {0}")]
    InvalidPayload(String),
}

impl TrackerError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TrackerError::Status { status, .. } => Some(*status),
            TrackerError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

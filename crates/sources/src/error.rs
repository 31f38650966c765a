use std::{fmt, time::Duration};

/// Which upstream call an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Geocoding,
    GeocodingFallback,
    Forecast,
    Archive,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Geocoding => "geocoding",
            Operation::GeocodingFallback => "geocoding (fallback)",
            Operation::Forecast => "forecast",
            Operation::Archive => "archive",
        };
        write!(f, "{}", name)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("{operation} request failed for {query}: {source}")]
    UpstreamUnavailable {
        operation: Operation,
        query: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} request for {query} timed out after {timeout:?}")]
    UpstreamTimeout {
        operation: Operation,
        query: String,
        timeout: Duration,
    },
    #[error("{operation} returned unusable data for {query}: {reason}")]
    DataUnavailable {
        operation: Operation,
        query: String,
        reason: String,
    },
    #[error("no daily data returned from {operation} for {date}")]
    NoData { operation: Operation, date: String },
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    pub fn invalid_input<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Operation the error is attached to, if it came from an upstream call
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::UpstreamUnavailable { operation, .. }
            | Error::UpstreamTimeout { operation, .. }
            | Error::DataUnavailable { operation, .. }
            | Error::NoData { operation, .. } => Some(*operation),
            Error::InvalidInput { .. } | Error::Client(_) => None,
        }
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SteamError>;

#[derive(Debug, Error)]
pub enum SteamError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Review API reported success={0}")]
    Unsuccessful(i64),
}

impl SteamError {
    /// Transport failure with no underlying reqwest error attached.
    pub fn network(message: impl Into<String>) -> Self {
        SteamError::Network {
            message: message.into(),
            source: None,
        }
    }
}

impl From<reqwest::Error> for SteamError {
    fn from(err: reqwest::Error) -> Self {
        SteamError::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for SteamError {
    fn from(err: serde_json::Error) -> Self {
        SteamError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn network_without_source() {
        let err = SteamError::network("timed out");
        assert_eq!(err.to_string(), "Network error: timed out");
        assert!(err.source().is_none());
    }

    #[test]
    fn builder_failure_keeps_reqwest_source() {
        let reqwest_err = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = SteamError::from(reqwest_err);
        assert!(matches!(err, SteamError::Network { source: Some(_), .. }));
        assert!(err.source().is_some());
    }
}

use std::time::Duration;

/// Transport-level failure. Always fatal to the scenario that hit it.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("request to {url} timed out after {}s", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },
    #[error("could not connect to {url}: {source:#}")]
    Connect {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("request to {url} failed: {source:#}")]
    Request {
        url: String,
        #[source]
        source: anyhow::Error,
    },
}

impl NetworkError {
    /// Connect failures mean the host itself is unreachable.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, NetworkError::Connect { .. })
    }

    pub(crate) fn from_reqwest(url: &str, timeout: Duration, e: reqwest::Error) -> Self {
        let url = url.to_owned();
        if e.is_timeout() {
            NetworkError::Timeout { url, timeout }
        } else if e.is_connect() {
            NetworkError::Connect {
                url,
                source: e.into(),
            }
        } else {
            NetworkError::Request {
                url,
                source: e.into(),
            }
        }
    }

    pub(crate) fn from_middleware(
        url: &str,
        timeout: Duration,
        e: reqwest_middleware::Error,
    ) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Self::from_reqwest(url, timeout, e),
            reqwest_middleware::Error::Middleware(e) => NetworkError::Request {
                url: url.to_owned(),
                source: e,
            },
        }
    }
}

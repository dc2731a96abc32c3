use std::{fmt, time::Duration};

use reqwest::Client;

use crate::{ImportError, ResultImport};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What a source holds. Shows up in failure messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    City,
    Hotel,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::City => "city",
            Self::Hotel => "hotel",
        })
    }
}

/// A remote CSV resource behind basic authentication.
#[derive(Clone, Debug)]
pub struct Source {
    pub url: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl Source {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET the resource once. No retries.
    pub(crate) async fn fetch(&self, kind: Kind) -> ResultImport<String> {
        let transport = |source| ImportError::Transport { kind, source };

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(transport)?;
        let res = client
            .get(&self.url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(ImportError::Status { kind, status });
        }
        tracing::debug!(url = %self.url, %kind, "fetched source");
        res.text().await.map_err(transport)
    }
}

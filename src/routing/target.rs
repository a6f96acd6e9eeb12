//! Backend target parsing.
//!
//! A target is parsed once from the configured URL string and never changes.
//! Only the pieces the rewriter needs are kept.

use url::Url;

/// Error returned when a configured backend URL cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("invalid backend url {url:?}: {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("backend url {0:?} has no host")]
    MissingHost(String),
}

/// The upstream a matched request is forwarded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    scheme: String,
    host: String,
    base_path: String,
    raw_query: String,
}

impl BackendTarget {
    /// Parse a backend URL such as `http://backend:9000/svc?key=1`.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let url = Url::parse(raw).map_err(|source| TargetError::Parse {
            url: raw.to_string(),
            source,
        })?;

        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h,
            _ => return Err(TargetError::MissingHost(raw.to_string())),
        };

        // Url drops default ports, so the authority is rebuilt from parts.
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            base_path: url.path().to_string(),
            raw_query: url.query().unwrap_or_default().to_string(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host and optional port, e.g. `backend:9000`.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }
}

impl std::fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.base_path)?;
        if !self.raw_query.is_empty() {
            write!(f, "?{}", self.raw_query)?;
        }
        Ok(())
    }
}

//! Where the API description comes from.

use crate::error::{GenerateError, Result};
use std::path::PathBuf;
use tracing::debug;

/// User agent sent with the API request.
const USER_AGENT: &str = concat!("stubgen/", env!("CARGO_PKG_VERSION"));

/// A provider of the raw API XML.
pub trait Source {
    /// Human-readable location, for logging.
    fn describe(&self) -> String;

    /// Produce the document body.
    fn fetch(&self) -> Result<String>;
}

/// Fetches the document with a single HTTP GET.
///
/// Only `200 OK` is accepted; there is no retry.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport(&self, e: &reqwest::Error) -> GenerateError {
        GenerateError::Transport {
            url: self.url.clone(),
            reason: e.to_string(),
        }
    }
}

impl Source for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| self.transport(&e))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| self.transport(&e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(GenerateError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| self.transport(&e))?;
        debug!(url = %self.url, bytes = body.len(), "fetched API document");
        Ok(body)
    }
}

/// Reads a previously saved copy of the document.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| GenerateError::io(&self.path, e))
    }
}

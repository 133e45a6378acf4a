use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid content path '{0}'")]
    InvalidPath(String),
    #[error("request for {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of the site's JSON content files, addressed by paths relative to
/// the content root (`home.json`, `projects/office-tower-project.json`).
#[async_trait]
pub trait ContentClient: Send + Sync {
    async fn fetch_json(&self, path: &str) -> Result<Value, ContentError>;
}

fn check_path(path: &str) -> Result<(), ContentError> {
    let relative = Path::new(path);
    let safe = !path.is_empty() && relative.components().all(|c| matches!(c, Component::Normal(_)));
    if safe {
        Ok(())
    } else {
        Err(ContentError::InvalidPath(path.to_string()))
    }
}

fn parse(path: &str, body: &str) -> Result<Value, ContentError> {
    serde_json::from_str(body).map_err(|source| ContentError::Parse {
        path: path.to_string(),
        source,
    })
}

#[derive(Clone, Debug)]
pub struct FsContentClient {
    root: PathBuf,
}

impl FsContentClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ContentClient for FsContentClient {
    async fn fetch_json(&self, path: &str) -> Result<Value, ContentError> {
        check_path(path)?;
        let body = tokio::fs::read_to_string(self.root.join(path))
            .await
            .map_err(|source| ContentError::Io {
                path: path.to_string(),
                source,
            })?;
        parse(path, &body)
    }
}

#[derive(Clone, Debug)]
pub struct HttpContentClient {
    base_url: String,
    client: Client,
}

impl HttpContentClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ContentClient for HttpContentClient {
    async fn fetch_json(&self, path: &str) -> Result<Value, ContentError> {
        check_path(path)?;
        let url = format!("{}/{}", self.base_url, path);
        let request_error = |source: reqwest::Error| ContentError::Request {
            path: path.to_string(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(request_error)?;
        if !response.status().is_success() {
            return Err(ContentError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        parse(path, &body)
    }
}

use crate::dom::{Document, MarkupError};
use crate::models::Page;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("cannot read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("template {path} is not well-formed: {source}")]
    Markup {
        path: String,
        #[source]
        source: MarkupError,
    },
}

/// Static page templates with their fallback content. Read on every request
/// so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn load(&self, page: Page) -> Result<Document, TemplateError> {
        let path = self.dir.join(page.template_file());
        let display = path.display().to_string();
        let markup = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| TemplateError::Read {
                path: display.clone(),
                source,
            })?;
        Document::parse(&markup).map_err(|source| TemplateError::Markup { path: display, source })
    }
}

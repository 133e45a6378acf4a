//! Regenerates `project-index.json` from the files in `projects/`.

use crate::models::ProjectIndex;
use crate::service::is_link_safe;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "project-index.json";

/// Every `*.json` in `projects_dir` except `index.json`, sorted by name.
/// Names that cannot appear in a card link are left out with a warning.
pub fn build_project_index(projects_dir: &Path) -> anyhow::Result<ProjectIndex> {
    let entries = fs::read_dir(projects_dir)
        .with_context(|| format!("cannot list {}", projects_dir.display()))?;

    let mut projects = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot list {}", projects_dir.display()))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let Some(stem) = name.strip_suffix(".json") else {
            continue;
        };
        if name == "index.json" {
            continue;
        }
        if !is_link_safe(stem) {
            tracing::warn!("Leaving {:?} out of the index: rename it to letters, digits, '-', '_' or '.'", name);
            continue;
        }
        projects.push(name);
    }
    projects.sort();
    Ok(ProjectIndex { projects })
}

/// Pretty JSON with a trailing newline.
pub fn write_project_index(path: &Path, index: &ProjectIndex) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(index)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))
}

/// Rebuilds the index under `content_dir` and returns it with the path written.
pub fn update_project_index(content_dir: &Path) -> anyhow::Result<(PathBuf, ProjectIndex)> {
    let index = build_project_index(&content_dir.join("projects"))?;
    let path = content_dir.join(INDEX_FILE);
    write_project_index(&path, &index)?;
    Ok((path, index))
}

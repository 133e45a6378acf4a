use crate::language::Language;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// UI strings that are not part of the editable content: notifications,
/// category labels, lightbox fallbacks. Loaded from `languages/<code>.json`.
#[derive(Clone, Debug)]
pub struct I18n {
    localizations: Arc<HashMap<String, Value>>,
    fallback_language: Language,
}

impl I18n {
    pub fn new(languages_dir: &Path) -> Self {
        let mut localizations = HashMap::new();
        if let Ok(entries) = fs::read_dir(languages_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().map_or(false, |ext| ext == "json") {
                    if let Some(file_stem) = path.file_stem().and_then(|s| s.to_str()) {
                        match fs::read_to_string(&path).map(|c| serde_json::from_str::<Value>(&c)) {
                            Ok(Ok(json)) => {
                                localizations.insert(file_stem.to_lowercase(), json);
                            }
                            Ok(Err(e)) => tracing::warn!("Ignoring {}: {}", path.display(), e),
                            Err(e) => tracing::warn!("Cannot read {}: {}", path.display(), e),
                        }
                    }
                }
            }
        }
        tracing::debug!("Loaded {} UI language file(s)", localizations.len());

        I18n {
            localizations: Arc::new(localizations),
            fallback_language: Language::En,
        }
    }

    fn lookup(&self, key: &str, lang: Language) -> Option<String> {
        self.localizations
            .get(lang.code())
            .and_then(|map| map.get(key))
            .and_then(|val| val.as_str())
            .map(str::to_string)
    }

    /// Falls back to English, then to `default`.
    pub fn localize_or(&self, key: &str, lang: Language, default: &str) -> String {
        self.lookup(key, lang)
            .or_else(|| {
                if lang != self.fallback_language {
                    self.lookup(key, self.fallback_language)
                } else {
                    None
                }
            })
            .unwrap_or_else(|| default.to_string())
    }

    pub fn localize(&self, key: &str, lang: Language) -> String {
        self.localize_or(key, lang, key)
    }

    /// Display name of a product/project category; unknown categories are
    /// shown as-is.
    pub fn category_name(&self, category: &str, lang: Language) -> String {
        self.localize_or(&format!("category.{}", category), lang, category)
    }
}

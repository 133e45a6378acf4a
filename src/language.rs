//! Site language state and the language switcher.

use crate::binder;
use crate::dom::Element;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const PREFERENCE_COOKIE: &str = "preferredLanguage";
const PREFERENCE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Sq,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported language '{0}'")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Sq];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sq => "sq",
        }
    }

    /// Name of the attribute holding this language's text, e.g. `data-sq`.
    pub fn attribute(&self) -> &'static str {
        match self {
            Language::En => "data-en",
            Language::Sq => "data-sq",
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let primary = code.split('-').next().unwrap_or("").trim().to_lowercase();
        match primary.as_str() {
            "en" => Ok(Language::En),
            "sq" => Ok(Language::Sq),
            _ => Err(UnknownLanguage(code.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where the visitor's language preference lives between page loads.
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, lang: Language);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Option<String>,
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            writes: 0,
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, lang: Language) {
        self.value = Some(lang.code().to_string());
        self.writes += 1;
    }
}

/// Request-scoped store backed by the `preferredLanguage` cookie. A save only
/// produces a `Set-Cookie` when it changes what the browser sent.
#[derive(Debug, Default)]
pub struct CookieStore {
    loaded: Option<String>,
    pending: Option<Language>,
}

impl CookieStore {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let loaded = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == PREFERENCE_COOKIE)
            .map(|(_, value)| value.trim().to_string());
        Self {
            loaded,
            pending: None,
        }
    }

    pub fn set_cookie(&self) -> Option<String> {
        self.pending.map(|lang| {
            format!(
                "{}={}; Path=/; Max-Age={}; SameSite=Lax",
                PREFERENCE_COOKIE,
                lang.code(),
                PREFERENCE_MAX_AGE
            )
        })
    }
}

impl PreferenceStore for CookieStore {
    fn load(&self) -> Option<String> {
        self.loaded.clone()
    }

    fn save(&mut self, lang: Language) {
        if self.loaded.as_deref() == Some(lang.code()) {
            self.pending = None;
        } else {
            self.pending = Some(lang);
        }
    }
}

/// Holds the current language for one rendering context.
#[derive(Debug, Default)]
pub struct LanguageSwitcher {
    current: Language,
}

impl LanguageSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Language {
        self.current
    }

    /// Applies a previously saved preference, ignoring unknown values.
    pub fn restore<S: PreferenceStore + ?Sized>(&mut self, root: &mut Element, store: &mut S) -> bool {
        match store.load().and_then(|saved| saved.parse::<Language>().ok()) {
            Some(lang) => self.switch_language(root, lang, store),
            None => false,
        }
    }

    /// Returns `false` without touching the tree or the store when `target`
    /// is already current.
    pub fn switch_language<S: PreferenceStore + ?Sized>(
        &mut self,
        root: &mut Element,
        target: Language,
        store: &mut S,
    ) -> bool {
        if target == self.current {
            return false;
        }
        self.current = target;

        root.for_each_mut(".lang-option", |option| {
            let active = option.attr("data-lang") == Some(target.code());
            option.toggle_class("active", active);
        });
        apply_language(root, target);
        store.save(target);
        true
    }

    /// Re-walks the tree for elements injected after the last switch.
    pub fn refresh(&self, root: &mut Element) {
        apply_language(root, self.current);
    }
}

/// Rewrites every bilingual element from its `data-<lang>` attribute.
/// Elements whose attribute is empty keep their current text.
pub fn apply_language(root: &mut Element, lang: Language) -> usize {
    let mut updated = 0;
    root.for_each_mut("[data-en][data-sq]", |el| {
        let Some(text) = el
            .attr(lang.attribute())
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
        else {
            return;
        };
        binder::set_display(el, &text);
        updated += 1;
    });
    updated
}

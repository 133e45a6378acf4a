//! Validation of untyped content records into typed structs.
//!
//! Content files carry bilingual pairs (`<field>_en`, `<field>_sq`) and
//! scalars. A [`RecordReader`] pulls fields out of a JSON object, records every
//! missing required field, and [`validate`] turns the outcome into either the
//! typed record or a [`SchemaError`] listing the gaps.
//!
//! Nested objects and list items validate on their own: an item that lacks a
//! required field is dropped (and logged) without failing its parent.

use crate::language::Language;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BilingualText {
    pub en: String,
    pub sq: String,
}

impl BilingualText {
    pub fn new(en: &str, sq: &str) -> Self {
        Self {
            en: en.to_string(),
            sq: sq.to_string(),
        }
    }

    /// Same text in both languages (brand names, numbers).
    pub fn same(text: &str) -> Self {
        Self::new(text, text)
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Sq => &self.sq,
        }
    }

    pub fn map<F: Fn(&str) -> String>(&self, f: F) -> Self {
        Self {
            en: f(&self.en),
            sq: f(&self.sq),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{source_name} is missing required field(s): {}", .missing.join(", "))]
pub struct SchemaError {
    pub source_name: String,
    pub missing: Vec<String>,
}

pub trait FromRecord: Sized {
    fn read(reader: &mut RecordReader<'_>) -> Self;
}

pub fn validate<T: FromRecord>(source_name: &str, value: &Value) -> Result<T, SchemaError> {
    let mut reader = RecordReader::new(source_name, value);
    let record = T::read(&mut reader);
    reader.finish(record)
}

pub struct RecordReader<'a> {
    source_name: String,
    fields: Option<&'a Map<String, Value>>,
    missing: Vec<String>,
}

impl<'a> RecordReader<'a> {
    pub fn new(source_name: &str, value: &'a Value) -> Self {
        Self {
            source_name: source_name.to_string(),
            fields: value.as_object(),
            missing: Vec::new(),
        }
    }

    pub fn finish<T>(self, record: T) -> Result<T, SchemaError> {
        if self.fields.is_none() {
            return Err(SchemaError {
                source_name: self.source_name,
                missing: vec!["<object>".to_string()],
            });
        }
        if self.missing.is_empty() {
            Ok(record)
        } else {
            Err(SchemaError {
                source_name: self.source_name,
                missing: self.missing,
            })
        }
    }

    fn raw(&self, field: &str) -> Option<&'a Value> {
        self.fields.and_then(|f| f.get(field))
    }

    /// Non-empty string or number, rendered as a string.
    pub fn str(&self, field: &str) -> Option<String> {
        match self.raw(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn required_str(&mut self, field: &str) -> String {
        match self.str(field) {
            Some(s) => s,
            None => {
                self.missing.push(field.to_string());
                String::new()
            }
        }
    }

    /// `<field>_en` is required for the pair to exist; a missing `<field>_sq`
    /// falls back to the English text.
    pub fn text(&self, field: &str) -> Option<BilingualText> {
        let en = self.str(&format!("{}_en", field))?;
        let sq = self.str(&format!("{}_sq", field)).unwrap_or_else(|| en.clone());
        Some(BilingualText { en, sq })
    }

    pub fn required_text(&mut self, field: &str) -> BilingualText {
        match self.text(field) {
            Some(t) => t,
            None => {
                self.missing.push(format!("{}_en", field));
                BilingualText::default()
            }
        }
    }

    pub fn object<T, F>(&self, field: &str, read: F) -> Option<T>
    where
        F: FnOnce(&mut RecordReader<'a>) -> T,
    {
        let value = self.raw(field)?;
        let name = format!("{}.{}", self.source_name, field);
        let mut child = RecordReader::new(&name, value);
        let record = read(&mut child);
        match child.finish(record) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping {}", e);
                None
            }
        }
    }

    pub fn list<T, F>(&self, field: &str, mut read: F) -> Vec<T>
    where
        F: FnMut(&mut RecordReader<'a>) -> T,
    {
        let Some(Value::Array(items)) = self.raw(field) else {
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let name = format!("{}.{}[{}]", self.source_name, field, i);
                let mut child = RecordReader::new(&name, item);
                let record = read(&mut child);
                match child.finish(record) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!("Skipping {}", e);
                        None
                    }
                }
            })
            .collect()
    }
}

//! Contact and partner form validation, plus the notification shown after a
//! submission.

use crate::dom::{Element, Node};
use crate::i18n::I18n;
use crate::language::Language;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Partner,
}

impl FormKind {
    pub fn form_id(&self) -> &'static str {
        match self {
            FormKind::Contact => "contactForm",
            FormKind::Partner => "partnerForm",
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            FormKind::Contact => &["name", "email", "message"],
            FormKind::Partner => &["company", "name", "email", "phone", "message"],
        }
    }

    fn success_key(&self) -> &'static str {
        match self {
            FormKind::Contact => "form.contact_success",
            FormKind::Partner => "form.partner_success",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("invalid email address")]
    InvalidEmail,
}

impl FormError {
    fn message_key(&self) -> &'static str {
        match self {
            FormError::MissingFields(_) => "form.required",
            FormError::InvalidEmail => "form.invalid_email",
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
        .is_match(email)
}

/// Required fields first, then the email format.
pub fn validate(kind: FormKind, fields: &HashMap<String, String>) -> Result<(), FormError> {
    let missing: Vec<&'static str> = kind
        .required_fields()
        .iter()
        .copied()
        .filter(|name| fields.get(*name).map_or(true, |v| v.trim().is_empty()))
        .collect();
    if !missing.is_empty() {
        return Err(FormError::MissingFields(missing));
    }

    let email = fields.get("email").map(|e| e.trim()).unwrap_or("");
    if !is_valid_email(email) {
        return Err(FormError::InvalidEmail);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    pub fn for_result(kind: FormKind, result: &Result<(), FormError>, i18n: &I18n, lang: Language) -> Self {
        match result {
            Ok(()) => Self::new(NotificationKind::Success, &i18n.localize(kind.success_key(), lang)),
            Err(e) => Self::new(NotificationKind::Error, &i18n.localize(e.message_key(), lang)),
        }
    }

    pub fn to_element(&self) -> Element {
        Element::new("div")
            .with_class(&format!("notification notification-{} show", self.kind))
            .with_attr("role", "status")
            .with_text(&self.message)
    }

    /// Replaces any notification already on the page.
    pub fn show(&self, root: &mut Element) -> bool {
        let Some(body) = root.query_mut("body") else {
            return false;
        };
        body.children.retain(|child| match child {
            Node::Element(el) => !el.has_class("notification"),
            Node::Text(_) => true,
        });
        body.append(self.to_element());
        true
    }
}

/// Writes submitted values back into the form so the visitor can correct
/// them.
pub fn refill(root: &mut Element, kind: FormKind, fields: &HashMap<String, String>) {
    let Some(form) = root.query_mut(&format!("#{}", kind.form_id())) else {
        return;
    };
    for (name, value) in fields {
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            continue;
        }
        let selector = format!(r#"[name="{}"]"#, name);
        if let Some(field) = form.query_mut(&selector) {
            if field.tag == "textarea" {
                field.set_text(value);
            } else if field.tag == "input" {
                field.set_attr("value", value);
            }
        }
    }
}

//! Writes content values into template elements.
//!
//! Every binder takes an optional target and does nothing when the element is
//! absent from the template.

use crate::dom::Element;
use crate::language::Language;
use crate::schema::BilingualText;
use regex::Regex;
use std::sync::OnceLock;

/// Marks bilingual elements whose language attributes hold markup.
pub const HTML_MARKER: &str = "data-html";

static BOLD_RE: OnceLock<Regex> = OnceLock::new();
static IFRAME_SRC_RE: OnceLock<Regex> = OnceLock::new();

/// Shows `value` the way the element displays text: `placeholder` for form
/// fields, parsed markup for marked elements, plain text otherwise.
pub fn set_display(el: &mut Element, value: &str) {
    if el.tag == "input" || el.tag == "textarea" {
        el.set_attr("placeholder", value);
    } else if el.has_attr(HTML_MARKER) {
        el.set_inner_markup(value);
    } else {
        el.set_text(value);
    }
}

pub fn bind_text(target: Option<&mut Element>, text: &BilingualText, lang: Language) -> bool {
    let Some(el) = target else {
        return false;
    };
    el.set_attr("data-en", &text.en);
    el.set_attr("data-sq", &text.sq);
    set_display(el, text.get(lang));
    true
}

/// Binds when both the target and the value exist.
pub fn bind_optional(target: Option<&mut Element>, text: Option<&BilingualText>, lang: Language) -> bool {
    match text {
        Some(text) => bind_text(target, text, lang),
        None => false,
    }
}

/// Binds markdown-bold text as markup.
pub fn bind_markup(target: Option<&mut Element>, text: &BilingualText, lang: Language) -> bool {
    let Some(el) = target else {
        return false;
    };
    el.set_attr(HTML_MARKER, "");
    bind_text(Some(el), &text.map(parse_markdown_bold), lang)
}

pub fn bind_plain(target: Option<&mut Element>, value: Option<&str>) -> bool {
    match (target, value) {
        (Some(el), Some(value)) => {
            el.set_text(value);
            true
        }
        _ => false,
    }
}

/// Creates a new element carrying both language variants.
pub fn bilingual(tag: &str, text: &BilingualText, lang: Language) -> Element {
    let mut el = Element::new(tag);
    bind_text(Some(&mut el), text, lang);
    el
}

pub fn image(src: &str, alt: &str, style: &str) -> Element {
    let mut img = Element::new("img").with_attr("src", src).with_attr("alt", alt);
    if !style.is_empty() {
        img.set_attr("style", style);
    }
    img
}

/// Replaces the children of `target` with a single image.
pub fn replace_with_image(target: Option<&mut Element>, src: Option<&str>, alt: &str, style: &str) -> bool {
    match (target, src) {
        (Some(el), Some(src)) => {
            el.clear();
            el.append(image(src, alt, style));
            true
        }
        _ => false,
    }
}

/// Escapes `text` and turns `**bold**` runs into `<strong>` elements.
pub fn parse_markdown_bold(text: &str) -> String {
    let re = BOLD_RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));
    let escaped = quick_xml::escape::escape(text);
    re.replace_all(&escaped, "<strong>$1</strong>").into_owned()
}

/// Accepts either a bare embed URL or a pasted `<iframe>` snippet.
pub fn map_embed_src(embed: &str) -> String {
    if embed.contains("<iframe") {
        let re = IFRAME_SRC_RE.get_or_init(|| Regex::new(r#"src="([^"]+)""#).expect("src pattern is valid"));
        if let Some(caps) = re.captures(embed) {
            return caps[1].to_string();
        }
    }
    embed.to_string()
}

/// Splits text into paragraphs on blank lines.
pub fn paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pairs English and Albanian paragraphs by index; Albanian falls back to the
/// English paragraph when it runs short.
pub fn paired_paragraphs(text: &BilingualText) -> Vec<BilingualText> {
    let sq = paragraphs(&text.sq);
    paragraphs(&text.en)
        .into_iter()
        .enumerate()
        .map(|(i, en)| {
            let sq = sq.get(i).cloned().unwrap_or_else(|| en.clone());
            BilingualText { en, sq }
        })
        .collect()
}

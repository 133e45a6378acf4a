//! Owned element tree parsed from XHTML templates and written back out as HTML.

use crate::selector::Selector;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;
use std::ops::{Deref, DerefMut};
use thiserror::Error;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("malformed markup: {0}")]
    Syntax(String),
    #[error("closing tag without a matching opening tag")]
    Unbalanced,
    #[error("element <{0}> is never closed")]
    Unclosed(String),
}

fn syntax<E: std::fmt::Display>(err: E) -> MarkupError {
    MarkupError::Syntax(err.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.append(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            let mut classes: Vec<&str> = self.classes().collect();
            classes.push(class);
            let joined = classes.join(" ");
            self.set_attr("class", &joined);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        if self.has_class(class) {
            let joined = self
                .classes()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr("class", &joined);
        }
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn style(&self, property: &str) -> Option<String> {
        parse_style(self.attr("style").unwrap_or(""))
            .into_iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v)
    }

    /// Sets one inline style property; an empty value removes it.
    pub fn set_style(&mut self, property: &str, value: &str) {
        let mut props = parse_style(self.attr("style").unwrap_or(""));
        props.retain(|(k, _)| k != property);
        if !value.is_empty() {
            props.push((property.to_string(), value.to_string()));
        }
        if props.is_empty() {
            self.remove_attr("style");
        } else {
            let style = props
                .iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr("style", &style);
        }
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    pub fn set_text(&mut self, text: &str) {
        self.children = vec![Node::Text(text.to_string())];
    }

    /// Replaces the children with parsed markup, falling back to plain text
    /// when the markup is not well-formed.
    pub fn set_inner_markup(&mut self, markup: &str) {
        match parse_nodes(markup) {
            Ok(nodes) => self.children = nodes,
            Err(e) => {
                tracing::debug!("Treating markup as text ({}): {}", e, markup);
                self.set_text(markup);
            }
        }
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    pub fn query(&self, selector: &str) -> Option<&Element> {
        let path = self.select_paths(selector, true).into_iter().next()?;
        self.at_path(&path)
    }

    pub fn query_mut(&mut self, selector: &str) -> Option<&mut Element> {
        let path = self.select_paths(selector, true).into_iter().next()?;
        self.at_path_mut(&path)
    }

    /// The `index`-th match (0-based) in document order.
    pub fn query_nth_mut(&mut self, selector: &str, index: usize) -> Option<&mut Element> {
        let path = self.select_paths(selector, false).into_iter().nth(index)?;
        self.at_path_mut(&path)
    }

    pub fn query_all(&self, selector: &str) -> Vec<&Element> {
        self.select_paths(selector, false)
            .iter()
            .filter_map(|p| self.at_path(p))
            .collect()
    }

    pub fn count(&self, selector: &str) -> usize {
        self.select_paths(selector, false).len()
    }

    /// Applies `f` to every match. Matches are visited deepest-last-first so a
    /// callback that rewrites an element's children never invalidates the
    /// paths still to be visited.
    pub fn for_each_mut<F: FnMut(&mut Element)>(&mut self, selector: &str, mut f: F) -> usize {
        let paths = self.select_paths(selector, false);
        let mut visited = 0;
        for path in paths.iter().rev() {
            if let Some(el) = self.at_path_mut(path) {
                f(el);
                visited += 1;
            }
        }
        visited
    }

    fn select_paths(&self, selector: &str, first_only: bool) -> Vec<Vec<usize>> {
        let selector = match Selector::parse(selector) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Ignoring invalid selector: {}", e);
                return Vec::new();
            }
        };
        let mut out = Vec::new();
        let mut ancestors = vec![(self, 1)];
        collect_paths(self, &selector, &mut ancestors, &mut Vec::new(), &mut out, first_only);
        out
    }

    fn at_path(&self, path: &[usize]) -> Option<&Element> {
        let mut current = self;
        for &idx in path {
            current = match current.children.get(idx) {
                Some(Node::Element(e)) => e,
                _ => return None,
            };
        }
        Some(current)
    }

    fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = self;
        for &idx in path {
            current = match current.children.get_mut(idx) {
                Some(Node::Element(e)) => e,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        write_element(&mut writer, self)?;
        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
        }
    }
}

fn collect_paths<'a>(
    el: &'a Element,
    selector: &Selector,
    ancestors: &mut Vec<(&'a Element, usize)>,
    path: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
    first_only: bool,
) {
    let mut position = 0;
    for (idx, child) in el.children.iter().enumerate() {
        let Node::Element(child_el) = child else {
            continue;
        };
        position += 1;
        path.push(idx);
        if selector.matches(ancestors, child_el, position) {
            out.push(path.clone());
            if first_only {
                path.pop();
                return;
            }
        }
        ancestors.push((child_el, position));
        collect_paths(child_el, selector, ancestors, path, out, first_only);
        ancestors.pop();
        path.pop();
        if first_only && !out.is_empty() {
            return;
        }
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            (!k.is_empty()).then(|| (k.to_string(), v.to_string()))
        })
        .collect()
}

fn element_from_start(start: &BytesStart) -> Result<Element, MarkupError> {
    let name = std::str::from_utf8(start.name().as_ref()).map_err(syntax)?.to_string();
    let mut el = Element::new(&name);
    for attr in start.attributes() {
        let attr = attr.map_err(syntax)?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(syntax)?.to_string();
        let value = attr.unescape_value().map_err(syntax)?;
        el.set_attr(&key, &value);
    }
    Ok(el)
}

/// Parses a markup fragment into nodes. Doctype, comments and processing
/// instructions are dropped.
pub fn parse_nodes(markup: &str) -> Result<Vec<Node>, MarkupError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut stack = vec![Element::new("#fragment")];
    loop {
        match reader.read_event().map_err(syntax)? {
            Event::Start(e) => stack.push(element_from_start(&e)?),
            Event::Empty(e) => {
                let el = element_from_start(&e)?;
                if let Some(parent) = stack.last_mut() {
                    parent.append(el);
                }
            }
            Event::End(_) => {
                if stack.len() <= 1 {
                    return Err(MarkupError::Unbalanced);
                }
                if let Some(el) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.append(el);
                    }
                }
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(syntax)?;
                if !text.is_empty() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                }
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.last().map(|e| e.tag.clone()).unwrap_or_default();
        return Err(MarkupError::Unclosed(open));
    }
    Ok(stack.pop().map(|root| root.children).unwrap_or_default())
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, el: &Element) -> anyhow::Result<()> {
    let mut start = BytesStart::new(el.tag.as_str());
    for (k, v) in &el.attrs {
        start.push_attribute((k.as_str(), v.as_str()));
    }

    if el.children.is_empty() && VOID_ELEMENTS.contains(&el.tag.as_str()) {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &el.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(el.tag.as_str())))?;
    Ok(())
}

/// A full page. Dereferences to its synthetic root element so selectors run
/// against the whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn parse(markup: &str) -> Result<Self, MarkupError> {
        let mut root = Element::new("#document");
        root.children = parse_nodes(markup)?;
        Ok(Self { root })
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        for child in &self.root.children {
            match child {
                Node::Element(e) => write_element(&mut writer, e)?,
                Node::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
            }
        }
        let body = String::from_utf8(writer.into_inner().into_inner())?;
        Ok(format!("<!DOCTYPE html>\n{}", body.trim_start()))
    }
}

impl Deref for Document {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.root
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Element {
        &mut self.root
    }
}

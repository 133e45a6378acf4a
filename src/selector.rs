//! A small CSS selector subset used to locate hydration targets.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr="v"]`,
//! `[attr^="v"]`, `:nth-child(n)` and the descendant combinator.

use crate::dom::Element;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected '{found}' in selector '{selector}'")]
    Unexpected { found: char, selector: String },
    #[error("unterminated attribute selector in '{0}'")]
    Unterminated(String),
    #[error("invalid :nth-child argument in '{0}'")]
    NthChild(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
    nth_child: Option<usize>,
}

impl Compound {
    fn matches(&self, el: &Element, position: usize) -> bool {
        if let Some(tag) = &self.tag {
            if tag != &el.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        if let Some(n) = self.nth_child {
            if n != position {
                return false;
            }
        }
        self.attrs.iter().all(|a| match (&a.op, el.attr(&a.name)) {
            (_, None) => false,
            (AttrOp::Exists, Some(_)) => true,
            (AttrOp::Equals(v), Some(actual)) => actual == v,
            (AttrOp::Prefix(v), Some(actual)) => actual.starts_with(v.as_str()),
        })
    }
}

/// A parsed selector: a chain of compounds joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    chain: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        input.parse()
    }

    /// `ancestors` runs from the outermost element down to the parent of `el`,
    /// each paired with its 1-based position among its element siblings.
    pub fn matches(&self, ancestors: &[(&Element, usize)], el: &Element, position: usize) -> bool {
        let Some((last, rest)) = self.chain.split_last() else {
            return false;
        };
        if !last.matches(el, position) {
            return false;
        }

        let mut remaining = ancestors.iter().rev();
        'chain: for compound in rest.iter().rev() {
            for (ancestor, pos) in remaining.by_ref() {
                if compound.matches(ancestor, *pos) {
                    continue 'chain;
                }
            }
            return false;
        }
        true
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = input.chars().collect();
        let mut chain = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            if chars[i].is_whitespace() {
                i += 1;
                continue;
            }
            let (compound, next) = parse_compound(&chars, i, input)?;
            chain.push(compound);
            i = next;
        }
        if chain.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Selector { chain })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], mut i: usize) -> (String, usize) {
    let start = i;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    (chars[start..i].iter().collect(), i)
}

fn unexpected(chars: &[char], i: usize, input: &str) -> SelectorError {
    SelectorError::Unexpected {
        found: chars.get(i).copied().unwrap_or(' '),
        selector: input.to_string(),
    }
}

fn parse_compound(chars: &[char], mut i: usize, input: &str) -> Result<(Compound, usize), SelectorError> {
    let mut compound = Compound::default();

    if chars[i] == '*' {
        i += 1;
    } else if is_ident_char(chars[i]) {
        let (tag, next) = read_ident(chars, i);
        compound.tag = Some(tag.to_ascii_lowercase());
        i = next;
    }

    while i < chars.len() && !chars[i].is_whitespace() {
        match chars[i] {
            '.' | '#' => {
                let sigil = chars[i];
                let (name, next) = read_ident(chars, i + 1);
                if name.is_empty() {
                    return Err(unexpected(chars, i + 1, input));
                }
                if sigil == '.' {
                    compound.classes.push(name);
                } else {
                    compound.id = Some(name);
                }
                i = next;
            }
            '[' => {
                let (attr, next) = parse_attribute(chars, i + 1, input)?;
                compound.attrs.push(attr);
                i = next;
            }
            ':' => {
                let (n, next) = parse_nth_child(chars, i + 1, input)?;
                compound.nth_child = Some(n);
                i = next;
            }
            _ => return Err(unexpected(chars, i, input)),
        }
    }

    Ok((compound, i))
}

fn parse_attribute(chars: &[char], i: usize, input: &str) -> Result<(AttrMatch, usize), SelectorError> {
    let (name, mut i) = read_ident(chars, i);
    if name.is_empty() {
        return Err(unexpected(chars, i, input));
    }

    let op = match chars.get(i) {
        Some(']') => {
            return Ok((
                AttrMatch {
                    name,
                    op: AttrOp::Exists,
                },
                i + 1,
            ))
        }
        Some('=') => {
            i += 1;
            false
        }
        Some('^') if chars.get(i + 1) == Some(&'=') => {
            i += 2;
            true
        }
        Some(_) => return Err(unexpected(chars, i, input)),
        None => return Err(SelectorError::Unterminated(input.to_string())),
    };

    let value = match chars.get(i) {
        Some(&quote) if quote == '"' || quote == '\'' => {
            let start = i + 1;
            let end = chars[start..]
                .iter()
                .position(|&c| c == quote)
                .map(|p| start + p)
                .ok_or_else(|| SelectorError::Unterminated(input.to_string()))?;
            i = end + 1;
            chars[start..end].iter().collect()
        }
        Some(_) => {
            let (value, next) = read_ident(chars, i);
            i = next;
            value
        }
        None => return Err(SelectorError::Unterminated(input.to_string())),
    };

    if chars.get(i) != Some(&']') {
        return Err(SelectorError::Unterminated(input.to_string()));
    }

    let op = if op { AttrOp::Prefix(value) } else { AttrOp::Equals(value) };
    Ok((AttrMatch { name, op }, i + 1))
}

fn parse_nth_child(chars: &[char], i: usize, input: &str) -> Result<(usize, usize), SelectorError> {
    const PREFIX: &str = "nth-child(";
    let rest: String = chars[i..].iter().collect();
    if !rest.starts_with(PREFIX) {
        return Err(unexpected(chars, i, input));
    }
    let after = &rest[PREFIX.len()..];
    let close = after
        .find(')')
        .ok_or_else(|| SelectorError::NthChild(input.to_string()))?;
    let n: usize = after[..close]
        .trim()
        .parse()
        .map_err(|_| SelectorError::NthChild(input.to_string()))?;
    if n == 0 {
        return Err(SelectorError::NthChild(input.to_string()));
    }
    let consumed = PREFIX.chars().count() + after[..close].chars().count() + 1;
    Ok((n, i + consumed))
}

//! Minimal selector support: comma-separated compound selectors built from a
//! tag name, `#id`, and `.class` parts (`div.card`, `#panel`, `.a.b, span`).
//! Combinators and attribute selectors are not supported.

use std::mem;

use crate::{Error, Result, node::NodeData};

/// One compound selector such as `button.primary#save`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    /// Required tag name, lowercased.
    tag: Option<String>,
    /// Required id.
    id: Option<String>,
    /// Classes that must all be present.
    classes: Vec<String>,
}

impl Compound {
    /// Check this compound against a node.
    fn matches(&self, node: &NodeData) -> bool {
        if let Some(tag) = &self.tag
            && tag != "*"
            && *tag != node.tag
        {
            return false;
        }
        if let Some(id) = &self.id
            && node.id() != Some(id.as_str())
        {
            return false;
        }
        self.classes
            .iter()
            .all(|want| node.classes().any(|have| have == want))
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Alternatives; a node matches if any alternative does.
    alternatives: Vec<Compound>,
}

/// Which part of a compound the parser is currently filling.
#[derive(Clone, Copy)]
enum Part {
    /// Tag name prefix.
    Tag,
    /// After `#`.
    Id,
    /// After `.`.
    Class,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(src: &str) -> Result<Self> {
        let mut alternatives = Vec::new();
        for group in src.split(',') {
            let group = group.trim();
            if group.is_empty() || group.contains(char::is_whitespace) {
                return Err(Error::Selector(src.to_string()));
            }
            alternatives.push(parse_compound(group).ok_or_else(|| Error::Selector(src.into()))?);
        }
        Ok(Self { alternatives })
    }

    /// True when any alternative matches `node`.
    pub(crate) fn matches(&self, node: &NodeData) -> bool {
        self.alternatives.iter().any(|c| c.matches(node))
    }
}

/// Parse a single compound; `None` on empty parts or stray characters.
fn parse_compound(src: &str) -> Option<Compound> {
    let mut out = Compound::default();
    let mut part = Part::Tag;
    let mut buf = String::new();

    let flush = |part: Part, buf: &mut String, out: &mut Compound| -> Option<()> {
        let text = mem::take(buf);
        match part {
            Part::Tag if text.is_empty() => {}
            Part::Tag => out.tag = Some(text.to_ascii_lowercase()),
            _ if text.is_empty() => return None,
            Part::Id => out.id = Some(text),
            Part::Class => out.classes.push(text),
        }
        Some(())
    };

    for c in src.chars() {
        match c {
            '#' | '.' => {
                flush(part, &mut buf, &mut out)?;
                part = if c == '#' { Part::Id } else { Part::Class };
            }
            c if c.is_alphanumeric() || c == '-' || c == '_' || c == '*' => buf.push(c),
            _ => return None,
        }
    }
    flush(part, &mut buf, &mut out)?;
    Some(out)
}

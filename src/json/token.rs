//! Purpose: Tokenize the members of a top-level JSON object into byte spans.
//! Exports: `Token`, `TokenKind`, `Member`, `top_level_members`.
//! Role: Lets lookups scan top-level keys in document order without building a map.
//! Invariants: Members keep document order, duplicate keys included.
//! Invariants: Spans index into the caller's document; nested values are validated, not split.
//! Notes: serde_json still validates the whole document, trailing bytes included.

use std::fmt;

use serde::Deserializer as _;
use serde::de::{MapAccess, Visitor};
use serde_json::value::RawValue;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Object,
    Array,
    String,
    Primitive,
}

impl TokenKind {
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Object => "object",
            TokenKind::Array => "array",
            TokenKind::String => "string",
            TokenKind::Primitive => "primitive",
        }
    }
}

/// One JSON element located by `[start, end)` byte offsets in its document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    fn from_raw(doc: &str, raw: &RawValue) -> Self {
        let text = raw.get();
        let start = text.as_ptr() as usize - doc.as_ptr() as usize;
        let kind = match text.as_bytes().first() {
            Some(b'{') => TokenKind::Object,
            Some(b'[') => TokenKind::Array,
            Some(b'"') => TokenKind::String,
            _ => TokenKind::Primitive,
        };
        Self {
            kind,
            start,
            end: start + text.len(),
        }
    }

    pub fn text<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start..self.end]
    }
}

/// A top-level key (escapes decoded) and the token of its value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Member {
    pub key: String,
    pub value: Token,
}

struct MembersVisitor<'a> {
    doc: &'a str,
}

impl<'de> Visitor<'de> for MembersVisitor<'de> {
    type Value = Vec<Member>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object at the top level")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut members = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let raw: &'de RawValue = map.next_value()?;
            members.push(Member {
                key,
                value: Token::from_raw(self.doc, raw),
            });
        }
        Ok(members)
    }
}

pub(crate) fn top_level_members(doc: &str) -> Result<Vec<Member>, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(doc);
    let members = (&mut de).deserialize_map(MembersVisitor { doc })?;
    de.end()?;
    Ok(members)
}

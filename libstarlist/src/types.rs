//! Core types for Starlist

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Text rendered in place of a field the API did not send
pub const MISSING_FIELD: &str = "undefined";

/// One item of a remote listing (a film or a planet)
///
/// Records are kept as opaque JSON objects. Screens only read a handful of
/// fields and never validate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionRecord(Map<String, Value>);

impl CollectionRecord {
    /// Build a record from any JSON value, if it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Display text for a field
    ///
    /// Strings are returned verbatim, other JSON values in their JSON form,
    /// and a missing field as [`MISSING_FIELD`].
    pub fn field(&self, name: &str) -> String {
        match self.0.get(name) {
            None => MISSING_FIELD.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// JSON envelope returned by the listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsEnvelope {
    pub results: Vec<CollectionRecord>,
}

/// The remote collections Starlist can browse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Films,
    Planets,
}

impl CollectionKind {
    /// All kinds, in tab order
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Films, CollectionKind::Planets];

    /// Endpoint path segment under the API base URL
    pub fn path(self) -> &'static str {
        match self {
            CollectionKind::Films => "films",
            CollectionKind::Planets => "planets",
        }
    }

    /// Full listing URL for this kind under `base_url`
    pub fn endpoint(self, base_url: &str) -> String {
        format!("{}/{}/", base_url.trim_end_matches('/'), self.path())
    }

    /// Field used as the unique list key
    pub fn key_field(self) -> &'static str {
        match self {
            CollectionKind::Films => "uid",
            CollectionKind::Planets => "name",
        }
    }

    /// (label, field) pairs shown under the row title
    pub fn detail_fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            CollectionKind::Films => &[("UID", "uid"), ("URL", "url")],
            CollectionKind::Planets => &[("Population", "population"), ("Climate", "climate")],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CollectionKind::Films => "Films",
            CollectionKind::Planets => "Planets",
        }
    }

    pub fn search_placeholder(self) -> &'static str {
        match self {
            CollectionKind::Films => "Search Films",
            CollectionKind::Planets => "Search Planets",
        }
    }

    /// Header art drawn above the search bar
    pub fn banner(self) -> &'static [&'static str] {
        match self {
            CollectionKind::Films => &[
                r" _________________ ",
                r"|/ / / / / / / / /|",
                r"|_________________|",
                r"|  SCENE   TAKE   |",
                r"|_________________|",
            ],
            CollectionKind::Planets => &[
                r"     .-----.     ",
                r"  .-'  o    '-.  ",
                r" (=====O=======) ",
                r"  '-.     o .-'  ",
                r"     '-----'     ",
            ],
        }
    }

    pub fn key_of(self, record: &CollectionRecord) -> String {
        record.field(self.key_field())
    }

    pub fn title_of(self, record: &CollectionRecord) -> String {
        record.field("name")
    }

    /// Detail lines for a row, e.g. `UID: 1`
    pub fn detail_lines(self, record: &CollectionRecord) -> Vec<String> {
        self.detail_fields()
            .iter()
            .map(|(label, field)| format!("{}: {}", label, record.field(field)))
            .collect()
    }

    /// The kind after this one, wrapping around
    pub fn next(self) -> Self {
        match self {
            CollectionKind::Films => CollectionKind::Planets,
            CollectionKind::Planets => CollectionKind::Films,
        }
    }

    /// The kind before this one, wrapping around
    pub fn previous(self) -> Self {
        // Two kinds: previous and next coincide
        self.next()
    }

    pub fn index(self) -> usize {
        match self {
            CollectionKind::Films => 0,
            CollectionKind::Planets => 1,
        }
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "films" => Ok(CollectionKind::Films),
            "planets" => Ok(CollectionKind::Planets),
            _ => Err(format!(
                "Invalid collection: '{}'. Valid options: films, planets",
                s
            )),
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

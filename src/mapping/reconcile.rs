//! Header reconciliation: raw column headers to [`StandardField`]s.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::debug;

use super::fields::{StandardField, UnknownField};

/// What a raw header is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingTarget {
    /// The column feeds a standard field.
    Field(StandardField),
    /// The column goes to the metadata bag.
    Unmapped,
}

impl MappingTarget {
    /// Name shown in mapping pickers; `"unmapped"` for [`MappingTarget::Unmapped`].
    pub fn as_str(self) -> &'static str {
        match self {
            MappingTarget::Field(f) => f.wire_name(),
            MappingTarget::Unmapped => "unmapped",
        }
    }

    /// Name sent to the import endpoint, where the empty string means "metadata".
    pub fn wire_value(self) -> &'static str {
        match self {
            MappingTarget::Field(f) => f.wire_name(),
            MappingTarget::Unmapped => "",
        }
    }

    pub fn field(self) -> Option<StandardField> {
        match self {
            MappingTarget::Field(f) => Some(f),
            MappingTarget::Unmapped => None,
        }
    }
}

impl fmt::Display for MappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingTarget {
    type Err = UnknownField;

    /// `"unmapped"`, `"skip"` and `""` are all [`MappingTarget::Unmapped`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "unmapped" | "skip" => Ok(MappingTarget::Unmapped),
            _ => s.parse().map(MappingTarget::Field),
        }
    }
}

struct KeywordRule {
    field: StandardField,
    any_of: &'static [&'static str],
    exact: &'static [&'static str],
    none_of: &'static [&'static str],
}

// Order matters: the first matching rule wins.
const RULES: &[KeywordRule] = &[
    KeywordRule {
        field: StandardField::PhoneNumber,
        any_of: &["phone", "mobile"],
        exact: &[],
        none_of: &[],
    },
    KeywordRule {
        field: StandardField::Email,
        any_of: &["email"],
        exact: &[],
        none_of: &[],
    },
    KeywordRule {
        field: StandardField::FirstName,
        any_of: &["first"],
        exact: &[],
        none_of: &["last"],
    },
    KeywordRule {
        field: StandardField::LastName,
        any_of: &["last"],
        exact: &["name"],
        none_of: &[],
    },
    KeywordRule {
        field: StandardField::CompanyName,
        any_of: &["company"],
        exact: &[],
        none_of: &[],
    },
    KeywordRule {
        field: StandardField::Industry,
        any_of: &["industry"],
        exact: &[],
        none_of: &[],
    },
    KeywordRule {
        field: StandardField::Location,
        any_of: &["location", "city"],
        exact: &[],
        none_of: &[],
    },
    KeywordRule {
        field: StandardField::PostalCode,
        any_of: &["pin", "pincode", "postal"],
        exact: &[],
        none_of: &[],
    },
    KeywordRule {
        field: StandardField::Keywords,
        any_of: &["keyword", "tag", "tags"],
        exact: &[],
        none_of: &[],
    },
];

impl KeywordRule {
    fn matches(&self, normalized: &str) -> bool {
        let hit = self.exact.contains(&normalized)
            || self.any_of.iter().any(|kw| contains_keyword(normalized, kw));
        hit && !self.none_of.iter().any(|kw| contains_keyword(normalized, kw))
    }
}

/// Short keywords (`pin`, `tag`) must be a whole `_`-separated token, so `shipping`,
/// `pinterest` or `tagline` don't match; longer keywords match anywhere.
fn contains_keyword(normalized: &str, keyword: &str) -> bool {
    if keyword.len() <= 3 {
        normalized.split('_').any(|token| token == keyword)
    } else {
        normalized.contains(keyword)
    }
}

/// Lower-case `header` and collapse each run of non-alphanumerics into one `_`.
///
/// Leading and trailing separators are dropped: `" Mobile  No. "` becomes `"mobile_no"`.
pub fn normalize_header(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut pending_sep = false;
    for c in header.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Best-effort standard field for one header. Only the header text is inspected.
pub fn infer_target(header: &str) -> MappingTarget {
    let normalized = normalize_header(header);
    RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map_or(MappingTarget::Unmapped, |rule| MappingTarget::Field(rule.field))
}

/// Raw header to [`MappingTarget`] assignments for one import session.
///
/// Entries keep the order in which headers were first seen. A header appearing twice in a file
/// has one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<(String, MappingTarget)>,
}

impl FieldMapping {
    /// Infer a mapping for every header.
    pub fn infer<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut mapping = Self::default();
        for header in headers {
            let header = header.as_ref();
            mapping.set(header, infer_target(header));
        }
        debug!(
            headers = mapping.len(),
            mapped = mapping.iter().filter(|(_, t)| t.field().is_some()).count(),
            "inferred field mapping"
        );
        mapping
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Target for `header`, if the header is known.
    pub fn get(&self, header: &str) -> Option<MappingTarget> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, t)| *t)
    }

    /// Assign `target` to `header`, replacing any previous assignment.
    pub fn set(&mut self, header: &str, target: MappingTarget) {
        match self.entries.iter_mut().find(|(h, _)| h == header) {
            Some(entry) => entry.1 = target,
            None => self.entries.push((header.to_string(), target)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MappingTarget)> {
        self.entries.iter().map(|(h, t)| (h.as_str(), *t))
    }

    /// Whether any header feeds `field`.
    pub fn maps_field(&self, field: StandardField) -> bool {
        self.iter().any(|(_, t)| t == MappingTarget::Field(field))
    }

    /// The mapping as shown to the user, with `"unmapped"` for metadata columns.
    pub fn to_display_map(&self) -> Map<String, Value> {
        self.iter()
            .map(|(h, t)| (h.to_string(), Value::String(t.as_str().to_string())))
            .collect()
    }

    /// The mapping as sent to the endpoint: the unmapped sentinel becomes `""`.
    pub fn to_wire_map(&self) -> Map<String, Value> {
        self.iter()
            .map(|(h, t)| (h.to_string(), Value::String(t.wire_value().to_string())))
            .collect()
    }
}

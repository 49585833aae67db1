use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of contact attributes the import endpoint understands.
///
/// Columns mapped to none of these go to the contact's metadata bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardField {
    PhoneNumber,
    Email,
    FirstName,
    LastName,
    CompanyName,
    Industry,
    Location,
    PostalCode,
    Keywords,
}

impl StandardField {
    /// Every standard field, in display order.
    pub const ALL: [StandardField; 9] = [
        StandardField::PhoneNumber,
        StandardField::Email,
        StandardField::FirstName,
        StandardField::LastName,
        StandardField::CompanyName,
        StandardField::Industry,
        StandardField::Location,
        StandardField::PostalCode,
        StandardField::Keywords,
    ];

    /// Name used on the wire (`mapping_config` values, contact record keys).
    pub fn wire_name(self) -> &'static str {
        match self {
            StandardField::PhoneNumber => "phone_number",
            StandardField::Email => "email",
            StandardField::FirstName => "first_name",
            StandardField::LastName => "last_name",
            StandardField::CompanyName => "company_name",
            StandardField::Industry => "industry",
            StandardField::Location => "location",
            StandardField::PostalCode => "postal_code",
            StandardField::Keywords => "keywords",
        }
    }

    /// Human-readable label for mapping pickers.
    pub fn label(self) -> &'static str {
        match self {
            StandardField::PhoneNumber => "Phone Number",
            StandardField::Email => "Email",
            StandardField::FirstName => "First Name",
            StandardField::LastName => "Last Name",
            StandardField::CompanyName => "Company Name",
            StandardField::Industry => "Industry",
            StandardField::Location => "Location",
            StandardField::PostalCode => "Postal Code",
            StandardField::Keywords => "Keywords",
        }
    }
}

impl fmt::Display for StandardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error returned when a string names no standard field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown standard field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for StandardField {
    type Err = UnknownField;

    /// Accepts a wire name or a display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StandardField::ALL
            .into_iter()
            .find(|f| f.wire_name().eq_ignore_ascii_case(s) || f.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

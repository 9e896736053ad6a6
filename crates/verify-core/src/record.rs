//! Read-only snapshots of user records fetched from either store.

use std::fmt;

/// A user document read from the source store.
///
/// `id` and `group` already hold the string form produced by the source
/// client's identifier conversion, so they compare directly against the
/// destination columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRecord {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Absent or null references are `None`, never the string `"null"`.
    pub group: Option<String>,
}

/// A user row read from the destination store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DestinationRecord {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub group_id: Option<String>,
}

/// The fields cross-checked for every sampled record, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckedField {
    Email,
    Name,
    Group,
}

impl CheckedField {
    pub const ALL: [CheckedField; 3] = [
        CheckedField::Email,
        CheckedField::Name,
        CheckedField::Group,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckedField::Email => "email",
            CheckedField::Name => "name",
            CheckedField::Group => "group",
        }
    }

    pub fn source_value<'a>(&self, record: &'a SourceRecord) -> Option<&'a str> {
        match self {
            CheckedField::Email => record.email.as_deref(),
            CheckedField::Name => record.name.as_deref(),
            CheckedField::Group => record.group.as_deref(),
        }
    }

    pub fn destination_value<'a>(&self, record: &'a DestinationRecord) -> Option<&'a str> {
        match self {
            CheckedField::Email => record.email.as_deref(),
            CheckedField::Name => record.name.as_deref(),
            CheckedField::Group => record.group_id.as_deref(),
        }
    }
}

impl fmt::Display for CheckedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

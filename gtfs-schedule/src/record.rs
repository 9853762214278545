//! Records of the GTFS files and the rules they follow on their own
use crate::tabular::Tabular;
use thiserror::Error;

/// A rule broken by the fields of a single record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A mandatory field is empty
    #[error("{0} is required")]
    Missing(&'static str),
    /// A field is mandatory because of the value of other fields
    #[error("{field} is required when {condition}")]
    MissingWhen {
        /// The empty field
        field: &'static str,
        /// What makes it mandatory
        condition: &'static str,
    },
    /// A field must be empty because of the value of other fields
    #[error("{field} is forbidden when {condition}")]
    ForbiddenWhen {
        /// The filled field
        field: &'static str,
        /// What forbids it
        condition: &'static str,
    },
    /// A value is outside of what the field accepts
    #[error("{field} value {value} is invalid, {expected}")]
    Invalid {
        /// The field
        field: &'static str,
        /// Its value
        value: String,
        /// What is accepted
        expected: &'static str,
    },
    /// Two fields are in the wrong order
    #[error("{field} must not be before {other}")]
    OutOfOrder {
        /// The field that should come after
        field: &'static str,
        /// The field that should come before
        other: &'static str,
    },
}

/// A record of one of the files of a GTFS feed
pub trait Record: Tabular + Send {
    /// Name of the file holding the records, like `stops.txt`
    const FILE_NAME: &'static str;
    /// Whether a feed must provide the file
    const REQUIRED: bool;
    /// Columns the header must have, the values of a file without them cannot be trusted
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Identifies the record within its file
    fn key(&self) -> String;

    /// Rules broken by the fields of the record, empty for a valid record
    fn validate(&self) -> Vec<Violation>;
}

/// Collects the [Violation]s of a record
#[derive(Default)]
pub(crate) struct Rules(Vec<Violation>);

impl Rules {
    pub fn require(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.0.push(Violation::Missing(field));
        }
        self
    }

    pub fn require_some<T>(&mut self, field: &'static str, value: &Option<T>) -> &mut Self {
        if value.is_none() {
            self.0.push(Violation::Missing(field));
        }
        self
    }

    pub fn check(&mut self, valid: bool, violation: impl FnOnce() -> Violation) -> &mut Self {
        if !valid {
            self.0.push(violation());
        }
        self
    }

    pub fn finish(&mut self) -> Vec<Violation> {
        std::mem::take(&mut self.0)
    }
}

/// Is the optional text absent or empty
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

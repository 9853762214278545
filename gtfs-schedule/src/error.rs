//! Module for the error management
//!
//! Reading an archive only fails as a whole when the archive itself cannot be
//! opened. Everything else found wrong in a feed is recorded as a [Diagnostic]
//! of the [crate::Schedule] and the reading goes on.
use crate::record::Violation;
use crate::tabular::ReadError;
use std::fmt;
use thiserror::Error;

/// An error that prevents reading a GTFS archive
#[derive(Error, Debug)]
pub enum Error {
    /// The given path to the GTFS is not a file
    #[error("Could not read GTFS: {0} is not a file")]
    NotAFile(String),
    /// Generic Input/Output error while reading a file
    #[error("impossible to read file")]
    IO(#[from] std::io::Error),
    /// Impossible to read a file
    #[error("impossible to read '{file_name}'")]
    NamedFileIO {
        /// The file name that could not be read
        file_name: String,
        /// The inital error that caused the unability to read the file
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Error when trying to unzip the GTFS archive
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

/// How serious a [Diagnostic] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The data is wrong, the concerned record is dropped or the feed is incomplete
    Error,
    /// The data is unusual but usable
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Something found wrong in a feed
#[derive(Error, Debug)]
pub enum Problem {
    /// A mandatory file is not present in the archive
    #[error("missing required file {0}")]
    MissingFile(&'static str),
    /// Neither calendar.txt nor calendar_dates.txt is present
    #[error("missing calendar.txt and calendar_dates.txt, at least one of them is required")]
    MissingCalendar,
    /// A file without even a header
    #[error("empty file")]
    EmptyFile,
    /// The header lacks a mandatory column, the file is not read
    #[error("missing required column {0}")]
    MissingColumn(&'static str),
    /// A file with a header but no valid record
    #[error("no valid record")]
    NoRecord,
    /// The same file is present twice in the archive
    #[error("file {0} is present more than once, only the first one is read")]
    DuplicateFile(String),
    /// A file the reader does not know about
    #[error("unrecognized file {0}")]
    UnusedFile(String),
    /// The content of a file could not be read at all
    #[error("cannot read the file: {0}")]
    Unreadable(#[source] std::io::Error),
    /// The header of a file could not be read
    #[error("cannot read the header: {0}")]
    Header(#[source] ReadError),
    /// A row could not be read, it is dropped
    #[error("{0}")]
    Row(#[source] ReadError),
    /// A record breaks a rule on its own fields, it is dropped
    #[error("invalid record '{key}': {violation}")]
    Invalid {
        /// Key of the record
        key: String,
        /// The broken rule
        #[source]
        violation: Violation,
    },
    /// A record has the same key as a previous one, it is dropped
    #[error("duplicate key '{0}'")]
    DuplicateKey(String),
    /// A record references a record that does not exist
    #[error("{kind} '{id}' references an unknown {target} '{reference}'")]
    DanglingReference {
        /// Type of the referencing record
        kind: &'static str,
        /// Key of the referencing record
        id: String,
        /// Type of the referenced record
        target: &'static str,
        /// The unknown key
        reference: String,
    },
    /// A route does not tell its agency while the feed has several
    #[error("route '{0}' has no agency_id while the feed has several agencies")]
    AmbiguousAgency(String),
}

/// A problem located in a feed
#[derive(Debug)]
pub struct Diagnostic {
    /// How serious the problem is
    pub severity: Severity,
    /// File of the archive concerned, if any
    pub file: Option<String>,
    /// Line of the file concerned, if known
    pub line: Option<u64>,
    /// What is wrong
    pub problem: Problem,
}

impl Diagnostic {
    /// An error about a whole file
    pub fn error(file: impl Into<String>, problem: Problem) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            file: Some(file.into()),
            line: None,
            problem,
        }
    }

    /// A warning about a whole file
    pub fn warning(file: impl Into<String>, problem: Problem) -> Diagnostic {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(file, problem)
        }
    }

    /// An error about the feed, not tied to a file
    pub fn feed_error(problem: Problem) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            file: None,
            line: None,
            problem,
        }
    }

    /// Sets the line of the file concerned
    pub fn at_line(self, line: Option<u64>) -> Diagnostic {
        Diagnostic { line, ..self }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] ", self.severity)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}: ", file, line)?,
            (Some(file), None) => write!(f, "{}: ", file)?,
            (None, _) => {}
        }
        write!(f, "{}", self.problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let d = Diagnostic::error("stops.txt", Problem::DuplicateKey("S1".to_owned()))
            .at_line(Some(12));
        assert_eq!(d.to_string(), "[error] stops.txt:12: duplicate key 'S1'");
        let d = Diagnostic::warning("agency.txt", Problem::EmptyFile);
        assert_eq!(d.to_string(), "[warning] agency.txt: empty file");
        let d = Diagnostic::feed_error(Problem::MissingCalendar);
        assert!(d.to_string().starts_with("[error] missing calendar.txt"));
    }
}

//! Failures of the tabular codec
use super::value::Kind;
use thiserror::Error;

/// A cell could not be converted into a typed value
///
/// The message names the offending text, the column is added by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Not an integer, or the integer does not fit the field's width
    #[error("'{text}' is not a valid integer: {source}")]
    Integer {
        /// The cell content
        text: String,
        /// Why the standard parser refused it
        source: std::num::ParseIntError,
    },
    /// Not a floating point number
    #[error("'{text}' is not a valid number: {source}")]
    Float {
        /// The cell content
        text: String,
        /// Why the standard parser refused it
        source: std::num::ParseFloatError,
    },
    /// Booleans are written `true` or `false`, nothing else
    #[error("'{0}' is not a valid boolean; true or false is expected")]
    Bool(String),
    /// The date is not given in the YYYYMMDD format
    #[error("'{0}' is not a valid date; YYYYMMDD format is expected")]
    Date(String),
    /// The time is not given in the HH:MM:SS format
    #[error("'{0}' is not a valid time; HH:MM:SS format is expected")]
    Time(String),
    /// The color is not given in the RRGGBB format, without a leading `#`
    #[error("'{0}' is not a valid color; RRGGBB format is expected, without a leading `#`")]
    Color(String),
    /// Not an ISO 4217 currency code
    #[error("'{0}' is not a known ISO 4217 currency code")]
    Currency(String),
    /// An enumerated code outside of the values allowed for the field
    #[error("{value} is out of bounds, expected a value between {lower} and {upper}")]
    OutOfBounds {
        /// The parsed value
        value: i64,
        /// Smallest allowed value
        lower: i64,
        /// Largest allowed value
        upper: i64,
    },
    /// A scalar of one kind was given where another was expected
    #[error("expected a {expected:?} value, found {found:?}")]
    Mismatch {
        /// The kind the field holds
        expected: Kind,
        /// The kind that was given
        found: Kind,
    },
}

/// A value could not be written as text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The date has no 8 digit representation
    #[error("{0} cannot be written as YYYYMMDD")]
    Date(String),
}

/// A row could not be read into a record
#[derive(Error, Debug)]
pub enum ReadError {
    /// One cell could not be converted, the row is dropped
    #[error("line {line}, column {column} ('{name}'), field {field}: {source}")]
    Field {
        /// Line of the row in the file
        line: u64,
        /// Index of the column in the header
        column: usize,
        /// Index of the field in the record declaration
        field: usize,
        /// Name of the column
        name: String,
        /// The conversion failure
        #[source]
        source: ParseError,
    },
    /// The row does not have as many cells as the header
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        /// Line of the row in the file
        line: u64,
        /// Number of columns in the header
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },
    /// The csv syntax or encoding is invalid
    #[error("invalid csv content: {0}")]
    Csv(#[source] csv::Error),
    /// The underlying reader failed, nothing more can be read
    #[error("impossible to read the input")]
    Io(#[source] std::io::Error),
}

impl ReadError {
    /// Line of the failing row, when known
    pub fn line(&self) -> Option<u64> {
        match self {
            ReadError::Field { line, .. } | ReadError::ColumnCount { line, .. } => Some(*line),
            ReadError::Csv(e) => e.position().map(|p| p.line()),
            ReadError::Io(_) => None,
        }
    }

    /// A fatal error stops the reading, the others only concern one row
    pub fn is_fatal(&self) -> bool {
        matches!(self, ReadError::Io(_))
    }
}

impl From<csv::Error> for ReadError {
    fn from(e: csv::Error) -> Self {
        match e.kind() {
            csv::ErrorKind::Io(io) => {
                let kind = io.kind();
                ReadError::Io(std::io::Error::new(kind, e))
            }
            _ => ReadError::Csv(e),
        }
    }
}

/// A record could not be written
#[derive(Error, Debug)]
pub enum WriteError {
    /// A field refused to be converted to text
    #[error("cannot write field '{name}': {source}")]
    Format {
        /// Name of the column
        name: &'static str,
        /// The conversion failure
        #[source]
        source: FormatError,
    },
    /// The csv writer failed
    #[error("impossible to write csv: {0}")]
    Csv(#[from] csv::Error),
    /// The underlying writer failed
    #[error("impossible to write the output")]
    Io(#[from] std::io::Error),
}

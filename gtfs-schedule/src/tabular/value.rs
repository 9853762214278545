//! Conversion of cell text into typed values and back
//!
//! Primitive field types go through a closed set of [Kind]s, each with a fixed
//! text form. Types with a text form of their own (dates, times, colors...)
//! implement [Cell] directly and take precedence over the primitive handling.
use super::error::{FormatError, ParseError};

/// Shapes of primitive values a cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Text, taken as is
    Str,
    /// Signed integer on 8 bits
    I8,
    /// Signed integer on 16 bits
    I16,
    /// Signed integer on 32 bits
    I32,
    /// Signed integer on 64 bits
    I64,
    /// Unsigned integer on 8 bits
    U8,
    /// Unsigned integer on 16 bits
    U16,
    /// Unsigned integer on 32 bits
    U32,
    /// Unsigned integer on 64 bits
    U64,
    /// Floating point number on 32 bits
    F32,
    /// Floating point number on 64 bits
    F64,
    /// `true` or `false`
    Bool,
}

/// A primitive value
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Scalar {
    Str(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
}

impl Scalar {
    /// Parses the text of a cell as a value of the given kind
    ///
    /// Integers are parsed in base 10 and must fit the width of the kind.
    pub fn parse(kind: Kind, text: &str) -> Result<Scalar, ParseError> {
        let int = |source| ParseError::Integer {
            text: text.to_owned(),
            source,
        };
        let float = |source| ParseError::Float {
            text: text.to_owned(),
            source,
        };
        Ok(match kind {
            Kind::Str => Scalar::Str(text.to_owned()),
            Kind::I8 => Scalar::I8(text.parse().map_err(int)?),
            Kind::I16 => Scalar::I16(text.parse().map_err(int)?),
            Kind::I32 => Scalar::I32(text.parse().map_err(int)?),
            Kind::I64 => Scalar::I64(text.parse().map_err(int)?),
            Kind::U8 => Scalar::U8(text.parse().map_err(int)?),
            Kind::U16 => Scalar::U16(text.parse().map_err(int)?),
            Kind::U32 => Scalar::U32(text.parse().map_err(int)?),
            Kind::U64 => Scalar::U64(text.parse().map_err(int)?),
            Kind::F32 => Scalar::F32(text.parse().map_err(float)?),
            Kind::F64 => Scalar::F64(text.parse().map_err(float)?),
            Kind::Bool => match text {
                "true" => Scalar::Bool(true),
                "false" => Scalar::Bool(false),
                _ => return Err(ParseError::Bool(text.to_owned())),
            },
        })
    }

    /// The kind of the value
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Str(_) => Kind::Str,
            Scalar::I8(_) => Kind::I8,
            Scalar::I16(_) => Kind::I16,
            Scalar::I32(_) => Kind::I32,
            Scalar::I64(_) => Kind::I64,
            Scalar::U8(_) => Kind::U8,
            Scalar::U16(_) => Kind::U16,
            Scalar::U32(_) => Kind::U32,
            Scalar::U64(_) => Kind::U64,
            Scalar::F32(_) => Kind::F32,
            Scalar::F64(_) => Kind::F64,
            Scalar::Bool(_) => Kind::Bool,
        }
    }

    /// Text form of the value
    ///
    /// Floats use the shortest representation that reads back to the same value.
    pub fn format(&self) -> String {
        match self {
            Scalar::Str(s) => s.clone(),
            Scalar::I8(v) => v.to_string(),
            Scalar::I16(v) => v.to_string(),
            Scalar::I32(v) => v.to_string(),
            Scalar::I64(v) => v.to_string(),
            Scalar::U8(v) => v.to_string(),
            Scalar::U16(v) => v.to_string(),
            Scalar::U32(v) => v.to_string(),
            Scalar::U64(v) => v.to_string(),
            Scalar::F32(v) => v.to_string(),
            Scalar::F64(v) => v.to_string(),
            Scalar::Bool(v) => v.to_string(),
        }
    }
}

/// A rust type backed by one [Kind]
pub trait Primitive: Sized {
    /// Kind used to parse and format the type
    const KIND: Kind;

    /// Extracts the value, [None] if the scalar is of another kind
    fn from_scalar(scalar: Scalar) -> Option<Self>;

    /// Wraps the value
    fn to_scalar(&self) -> Scalar;
}

/// A field type the codec can read from and write to a cell
pub trait Cell: Sized {
    /// Builds the value from the (already trimmed) text of a cell
    fn decode(text: &str) -> Result<Self, ParseError>;

    /// Text of the cell holding the value
    fn encode(&self) -> Result<String, FormatError>;
}

macro_rules! primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const KIND: Kind = Kind::$kind;

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::$kind(v) => Some(v),
                        _ => None,
                    }
                }

                fn to_scalar(&self) -> Scalar {
                    Scalar::$kind(self.clone())
                }
            }

            impl Cell for $ty {
                fn decode(text: &str) -> Result<Self, ParseError> {
                    let scalar = Scalar::parse(Self::KIND, text)?;
                    let found = scalar.kind();
                    Self::from_scalar(scalar).ok_or(ParseError::Mismatch {
                        expected: Self::KIND,
                        found,
                    })
                }

                fn encode(&self) -> Result<String, FormatError> {
                    Ok(self.to_scalar().format())
                }
            }
        )*
    };
}

primitive! {
    String => Str,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

/// An empty cell is an absent value, and an absent value is an empty cell
impl<T: Cell> Cell for Option<T> {
    fn decode(text: &str) -> Result<Self, ParseError> {
        if text.is_empty() {
            Ok(None)
        } else {
            T::decode(text).map(Some)
        }
    }

    fn encode(&self) -> Result<String, FormatError> {
        match self {
            Some(v) => v.encode(),
            None => Ok(String::new()),
        }
    }
}

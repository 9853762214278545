//! Generic csv codec binding columns to the fields of a record type
//!
//! A record type declares its fields once with [crate::tabular_record]; the
//! declaration gives each field a column name and the conversions of its
//! value, and is resolved into a [FieldMap] the first time the type is used.
mod error;
mod field;
mod reader;
mod value;
mod writer;

pub use error::{FormatError, ParseError, ReadError, WriteError};
pub use field::{Field, FieldDescriptor, FieldMap, FieldMapError};
pub use reader::TabularReader;
pub use value::{Cell, Kind, Primitive, Scalar};
pub use writer::TabularWriter;

/// A type that can be read from and written to a csv row
pub trait Tabular: Default + 'static {
    /// The field declarations, a field's slot is its index
    const FIELDS: &'static [Field<Self>];

    /// The resolved declarations, built once per type
    fn field_map() -> &'static FieldMap;

    /// Receives the cells of the columns no field reads
    fn keep_unused(&mut self, _column: &str, _value: &str) {}
}

/// Declares the fields of a record type
///
/// Each field is listed with an optional `name[,omit]` annotation: the name is
/// the column of the field (the field's own name when empty) and `omit` keeps
/// the field out of reading and writing. Every listed field must implement
/// [Cell]. An optional `unused: field` clause collects the `(column, value)`
/// pairs of unknown columns into a `Vec<(String, String)>` field.
///
/// ```
/// # use gtfs_schedule::tabular_record;
/// #[derive(Default)]
/// struct Shelter {
///     id: String,
///     seats: Option<u32>,
///     unused: Vec<(String, String)>,
/// }
///
/// tabular_record! {
///     Shelter {
///         id: "shelter_id",
///         seats,
///     }
///     unused: unused
/// }
/// ```
///
/// Two fields claiming the same column make the first use of the type panic.
#[macro_export]
macro_rules! tabular_record {
    (
        $record:ident {
            $( $field:ident $(: $annotation:literal)? ),* $(,)?
        }
        $(unused: $unused:ident)?
    ) => {
        impl $crate::tabular::Tabular for $record {
            const FIELDS: &'static [$crate::tabular::Field<Self>] = &[
                $(
                    $crate::tabular::Field {
                        ident: stringify!($field),
                        annotation: concat!("", $($annotation)?),
                        decode: |record, text| {
                            record.$field = $crate::tabular::Cell::decode(text)?;
                            Ok(())
                        },
                        encode: |record| $crate::tabular::Cell::encode(&record.$field),
                    },
                )*
            ];

            fn field_map() -> &'static $crate::tabular::FieldMap {
                static MAP: ::std::sync::OnceLock<$crate::tabular::FieldMap> =
                    ::std::sync::OnceLock::new();
                MAP.get_or_init(|| {
                    $crate::tabular::FieldMap::build(Self::FIELDS).unwrap_or_else(|e| {
                        panic!("invalid field declarations of {}: {}", stringify!($record), e)
                    })
                })
            }

            $(
                fn keep_unused(&mut self, column: &str, value: &str) {
                    self.$unused.push((column.to_owned(), value.to_owned()));
                }
            )?
        }
    };
}

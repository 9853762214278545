//! Mapping between the columns of a file and the fields of a record
use super::error::{FormatError, ParseError};
use std::collections::HashMap;
use thiserror::Error;

/// Declaration of one field of a record type
///
/// Built by [crate::tabular_record], the position of the field in the
/// declaration list is its slot.
pub struct Field<T> {
    /// Name of the field in the rust type
    pub ident: &'static str,
    /// `name[,omit]`; an empty name keeps `ident`, `-` or `omit` excludes the field from I/O
    pub annotation: &'static str,
    /// Stores the value read from a cell into the field
    pub decode: fn(&mut T, &str) -> Result<(), ParseError>,
    /// Text of the cell holding the field
    pub encode: fn(&T) -> Result<String, FormatError>,
}

/// Resolved declaration of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column name
    pub name: &'static str,
    /// Index of the field in the declaration list
    pub slot: usize,
    /// Whether the field takes part in reading and writing
    pub present: bool,
}

/// The declarations of a record type are inconsistent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldMapError {
    /// Two fields read the same column
    #[error("column '{name}' is claimed by both '{first}' and '{second}'")]
    DuplicateName {
        /// The column name
        name: &'static str,
        /// First field claiming it
        first: &'static str,
        /// Second field claiming it
        second: &'static str,
    },
    /// The annotation holds an option that is not understood
    #[error("unknown option '{option}' on field '{field}'")]
    UnknownOption {
        /// The field carrying the annotation
        field: &'static str,
        /// The option
        option: &'static str,
    },
}

/// Column name to field slot table of a record type
#[derive(Debug)]
pub struct FieldMap {
    descriptors: Vec<FieldDescriptor>,
    slots: HashMap<&'static str, usize>,
}

fn parse_annotation(
    ident: &'static str,
    annotation: &'static str,
) -> Result<(&'static str, bool), FieldMapError> {
    let mut parts = annotation.split(',');
    let (name, mut present) = match parts.next().map(str::trim) {
        None | Some("") => (ident, true),
        Some("-") => (ident, false),
        Some(name) => (name, true),
    };
    for option in parts.map(str::trim) {
        match option {
            "omit" => present = false,
            "" => {}
            option => {
                return Err(FieldMapError::UnknownOption {
                    field: ident,
                    option,
                })
            }
        }
    }
    Ok((name, present))
}

impl FieldMap {
    /// Resolves the declarations of a record type
    ///
    /// Omitted fields keep a descriptor but claim no column.
    pub fn build<T>(fields: &[Field<T>]) -> Result<FieldMap, FieldMapError> {
        let mut descriptors = Vec::with_capacity(fields.len());
        let mut slots: HashMap<&'static str, usize> = HashMap::new();
        for (slot, field) in fields.iter().enumerate() {
            let (name, present) = parse_annotation(field.ident, field.annotation)?;
            if present {
                if let Some(&first) = slots.get(name) {
                    return Err(FieldMapError::DuplicateName {
                        name,
                        first: fields[first].ident,
                        second: field.ident,
                    });
                }
                slots.insert(name, slot);
            }
            descriptors.push(FieldDescriptor {
                name,
                slot,
                present,
            });
        }
        Ok(FieldMap { descriptors, slots })
    }

    /// Slot of the field reading the column
    pub fn slot(&self, column: &str) -> Option<usize> {
        self.slots.get(column).copied()
    }

    /// All the declarations, in declaration order
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// Declarations taking part in I/O, in declaration order
    pub fn columns(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.descriptors.iter().filter(|d| d.present)
    }
}

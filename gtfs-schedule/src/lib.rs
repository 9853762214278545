/*! The [General Transit Feed Specification](https://gtfs.org/) (GTFS) is a commonly used model to represent public transit data.

This crate reads GTFS archives and tells what is wrong with them.

To get started, see [ScheduleReader] and [Collection].

## What is GTFS

A Gtfs feed is a collection of CSV files bundled as a zip file.
Each file represents a collection of one type (stops, lines, etc.) that have relationships through unique identifiers.

## Design decisions

### Keep reading

A feed is rarely perfect. Reading only fails when the archive itself cannot be opened:
a row that cannot be read, a record breaking a rule, a duplicate identifier or a reference to
an unknown record is recorded as a [Diagnostic] of the [Schedule] and the record is left out.

### Generic csv codec

The files are read and written by [tabular::TabularReader] and [tabular::TabularWriter], which bind the
columns to the fields of a record by name. A record type declares its columns once with [tabular_record].

### Use of bounded integers

Many values are integers that are actually enumerations of certain values.
They are represented by [Enum], an integer restricted to the range of its field, like [LocationType].

### Renaming

We kept some names even if they can be confusing (a [Calendar] will be referenced by `service_id`), but we strip the object type (`route_short_name` is [Route::short_name]).

*/
#![warn(missing_docs)]

#[macro_use]
extern crate derivative;
#[macro_use]
extern crate serde_derive;

pub mod tabular;

mod collection;
pub mod error;
pub(crate) mod objects;
mod record;
mod schedule;
mod schedule_reader;
mod serde_helpers;
pub mod types;

#[cfg(test)]
mod tests;

pub use collection::Collection;
pub use error::{Diagnostic, Error, Problem, Severity};
pub use objects::*;
pub use record::{Record, Violation};
pub use schedule::{Schedule, Summary};
pub use schedule_reader::ScheduleReader;
pub use types::*;

//! Value types of GTFS fields with their own text form
mod color;
mod currency;
mod date;
pub mod enums;
mod time;

pub use color::{Color, BLACK, WHITE};
pub use currency::CurrencyCode;
pub use date::Date;
pub use enums::*;
pub use time::Time;

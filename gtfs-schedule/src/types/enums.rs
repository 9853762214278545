//! Bounded integer codes and the named values of each GTFS enumeration
use crate::tabular::{Cell, FormatError, Kind, ParseError, Scalar};
use std::fmt;

/// An integer code restricted to the values `L` to `U` (inclusive)
///
/// GTFS uses small integer codes for enumerations, the field type carries the
/// allowed range. The default value is `L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Enum<const L: u16, const U: u16>(u16);

impl<const L: u16, const U: u16> Enum<L, U> {
    /// Smallest allowed value
    pub const LOWER: u16 = L;
    /// Largest allowed value
    pub const UPPER: u16 = U;

    /// The code, if within bounds
    pub fn new(value: i64) -> Result<Self, ParseError> {
        match u16::try_from(value) {
            Ok(v) if (L..=U).contains(&v) => Ok(Enum(v)),
            _ => Err(ParseError::OutOfBounds {
                value,
                lower: L.into(),
                upper: U.into(),
            }),
        }
    }

    const fn of(value: u16) -> Self {
        assert!(value >= L && value <= U);
        Enum(value)
    }

    /// The code
    pub fn value(self) -> u16 {
        self.0
    }
}

impl<const L: u16, const U: u16> Default for Enum<L, U> {
    fn default() -> Self {
        Enum(L)
    }
}

impl<const L: u16, const U: u16> fmt::Display for Enum<L, U> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<const L: u16, const U: u16> Cell for Enum<L, U> {
    fn decode(text: &str) -> Result<Self, ParseError> {
        match Scalar::parse(Kind::I64, text)? {
            Scalar::I64(value) => Enum::new(value),
            other => Err(ParseError::Mismatch {
                expected: Kind::I64,
                found: other.kind(),
            }),
        }
    }

    fn encode(&self) -> Result<String, FormatError> {
        Ok(self.0.to_string())
    }
}

/// Whether a service runs on a day of the week. See <https://gtfs.org/reference/static/#calendartxt>
pub type Availability = Enum<0, 1>;
/// Service not available on the day
pub const UNAVAILABLE: Availability = Enum::of(0);
/// Service available on the day
pub const AVAILABLE: Availability = Enum::of(1);

/// Exception to a service. See <https://gtfs.org/reference/static/#calendar_datestxt> `exception_type`
pub type ExceptionType = Enum<1, 2>;
/// The service is added on the date
pub const SERVICE_ADDED: ExceptionType = Enum::of(1);
/// The service is removed on the date
pub const SERVICE_REMOVED: ExceptionType = Enum::of(2);

/// Describes the kind of [crate::Stop]. See <https://gtfs.org/reference/static/#stopstxt> `location_type`
pub type LocationType = Enum<0, 4>;
/// A location where passengers board or disembark from a transit vehicle
pub const STOP_POINT: LocationType = Enum::of(0);
/// A physical structure or area that contains one or more platforms
pub const STATION: LocationType = Enum::of(1);
/// A location where passengers can enter or exit a station from the street
pub const STATION_ENTRANCE: LocationType = Enum::of(2);
/// A location within a station used to link pathways together
pub const GENERIC_NODE: LocationType = Enum::of(3);
/// A specific location on a platform, where passengers can board and/or alight vehicles
pub const BOARDING_AREA: LocationType = Enum::of(4);

/// Accessibility of a stop or a trip with a wheelchair
///
/// 0 means no information, 1 accessible, 2 not accessible.
pub type WheelchairAccessible = Enum<0, 2>;

/// Whether bikes are allowed on a trip, 0 meaning no information, 1 allowed and 2 forbidden
pub type BikesAllowed = Enum<0, 2>;

/// Type of transportation of a [crate::Route]. See <https://gtfs.org/reference/static/#routestxt> `route_type`
///
/// The range covers the extended route types.
pub type RouteType = Enum<0, 1702>;

/// Describes if and how a traveller can board or alight the vehicle. See <https://gtfs.org/reference/static/#stop_timestxt> `pickup_type` and `dropoff_type`
pub type PickupDropOffType = Enum<0, 3>;
/// Regularly scheduled pickup or drop off
pub const REGULAR: PickupDropOffType = Enum::of(0);
/// No pickup or drop off available
pub const NOT_AVAILABLE: PickupDropOffType = Enum::of(1);
/// Must phone agency to arrange pickup or drop off
pub const ARRANGE_BY_PHONE: PickupDropOffType = Enum::of(2);
/// Must coordinate with driver to arrange pickup or drop off
pub const COORDINATE_WITH_DRIVER: PickupDropOffType = Enum::of(3);

/// Indicates whether a rider can alight or board the vehicle at any point along its travel path
///
/// Same codes as [PickupDropOffType], except that 1, the default in GTFS, means no continuous stopping.
pub type ContinuousPickupDropOff = Enum<0, 3>;

/// Direction of travel of a trip, to tell apart the two directions of a route
pub type DirectionId = Enum<0, 1>;

/// Whether the times of a stop time are exact (1) or approximate (0)
pub type Timepoint = Enum<0, 1>;

/// When a fare is paid, 0 on board and 1 before boarding. See <https://gtfs.org/reference/static/#fare_attributestxt>
pub type PaymentMethod = Enum<0, 1>;

/// Number of transfers permitted on a fare; an absent value means unlimited transfers
pub type FareTransfers = Enum<0, 2>;

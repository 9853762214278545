use crate::record::{is_blank, Record, Rules, Violation};
use crate::tabular_record;
use crate::types::*;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::fmt;

/// General informations about the agency running the network. See <https://gtfs.org/reference/static/#agencytxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Agency {
    /// Unique technical (not for the traveller) identifier for the Agency, can be empty when the feed has a single agency
    pub id: String,
    ///Full name of the transit agency
    pub name: String,
    /// URL of the transit agency
    pub url: String,
    /// Timezone where the transit agency is located
    pub timezone: String,
    /// Primary language used by this transit agency
    pub lang: Option<String>,
    /// A voice telephone number for the specified agency
    pub phone: Option<String>,
    /// URL of a web page that allows a rider to purchase tickets or other fare instruments for that agency online
    pub fare_url: Option<String>,
    /// Email address actively monitored by the agency’s customer service department
    pub email: Option<String>,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    Agency {
        id: "agency_id",
        name: "agency_name",
        url: "agency_url",
        timezone: "agency_timezone",
        lang: "agency_lang",
        phone: "agency_phone",
        fare_url: "agency_fare_url",
        email: "agency_email",
    }
    unused: unused
}

impl Record for Agency {
    const FILE_NAME: &'static str = "agency.txt";
    const REQUIRED: bool = true;
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["agency_name", "agency_url", "agency_timezone"];

    fn key(&self) -> String {
        self.id.clone()
    }

    fn validate(&self) -> Vec<Violation> {
        Rules::default()
            .require("agency_name", &self.name)
            .require("agency_url", &self.url)
            .require("agency_timezone", &self.timezone)
            .finish()
    }
}

impl fmt::Display for Agency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A physical stop, station or area. See <https://gtfs.org/reference/static/#stopstxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Stop {
    /// Unique technical identifier (not for the traveller) of the stop
    pub id: String,
    /// Short text or a number that identifies the location for riders
    pub code: Option<String>,
    ///Name of the location. Use a name that people will understand in the local and tourist vernacular
    pub name: String,
    /// Readable version of the name for text-to-speech systems
    pub tts_name: Option<String>,
    /// Description of the location that provides useful, quality information
    pub description: Option<String>,
    /// Latitude of the stop
    pub latitude: Option<f64>,
    /// Longitude of the stop
    pub longitude: Option<f64>,
    /// Identifies the fare zone for a stop
    pub zone_id: Option<String>,
    /// URL of a web page about the location
    pub url: Option<String>,
    /// Type of the location, a [STOP_POINT] when empty
    pub location_type: Option<LocationType>,
    /// Defines hierarchy between the different locations
    pub parent_station: Option<String>,
    /// Timezone of the location
    pub timezone: Option<String>,
    /// Indicates whether wheelchair boardings are possible from the location
    pub wheelchair_boarding: Option<WheelchairAccessible>,
    /// Level of the location. The same level can be used by multiple unlinked stations
    pub level_id: Option<String>,
    /// Platform identifier for a platform stop (a stop belonging to a station)
    pub platform_code: Option<String>,
    /// Identifiers of the stops having this stop as parent station
    #[serde(skip)]
    pub children: BTreeSet<String>,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    Stop {
        id: "stop_id",
        code: "stop_code",
        name: "stop_name",
        tts_name: "tts_stop_name",
        description: "stop_desc",
        latitude: "stop_lat",
        longitude: "stop_lon",
        zone_id,
        url: "stop_url",
        location_type,
        parent_station,
        timezone: "stop_timezone",
        wheelchair_boarding,
        level_id,
        platform_code,
    }
    unused: unused
}

impl Stop {
    /// Type of the location
    pub fn location_type(&self) -> LocationType {
        self.location_type.unwrap_or_default()
    }
}

impl Record for Stop {
    const FILE_NAME: &'static str = "stops.txt";
    const REQUIRED: bool = true;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["stop_id"];

    fn key(&self) -> String {
        self.id.clone()
    }

    fn validate(&self) -> Vec<Violation> {
        let location_type = self.location_type();
        let located = location_type.value() <= STATION_ENTRANCE.value();
        let condition = "location_type is 0, 1 or 2";
        let mut rules = Rules::default();
        rules
            .require("stop_id", &self.id)
            .check(!located || !self.name.is_empty(), || Violation::MissingWhen {
                field: "stop_name",
                condition,
            })
            .check(!located || self.latitude.is_some(), || Violation::MissingWhen {
                field: "stop_lat",
                condition,
            })
            .check(!located || self.longitude.is_some(), || Violation::MissingWhen {
                field: "stop_lon",
                condition,
            })
            .check(
                location_type.value() < STATION_ENTRANCE.value() || !is_blank(&self.parent_station),
                || Violation::MissingWhen {
                    field: "parent_station",
                    condition: "location_type is 2, 3 or 4",
                },
            )
            .check(location_type != STATION || is_blank(&self.parent_station), || {
                Violation::ForbiddenWhen {
                    field: "parent_station",
                    condition: "location_type is 1",
                }
            });
        if let Some(latitude) = self.latitude {
            rules.check((-90.0..=90.0).contains(&latitude), || Violation::Invalid {
                field: "stop_lat",
                value: latitude.to_string(),
                expected: "a latitude is between -90 and 90",
            });
        }
        if let Some(longitude) = self.longitude {
            rules.check((-180.0..=180.0).contains(&longitude), || Violation::Invalid {
                field: "stop_lon",
                value: longitude.to_string(),
                expected: "a longitude is between -180 and 180",
            });
        }
        rules.finish()
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A route is a commercial line (there can be various stop sequences for a same line). See <https://gtfs.org/reference/static/#routestxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Route {
    /// Unique technical (not for the traveller) identifier for the route
    pub id: String,
    /// Agency for the specified route
    pub agency_id: Option<String>,
    /// Short name of a route. This will often be a short, abstract identifier like "32", "100X", or "Green" that riders use to identify a route, but which doesn't give any indication of what places the route serves
    pub short_name: String,
    /// Full name of a route. This name is generally more descriptive than the [Route::short_name] and often includes the route's destination or stop
    pub long_name: String,
    /// Description of a route that provides useful, quality information
    pub desc: Option<String>,
    /// Indicates the type of transportation used on a route
    pub route_type: Option<RouteType>,
    /// URL of a web page about the particular route
    pub url: Option<String>,
    /// Route color designation that matches public facing material
    pub color: Option<Color>,
    /// Legible color to use for text drawn against a background of [Route::color]
    pub text_color: Option<Color>,
    /// Orders the routes in a way which is ideal for presentation to customers. Routes with smaller route_sort_order values should be displayed first.
    pub sort_order: Option<u32>,
    /// Indicates whether a rider can board the transit vehicle anywhere along the vehicle’s travel path
    pub continuous_pickup: Option<ContinuousPickupDropOff>,
    /// Indicates whether a rider can alight from the transit vehicle at any point along the vehicle’s travel path
    pub continuous_drop_off: Option<ContinuousPickupDropOff>,
    /// Group of routes the route belongs to
    pub network_id: Option<String>,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    Route {
        id: "route_id",
        agency_id,
        short_name: "route_short_name",
        long_name: "route_long_name",
        desc: "route_desc",
        route_type,
        url: "route_url",
        color: "route_color",
        text_color: "route_text_color",
        sort_order: "route_sort_order",
        continuous_pickup,
        continuous_drop_off,
        network_id,
    }
    unused: unused
}

impl Route {
    /// Color of the route, white when not given
    pub fn color(&self) -> Color {
        self.color.unwrap_or(WHITE)
    }

    /// Color of the text of the route, black when not given
    pub fn text_color(&self) -> Color {
        self.text_color.unwrap_or(BLACK)
    }
}

impl Record for Route {
    const FILE_NAME: &'static str = "routes.txt";
    const REQUIRED: bool = true;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["route_id", "route_type"];

    fn key(&self) -> String {
        self.id.clone()
    }

    fn validate(&self) -> Vec<Violation> {
        let mut rules = Rules::default();
        rules
            .require("route_id", &self.id)
            .check(
                !self.short_name.is_empty() || !self.long_name.is_empty(),
                || Violation::MissingWhen {
                    field: "route_short_name",
                    condition: "route_long_name is empty",
                },
            )
            .require_some("route_type", &self.route_type);
        if let Some(route_type) = self.route_type {
            let value = route_type.value();
            rules.check(value <= 12 || value >= 100, || Violation::Invalid {
                field: "route_type",
                value: value.to_string(),
                expected: "basic route types go up to 12 and extended ones start at 100",
            });
        }
        rules.finish()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.long_name.is_empty() {
            write!(f, "{}", self.long_name)
        } else {
            write!(f, "{}", self.short_name)
        }
    }
}

/// A calendar describes on which days the vehicle runs. See <https://gtfs.org/reference/static/#calendartxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Calendar {
    /// Unique technical identifier (not for the traveller) of this calendar
    pub service_id: String,
    /// Does the service run on mondays
    pub monday: Availability,
    /// Does the service run on tuesdays
    pub tuesday: Availability,
    /// Does the service run on wednesdays
    pub wednesday: Availability,
    /// Does the service run on thursdays
    pub thursday: Availability,
    /// Does the service run on fridays
    pub friday: Availability,
    /// Does the service run on saturdays
    pub saturday: Availability,
    /// Does the service run on sundays
    pub sunday: Availability,
    /// Start service day for the service interval
    pub start_date: Date,
    /// End service day for the service interval. This service day is included in the interval
    pub end_date: Date,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    Calendar {
        service_id,
        monday,
        tuesday,
        wednesday,
        thursday,
        friday,
        saturday,
        sunday,
        start_date,
        end_date,
    }
    unused: unused
}

impl Calendar {
    /// Returns true if there is a service running on that day of the week
    pub fn valid_weekday(&self, date: NaiveDate) -> bool {
        let day = match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        };
        day == AVAILABLE
    }
}

impl Record for Calendar {
    const FILE_NAME: &'static str = "calendar.txt";
    const REQUIRED: bool = false;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "service_id",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
        "start_date",
        "end_date",
    ];

    fn key(&self) -> String {
        self.service_id.clone()
    }

    fn validate(&self) -> Vec<Violation> {
        Rules::default()
            .require("service_id", &self.service_id)
            .check(self.end_date >= self.start_date, || Violation::OutOfOrder {
                field: "end_date",
                other: "start_date",
            })
            .finish()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} to {}", self.start_date, self.end_date)
    }
}

/// Defines a specific date that can be added or removed from a [Calendar]. See <https://gtfs.org/reference/static/#calendar_datestxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct CalendarDate {
    /// Identifier of the service that is modified at this date
    pub service_id: String,
    /// Date where the service will be added or deleted
    pub date: Date,
    /// Is the service added or deleted
    pub exception_type: ExceptionType,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    CalendarDate {
        service_id,
        date,
        exception_type,
    }
    unused: unused
}

impl Record for CalendarDate {
    const FILE_NAME: &'static str = "calendar_dates.txt";
    const REQUIRED: bool = false;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["service_id", "date", "exception_type"];

    fn key(&self) -> String {
        format!("{}.{}", self.service_id, self.date)
    }

    fn validate(&self) -> Vec<Violation> {
        Rules::default()
            .require("service_id", &self.service_id)
            .check(!self.date.is_zero(), || Violation::Missing("date"))
            .finish()
    }
}

/// A Trip is a vehicle that follows a sequence of [StopTime] on certain days. See <https://gtfs.org/reference/static/#tripstxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Trip {
    /// References along which [Route] this trip runs
    pub route_id: String,
    /// References the [Calendar] on which this trip runs
    pub service_id: String,
    /// Unique technical identifier (not for the traveller) for the Trip
    pub id: String,
    /// Text that appears on signage identifying the trip's destination to riders
    pub headsign: Option<String>,
    /// Public facing text used to identify the trip to riders, for instance, to identify train numbers for commuter rail trips
    pub short_name: Option<String>,
    /// Indicates the direction of travel for a trip. This field is not used in routing; it provides a way to separate trips by direction when publishing time tables
    pub direction_id: Option<DirectionId>,
    /// Identifies the block to which the trip belongs. A block consists of a single trip or many sequential trips made using the same vehicle
    pub block_id: Option<String>,
    /// Shape of the trip
    pub shape_id: Option<String>,
    /// Indicates wheelchair accessibility
    pub wheelchair_accessible: Option<WheelchairAccessible>,
    /// Indicates whether bikes are allowed
    pub bikes_allowed: Option<BikesAllowed>,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    Trip {
        route_id,
        service_id,
        id: "trip_id",
        headsign: "trip_headsign",
        short_name: "trip_short_name",
        direction_id,
        block_id,
        shape_id,
        wheelchair_accessible,
        bikes_allowed,
    }
    unused: unused
}

impl Record for Trip {
    const FILE_NAME: &'static str = "trips.txt";
    const REQUIRED: bool = true;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["route_id", "service_id", "trip_id"];

    fn key(&self) -> String {
        self.id.clone()
    }

    fn validate(&self) -> Vec<Violation> {
        Rules::default()
            .require("trip_id", &self.id)
            .require("route_id", &self.route_id)
            .require("service_id", &self.service_id)
            .finish()
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "route id: {}, service id: {}",
            self.route_id, self.service_id
        )
    }
}

/// The moment where a vehicle, running on [Trip] stops at a [Stop]. See <https://gtfs.org/reference/static/#stopstimetxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StopTime {
    /// [Trip] to which this stop time belongs to
    pub trip_id: String,
    /// Arrival time of the stop time.
    /// It's an option since the intermediate stops can have have no arrival
    /// and this arrival needs to be interpolated
    pub arrival_time: Option<Time>,
    /// Departure time of the stop time.
    /// It's an option since the intermediate stops can have have no departure
    /// and this departure needs to be interpolated
    pub departure_time: Option<Time>,
    /// Identifier of the [Stop] where the vehicle stops
    pub stop_id: String,
    /// Group of locations served instead of a stop, for on demand services
    pub location_group_id: Option<String>,
    /// Zone served instead of a stop, for on demand services
    pub location_id: Option<String>,
    /// Order of stops for a particular trip. The values must increase along the trip but do not need to be consecutive
    pub stop_sequence: u32,
    /// Text that appears on signage identifying the trip's destination to riders
    pub stop_headsign: Option<String>,
    /// Time from which on demand service is available
    pub start_pickup_drop_off_window: Option<Time>,
    /// Time until which on demand service is available
    pub end_pickup_drop_off_window: Option<Time>,
    /// Indicates pickup method
    pub pickup_type: Option<PickupDropOffType>,
    /// Indicates drop off method
    pub drop_off_type: Option<PickupDropOffType>,
    /// Indicates whether a rider can board the transit vehicle anywhere along the vehicle’s travel path
    pub continuous_pickup: Option<ContinuousPickupDropOff>,
    /// Indicates whether a rider can alight from the transit vehicle at any point along the vehicle’s travel path
    pub continuous_drop_off: Option<ContinuousPickupDropOff>,
    /// Actual distance traveled along the associated shape, from the first stop to the stop specified in this record. This field specifies how much of the shape to draw between any two stops during a trip
    pub shape_dist_traveled: Option<f32>,
    /// Indicates if arrival and departure times for a stop are strictly adhered to by the vehicle or if they are instead approximate and/or interpolated times
    pub timepoint: Option<Timepoint>,
    /// Booking rule for the pickup
    pub pickup_booking_rule_id: Option<String>,
    /// Booking rule for the drop off
    pub drop_off_booking_rule_id: Option<String>,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    StopTime {
        trip_id,
        arrival_time,
        departure_time,
        stop_id,
        location_group_id,
        location_id,
        stop_sequence,
        stop_headsign,
        start_pickup_drop_off_window,
        end_pickup_drop_off_window,
        pickup_type,
        drop_off_type,
        continuous_pickup,
        continuous_drop_off,
        shape_dist_traveled,
        timepoint,
        pickup_booking_rule_id,
        drop_off_booking_rule_id,
    }
    unused: unused
}

impl Record for StopTime {
    const FILE_NAME: &'static str = "stop_times.txt";
    const REQUIRED: bool = true;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["trip_id", "stop_sequence"];

    fn key(&self) -> String {
        format!("{}.{}", self.trip_id, self.stop_sequence)
    }

    fn validate(&self) -> Vec<Violation> {
        let mut rules = Rules::default();
        rules.require("trip_id", &self.trip_id).check(
            !self.stop_id.is_empty()
                || !is_blank(&self.location_group_id)
                || !is_blank(&self.location_id),
            || Violation::MissingWhen {
                field: "stop_id",
                condition: "location_group_id and location_id are empty",
            },
        );
        if let (Some(arrival), Some(departure)) = (self.arrival_time, self.departure_time) {
            rules.check(departure >= arrival, || Violation::OutOfOrder {
                field: "departure_time",
                other: "arrival_time",
            });
        }
        rules.finish()
    }
}

/// Describes a level in a station. See <https://gtfs.org/reference/static/#levelstxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Level {
    /// Unique technical identifier (not for the traveller) of the level
    pub id: String,
    /// Numeric index of the level that indicates relative position of this level in relation to other levels (levels with higher indices are assumed to be located above levels with lower indices).
    /// Ground level should have index 0, with levels above ground indicated by positive indices and levels below ground by negative indices
    pub index: f64,
    /// Optional name of the level (that matches level lettering/numbering used inside the building or the station)
    pub name: Option<String>,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    Level {
        id: "level_id",
        index: "level_index",
        name: "level_name",
    }
    unused: unused
}

impl Record for Level {
    const FILE_NAME: &'static str = "levels.txt";
    const REQUIRED: bool = false;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["level_id", "level_index"];

    fn key(&self) -> String {
        self.id.clone()
    }

    fn validate(&self) -> Vec<Violation> {
        Rules::default()
            .require("level_id", &self.id)
            .check(self.index.is_finite(), || Violation::Invalid {
                field: "level_index",
                value: self.index.to_string(),
                expected: "a finite number is expected",
            })
            .finish()
    }
}

/// Defines one possible fare. See <https://gtfs.org/reference/static/#fare_attributestxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct FareAttribute {
    /// Unique technical (not for the traveller) identifier for the FareAttribute
    pub id: String,
    /// Fare price, in the unit specified by [FareAttribute::currency]
    pub price: f64,
    /// Currency used to pay the fare
    pub currency: Option<CurrencyCode>,
    /// Indicates when the fare must be paid
    pub payment_method: PaymentMethod,
    /// Indicates the number of transfers permitted on this fare, unlimited when empty
    pub transfers: Option<FareTransfers>,
    /// Identifies the relevant agency for a fare
    pub agency_id: Option<String>,
    /// Length of time in seconds before a transfer expires
    pub transfer_duration: Option<u32>,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    FareAttribute {
        id: "fare_id",
        price,
        currency: "currency_type",
        payment_method,
        transfers,
        agency_id,
        transfer_duration,
    }
    unused: unused
}

impl Record for FareAttribute {
    const FILE_NAME: &'static str = "fare_attributes.txt";
    const REQUIRED: bool = false;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "fare_id",
        "price",
        "currency_type",
        "payment_method",
        "transfers",
    ];

    fn key(&self) -> String {
        self.id.clone()
    }

    fn validate(&self) -> Vec<Violation> {
        Rules::default()
            .require("fare_id", &self.id)
            .require_some("currency_type", &self.currency)
            .check(self.price >= 0.0, || Violation::Invalid {
                field: "price",
                value: self.price.to_string(),
                expected: "a price cannot be negative",
            })
            .finish()
    }
}

/// Timeframe and publisher of the feed. See <https://gtfs.org/reference/static/#feed_infotxt>
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct FeedInfo {
    /// Full name of the organization that publishes the dataset
    pub name: String,
    /// URL of the dataset publishing organization's website
    pub url: String,
    /// Default language used for the text in this dataset
    pub lang: String,
    /// Language to use when the data consumer doesn’t know the language of the rider
    pub default_lang: Option<String>,
    /// The dataset provides complete and reliable schedule information for service in the period from this date
    pub start_date: Option<Date>,
    /// The dataset provides complete and reliable schedule information for service in the period until this date
    pub end_date: Option<Date>,
    /// String that indicates the current version of their GTFS dataset
    pub version: Option<String>,
    /// Email address for communication regarding the GTFS dataset and data publishing practices
    pub contact_email: Option<String>,
    /// URL for contact information, a web-form, support desk, or other tools for communication regarding the GTFS dataset and data publishing practices
    pub contact_url: Option<String>,
    /// `(column, value)` of the columns that are not part of the reference
    #[serde(skip)]
    pub unused: Vec<(String, String)>,
}

tabular_record! {
    FeedInfo {
        name: "feed_publisher_name",
        url: "feed_publisher_url",
        lang: "feed_lang",
        default_lang,
        start_date: "feed_start_date",
        end_date: "feed_end_date",
        version: "feed_version",
        contact_email: "feed_contact_email",
        contact_url: "feed_contact_url",
    }
    unused: unused
}

impl Record for FeedInfo {
    const FILE_NAME: &'static str = "feed_info.txt";
    const REQUIRED: bool = false;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "feed_publisher_name",
        "feed_publisher_url",
        "feed_lang",
    ];

    fn key(&self) -> String {
        format!("{}.{}", self.name, self.version.as_deref().unwrap_or_default())
    }

    fn validate(&self) -> Vec<Violation> {
        let mut rules = Rules::default();
        rules
            .require("feed_publisher_name", &self.name)
            .require("feed_publisher_url", &self.url)
            .require("feed_lang", &self.lang);
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            rules.check(end >= start, || Violation::OutOfOrder {
                field: "feed_end_date",
                other: "feed_start_date",
            });
        }
        rules.finish()
    }
}

impl fmt::Display for FeedInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

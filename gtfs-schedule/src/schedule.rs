use crate::error::{Diagnostic, Severity};
use crate::objects::*;
use crate::{Error, ScheduleReader};
use std::collections::HashMap;

/// All the records of a GTFS archive, with what was found wrong while reading it
///
/// Each collection is keyed by the record's key (see [crate::Record::key]).
/// Records that could not be read or broke a rule are left out and each
/// problem is kept as a [Diagnostic]. A schedule is never modified once read.
#[derive(Debug, Default)]
pub struct Schedule {
    pub(crate) agencies: HashMap<String, Agency>,
    pub(crate) stops: HashMap<String, Stop>,
    pub(crate) routes: HashMap<String, Route>,
    pub(crate) calendar: HashMap<String, Calendar>,
    pub(crate) calendar_dates: HashMap<String, CalendarDate>,
    pub(crate) trips: HashMap<String, Trip>,
    pub(crate) stop_times: HashMap<String, StopTime>,
    pub(crate) levels: HashMap<String, Level>,
    pub(crate) fare_attributes: HashMap<String, FareAttribute>,
    pub(crate) feed_info: HashMap<String, FeedInfo>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) files: Vec<String>,
    pub(crate) unused_files: Vec<String>,
    pub(crate) read_duration: i64,
    pub(crate) sha256: Option<String>,
}

/// Number of records and problems of a [Schedule]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct Summary {
    pub agencies: usize,
    pub stops: usize,
    pub routes: usize,
    pub calendar: usize,
    pub calendar_dates: usize,
    pub trips: usize,
    pub stop_times: usize,
    pub levels: usize,
    pub fare_attributes: usize,
    pub feed_info: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Time needed to read the archive in milliseconds
    pub read_duration: i64,
}

impl Schedule {
    /// Reads the GTFS archive at `path` with the default options
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Schedule, Error> {
        ScheduleReader::default().read_from_path(path)
    }

    /// Reads a GTFS archive from any object implementing [std::io::Read] and [std::io::Seek]
    pub fn from_reader<T: std::io::Read + std::io::Seek>(reader: T) -> Result<Schedule, Error> {
        ScheduleReader::default().read_from_reader(reader)
    }

    /// All agencies by `agency_id`
    pub fn agencies(&self) -> &HashMap<String, Agency> {
        &self.agencies
    }

    /// All stops by `stop_id`
    pub fn stops(&self) -> &HashMap<String, Stop> {
        &self.stops
    }

    /// All routes by `route_id`
    pub fn routes(&self) -> &HashMap<String, Route> {
        &self.routes
    }

    /// All calendars by `service_id`
    pub fn calendar(&self) -> &HashMap<String, Calendar> {
        &self.calendar
    }

    /// All calendar dates by `service_id.date`
    pub fn calendar_dates(&self) -> &HashMap<String, CalendarDate> {
        &self.calendar_dates
    }

    /// All trips by `trip_id`
    pub fn trips(&self) -> &HashMap<String, Trip> {
        &self.trips
    }

    /// All stop times by `trip_id.stop_sequence`
    pub fn stop_times(&self) -> &HashMap<String, StopTime> {
        &self.stop_times
    }

    /// All levels by `level_id`
    pub fn levels(&self) -> &HashMap<String, Level> {
        &self.levels
    }

    /// All fare attributes by `fare_id`
    pub fn fare_attributes(&self) -> &HashMap<String, FareAttribute> {
        &self.fare_attributes
    }

    /// All feed information by `feed_publisher_name.feed_version`
    pub fn feed_info(&self) -> &HashMap<String, FeedInfo> {
        &self.feed_info
    }

    /// Gets a [Stop] by its `stop_id`
    pub fn get_stop(&self, id: &str) -> Option<&Stop> {
        self.stops.get(id)
    }

    /// Gets a [Trip] by its `trip_id`
    pub fn get_trip(&self, id: &str) -> Option<&Trip> {
        self.trips.get(id)
    }

    /// Gets a [Route] by its `route_id`
    pub fn get_route(&self, id: &str) -> Option<&Route> {
        self.routes.get(id)
    }

    /// Everything found wrong, in the order it was found
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The [Severity::Error] diagnostics
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// The [Severity::Warning] diagnostics
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Names of all the files of the archive
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Names of the files of the archive that were not read
    pub fn unused_files(&self) -> &[String] {
        &self.unused_files
    }

    /// Time needed to read and parse the archive in milliseconds
    pub fn read_duration(&self) -> i64 {
        self.read_duration
    }

    /// sha256 sum of the archive
    pub fn sha256(&self) -> Option<&str> {
        self.sha256.as_deref()
    }

    /// Numbers of records and problems
    pub fn summary(&self) -> Summary {
        Summary {
            agencies: self.agencies.len(),
            stops: self.stops.len(),
            routes: self.routes.len(),
            calendar: self.calendar.len(),
            calendar_dates: self.calendar_dates.len(),
            trips: self.trips.len(),
            stop_times: self.stop_times.len(),
            levels: self.levels.len(),
            fare_attributes: self.fare_attributes.len(),
            feed_info: self.feed_info.len(),
            errors: self.errors().count(),
            warnings: self.warnings().count(),
            read_duration: self.read_duration,
        }
    }
}

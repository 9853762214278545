use crate::schedule::Summary;
use crate::{Error, Schedule, ScheduleReader};
use log::info;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use std::path::Path;
use uuid::Uuid;

/// Several schedules read together, each under a random identifier
#[derive(Debug, Default)]
pub struct Collection {
    schedules: HashMap<String, Schedule>,
}

impl Collection {
    /// Reads all the archives with the default options
    pub fn from_paths<P: AsRef<Path> + Sync>(paths: &[P]) -> Result<Collection, Error> {
        Self::from_paths_with(ScheduleReader::default(), paths)
    }

    /// Reads all the archives in parallel
    ///
    /// Fails if any archive cannot be opened; problems in the content of the
    /// archives are kept in the diagnostics of each schedule.
    pub fn from_paths_with<P: AsRef<Path> + Sync>(
        reader: ScheduleReader,
        paths: &[P],
    ) -> Result<Collection, Error> {
        let schedules = paths
            .par_iter()
            .map(|path| -> Result<(String, Schedule), Error> {
                let schedule = reader.read_from_path(path)?;
                let id = Uuid::new_v4().to_string();
                info!("{} read as schedule {}", path.as_ref().display(), id);
                Ok((id, schedule))
            })
            .collect::<Result<HashMap<String, Schedule>, Error>>()?;
        Ok(Collection { schedules })
    }

    /// Gets a schedule by its identifier
    pub fn get(&self, id: &str) -> Option<&Schedule> {
        self.schedules.get(id)
    }

    /// Number of schedules
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Is there no schedule
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// The schedules with their identifiers, sorted by identifier
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schedule)> {
        let mut schedules: Vec<_> = self
            .schedules
            .iter()
            .map(|(id, s)| (id.as_str(), s))
            .collect();
        schedules.sort_unstable_by_key(|(id, _)| *id);
        schedules.into_iter()
    }

    /// The summary of each schedule by identifier
    pub fn summaries(&self) -> BTreeMap<&str, Summary> {
        self.iter().map(|(id, s)| (id, s.summary())).collect()
    }

    /// Human readable numbers of records and problems of each schedule
    pub fn overview(&self) -> String {
        let mut o = String::new();
        for (id, schedule) in self.iter() {
            let s = schedule.summary();
            let _ = writeln!(o, "Schedule {}", &id[..id.len().min(4)]);
            for (count, what) in [
                (s.agencies, "agencies"),
                (s.stops, "stops"),
                (s.routes, "routes"),
                (s.calendar, "calendars"),
                (s.calendar_dates, "calendar dates"),
                (s.trips, "trips"),
                (s.stop_times, "stop times"),
                (s.levels, "levels"),
                (s.fare_attributes, "fare attributes"),
                (s.feed_info, "feed info"),
                (s.errors, "errors"),
                (s.warnings, "warnings"),
            ] {
                let _ = writeln!(o, "    {} {}", count, what);
            }
            o.push('\n');
        }
        o
    }

    /// Every diagnostic, one per line, prefixed by the schedule identifier
    pub fn report(&self) -> String {
        let mut o = String::new();
        for (id, schedule) in self.iter() {
            for diagnostic in schedule.diagnostics() {
                let _ = writeln!(o, "{} {}", id, diagnostic);
            }
        }
        o
    }
}

impl FromIterator<(String, Schedule)> for Collection {
    fn from_iter<I: IntoIterator<Item = (String, Schedule)>>(iter: I) -> Self {
        Collection {
            schedules: iter.into_iter().collect(),
        }
    }
}

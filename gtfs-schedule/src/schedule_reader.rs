use chrono::Utc;
use log::{debug, info, warn};
use sha2::{Digest, Sha256};

use crate::error::{Diagnostic, Problem};
use crate::objects::*;
use crate::record::{is_blank, Record};
use crate::tabular::{ReadError, TabularReader};
use crate::{Error, Schedule};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Allows to parameterize how the parsing library behaves
///
/// ```
/// let schedule = gtfs_schedule::ScheduleReader::default()
///     .read_stop_times(false) // Won’t read the stop times to save time and memory
///     .trim_fields(true)
///     .read_from_reader(std::io::Cursor::new(Vec::new()));
/// // an empty buffer is not a zip archive
/// assert!(schedule.is_err());
/// ```
#[derive(Derivative, Debug, Clone, Copy)]
#[derivative(Default)]
pub struct ScheduleReader {
    /// [crate::objects::StopTime] are very large and not always needed. This allows to skip reading them
    #[derivative(Default(value = "true"))]
    pub read_stop_times: bool,
    /// Avoid trimming the fields
    ///
    /// It is quite time consumming
    /// If performance is an issue, and if your data is high quality, you can switch it off
    #[derivative(Default(value = "true"))]
    pub trim_fields: bool,
}

type Load = fn(&ScheduleReader, &mut dyn Read, &mut Schedule);

/// A file of the archive the reader knows about
struct Member {
    name: &'static str,
    required: bool,
    load: Load,
}

const MEMBERS: &[Member] = &[
    Member {
        name: Agency::FILE_NAME,
        required: Agency::REQUIRED,
        load: |reader, input, schedule| {
            schedule.agencies = reader.parse(input, &mut schedule.diagnostics)
        },
    },
    Member {
        name: Stop::FILE_NAME,
        required: Stop::REQUIRED,
        load: |reader, input, schedule| {
            schedule.stops = reader.parse(input, &mut schedule.diagnostics)
        },
    },
    Member {
        name: Route::FILE_NAME,
        required: Route::REQUIRED,
        load: |reader, input, schedule| {
            schedule.routes = reader.parse(input, &mut schedule.diagnostics)
        },
    },
    Member {
        name: Calendar::FILE_NAME,
        required: Calendar::REQUIRED,
        load: |reader, input, schedule| {
            schedule.calendar = reader.parse(input, &mut schedule.diagnostics)
        },
    },
    Member {
        name: CalendarDate::FILE_NAME,
        required: CalendarDate::REQUIRED,
        load: |reader, input, schedule| {
            schedule.calendar_dates = reader.parse(input, &mut schedule.diagnostics)
        },
    },
    Member {
        name: Trip::FILE_NAME,
        required: Trip::REQUIRED,
        load: |reader, input, schedule| {
            schedule.trips = reader.parse(input, &mut schedule.diagnostics)
        },
    },
    Member {
        name: StopTime::FILE_NAME,
        required: StopTime::REQUIRED,
        load: |reader, input, schedule| {
            schedule.stop_times = reader.parse(input, &mut schedule.diagnostics)
        },
    },
    Member {
        name: Level::FILE_NAME,
        required: Level::REQUIRED,
        load: |reader, input, schedule| {
            schedule.levels = reader.parse(input, &mut schedule.diagnostics)
        },
    },
    Member {
        name: FareAttribute::FILE_NAME,
        required: FareAttribute::REQUIRED,
        load: |reader, input, schedule| {
            schedule.fare_attributes = reader.parse(input, &mut schedule.diagnostics)
        },
    },
    Member {
        name: FeedInfo::FILE_NAME,
        required: FeedInfo::REQUIRED,
        load: |reader, input, schedule| {
            schedule.feed_info = reader.parse(input, &mut schedule.diagnostics)
        },
    },
];

impl ScheduleReader {
    /// Configures the reader to read or not the stop times (default: true)
    ///
    /// This can be useful to save time and memory with large datasets when the timetable are not needed
    /// Returns Self and can be chained
    pub fn read_stop_times(mut self, read_stop_times: bool) -> Self {
        self.read_stop_times = read_stop_times;
        self
    }

    /// Should the fields be trimmed (default: true)
    ///
    /// It is quite time consumming
    /// If performance is an issue, and if your data is high quality, you can set it to false
    pub fn trim_fields(mut self, trim_fields: bool) -> Self {
        self.trim_fields = trim_fields;
        self
    }

    /// Reads the GTFS from a local zip archive
    pub fn read_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Schedule, Error> {
        let p = path.as_ref();
        let file_name = p.display().to_string();
        if !p.is_file() {
            return Err(Error::NotAFile(file_name));
        }
        let reader = File::open(p).map_err(|e| Error::NamedFileIO {
            file_name: file_name.clone(),
            source: Box::new(e),
        })?;
        self.read_from_reader(reader).map_err(|e| match e {
            Error::Zip(source) => Error::NamedFileIO {
                file_name,
                source: Box::new(source),
            },
            e => e,
        })
    }

    /// Reads the GTFS from any object implementing [std::io::Read] and [std::io::Seek]
    ///
    /// Only an archive that cannot be opened is an error, everything wrong in
    /// its content ends up in [Schedule::diagnostics].
    pub fn read_from_reader<T: std::io::Read + std::io::Seek>(
        &self,
        reader: T,
    ) -> Result<Schedule, Error> {
        let now = Utc::now();
        let mut hasher = Sha256::new();
        let mut buf_reader = std::io::BufReader::new(reader);
        let _n = std::io::copy(&mut buf_reader, &mut hasher)?;
        let hash = hasher.finalize();
        let mut archive = zip::ZipArchive::new(buf_reader)?;

        let mut schedule = Schedule::default();
        let mut seen = HashSet::new();
        for i in 0..archive.len() {
            let mut archive_file = match archive.by_index(i) {
                Ok(f) => f,
                Err(e) => {
                    let e = std::io::Error::new(std::io::ErrorKind::InvalidData, e);
                    schedule
                        .diagnostics
                        .push(Diagnostic::feed_error(Problem::Unreadable(e)));
                    continue;
                }
            };
            if archive_file.is_dir() {
                continue;
            }
            let name = archive_file.name().to_owned();
            schedule.files.push(name.clone());

            let base_name = Path::new(&name)
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or(&name);
            match MEMBERS.iter().find(|m| m.name == base_name) {
                Some(member) if member.name == StopTime::FILE_NAME && !self.read_stop_times => {
                    debug!("skipping {}", name);
                }
                Some(member) if !seen.insert(member.name) => {
                    warn!("{} is present more than once", member.name);
                    schedule.diagnostics.push(Diagnostic::warning(
                        member.name,
                        Problem::DuplicateFile(name),
                    ));
                }
                Some(member) => {
                    let before = schedule.diagnostics.len();
                    (member.load)(self, &mut archive_file, &mut schedule);
                    debug!(
                        "{} read with {} diagnostics",
                        member.name,
                        schedule.diagnostics.len() - before
                    );
                }
                None => {
                    warn!("unrecognized file {}", name);
                    schedule.unused_files.push(name.clone());
                    schedule
                        .diagnostics
                        .push(Diagnostic::warning(name.clone(), Problem::UnusedFile(name)));
                }
            }
        }

        for member in MEMBERS.iter().filter(|m| m.required) {
            if member.name == StopTime::FILE_NAME && !self.read_stop_times {
                continue;
            }
            if !seen.contains(member.name) {
                warn!("missing required file {}", member.name);
                schedule
                    .diagnostics
                    .push(Diagnostic::error(member.name, Problem::MissingFile(member.name)));
            }
        }
        if !seen.contains(Calendar::FILE_NAME) && !seen.contains(CalendarDate::FILE_NAME) {
            warn!("missing calendar");
            schedule
                .diagnostics
                .push(Diagnostic::feed_error(Problem::MissingCalendar));
        }

        resolve_references(&mut schedule);

        schedule.sha256 = Some(format!("{:x}", hash));
        schedule.read_duration = Utc::now().signed_duration_since(now).num_milliseconds();
        info!(
            "GTFS archive read in {} ms: {} errors, {} warnings",
            schedule.read_duration,
            schedule.errors().count(),
            schedule.warnings().count()
        );
        Ok(schedule)
    }

    /// Reads all the records of one file
    ///
    /// Rows that cannot be read, invalid records and duplicate keys are
    /// reported and left out, the first record of a key is kept.
    fn parse<T: Record>(
        &self,
        input: &mut dyn Read,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> HashMap<String, T> {
        let file = T::FILE_NAME;
        let mut records = HashMap::new();
        let file_problem = |problem| {
            if T::REQUIRED {
                Diagnostic::error(file, problem)
            } else {
                Diagnostic::warning(file, problem)
            }
        };

        let input = match skip_bom(input) {
            Ok(input) => input,
            Err(e) => {
                diagnostics.push(Diagnostic::error(file, Problem::Unreadable(e)));
                return records;
            }
        };
        let csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(if self.trim_fields {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(input);
        let mut reader = match TabularReader::<_, T>::from_csv(csv_reader) {
            Ok(reader) => reader,
            Err(ReadError::Io(e)) => {
                diagnostics.push(Diagnostic::error(file, Problem::Unreadable(e)));
                return records;
            }
            Err(e) => {
                let line = e.line();
                diagnostics.push(Diagnostic::error(file, Problem::Header(e)).at_line(line));
                return records;
            }
        };
        if reader.headers().is_empty() {
            diagnostics.push(file_problem(Problem::EmptyFile));
            return records;
        }
        let missing: Vec<&'static str> = T::REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !reader.headers().iter().any(|h| h == column))
            .collect();
        if !missing.is_empty() {
            warn!("{} lacks the columns {:?}, it is not read", file, missing);
            for column in missing {
                diagnostics.push(
                    Diagnostic::error(file, Problem::MissingColumn(column)).at_line(Some(1)),
                );
            }
            return records;
        }

        loop {
            match reader.read() {
                Ok(None) => break,
                Ok(Some(record)) => {
                    let line = Some(reader.line());
                    let key = record.key();
                    let violations = record.validate();
                    if !violations.is_empty() {
                        for violation in violations {
                            diagnostics.push(
                                Diagnostic::error(
                                    file,
                                    Problem::Invalid {
                                        key: key.clone(),
                                        violation,
                                    },
                                )
                                .at_line(line),
                            );
                        }
                        continue;
                    }
                    match records.entry(key) {
                        Entry::Occupied(e) => diagnostics.push(
                            Diagnostic::error(file, Problem::DuplicateKey(e.key().clone()))
                                .at_line(line),
                        ),
                        Entry::Vacant(e) => {
                            e.insert(record);
                        }
                    }
                }
                Err(ReadError::Io(e)) => {
                    diagnostics.push(Diagnostic::error(file, Problem::Unreadable(e)));
                    break;
                }
                Err(e) => {
                    let line = e.line();
                    diagnostics.push(Diagnostic::error(file, Problem::Row(e)).at_line(line));
                }
            }
        }

        if records.is_empty() {
            diagnostics.push(file_problem(Problem::NoRecord));
        }
        debug!("{}: {} records", file, records.len());
        records
    }
}

fn skip_bom(input: &mut dyn Read) -> std::io::Result<impl Read + '_> {
    let mut start = Vec::with_capacity(BOM.len());
    Read::take(&mut *input, BOM.len() as u64).read_to_end(&mut start)?;
    if start == BOM {
        start.clear();
    }
    Ok(std::io::Cursor::new(start).chain(input))
}

/// Reports the references to unknown records, sorted by referencing key
fn check_references<'a>(
    diagnostics: &mut Vec<Diagnostic>,
    file: &'static str,
    (kind, target): (&'static str, &'static str),
    references: impl Iterator<Item = (&'a str, &'a str)>,
    exists: impl Fn(&str) -> bool,
) {
    let mut dangling: Vec<_> = references
        .filter(|(_, reference)| !reference.is_empty() && !exists(reference))
        .collect();
    dangling.sort_unstable();
    for (id, reference) in dangling {
        diagnostics.push(Diagnostic::error(
            file,
            Problem::DanglingReference {
                kind,
                id: id.to_owned(),
                target,
                reference: reference.to_owned(),
            },
        ));
    }
}

/// Links the stations to their stops and checks the references between records
fn resolve_references(schedule: &mut Schedule) {
    let mut links: Vec<(String, String)> = schedule
        .stops
        .values()
        .filter_map(|stop| match stop.parent_station.as_deref() {
            Some(parent) if !parent.is_empty() => Some((stop.id.clone(), parent.to_owned())),
            _ => None,
        })
        .collect();
    links.sort_unstable();
    for (child, parent) in links {
        match schedule.stops.get_mut(&parent) {
            Some(station) => {
                station.children.insert(child);
            }
            None => schedule.diagnostics.push(Diagnostic::error(
                Stop::FILE_NAME,
                Problem::DanglingReference {
                    kind: "stop",
                    id: child,
                    target: "parent station",
                    reference: parent,
                },
            )),
        }
    }

    check_references(
        &mut schedule.diagnostics,
        Stop::FILE_NAME,
        ("stop", "level"),
        schedule
            .stops
            .values()
            .filter_map(|s| Some((s.id.as_str(), s.level_id.as_deref()?))),
        |id| schedule.levels.contains_key(id),
    );

    if schedule.agencies.len() > 1 {
        let mut ambiguous: Vec<&str> = schedule
            .routes
            .values()
            .filter(|r| is_blank(&r.agency_id))
            .map(|r| r.id.as_str())
            .collect();
        ambiguous.sort_unstable();
        for route in ambiguous {
            schedule.diagnostics.push(Diagnostic::error(
                Route::FILE_NAME,
                Problem::AmbiguousAgency(route.to_owned()),
            ));
        }
    }
    check_references(
        &mut schedule.diagnostics,
        Route::FILE_NAME,
        ("route", "agency"),
        schedule
            .routes
            .values()
            .filter_map(|r| Some((r.id.as_str(), r.agency_id.as_deref()?))),
        |id| schedule.agencies.contains_key(id),
    );

    check_references(
        &mut schedule.diagnostics,
        Trip::FILE_NAME,
        ("trip", "route"),
        schedule
            .trips
            .values()
            .map(|t| (t.id.as_str(), t.route_id.as_str())),
        |id| schedule.routes.contains_key(id),
    );
    let services: HashSet<&str> = schedule
        .calendar
        .keys()
        .map(String::as_str)
        .chain(
            schedule
                .calendar_dates
                .values()
                .map(|d| d.service_id.as_str()),
        )
        .collect();
    check_references(
        &mut schedule.diagnostics,
        Trip::FILE_NAME,
        ("trip", "service"),
        schedule
            .trips
            .values()
            .map(|t| (t.id.as_str(), t.service_id.as_str())),
        |id| services.contains(id),
    );

    check_references(
        &mut schedule.diagnostics,
        StopTime::FILE_NAME,
        ("stop time", "trip"),
        schedule
            .stop_times
            .iter()
            .map(|(key, st)| (key.as_str(), st.trip_id.as_str())),
        |id| schedule.trips.contains_key(id),
    );
    check_references(
        &mut schedule.diagnostics,
        StopTime::FILE_NAME,
        ("stop time", "stop"),
        schedule
            .stop_times
            .iter()
            .map(|(key, st)| (key.as_str(), st.stop_id.as_str())),
        |id| schedule.stops.contains_key(id),
    );

    check_references(
        &mut schedule.diagnostics,
        FareAttribute::FILE_NAME,
        ("fare", "agency"),
        schedule
            .fare_attributes
            .values()
            .filter_map(|f| Some((f.id.as_str(), f.agency_id.as_deref()?))),
        |id| schedule.agencies.contains_key(id),
    );
}

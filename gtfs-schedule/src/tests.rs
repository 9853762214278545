use crate::error::{Problem, Severity};
use crate::objects::*;
use crate::types::*;
use crate::{Collection, Error, Schedule, ScheduleReader};
use chrono::NaiveDate;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("fixtures/basic/{}", name)).expect("missing fixture")
}

fn archive(files: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    let mut buffer = zip.finish().unwrap();
    buffer.set_position(0);
    buffer
}

const BASIC: &[&str] = &[
    "agency.txt",
    "stops.txt",
    "routes.txt",
    "trips.txt",
    "stop_times.txt",
    "calendar.txt",
    "calendar_dates.txt",
    "levels.txt",
    "fare_attributes.txt",
    "feed_info.txt",
];

/// The basic fixture with some files replaced, or removed when the content is `None`
fn basic_with(changes: &[(&str, Option<&str>)]) -> Cursor<Vec<u8>> {
    let mut files: Vec<(String, String)> = BASIC
        .iter()
        .map(|name| (name.to_string(), fixture(name)))
        .collect();
    for (name, content) in changes {
        files.retain(|(n, _)| n != name);
        if let Some(content) = content {
            files.push((name.to_string(), content.to_string()));
        }
    }
    let files: Vec<(&str, &[u8])> = files
        .iter()
        .map(|(n, c)| (n.as_str(), c.as_bytes()))
        .collect();
    archive(&files)
}

fn read_basic() -> Schedule {
    Schedule::from_reader(basic_with(&[])).expect("impossible to read gtfs")
}

fn problems_of<'a>(schedule: &'a Schedule, file: &str) -> Vec<&'a Problem> {
    schedule
        .diagnostics()
        .iter()
        .filter(|d| d.file.as_deref() == Some(file))
        .map(|d| &d.problem)
        .collect()
}

#[test]
fn read_basic_without_diagnostics() {
    let gtfs = read_basic();
    assert!(
        gtfs.diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        gtfs.diagnostics()
    );
    assert_eq!(10, gtfs.files().len());
    assert!(gtfs.unused_files().is_empty());
    assert_eq!(64, gtfs.sha256().map_or(0, str::len));
    assert!(gtfs.read_duration() >= 0);
}

#[test]
fn read_calendar() {
    let gtfs = read_basic();
    assert_eq!(1, gtfs.calendar().len());
    let calendar = &gtfs.calendar()["service1"];
    assert_eq!(UNAVAILABLE, calendar.monday);
    assert_eq!(AVAILABLE, calendar.saturday);
    assert_eq!(Date::from_ymd(2017, 1, 1), Some(calendar.start_date));
    assert!(calendar.valid_weekday(NaiveDate::from_ymd_opt(2017, 1, 7).unwrap()));
}

#[test]
fn read_calendar_dates() {
    let gtfs = read_basic();
    assert_eq!(3, gtfs.calendar_dates().len());
    assert_eq!(
        SERVICE_REMOVED,
        gtfs.calendar_dates()["service1.20170108"].exception_type
    );
    assert_eq!(
        SERVICE_ADDED,
        gtfs.calendar_dates()["service2.20170108"].exception_type
    );
}

#[test]
fn read_stops() {
    let gtfs = read_basic();
    assert_eq!(5, gtfs.stops().len());
    let area = gtfs.get_stop("stop1").unwrap();
    assert_eq!(STATION, area.location_type());
    assert_eq!("Stop Area", area.name);
    assert_eq!(
        vec!["stop2", "stop3", "stop5"],
        area.children.iter().map(String::as_str).collect::<Vec<_>>()
    );
    let child = gtfs.get_stop("stop3").unwrap();
    assert_eq!(STOP_POINT, child.location_type());
    assert_eq!(None, child.location_type);
    assert_eq!(Some("L0"), child.level_id.as_deref());
    assert_eq!(
        Some("Here we go"),
        gtfs.get_stop("stop4").unwrap().description.as_deref()
    );
    assert_eq!(Some(48.796058), area.latitude);
}

#[test]
fn read_routes_and_trips() {
    let gtfs = read_basic();
    let route = gtfs.get_route("route1").unwrap();
    assert_eq!(Color::new(255, 0, 0), route.color());
    assert_eq!(BLACK, route.text_color());
    assert_eq!("100 Rue", route.to_string());
    let shuttle = gtfs.get_route("route2").unwrap();
    assert_eq!(Some(700), shuttle.route_type.map(RouteType::value));
    assert_eq!(WHITE, shuttle.text_color());

    let trip = gtfs.get_trip("trip1").unwrap();
    assert_eq!("route1", trip.route_id);
    assert_eq!(Some("Centre"), trip.headsign.as_deref());
    assert_eq!(Some(1), trip.wheelchair_accessible.map(WheelchairAccessible::value));
}

#[test]
fn read_stop_times() {
    let gtfs = read_basic();
    assert_eq!(5, gtfs.stop_times().len());
    let last = &gtfs.stop_times()["trip1.2"];
    assert_eq!(Time::from_hms(25, 34, 22), last.arrival_time);
    assert_eq!(Some(NOT_AVAILABLE), last.drop_off_type);
    let early = &gtfs.stop_times()["trip2.0"];
    assert_eq!(Time::from_hms(6, 0, 0), early.arrival_time);
}

#[test]
fn read_optional_files() {
    let gtfs = read_basic();
    assert_eq!(2, gtfs.levels().len());
    assert_eq!(-1.0, gtfs.levels()["L1"].index);
    let fare = &gtfs.fare_attributes()["50"];
    assert_eq!(1.5, fare.price);
    assert_eq!(Some("EUR"), fare.currency.map(|c| c.as_str()));
    assert_eq!(None, fare.transfers);
    assert_eq!(Some(3600), fare.transfer_duration);
    let info = &gtfs.feed_info()["Bibus.1"];
    assert_eq!("fr", info.lang);
    assert_eq!(Date::from_ymd(2017, 12, 31), info.end_date);
}

#[test]
fn malformed_row_is_dropped() {
    let stops = "stop_id,stop_name,stop_lat,stop_lon\n\
                 stop1,A,48.1,2.1\n\
                 stop2,B,48.2,2.2\n\
                 stop3,C,48.3,2.3\n\
                 stop4,D,48.4,2.4\n\
                 stop5,E,north,2.5\n\
                 stop6,F,48.6,2.6\n\
                 stop7,G,48.7,2.7\n\
                 stop8,H,48.8,2.8\n\
                 stop9,I,48.9,2.9\n\
                 stop10,J,49.0,3.0\n";
    let gtfs = Schedule::from_reader(basic_with(&[("stops.txt", Some(stops))])).unwrap();
    assert_eq!(9, gtfs.stops().len());
    assert!(gtfs.get_stop("stop5").is_none());

    let diagnostics: Vec<_> = gtfs
        .diagnostics()
        .iter()
        .filter(|d| d.file.as_deref() == Some("stops.txt"))
        .collect();
    assert_eq!(1, diagnostics.len());
    assert!(matches!(diagnostics[0].problem, Problem::Row(_)));
    assert_eq!(Some(6), diagnostics[0].line);
    assert_eq!(Severity::Error, diagnostics[0].severity);
}

#[test]
fn duplicate_key_keeps_first_record() {
    let agencies = "agency_id,agency_name,agency_url,agency_timezone\n\
                    BIBUS,Bibus,http://www.bibus.fr,Europe/Paris\n\
                    BIBUS,Other,http://other.fr,Europe/Paris\n";
    let gtfs = Schedule::from_reader(basic_with(&[("agency.txt", Some(agencies))])).unwrap();
    assert_eq!(1, gtfs.agencies().len());
    assert_eq!("Bibus", gtfs.agencies()["BIBUS"].name);
    let problems = problems_of(&gtfs, "agency.txt");
    assert_eq!(1, problems.len());
    assert!(matches!(problems[0], Problem::DuplicateKey(key) if key == "BIBUS"));
    assert_eq!(Some(3), gtfs.diagnostics()[0].line);
}

#[test]
fn invalid_record_is_dropped() {
    let levels = "level_id,level_index\nL0,0\n,1\n";
    let gtfs = Schedule::from_reader(basic_with(&[("levels.txt", Some(levels))])).unwrap();
    assert_eq!(1, gtfs.levels().len());
    let problems = problems_of(&gtfs, "levels.txt");
    assert!(matches!(
        problems.as_slice(),
        [Problem::Invalid {
            violation: crate::Violation::Missing("level_id"),
            ..
        }]
    ));
    // stop2 and stop3 still reference L0
    assert!(problems_of(&gtfs, "stops.txt").is_empty());
}

#[test]
fn calendar_dates_without_exception_type() {
    let dates = "service_id,date\nservice1,20170108\nservice2,20170108\n";
    let gtfs =
        Schedule::from_reader(basic_with(&[("calendar_dates.txt", Some(dates))])).unwrap();
    // no row is taken as an added service
    assert!(gtfs.calendar_dates().is_empty());
    let diagnostics: Vec<_> = gtfs
        .diagnostics()
        .iter()
        .filter(|d| d.file.as_deref() == Some("calendar_dates.txt"))
        .collect();
    assert_eq!(1, diagnostics.len());
    assert!(matches!(
        diagnostics[0].problem,
        Problem::MissingColumn("exception_type")
    ));
    assert_eq!(Severity::Error, diagnostics[0].severity);
    assert_eq!(Some(1), diagnostics[0].line);
    // service2 only existed through its calendar date
    assert!(matches!(
        problems_of(&gtfs, "trips.txt").as_slice(),
        [Problem::DanglingReference { target: "service", reference, .. }] if reference == "service2"
    ));
}

#[test]
fn stop_times_without_stop_sequence() {
    let stop_times = "trip_id,arrival_time,departure_time,stop_id\n\
                      trip1,14:00:00,14:00:00,stop2\n\
                      trip1,14:05:00,14:05:00,stop3\n";
    let gtfs =
        Schedule::from_reader(basic_with(&[("stop_times.txt", Some(stop_times))])).unwrap();
    assert!(gtfs.stop_times().is_empty());
    let problems = problems_of(&gtfs, "stop_times.txt");
    assert!(matches!(
        problems.as_slice(),
        [Problem::MissingColumn("stop_sequence")]
    ));
    assert!(!problems
        .iter()
        .any(|p| matches!(p, Problem::DuplicateKey(_))));
}

#[test]
fn every_missing_column_is_reported() {
    let levels = "level_name\nGround\n";
    let gtfs = Schedule::from_reader(basic_with(&[("levels.txt", Some(levels))])).unwrap();
    assert!(gtfs.levels().is_empty());
    let missing: Vec<&str> = problems_of(&gtfs, "levels.txt")
        .iter()
        .filter_map(|p| match p {
            Problem::MissingColumn(column) => Some(*column),
            _ => None,
        })
        .collect();
    assert_eq!(vec!["level_id", "level_index"], missing);
}

#[test]
fn missing_files() {
    let gtfs = Schedule::from_reader(basic_with(&[
        ("stops.txt", None),
        ("calendar.txt", None),
        ("calendar_dates.txt", None),
    ]))
    .unwrap();
    assert!(problems_of(&gtfs, "stops.txt")
        .iter()
        .any(|p| matches!(p, Problem::MissingFile("stops.txt"))));
    assert!(gtfs
        .diagnostics()
        .iter()
        .any(|d| d.file.is_none() && matches!(d.problem, Problem::MissingCalendar)));
    // every trip and stop time now references something unknown
    assert!(problems_of(&gtfs, "trips.txt")
        .iter()
        .all(|p| matches!(p, Problem::DanglingReference { target: "service", .. })));
    assert_eq!(5, problems_of(&gtfs, "stop_times.txt").len());
}

#[test]
fn one_calendar_file_is_enough() {
    let gtfs = Schedule::from_reader(basic_with(&[("calendar.txt", None)])).unwrap();
    assert!(gtfs.diagnostics().is_empty(), "{:?}", gtfs.diagnostics());
}

#[test]
fn empty_files() {
    let gtfs = Schedule::from_reader(basic_with(&[
        ("agency.txt", Some("")),
        ("levels.txt", Some("level_id,level_index\n")),
    ]))
    .unwrap();
    let agency = gtfs
        .diagnostics()
        .iter()
        .find(|d| d.file.as_deref() == Some("agency.txt"))
        .unwrap();
    assert!(matches!(agency.problem, Problem::EmptyFile));
    assert_eq!(Severity::Error, agency.severity);
    let levels = gtfs
        .diagnostics()
        .iter()
        .find(|d| d.file.as_deref() == Some("levels.txt"))
        .unwrap();
    assert!(matches!(levels.problem, Problem::NoRecord));
    assert_eq!(Severity::Warning, levels.severity);
}

#[test]
fn unused_file() {
    let gtfs = Schedule::from_reader(basic_with(&[(
        "shapes.txt",
        Some("shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\n"),
    )]))
    .unwrap();
    assert_eq!(vec!["shapes.txt".to_owned()], gtfs.unused_files());
    assert_eq!(0, gtfs.errors().count());
    let warnings: Vec<_> = gtfs.warnings().collect();
    assert_eq!(1, warnings.len());
    assert!(matches!(&warnings[0].problem, Problem::UnusedFile(name) if name == "shapes.txt"));
}

#[test]
fn byte_order_mark_is_skipped() {
    let agency = format!("\u{feff}{}", fixture("agency.txt"));
    let gtfs = Schedule::from_reader(basic_with(&[("agency.txt", Some(&agency))])).unwrap();
    assert!(gtfs.diagnostics().is_empty(), "{:?}", gtfs.diagnostics());
    assert_eq!("Bibus", gtfs.agencies()["BIBUS"].name);
}

#[test]
fn files_in_a_directory() {
    let contents: Vec<(String, String)> = BASIC
        .iter()
        .map(|name| (format!("feed/{}", name), fixture(name)))
        .collect();
    let files: Vec<(&str, &[u8])> = contents
        .iter()
        .map(|(n, c)| (n.as_str(), c.as_bytes()))
        .collect();
    let gtfs = Schedule::from_reader(archive(&files)).unwrap();
    assert!(gtfs.diagnostics().is_empty(), "{:?}", gtfs.diagnostics());
    assert_eq!(5, gtfs.stops().len());
    assert!(gtfs.files().iter().all(|f| f.starts_with("feed/")));
}

#[test]
fn duplicate_file() {
    let mut contents: Vec<(String, String)> = BASIC
        .iter()
        .map(|name| (name.to_string(), fixture(name)))
        .collect();
    contents.push((
        "copy/agency.txt".to_owned(),
        "agency_id,agency_name,agency_url,agency_timezone\nX,X,http://x.org,UTC\n".to_owned(),
    ));
    let files: Vec<(&str, &[u8])> = contents
        .iter()
        .map(|(n, c)| (n.as_str(), c.as_bytes()))
        .collect();
    let gtfs = Schedule::from_reader(archive(&files)).unwrap();
    assert_eq!(1, gtfs.agencies().len());
    assert!(gtfs.agencies().contains_key("BIBUS"));
    assert!(matches!(
        problems_of(&gtfs, "agency.txt").as_slice(),
        [Problem::DuplicateFile(name)] if name == "copy/agency.txt"
    ));
}

#[test]
fn skip_stop_times() {
    let gtfs = ScheduleReader::default()
        .read_stop_times(false)
        .read_from_reader(basic_with(&[]))
        .unwrap();
    assert!(gtfs.stop_times().is_empty());
    assert!(gtfs.diagnostics().is_empty());

    let gtfs = ScheduleReader::default()
        .read_stop_times(false)
        .read_from_reader(basic_with(&[("stop_times.txt", None)]))
        .unwrap();
    assert!(gtfs.diagnostics().is_empty());
}

#[test]
fn untrimmed_fields() {
    let agencies = "agency_id,agency_name,agency_url,agency_timezone\n\
                    BIBUS, Bibus ,http://www.bibus.fr,Europe/Paris\n";
    let gtfs = ScheduleReader::default()
        .trim_fields(false)
        .read_from_reader(basic_with(&[("agency.txt", Some(agencies))]))
        .unwrap();
    assert_eq!(" Bibus ", gtfs.agencies()["BIBUS"].name);
}

#[test]
fn dangling_references() {
    let stops = fixture("stops.txt") + "stop6,Lost,,48.7,2.4,0,nowhere,basement,\n";
    let trips = fixture("trips.txt") + "route9,service1,trip3,,,\n";
    let stop_times = fixture("stop_times.txt") + "trip3,07:00:00,07:00:00,stop6,0,,\n";
    let gtfs = Schedule::from_reader(basic_with(&[
        ("stops.txt", Some(&stops)),
        ("trips.txt", Some(&trips)),
        ("stop_times.txt", Some(&stop_times)),
    ]))
    .unwrap();
    // the records are kept, only reported
    assert!(gtfs.get_stop("stop6").is_some());
    assert!(gtfs.get_trip("trip3").is_some());

    let stop_problems: Vec<String> = problems_of(&gtfs, "stops.txt")
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(
        vec![
            "stop 'stop6' references an unknown parent station 'nowhere'",
            "stop 'stop6' references an unknown level 'basement'",
        ],
        stop_problems
    );
    assert!(matches!(
        problems_of(&gtfs, "trips.txt").as_slice(),
        [Problem::DanglingReference { target: "route", reference, .. }] if reference == "route9"
    ));
    assert!(problems_of(&gtfs, "stop_times.txt").is_empty());
    assert_eq!(3, gtfs.errors().count());
}

#[test]
fn ambiguous_agency() {
    let agencies = fixture("agency.txt") + "TER,Ter,http://www.ter.fr,Europe/Paris,fr\n";
    let routes = fixture("routes.txt") + "route3,,3,,3,,\n";
    let gtfs = Schedule::from_reader(basic_with(&[
        ("agency.txt", Some(&agencies)),
        ("routes.txt", Some(&routes)),
    ]))
    .unwrap();
    assert!(matches!(
        problems_of(&gtfs, "routes.txt").as_slice(),
        [Problem::AmbiguousAgency(route)] if route == "route3"
    ));
}

#[test]
fn single_agency_needs_no_reference() {
    let routes = fixture("routes.txt") + "route3,,3,,3,,\n";
    let gtfs = Schedule::from_reader(basic_with(&[("routes.txt", Some(&routes))])).unwrap();
    assert!(gtfs.diagnostics().is_empty(), "{:?}", gtfs.diagnostics());
}

#[test]
fn not_an_archive() {
    let result = Schedule::from_reader(Cursor::new(b"stop_id,stop_name\n".to_vec()));
    assert!(matches!(result, Err(Error::Zip(_))));
}

#[test]
fn not_a_file() {
    let result = Schedule::from_path("fixtures/basic");
    assert!(matches!(result, Err(Error::NotAFile(_))));
}

#[test]
fn serialization_deserialization() {
    let gtfs = read_basic();

    let string = serde_json::to_string(&gtfs.routes()["route1"]).unwrap();
    let parsed: Route = serde_json::from_str(&string).unwrap();
    assert_eq!(gtfs.routes()["route1"], parsed);

    let string = serde_json::to_string(&gtfs.trips()["trip1"]).unwrap();
    let parsed: Trip = serde_json::from_str(&string).unwrap();
    assert_eq!(gtfs.trips()["trip1"], parsed);

    let stop = gtfs.get_stop("stop2").unwrap();
    let string = serde_json::to_string(stop).unwrap();
    let parsed: Stop = serde_json::from_str(&string).unwrap();
    assert_eq!(stop, &parsed);

    let string = serde_json::to_string(&gtfs.stop_times()["trip1.2"]).unwrap();
    let parsed: StopTime = serde_json::from_str(&string).unwrap();
    assert_eq!(gtfs.stop_times()["trip1.2"], parsed);

    let string = serde_json::to_string(&gtfs.calendar()["service1"]).unwrap();
    let parsed: Calendar = serde_json::from_str(&string).unwrap();
    assert_eq!(gtfs.calendar()["service1"], parsed);

    let string = serde_json::to_string(&gtfs.fare_attributes()["50"]).unwrap();
    let parsed: FareAttribute = serde_json::from_str(&string).unwrap();
    assert_eq!(gtfs.fare_attributes()["50"], parsed);

    let summary = serde_json::to_value(gtfs.summary()).unwrap();
    assert_eq!(5, summary["stops"]);
    assert_eq!(0, summary["errors"]);
}

#[test]
fn collection_of_archives() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.zip");
    std::fs::write(&good, basic_with(&[]).into_inner()).unwrap();
    let agencies = fixture("agency.txt") + "BIBUS,Bibus bis,http://www.bibus.fr,Europe/Paris,fr\n";
    let bad = dir.path().join("bad.zip");
    std::fs::write(
        &bad,
        basic_with(&[("agency.txt", Some(&agencies))]).into_inner(),
    )
    .unwrap();

    let collection = Collection::from_paths(&[&good, &bad]).unwrap();
    assert_eq!(2, collection.len());
    let errors: Vec<usize> = collection.iter().map(|(_, s)| s.errors().count()).collect();
    assert_eq!(1, errors.iter().sum::<usize>());
    for (id, schedule) in collection.iter() {
        assert_eq!(36, id.len());
        assert!(collection.get(id).is_some());
        assert_eq!(5, schedule.stops().len());
    }

    let overview = collection.overview();
    assert_eq!(2, overview.matches("Schedule ").count());
    assert!(overview.contains("    5 stops\n"));
    let report = collection.report();
    assert_eq!(1, report.lines().count());
    assert!(report.contains(" [error] agency.txt:3: duplicate key 'BIBUS'"));
    assert_eq!(2, collection.summaries().len());
}

#[test]
fn collection_fails_on_unreadable_archive() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = dir.path().join("corrupt.zip");
    std::fs::write(&corrupt, b"not a zip").unwrap();
    let result = Collection::from_paths(&[&corrupt]);
    assert!(matches!(result, Err(Error::NamedFileIO { .. })));
}

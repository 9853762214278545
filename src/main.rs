use anyhow::{Context, Result};
use clap::Parser;
use gtfs_schedule::{Collection, ScheduleReader};
use log::info;
use std::path::{Path, PathBuf};

/// Reads every GTFS archive of a directory and reports what is wrong with them
#[derive(Debug, Parser)]
#[command(name = "feedcheck", version)]
struct Args {
    /// Directory holding the `.zip` archives
    #[arg(default_value = "gtfs_files")]
    dir: PathBuf,

    /// Where to write the diagnostics, `<dir>/gtfs_errors.txt` by default
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Do not read stop_times.txt
    #[arg(long)]
    skip_stop_times: bool,

    /// Print the summaries as JSON
    #[arg(long)]
    json: bool,
}

/// The `.zip` files directly inside `dir`, sorted
fn find_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let dir_str = dir
        .to_str()
        .with_context(|| format!("{} is not a valid path", dir.display()))?;
    let pattern = format!("{}/*.zip", glob::Pattern::escape(dir_str));
    let mut archives = glob::glob(&pattern)
        .with_context(|| format!("invalid pattern {}", pattern))?
        .collect::<Result<Vec<_>, _>>()
        .context("cannot list the archives")?;
    archives.sort();
    Ok(archives)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let archives = find_archives(&args.dir)?;
    info!("{} archives found in {}", archives.len(), args.dir.display());

    let reader = ScheduleReader::default().read_stop_times(!args.skip_stop_times);
    let collection = Collection::from_paths_with(reader, &archives)
        .with_context(|| format!("cannot read the archives of {}", args.dir.display()))?;

    if args.json {
        let summaries = serde_json::to_string_pretty(&collection.summaries())
            .context("cannot serialize the summaries")?;
        println!("{}", summaries);
    } else {
        print!("{}", collection.overview());
    }

    let report_path = args
        .report
        .unwrap_or_else(|| args.dir.join("gtfs_errors.txt"));
    std::fs::write(&report_path, collection.report())
        .with_context(|| format!("cannot write the report to {}", report_path.display()))?;
    info!("diagnostics written to {}", report_path.display());
    Ok(())
}

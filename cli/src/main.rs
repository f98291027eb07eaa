#[macro_use]
extern crate log;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use structopt::StructOpt;

use timepoints::{estimate_times, get_eta, interpolate_deltas, Stop, StopID};

#[derive(StructOpt)]
#[structopt(
    name = "timepoints",
    about = "Estimates arrival times between the timepoints of one trip"
)]
struct Args {
    /// CSV file with stop_id, stop_sequence, stop_lat, stop_lon, and optionally arrival_time
    /// (HH:MM:SS) and timepoint (0 or 1) columns
    #[structopt(parse(from_os_str))]
    input: PathBuf,
    /// The service day that arrival times refer to, as YYYY-MM-DD. Defaults to today.
    #[structopt(long)]
    date: Option<NaiveDate>,
    /// Instead of listing every stop, print the seconds between two stop indices. Needs
    /// --destination too.
    #[structopt(long, requires = "destination")]
    origin: Option<usize>,
    #[structopt(long, requires = "origin")]
    destination: Option<usize>,
    /// Print JSON instead of a table
    #[structopt(long)]
    json: bool,
}

#[derive(Serialize)]
struct Row<'a> {
    stop_id: &'a StopID,
    sequence: usize,
    delta_seconds: i64,
    estimated_time: Option<NaiveDateTime>,
}

#[derive(Serialize)]
struct Eta {
    origin: usize,
    destination: usize,
    seconds: i64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();
    let args = Args::from_args();

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().naive_local().date());
    let stops = timepoints::stops::load(fs_err::File::open(&args.input)?, date)?;

    if let (Some(origin), Some(destination)) = (args.origin, args.destination) {
        let seconds = get_eta(origin, destination, &stops)?;
        if args.json {
            let eta = Eta {
                origin,
                destination,
                seconds,
            };
            println!("{}", serde_json::to_string_pretty(&eta)?);
        } else {
            println!(
                "{} -> {}: {}s",
                describe(&stops, origin),
                describe(&stops, destination),
                seconds
            );
        }
        return Ok(());
    }

    let rows = to_rows(&stops)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("stop_id\tsequence\tdelta\testimated_time");
        for row in rows {
            let time = row
                .estimated_time
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{}\t{}\t{}\t{}",
                row.stop_id, row.sequence, row.delta_seconds, time
            );
        }
    }
    Ok(())
}

fn to_rows(stops: &[Stop]) -> Result<Vec<Row<'_>>> {
    let deltas = interpolate_deltas(stops)?;
    let times = estimate_times(stops)?;
    let unestimated = times.iter().filter(|t| t.is_none()).count();
    if unestimated > 0 {
        warn!("{unestimated} stops are outside the first and last timepoint");
    }
    Ok(stops
        .iter()
        .zip(deltas)
        .zip(times)
        .map(|((stop, delta_seconds), estimated_time)| Row {
            stop_id: &stop.stop_id,
            sequence: stop.sequence,
            delta_seconds,
            estimated_time,
        })
        .collect())
}

fn describe(stops: &[Stop], idx: usize) -> String {
    match stops.get(idx) {
        Some(stop) => format!("stop {stop} (#{idx})"),
        None => format!("#{idx}"),
    }
}

use std::fmt;

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{GeoPosition, StopID};

/// One stop along a single trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub stop_id: StopID,
    pub pos: GeoPosition,
    /// Assigned by the caller. Interpolation follows the order of the list, not this.
    pub sequence: usize,
    /// Only authoritative when `timepoint` is also set
    pub stop_time: Option<NaiveDateTime>,
    pub timepoint: bool,
}

impl Stop {
    /// A regular stop, without any known time
    pub fn new(stop_id: StopID, pos: GeoPosition, sequence: usize) -> Self {
        Self {
            stop_id,
            pos,
            sequence,
            stop_time: None,
            timepoint: false,
        }
    }

    /// Marks this stop as a timepoint with an authoritative time.
    pub fn with_timepoint(mut self, time: NaiveDateTime) -> Self {
        self.stop_time = Some(time);
        self.timepoint = true;
        self
    }

    /// The flag alone isn't enough; a timepoint without a time can't anchor anything.
    pub fn is_timepoint(&self) -> bool {
        self.timepoint_time().is_some()
    }

    pub fn timepoint_time(&self) -> Option<NaiveDateTime> {
        if self.timepoint {
            self.stop_time
        } else {
            None
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.stop_id)
    }
}

/// Reads the stops of one trip from CSV, using GTFS `stop_times.txt` style columns with the
/// position inlined. `arrival_time` is `HH:MM:SS` relative to `service_date`; like GTFS, hours
/// may go past 23.
pub fn load<R: std::io::Read>(reader: R, service_date: NaiveDate) -> Result<Vec<Stop>> {
    let midnight = service_date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Can't find midnight on {service_date}"))?;

    let mut stops = Vec::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec?;
        let stop_time = match rec.arrival_time.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(
                midnight
                    .checked_add_signed(parse_time(raw)?)
                    .ok_or_else(|| anyhow!("Time {raw} is out of range"))?,
            ),
            _ => None,
        };
        let timepoint = match rec.timepoint {
            Some(0) => false,
            Some(1) => true,
            // GTFS treats a missing value as exact, as long as there's a time
            None => stop_time.is_some(),
            x => bail!("Unknown timepoint {:?} for stop {}", x, rec.stop_id),
        };
        if timepoint && stop_time.is_none() {
            warn!(
                "Stop {} is marked as a timepoint, but has no arrival_time",
                rec.stop_id
            );
        }

        stops.push(Stop {
            stop_id: rec.stop_id,
            pos: GeoPosition::new(rec.stop_lat, rec.stop_lon),
            sequence: rec.stop_sequence,
            stop_time,
            timepoint,
        });
    }

    // Sort by stop_sequence, in case the file isn't in order
    stops.sort_by_key(|stop| stop.sequence);
    for pair in stops.windows(2) {
        if pair[0].sequence == pair[1].sequence {
            bail!(
                "Stops {} and {} both have stop_sequence {}",
                pair[0],
                pair[1],
                pair[0].sequence
            );
        }
    }

    info!(
        "Loaded {} stops, {} of them timepoints",
        stops.len(),
        stops.iter().filter(|stop| stop.is_timepoint()).count()
    );
    Ok(stops)
}

fn parse_time(raw: &str) -> Result<Duration> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 3 {
        bail!("Time {raw} isn't HH:MM:SS");
    }
    let hours: u32 = parts[0].parse()?;
    let minutes: u32 = parts[1].parse()?;
    let seconds: u32 = parts[2].parse()?;
    if minutes >= 60 || seconds >= 60 {
        bail!("Time {raw} has out-of-range minutes or seconds");
    }
    Ok(Duration::seconds(
        3600 * i64::from(hours) + 60 * i64::from(minutes) + i64::from(seconds),
    ))
}

#[derive(Deserialize)]
struct Record {
    stop_id: StopID,
    stop_sequence: usize,
    stop_lat: f64,
    stop_lon: f64,
    arrival_time: Option<String>,
    timepoint: Option<usize>,
}

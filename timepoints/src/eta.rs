use chrono::{Duration, NaiveDateTime};

use crate::deltas::find_timepoints;
use crate::{interpolate_deltas, InterpolationError, Stop};

/// Seconds to travel from one stop to another, both given as indices into `stops`.
pub fn get_eta(
    origin: usize,
    destination: usize,
    stops: &[Stop],
) -> Result<i64, InterpolationError> {
    if destination < origin {
        return Err(InterpolationError::InvalidOrder {
            origin,
            destination,
        });
    }

    let deltas = interpolate_deltas(stops)?;
    // origin <= destination, so checking destination covers both
    if destination >= deltas.len() {
        return Err(InterpolationError::StopIndexOutOfRange {
            index: destination,
            len: deltas.len(),
        });
    }
    Ok(deltas[destination] - deltas[origin])
}

/// Turns the deltas back into clock times, anchored to the first timepoint. Stops outside the
/// first and last timepoint have no estimate.
pub fn estimate_times(
    stops: &[Stop],
) -> Result<Vec<Option<NaiveDateTime>>, InterpolationError> {
    let deltas = interpolate_deltas(stops)?;
    let timepoints = find_timepoints(stops);
    // Only a lone stop gets this far without 2 timepoints
    let (first_idx, first_time, last_idx) = match (timepoints.first(), timepoints.last()) {
        (Some(first), Some(last)) if timepoints.len() >= 2 => (first.0, first.1, last.0),
        _ => return Ok(stops.iter().map(Stop::timepoint_time).collect()),
    };

    Ok(deltas
        .into_iter()
        .enumerate()
        .map(|(idx, delta)| {
            if idx < first_idx || idx > last_idx {
                None
            } else {
                Some(first_time + Duration::seconds(delta))
            }
        })
        .collect())
}

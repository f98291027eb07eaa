use chrono::NaiveDateTime;

use crate::{InterpolationError, Stop};

/// For every stop, estimates the number of seconds elapsed since the first timepoint. Between two
/// consecutive timepoints, the known time is split among the stops in proportion to the
/// great-circle distance traveled. Stops before the first timepoint or after the last can't be
/// interpolated and get 0.
///
/// The stops must already be in travel order. Timepoint times aren't checked to be increasing; if
/// they go backwards, so will the deltas.
pub fn interpolate_deltas(stops: &[Stop]) -> Result<Vec<i64>, InterpolationError> {
    if stops.is_empty() {
        return Err(InterpolationError::EmptyInput);
    }
    if stops.len() == 1 {
        return Ok(vec![0]);
    }

    let timepoints = find_timepoints(stops);
    if timepoints.len() < 2 {
        return Err(InterpolationError::InsufficientTimepoints {
            found: timepoints.len(),
        });
    }

    // Everything outside the timepoints stays 0
    let mut deltas = vec![0; stops.len()];
    let first_time = timepoints[0].1;

    for pair in timepoints.windows(2) {
        let (low_idx, low_time) = pair[0];
        let (high_idx, high_time) = pair[1];
        let segment = &stops[low_idx..=high_idx];
        let segment_duration = seconds_between(low_time, high_time);

        // Distance from the previous stop in the segment. The first stop is the anchor.
        let mut distances = vec![0.0; segment.len()];
        let mut total_distance = 0.0;
        for (idx, window) in segment.windows(2).enumerate() {
            let dist = window[0].pos.dist_to(&window[1].pos);
            distances[idx + 1] = dist;
            total_distance += dist;
        }

        // Relative to the very first timepoint, so deltas keep increasing across segments
        let offset = seconds_between(first_time, low_time) as i64;
        debug!(
            "Segment from stop {} to {}: {}s over {}m, offset {}s",
            stops[low_idx], stops[high_idx], segment_duration, total_distance, offset
        );

        // Each step is truncated to whole seconds before being accumulated, so the last stop in
        // a segment may fall a few seconds short of the next timepoint.
        let mut so_far = 0;
        for (idx, dist) in distances.into_iter().enumerate() {
            let proportional = if total_distance == 0.0 {
                0
            } else {
                (segment_duration * (dist / total_distance)) as i64
            };
            deltas[low_idx + idx] = so_far + proportional + offset;
            so_far += proportional;
        }
    }

    Ok(deltas)
}

/// Index and time of every timepoint, in list order
pub(crate) fn find_timepoints(stops: &[Stop]) -> Vec<(usize, NaiveDateTime)> {
    stops
        .iter()
        .enumerate()
        .filter_map(|(idx, stop)| stop.timepoint_time().map(|time| (idx, time)))
        .collect()
}

fn seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let duration = to.signed_duration_since(from);
    match duration.num_nanoseconds() {
        Some(ns) => ns as f64 / 1e9,
        None => duration.num_milliseconds() as f64 / 1e3,
    }
}

//! Interpolation along part of a real bus route in Durham, NC, with timepoints at 07:30, 07:38,
//! 07:44 and 07:56.

use chrono::{NaiveDate, NaiveDateTime};

use timepoints::{
    estimate_times, get_eta, interpolate_deltas, GeoPosition, InterpolationError, Stop, StopID,
};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 6, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn durham_stops() -> Vec<Stop> {
    let raw: Vec<(&str, f64, f64, Option<(u32, u32)>)> = vec![
        ("780017", 35.995952, -78.906005, Some((7, 30))),
        ("2583089", 35.995579, -78.908444, None),
        ("779732", 35.999935, -78.909003, None),
        ("779290", 36.0016, -78.9117, None),
        ("780096", 36.00379, -78.91528, None),
        ("2562471", 36.005842, -78.919316, None),
        ("779303", 36.01058, -78.91947, Some((7, 38))),
        ("2562472", 36.010586, -78.922118, None),
        ("779425", 36.010538, -78.925131, None),
        ("779436", 36.010649, -78.927815, None),
        ("779363", 36.012039, -78.930439, None),
        ("779150", 36.01302, -78.9316812, None),
        ("779443", 36.014786, -78.933818, None),
        ("779416", 36.0162, -78.93737, None),
        ("779565", 36.016499389233, -78.936650263442, None),
        ("779190", 36.01117, -78.93717, None),
        ("779198", 36.008813, -78.93743, Some((7, 44))),
        ("780069", 36.008863, -78.943709, None),
        ("780071", 36.006834, -78.947226, None),
        ("780072", 36.0048335155034, -78.9493562745149, None),
        ("780073", 36.003907218545, -78.9507185925409, None),
        ("780074", 36.00382, -78.95275, None),
        ("780118", 36.005668, -78.954668, None),
        ("780077", 36.007155, -78.954687, None),
        ("780078", 36.008762, -78.954635, None),
        ("780079", 36.013029, -78.95629, None),
        ("780080", 36.015459, -78.962606, None),
        ("780081", 36.016633, -78.966937, None),
        ("2562298", 36.020903, -78.967099, None),
        ("2562474", 36.026323, -78.967301, Some((7, 56))),
    ];
    raw.into_iter()
        .enumerate()
        .map(|(sequence, (id, lat, lon, time))| {
            let stop = Stop::new(StopID::new(id), GeoPosition::new(lat, lon), sequence);
            match time {
                Some((hour, minute)) => stop.with_timepoint(at(hour, minute)),
                None => stop,
            }
        })
        .collect()
}

fn clear_timepoint(stop: &mut Stop) {
    stop.timepoint = false;
    stop.stop_time = None;
}

#[test]
fn one_segment() {
    let stops = &durham_stops()[0..7];
    assert_eq!(
        interpolate_deltas(stops),
        Ok(vec![0, 45, 143, 204, 285, 371, 477])
    );
}

#[test]
fn multiple_timepoints() {
    let deltas = interpolate_deltas(&durham_stops()).unwrap();
    assert_eq!(
        deltas,
        vec![
            0, 45, 143, 204, 285, 371, 480, 511, 546, 577, 613, 633, 668, 714, 723, 800, 840, 924,
            982, 1025, 1048, 1075, 1115, 1139, 1165, 1239, 1333, 1394, 1464, 1554,
        ]
    );
    for pair in deltas.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    // Middle timepoints land exactly on their scheduled time
    assert_eq!(deltas[6], 8 * 60);
    assert_eq!(deltas[16], 14 * 60);
}

#[test]
fn no_stops() {
    assert_eq!(interpolate_deltas(&[]), Err(InterpolationError::EmptyInput));
}

#[test]
fn one_stop() {
    let stops = durham_stops();
    assert_eq!(interpolate_deltas(&stops[0..1]), Ok(vec![0]));
    // Even if it's not a timepoint
    assert_eq!(interpolate_deltas(&stops[1..2]), Ok(vec![0]));
}

#[test]
fn no_timepoints() {
    let mut stops = durham_stops()[0..3].to_vec();
    clear_timepoint(&mut stops[0]);
    assert_eq!(
        interpolate_deltas(&stops),
        Err(InterpolationError::InsufficientTimepoints { found: 0 })
    );
}

#[test]
fn consecutive_timepoints() {
    let mut stops = durham_stops()[0..8].to_vec();
    stops[7].timepoint = stops[6].timepoint;
    stops[7].stop_time = stops[6].stop_time;
    assert_eq!(
        interpolate_deltas(&stops),
        Ok(vec![0, 45, 143, 204, 285, 371, 480, 480])
    );
}

#[test]
fn stops_before_first_timepoint() {
    let mut stops = durham_stops()[0..7].to_vec();
    stops[2].timepoint = stops[0].timepoint;
    stops[2].stop_time = stops[0].stop_time;
    clear_timepoint(&mut stops[0]);
    assert_eq!(
        interpolate_deltas(&stops),
        Ok(vec![0, 0, 0, 87, 203, 326, 477])
    );
}

#[test]
fn stops_after_last_timepoint() {
    let stops = &durham_stops()[0..8];
    assert_eq!(
        interpolate_deltas(stops),
        Ok(vec![0, 45, 143, 204, 285, 371, 477, 0])
    );
}

#[test]
fn input_order_wins_over_sequence() {
    let mut stops = durham_stops()[0..7].to_vec();
    for stop in &mut stops {
        stop.sequence = 100 - stop.sequence;
    }
    assert_eq!(
        interpolate_deltas(&stops),
        Ok(vec![0, 45, 143, 204, 285, 371, 477])
    );
}

#[test]
fn idempotent() {
    let stops = durham_stops();
    let before = stops.clone();
    let first = interpolate_deltas(&stops);
    assert_eq!(first, interpolate_deltas(&stops));
    assert_eq!(stops, before);
}

#[test]
fn eta() {
    let stops = &durham_stops()[0..7];
    assert_eq!(get_eta(1, 2, stops), Ok(98));
    assert_eq!(get_eta(0, 6, stops), Ok(477));
}

#[test]
fn eta_invalid_order() {
    let stops = &durham_stops()[0..7];
    assert_eq!(
        get_eta(2, 1, stops),
        Err(InterpolationError::InvalidOrder {
            origin: 2,
            destination: 1
        })
    );
}

#[test]
fn eta_error_propagation() {
    let mut stops = durham_stops()[0..3].to_vec();
    clear_timepoint(&mut stops[0]);
    assert_eq!(
        get_eta(1, 2, &stops),
        Err(InterpolationError::InsufficientTimepoints { found: 0 })
    );
}

#[test]
fn clock_times_across_segments() {
    let stops = durham_stops();
    let times = estimate_times(&stops).unwrap();
    assert_eq!(times.len(), 30);
    assert_eq!(times[0], Some(at(7, 30)));
    assert_eq!(times[6], Some(at(7, 38)));
    assert_eq!(times[16], Some(at(7, 44)));
    // 1554 seconds after 07:30, a bit short of 07:56
    assert_eq!(
        times[29],
        Some(at(7, 30) + chrono::Duration::seconds(1554))
    );
}

#[test]
fn errors_are_readable() {
    assert_eq!(InterpolationError::EmptyInput.to_string(), "no stops");
    let err = anyhow::Error::from(InterpolationError::InvalidOrder {
        origin: 2,
        destination: 1,
    });
    assert!(err.to_string().contains("destination 1 comes before origin 2"));
}

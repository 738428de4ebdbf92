use mgrsconvert::{to_geodetic, to_mgrs, LatLon};

/// Worst case for a 1m grid: the cell diagonal, with a margin for the grid
/// scale factor and the spherical distance.
const MAX_ERROR_M: f64 = 1.5;

fn round_trip_error(lat: f64, lon: f64) -> f64 {
    let mgrs = to_mgrs(lat, lon, 5).unwrap();
    let coord = to_geodetic(&mgrs).unwrap();

    LatLon::create(lat, lon).unwrap().haversine(&coord)
}

#[test]
fn conversion_accuracy() {
    let latitudes = (-89..=89).map(|lat| f64::from(lat) + 0.37);
    let points = latitudes.flat_map(|lat| (-179..=179).step_by(7).map(move |lon| (lat, f64::from(lon) + 0.61)));

    let errors: Vec<f64> = points.map(|(lat, lon)| round_trip_error(lat, lon)).collect();

    let significant_errors = errors
        .iter()
        .filter(|dist| **dist > MAX_ERROR_M)
        .count();

    let count = errors.len();
    let sum: f64 = errors.iter().sum();

    println!("Average error: {}", sum / count as f64);

    assert_eq!(significant_errors, 0);
}

#[test]
fn latitude_within_grid_resolution() {
    for lat in [-79.9, -56.2, -12.5, 0.3, 23.4, 47.8, 63.9, 71.9, 83.9] {
        for lon in [-177.3, -93.0, -0.5, 2.5, 9.1, 33.3, 151.2] {
            let coord = to_geodetic(&to_mgrs(lat, lon, 5).unwrap()).unwrap();

            assert!((coord.latitude() - lat).abs() < 1e-5, "({lat}, {lon})");
            assert!(
                (coord.longitude() - lon).abs() * lat.to_radians().cos() < 1e-5,
                "({lat}, {lon})"
            );
        }
    }
}

#[test]
fn zone_and_band_boundaries() {
    for (lat, lon) in [
        (0.0, -180.0),
        (-0.000_001, 3.0),
        (8.0, 6.0),
        (-80.0, 0.0),
        (84.0, 0.0),
        (-79.999_99, 45.0),
        (83.999_99, -45.0),
        (56.0, 3.0),
        (64.0, 6.0),
        (72.0, 9.0),
        (72.0, 21.0),
        (71.999, 33.0),
        (90.0, 0.0),
        (-90.0, 179.0),
    ] {
        assert!(round_trip_error(lat, lon) < MAX_ERROR_M, "({lat}, {lon})");
    }
}

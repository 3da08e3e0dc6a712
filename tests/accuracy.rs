use gridconvert::{convert_bng_to_latlon, convert_utm_to_latlon, Bng, LatLon, Utm};

// Reference values from GeographicLib (UTM) and the Ordnance Survey's
// worked example (National Grid, OSGB36)
const UTM_POINTS: &[(i32, bool, f64, f64, f64, f64)] = &[
    (18, true, 585_664.121, 4_511_315.422, 40.748_333, -73.985_278),
    (18, false, 585_664.121, 5_488_684.578, -40.748_333, -73.985_278),
];

const BNG_POINTS: &[(f64, f64, f64, f64)] = &[
    (651_409.903, 313_177.270, 52.657_570_3, 1.717_921_6),
    (400_000., -100_000., 49., -2.),
];

#[test]
fn utm_reference_points() {
    for &(zone, north, easting, northing, lat, lon) in UTM_POINTS {
        let coord = convert_utm_to_latlon(easting, northing, zone, north);
        let expected = LatLon::create(lat, lon).unwrap();

        assert!((coord.latitude() - lat).abs() < 1e-6, "{coord} vs {lat}");
        assert!((coord.longitude() - lon).abs() < 1e-6, "{coord} vs {lon}");
        // Within 1cm of the reference
        assert!(coord.haversine(&expected) < 1e-2, "{coord} vs {expected}");
    }
}

#[test]
fn bng_reference_points() {
    for &(easting, northing, lat, lon) in BNG_POINTS {
        let coord = convert_bng_to_latlon(easting, northing).unwrap();
        let expected = LatLon::create(lat, lon).unwrap();

        assert!((coord.latitude() - lat).abs() < 1e-6, "{coord} vs {lat}");
        assert!((coord.longitude() - lon).abs() < 1e-6, "{coord} vs {lon}");
        assert!(coord.haversine(&expected) < 1e-2, "{coord} vs {expected}");
    }
}

#[test]
fn grid_reference_precision_error() {
    let exact = Bng::create(651_409.903, 313_177.270).unwrap();
    let exact_latlon = exact.to_latlon().unwrap();

    // Truncating to a coarser reference moves the point towards the
    // south-west corner of its square, never further than the square diagonal
    for (digits, square) in [(10, 1.), (8, 10.), (6, 100.), (4, 1000.)] {
        let grid_ref = exact.to_grid_ref(digits).unwrap();
        let coarse = Bng::parse_str(&grid_ref).unwrap().to_latlon().unwrap();

        let error = coarse.haversine(&exact_latlon);
        assert!(error < square * std::f64::consts::SQRT_2 * 1.01, "{grid_ref}: {error}m");
    }
}

#[test]
fn bng_origin_is_fixed_point() {
    let coord = convert_bng_to_latlon(400_000., -100_000.).unwrap();

    assert_eq!(coord.latitude(), 49.);
    assert_eq!(coord.longitude(), -2.);
}

#[test]
fn hemisphere_symmetry() {
    for northing in [100_000., 1_500_000., 4_511_315.422, 7_000_000.] {
        for easting in [300_000., 500_000., 585_664.121] {
            let north = convert_utm_to_latlon(easting, northing, 33, true);
            let south = convert_utm_to_latlon(easting, 10_000_000. - northing, 33, false);

            assert!((north.latitude() + south.latitude()).abs() < 1e-9);
            assert!((north.longitude() - south.longitude()).abs() < 1e-9);
        }
    }
}

#[test]
fn zone_offset_is_six_degrees() {
    for northing in [0., 2_000_000., 5_000_000., 8_000_000.] {
        let base = convert_utm_to_latlon(651_409.903, northing, 1, true);

        for zone in 2..=60 {
            let coord = convert_utm_to_latlon(651_409.903, northing, zone, true);
            let shift = coord.longitude() - base.longitude();

            assert!((shift - 6. * f64::from(zone - 1)).abs() < 1e-9, "zone {zone}: shift {shift}");
            assert_eq!(coord.latitude(), base.latitude());
        }
    }
}

#[test]
fn conversions_are_deterministic() {
    let first = convert_utm_to_latlon(651_409.903, 313_177.270, 30, true);
    let again = convert_utm_to_latlon(651_409.903, 313_177.270, 30, true);
    assert_eq!(first.latitude().to_bits(), again.latitude().to_bits());
    assert_eq!(first.longitude().to_bits(), again.longitude().to_bits());

    let first = convert_bng_to_latlon(651_409.903, 313_177.270).unwrap();
    let again = convert_bng_to_latlon(651_409.903, 313_177.270).unwrap();
    assert_eq!(first.latitude().to_bits(), again.latitude().to_bits());
    assert_eq!(first.longitude().to_bits(), again.longitude().to_bits());
}

#[test]
fn false_origins_are_finite() {
    assert!(convert_utm_to_latlon(500_000., 0., 30, true).is_finite());
    assert!(convert_utm_to_latlon(500_000., 10_000_000., 30, false).is_finite());
    assert!(convert_bng_to_latlon(400_000., -100_000.).unwrap().is_finite());
    assert!(convert_bng_to_latlon(400_000., 0.).unwrap().is_finite());
}

#[test]
fn bng_grid_is_covered() {
    for northing in (0..=1_300_000).step_by(50_000) {
        for easting in (0..=700_000).step_by(50_000) {
            let coord = convert_bng_to_latlon(f64::from(easting), f64::from(northing)).unwrap();

            assert!(coord.is_finite());
            assert!((49.0..61.5).contains(&coord.latitude()), "{easting} {northing} -> {coord}");
            assert!((-10.0..4.0).contains(&coord.longitude()), "{easting} {northing} -> {coord}");
        }
    }
}

#[test]
fn grid_references_convert_like_numeric_pairs() {
    let lettered = Bng::parse_str("TQ 30000 80000").unwrap().to_latlon().unwrap();
    let numeric = convert_bng_to_latlon(530_000., 180_000.).unwrap();

    assert_eq!(lettered, numeric);
    assert!((numeric.latitude() - 51.503_480).abs() < 1e-6);
    assert!((numeric.longitude() - -0.126_748).abs() < 1e-6);
}

#[test]
fn typed_and_free_conversions_agree() {
    let utm: Utm = gridconvert::from_str("30N 651409.903 313177.270").unwrap();
    assert_eq!(LatLon::from_utm(&utm), convert_utm_to_latlon(651_409.903, 313_177.270, 30, true));

    let bng: Bng = gridconvert::from_str("651409.903 313177.270").unwrap();
    assert_eq!(LatLon::from_bng(&bng).unwrap(), convert_bng_to_latlon(651_409.903, 313_177.270).unwrap());
}

#[test]
fn conversions_are_thread_safe() {
    let handles = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                convert_bng_to_latlon(651_409.903, 313_177.270 + f64::from(i)).unwrap()
            })
        })
        .collect::<Vec<_>>();

    let results = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect::<Vec<_>>();

    for (i, coord) in results.iter().enumerate() {
        let expected = convert_bng_to_latlon(651_409.903, 313_177.270 + f64::from(u8::try_from(i).unwrap())).unwrap();
        assert_eq!(*coord, expected);
    }
}

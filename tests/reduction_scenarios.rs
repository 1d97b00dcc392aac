/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! End-to-end reduction scenarios. The analytical theories carry these
//! (the DE reader has its own fixture tests); tolerances follow how deeply
//! each series is truncated.

use almagest::bodies::Target;
use almagest::constants::DEG2RAD;
use almagest::context::CancelToken;
use almagest::frames::Equinox;
use almagest::prelude::*;
use almagest::reduce::request::RefractionModel;
use almagest::theories::{MagnitudeLaw, OrbitalElements};

fn madrid() -> Observer {
    Observer::on_earth(40.4168 * DEG2RAD, -3.7038 * DEG2RAD, 667.0)
}

/// Sun from the geocenter, 2000-01-01 12:00 TT, geometric J2000: the
/// classic 0.98329 AU and 280 degrees of ecliptic longitude.
#[test]
fn sun_geometric_at_j2000() {
    let _ = pretty_env_logger::try_init();
    let observatory = Observatory::new();
    let request = EphemRequest::geometric(Target::Sun, Algorithm::Moshier);
    let t = Instant::new(2_451_545.0, TimeScale::TT);
    let eph = observatory.ephemeris(&request, t, &madrid()).unwrap();

    assert!(
        (eph.distance - 0.98329).abs() < 5e-4,
        "solar distance {}",
        eph.distance
    );
    assert_eq!(eph.light_time_days, 0.0);
    // Geocentric ecliptic longitude from the GCRS snapshot.
    let gcrs = almagest::math::Vector3::from(eph.gcrs_position);
    let ecl = almagest::theories::ecliptic_to_equatorial_j2000().transpose() * gcrs;
    let lon = almagest::math::norm_two_pi(ecl[1].atan2(ecl[0])).to_degrees();
    assert!((lon - 280.0).abs() < 0.05, "solar longitude {lon}");
    assert_eq!(eph.constellation.as_deref(), Some("Sagittarius"));
}

/// Moon from the geocenter, 2011-06-15 0h TDB (hours before the total
/// lunar eclipse): a large full disc.
#[test]
fn moon_apparent_near_the_2011_eclipse() {
    let observatory = Observatory::new();
    let request = EphemRequest::apparent(Target::Moon, Algorithm::Moshier);
    let t = Instant::new(2_455_727.5, TimeScale::TDB);
    let eph = observatory.ephemeris(&request, t, &madrid()).unwrap();

    let radius_arcmin = eph.angular_radius / DEG2RAD * 60.0;
    assert!(
        (radius_arcmin - 16.2).abs() < 0.4,
        "lunar angular radius {radius_arcmin}'"
    );
    assert!(eph.phase > 0.985, "phase {}", eph.phase);
    // Optical libration stays within its classical envelope.
    let libration_lon = almagest::math::norm_pm_pi(eph.subobserver_longitude).to_degrees();
    assert!(
        libration_lon.abs() < 8.5,
        "libration longitude {libration_lon} deg"
    );
    assert!(eph.magnitude < -11.0, "full moon magnitude {}", eph.magnitude);
}

/// Jupiter from Madrid, 1992-04-12 0h TT, apparent topocentric of date.
/// Without DE files the dispatcher falls back to the fitted theory and
/// says so; light time and geometry must still come out right.
#[test]
fn jupiter_from_madrid_1992() {
    let observatory = Observatory::new();
    let mut request = EphemRequest::apparent(Target::Jupiter, Algorithm::De405);
    request.origin = almagest::reduce::request::ObserverOrigin::Topocentric;
    request.equinox = Equinox::OfDate;
    request.want_horizontal = true;
    let t = Instant::new(2_448_724.5, TimeScale::TT);
    let eph = observatory.ephemeris(&request, t, &madrid()).unwrap();

    assert!(eph.warnings.iter().any(|w| w.contains("fell back")));
    let lt_minutes = eph.light_time_days * 1_440.0;
    assert!((lt_minutes - 41.0).abs() < 4.0, "light time {lt_minutes} min");
    assert!(
        eph.phase_angle.to_degrees() > 0.3 && eph.phase_angle.to_degrees() < 12.0,
        "phase angle {} deg",
        eph.phase_angle.to_degrees()
    );
    assert!(eph.right_ascension.is_finite() && eph.declination.is_finite());
    assert!(eph.declination.abs() < core::f64::consts::FRAC_PI_2);
    assert!(eph.magnitude < -1.5, "Jupiter magnitude {}", eph.magnitude);
    assert!(eph.rise_set_transit.is_some());
    let rst = eph.rise_set_transit.unwrap();
    assert!(!rst.transit.is_empty());
    // System III longitude is defined for Jupiter.
    assert!(eph.longitude_system_iii.is_finite());
}

/// Ceres through the Kepler theory with osculating elements: magnitude and
/// distance land in the catalogued range.
#[test]
fn ceres_from_madrid_2001() {
    let observatory = Observatory::new();
    let a = 2.7665;
    let e = 0.0785;
    let elements = OrbitalElements {
        semimajor_axis_au: a,
        eccentricity: e,
        inclination_rad: 10.5834 * DEG2RAD,
        ascending_node_rad: 80.4939 * DEG2RAD,
        arg_perihelion_rad: 73.9213 * DEG2RAD,
        mean_anomaly_rad: 287.62 * DEG2RAD,
        mean_motion_rad_d: f64::NAN,
        epoch_jd: 2_451_600.5,
        equinox_jd: almagest::constants::J2000,
        frame: almagest::frames::CelestialFrame::DynamicalJ2000,
        perihelion_distance_au: a * (1.0 - e),
        perihelion_time_jd: f64::NAN,
        absolute_magnitude: 3.34,
        magnitude_slope: 0.12,
        magnitude_law: MagnitudeLaw::Hg,
        central_body: Target::Sun,
        valid_from_jd: f64::NAN,
        valid_to_jd: f64::NAN,
        radius_km: 470.0,
        reciprocal_mass: f64::INFINITY,
    };
    let mut request = EphemRequest::apparent(Target::MinorBody(1), Algorithm::Kepler);
    request.elements = Some(elements);
    request.origin = almagest::reduce::request::ObserverOrigin::Topocentric;
    let t = Instant::new(2_451_910.5, TimeScale::TT);
    let eph = observatory.ephemeris(&request, t, &madrid()).unwrap();

    assert!(eph.heliocentric_distance > 2.5 && eph.heliocentric_distance < 3.0);
    assert!(eph.distance > 1.5 && eph.distance < 4.0, "{}", eph.distance);
    assert!(
        eph.magnitude > 6.0 && eph.magnitude < 9.5,
        "Ceres magnitude {}",
        eph.magnitude
    );
    assert!(eph.angular_radius > 0.0);
}

/// Geometric and apparent places differ by aberration-scale angles.
#[test]
fn apparent_differs_from_geometric_by_aberration() {
    let observatory = Observatory::new();
    let t = Instant::new(2_453_005.25, TimeScale::TT);
    let site = madrid();
    let geometric = observatory
        .ephemeris(
            &EphemRequest::geometric(Target::Sun, Algorithm::Moshier),
            t,
            &site,
        )
        .unwrap();
    let mut apparent_req = EphemRequest::apparent(Target::Sun, Algorithm::Moshier);
    apparent_req.equinox = Equinox::J2000;
    let apparent = observatory.ephemeris(&apparent_req, t, &site).unwrap();

    let sep = almagest::math::angular_separation(
        &almagest::math::spherical_to_cartesian(
            geometric.right_ascension,
            geometric.declination,
            1.0,
        ),
        &almagest::math::spherical_to_cartesian(
            apparent.right_ascension,
            apparent.declination,
            1.0,
        ),
    );
    // Aberration (about 20") plus the nutation rotation of the apparent
    // place (up to 17").
    let arcsec = sep / almagest::constants::DAS2R;
    assert!(
        arcsec > 5.0 && arcsec < 40.0,
        "aberration-scale separation {arcsec} arcsec"
    );
}

/// Topocentric lunar parallax approaches a degree at the horizon.
#[test]
fn lunar_parallax_is_about_a_degree() {
    let observatory = Observatory::new();
    let t = Instant::new(2_455_727.5, TimeScale::TT);
    let site = madrid();
    let geo = observatory
        .ephemeris(&EphemRequest::apparent(Target::Moon, Algorithm::Moshier), t, &site)
        .unwrap();
    let mut topo_req = EphemRequest::apparent(Target::Moon, Algorithm::Moshier);
    topo_req.origin = almagest::reduce::request::ObserverOrigin::Topocentric;
    let topo = observatory.ephemeris(&topo_req, t, &site).unwrap();

    let sep = almagest::math::angular_separation(
        &almagest::math::spherical_to_cartesian(geo.right_ascension, geo.declination, 1.0),
        &almagest::math::spherical_to_cartesian(topo.right_ascension, topo.declination, 1.0),
    );
    let deg = sep.to_degrees();
    assert!(deg > 0.1 && deg < 1.2, "parallax displacement {deg} deg");
}

/// Refraction raises the horizontal place when requested.
#[test]
fn refraction_raises_low_elevations() {
    let observatory = Observatory::new();
    let site = madrid();
    let mut with = EphemRequest::apparent(Target::Sun, Algorithm::Moshier);
    with.want_horizontal = true;
    with.flags.correct_for_refraction = true;
    with.refraction_model = RefractionModel::OpticalBennett;
    let mut without = with.clone();
    without.flags.correct_for_refraction = false;

    // Scan a day for an instant with the Sun low but risen.
    for step in 0..144 {
        let t = Instant::new(2_453_005.5 + f64::from(step) / 144.0, TimeScale::TT);
        let dry = observatory.ephemeris(&without, t, &site).unwrap();
        if dry.elevation > 0.0 && dry.elevation < 5.0 * DEG2RAD {
            let wet = observatory.ephemeris(&with, t, &site).unwrap();
            assert!(
                wet.elevation > dry.elevation,
                "refraction lowered the target"
            );
            let lift_arcmin = (wet.elevation - dry.elevation) / DEG2RAD * 60.0;
            assert!(lift_arcmin > 2.0 && lift_arcmin < 40.0, "lift {lift_arcmin}'");
            return;
        }
    }
    panic!("no low-Sun instant found in the scan");
}

/// The observer's heliocentric state is an Earth orbit plus a site offset.
#[test]
fn heliocentric_observer_rides_the_earth_orbit() {
    let observatory = Observatory::new();
    let mut w = almagest::errors::Warnings::default();
    let (pos, vel) = observatory
        .heliocentric_observer(2_451_545.0, &madrid(), &mut w)
        .unwrap();
    assert!((pos.norm() - 0.9833).abs() < 0.003, "observer at {} AU", pos.norm());
    // Orbital plus spin velocity.
    assert!(vel.norm() > 0.016 && vel.norm() < 0.019, "{} AU/day", vel.norm());
}

/// Extinction dims the magnitude of a risen target.
#[test]
fn extinction_dims_risen_targets() {
    let observatory = Observatory::new();
    let site = madrid();
    let mut plain = EphemRequest::apparent(Target::Sun, Algorithm::Moshier);
    plain.want_horizontal = true;
    let mut dimmed = plain.clone();
    dimmed.flags.correct_for_extinction = true;

    // Local noon-ish: the Sun is up.
    let t = Instant::new(2_453_005.5 + 0.5, TimeScale::TT);
    let a = observatory.ephemeris(&plain, t, &site).unwrap();
    let b = observatory.ephemeris(&dimmed, t, &site).unwrap();
    if a.elevation > 0.0 {
        assert!(b.magnitude > a.magnitude + 0.1, "{} vs {}", b.magnitude, a.magnitude);
    }
}

/// A pre-cancelled token aborts the pipeline.
#[test]
fn cancellation_token_aborts() {
    let observatory = Observatory::new();
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = observatory
        .ephemeris_with_cancel(
            &EphemRequest::apparent(Target::Jupiter, Algorithm::Moshier),
            Instant::new(2_451_545.0, TimeScale::TT),
            &madrid(),
            &cancel,
        )
        .unwrap_err();
    assert!(err.to_string().contains("cancelled"), "{err}");
}

/// Output conventions: RA normalized to [0, 2 pi), declination within
/// [-pi/2, pi/2], finite record for every major body.
#[test]
fn output_conventions_hold_for_all_planets() {
    let observatory = Observatory::new();
    let t = Instant::new(2_456_658.5, TimeScale::TT);
    let site = madrid();
    for target in [
        Target::Mercury,
        Target::Venus,
        Target::Mars,
        Target::Jupiter,
        Target::Saturn,
        Target::Uranus,
        Target::Neptune,
        Target::Pluto,
    ] {
        let eph = observatory
            .ephemeris(&EphemRequest::apparent(target, Algorithm::Moshier), t, &site)
            .unwrap();
        assert!((0.0..core::f64::consts::TAU).contains(&eph.right_ascension));
        assert!(eph.declination.abs() <= core::f64::consts::FRAC_PI_2);
        assert!(eph.distance > 0.0 && eph.distance < 60.0);
        assert!(eph.light_time_days > 0.0);
        assert!(eph.phase >= 0.0 && eph.phase <= 1.0);
        assert_eq!(eph.status, "OK");
    }
}

/// The Kepler algorithm without elements is rejected up front.
#[test]
fn kepler_without_elements_is_invalid() {
    let observatory = Observatory::new();
    let err = observatory
        .ephemeris(
            &EphemRequest::apparent(Target::MinorBody(7), Algorithm::Kepler),
            Instant::new(2_451_545.0, TimeScale::TT),
            &madrid(),
        )
        .unwrap_err();
    assert!(err.to_string().contains("unfit"), "{err}");
}

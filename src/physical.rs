/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Physical ephemerides: IAU pole and prime-meridian models, disc
//! quantities (angular radius, phase, defect of illumination), planetary
//! magnitudes and body-fixed sub-points.

use crate::bodies::Target;
use crate::constants::{AU_KM, DEG2RAD, J2000};
use crate::math::Vector3;

/// IAU orientation of a body: pole right ascension and declination and the
/// prime-meridian angle W, radians, at a TDB Julian date. Polynomials in
/// centuries, W in days, per the WGCCRE reports; the lunar model carries
/// its leading periodic terms.
pub fn pole_and_meridian(target: Target, jd_tdb: f64) -> Option<(f64, f64, f64)> {
    let d = jd_tdb - J2000;
    let t = d / 36_525.0;
    let (a_deg, d_deg, w_deg) = match target {
        Target::Sun => (286.13, 63.87, 84.176 + 14.184_400_0 * d),
        Target::Mercury => (
            281.0097 - 0.0328 * t,
            61.4143 - 0.0049 * t,
            329.5469 + 6.138_502_5 * d,
        ),
        Target::Venus => (272.76, 67.16, 160.20 - 1.481_368_8 * d),
        Target::Earth => (
            0.00 - 0.641 * t,
            90.00 - 0.557 * t,
            190.147 + 360.985_623_5 * d,
        ),
        Target::Mars => (
            317.68143 - 0.1061 * t,
            52.88650 - 0.0609 * t,
            176.630 + 350.891_982_26 * d,
        ),
        Target::Jupiter => (
            268.056595 - 0.006499 * t,
            64.495303 + 0.002413 * t,
            284.95 + 870.536_000_0 * d,
        ),
        Target::Saturn => (
            40.589 - 0.036 * t,
            83.537 - 0.004 * t,
            38.90 + 810.793_902_4 * d,
        ),
        Target::Uranus => (257.311, -15.175, 203.81 - 501.160_092_8 * d),
        Target::Neptune => {
            let n = (357.85 + 52.316 * t) * DEG2RAD;
            (
                299.36 + 0.70 * n.sin(),
                43.46 - 0.51 * n.cos(),
                253.18 + 536.312_849_2 * d - 0.48 * n.sin(),
            )
        }
        Target::Pluto => (132.993, -6.163, 302.695 + 56.362_522_5 * d),
        Target::Moon => {
            let (a, dd, w) = moon_pole_and_meridian(jd_tdb);
            return Some((a, dd, w));
        }
        _ => return None,
    };
    Some((
        a_deg * DEG2RAD,
        d_deg * DEG2RAD,
        crate::math::norm_two_pi(w_deg * DEG2RAD),
    ))
}

/// The lunar pole and meridian with the leading periodic arguments of the
/// WGCCRE series (the full model carries thirteen).
pub fn moon_pole_and_meridian(jd_tdb: f64) -> (f64, f64, f64) {
    let d = jd_tdb - J2000;
    let t = d / 36_525.0;
    let e1 = (125.045 - 0.052_992_1 * d) * DEG2RAD;
    let e2 = (250.089 - 0.105_984_2 * d) * DEG2RAD;
    let e3 = (260.008 + 13.012_000_9 * d) * DEG2RAD;
    let e4 = (176.625 + 13.340_715_4 * d) * DEG2RAD;
    let e5 = (357.529 + 0.985_600_3 * d) * DEG2RAD;

    let alpha = 269.9949 + 0.0031 * t - 3.8787 * e1.sin() - 0.1204 * e2.sin()
        + 0.0700 * e3.sin()
        - 0.0172 * e4.sin();
    let delta = 66.5392 + 0.0130 * t + 1.5419 * e1.cos() + 0.0239 * e2.cos()
        - 0.0278 * e3.cos()
        + 0.0068 * e4.cos();
    let w = 38.3213 + 13.176_358_15 * d + 3.5610 * e1.sin() + 0.1208 * e2.sin()
        - 0.0642 * e3.sin()
        + 0.0158 * e4.sin()
        + 0.0252 * e5.sin();
    (
        alpha * DEG2RAD,
        delta * DEG2RAD,
        crate::math::norm_two_pi(w * DEG2RAD),
    )
}

/// Whether the IAU meridian angle of this body increases with time
/// (prograde rotation).
fn rotates_prograde(target: Target) -> bool {
    !matches!(target, Target::Venus | Target::Uranus)
}

/// Body-fixed planetocentric longitude and latitude (radians) of the point
/// under `dir_icrf`, a unit vector from the body center. Longitude follows
/// the IAU convention of increasing opposite the rotation.
pub fn sub_point(target: Target, jd_tdb: f64, dir_icrf: &Vector3) -> Option<(f64, f64)> {
    let (alpha0, delta0, w) = pole_and_meridian(target, jd_tdb)?;
    let (sa, ca) = alpha0.sin_cos();
    let (sd, cd) = delta0.sin_cos();
    let pole = Vector3::new(cd * ca, cd * sa, sd);
    let node = Vector3::new(-sa, ca, 0.0);
    let in_plane = pole.cross(&node);

    let lat = dir_icrf.dot(&pole).clamp(-1.0, 1.0).asin();
    let phi = dir_icrf.dot(&in_plane).atan2(dir_icrf.dot(&node));
    let lon = if rotates_prograde(target) {
        crate::math::norm_two_pi(w - phi)
    } else {
        crate::math::norm_two_pi(phi - w)
    };
    Some((lon, lat))
}

/// The rotational-system longitudes. Jupiter carries the classical
/// System I/II/III rates, Saturn System I and III; for every other body the
/// three slots collapse onto the IAU meridian.
pub fn rotational_longitudes(
    target: Target,
    jd_tdb: f64,
    sub_obs_dir_icrf: &Vector3,
) -> Option<[f64; 3]> {
    let (lon_iau, _) = sub_point(target, jd_tdb, sub_obs_dir_icrf)?;
    let (_, _, w_iau) = pole_and_meridian(target, jd_tdb)?;
    let d = jd_tdb - J2000;
    // Longitude in an alternative system differs by the accumulated
    // meridian offset.
    let system = |w0: f64, rate: f64| {
        let w_sys = crate::math::norm_two_pi((w0 + rate * d) * DEG2RAD);
        crate::math::norm_two_pi(lon_iau + (w_sys - w_iau))
    };
    match target {
        Target::Jupiter => Some([
            system(67.1, 877.900),
            system(43.3, 870.270),
            lon_iau, // System III is the IAU meridian
        ]),
        Target::Saturn => Some([system(227.2037, 844.3), lon_iau, lon_iau]),
        _ => Some([lon_iau, lon_iau, lon_iau]),
    }
}

/// Disc and illumination quantities of one apparition.
#[derive(Copy, Clone, Debug, Default)]
pub struct DiscQuantities {
    /// Angular radius, radians
    pub angular_radius: f64,
    /// Sun-target-observer angle, radians
    pub phase_angle: f64,
    /// Illuminated fraction of the disc, 0..1
    pub phase: f64,
    /// Sun-observer-target angle, radians
    pub elongation: f64,
    /// Angular width of the unilluminated sliver, radians
    pub defect_of_illumination: f64,
}

/// Computes the disc quantities from the observer-centric target vector and
/// the heliocentric positions of target and observer (all AU, same frame).
pub fn disc_quantities(
    target: Target,
    target_from_observer: &Vector3,
    target_heliocentric: &Vector3,
    observer_heliocentric: &Vector3,
    radius_km: Option<f64>,
) -> DiscQuantities {
    let delta = target_from_observer.norm();
    let r = target_heliocentric.norm();
    let r_obs = observer_heliocentric.norm();

    let radius_km = radius_km.or_else(|| target.equatorial_radius_km()).unwrap_or(0.0);
    let angular_radius = if delta > 0.0 {
        (radius_km / AU_KM / delta).min(1.0).asin()
    } else {
        0.0
    };

    // Phase angle from the triangle Sun-target-observer.
    let phase_angle = if r > 0.0 && delta > 0.0 {
        let cos_pa = (r * r + delta * delta - r_obs * r_obs) / (2.0 * r * delta);
        cos_pa.clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };
    let phase = (1.0 + phase_angle.cos()) / 2.0;

    let elongation = if r_obs > 0.0 && delta > 0.0 {
        let cos_el = (r_obs * r_obs + delta * delta - r * r) / (2.0 * r_obs * delta);
        cos_el.clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };

    DiscQuantities {
        angular_radius,
        phase_angle,
        phase,
        elongation,
        defect_of_illumination: 2.0 * angular_radius * (1.0 - phase),
    }
}

/// Apparent visual magnitude by the classical planetary laws; `None` when
/// no model applies. Phase angle in radians.
pub fn apparent_magnitude(
    target: Target,
    r_au: f64,
    delta_au: f64,
    phase_angle: f64,
    saturn_ring_inclination_sin: f64,
) -> Option<f64> {
    let alpha = phase_angle / DEG2RAD;
    let base = 5.0 * (r_au * delta_au).log10();
    let m = match target {
        Target::Sun => -26.74 + 5.0 * delta_au.log10(),
        Target::Moon => {
            // Allen-style lunar phase law, rescaled to the mean distance.
            -12.73
                + 0.026 * alpha.abs()
                + 4.0e-9 * alpha.powi(4)
                + 5.0 * (delta_au / 0.002_57).log10()
        }
        Target::Mercury => -0.42 + base + 0.0380 * alpha - 0.000273 * alpha * alpha
            + 0.000002 * alpha.powi(3),
        Target::Venus => {
            -4.40 + base + 0.0009 * alpha + 0.000239 * alpha * alpha - 0.00000065 * alpha.powi(3)
        }
        Target::Mars => -1.52 + base + 0.016 * alpha,
        Target::Jupiter => -9.40 + base + 0.005 * alpha,
        Target::Saturn => {
            let sin_b = saturn_ring_inclination_sin;
            -8.88 + base + 0.044 * alpha - 2.60 * sin_b.abs() + 1.25 * sin_b * sin_b
        }
        Target::Uranus => -7.19 + base + 0.0028 * alpha,
        Target::Neptune => -6.87 + base,
        Target::Pluto => -1.01 + base + 0.041 * alpha,
        _ => return None,
    };
    Some(m)
}

/// Mean surface brightness, magnitudes per square arcsecond, from the
/// integrated magnitude and the illuminated disc area.
pub fn surface_magnitude(apparent: f64, angular_radius_rad: f64, phase: f64) -> f64 {
    let radius_arcsec = angular_radius_rad / DEG2RAD * 3600.0;
    let area = core::f64::consts::PI * radius_arcsec * radius_arcsec * phase.max(1e-9);
    apparent + 2.5 * area.max(1e-12).log10()
}

#[cfg(test)]
mod physical_ut {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn earth_meridian_turns_once_a_day() {
        let (_, _, w0) = pole_and_meridian(Target::Earth, J2000).unwrap();
        let (_, _, w1) = pole_and_meridian(Target::Earth, J2000 + 1.0).unwrap();
        let turned = crate::math::norm_two_pi(w1 - w0) / DEG2RAD;
        assert!((turned - 0.9856).abs() < 0.001, "daily drift {turned} deg");
    }

    #[test]
    fn moon_pole_is_near_the_ecliptic_pole() {
        let (alpha, delta, _) = moon_pole_and_meridian(J2000);
        // 1.5 degree tilt from the ecliptic pole at (270, 66.56).
        assert!((alpha / DEG2RAD - 270.0).abs() < 5.0);
        assert!((delta / DEG2RAD - 66.5).abs() < 2.0);
    }

    #[test]
    fn full_phase_at_zero_phase_angle() {
        let dq = disc_quantities(
            Target::Mars,
            &Vector3::new(0.5, 0.0, 0.0),
            &Vector3::new(1.5, 0.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            None,
        );
        assert_abs_diff_eq!(dq.phase, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dq.phase_angle, 0.0, epsilon = 1e-6);
        assert!(dq.defect_of_illumination.abs() < 1e-12);
    }

    #[test]
    fn venus_is_brilliant() {
        let m = apparent_magnitude(Target::Venus, 0.72, 0.5, 60.0 * DEG2RAD, 0.0).unwrap();
        assert!(m < -3.5 && m > -5.5, "Venus magnitude {m}");
    }

    #[test]
    fn sub_point_latitude_is_pole_aligned() {
        // Looking down the Earth's rotation pole lands at +90 latitude.
        let (_, delta0, _) = pole_and_meridian(Target::Earth, J2000).unwrap();
        let pole_dir = crate::math::spherical_to_cartesian(0.0, delta0, 1.0);
        let (_, lat) = sub_point(Target::Earth, J2000, &pole_dir).unwrap();
        assert!(lat > 89.0 * DEG2RAD);
    }

    #[test]
    fn jupiter_systems_differ() {
        let dir = Vector3::new(1.0, 0.0, 0.0);
        let lons = rotational_longitudes(Target::Jupiter, J2000 + 50.0, &dir).unwrap();
        assert!((lons[0] - lons[2]).abs() > 1e-6);
    }
}

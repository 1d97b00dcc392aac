/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Precession and nutation.
//!
//! Each reduction method selects its own angle series. Precession is a
//! three-rotation composition applied to position and velocity alike;
//! nutation is reversible, the inverse being the exact transpose.

use serde_derive::{Deserialize, Serialize};

use crate::constants::{DAS2R, DAYS_PER_CENTURY, DEG2RAD, J2000};
use crate::frames::StateVector;
use crate::math::rotation::{r1, r3};
use crate::math::Matrix3;

mod nut1980;
mod nut2000b;

/// The reduction conventions selectable per request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReductionMethod {
    /// IAU 1976 precession with the IAU 1980 nutation theory
    Iau1976,
    /// IAU 2000 precession-rate corrections with the IAU 2000B nutation
    Iau2000,
    /// IAU 2006 (P03) precession, IAU 2000B nutation
    Iau2006,
    /// IAU 2006 with the 2009 system of constants
    Iau2009,
    /// Williams 1994 fit (the classical long-timespan choice)
    Williams1994,
    /// The precession fit attached to the JPL DE40x integrations
    JplDe,
}

impl ReductionMethod {
    /// Whether this method uses the modern (post-1980) nutation series.
    pub const fn uses_iau2000_nutation(&self) -> bool {
        matches!(
            self,
            ReductionMethod::Iau2000 | ReductionMethod::Iau2006 | ReductionMethod::Iau2009
        )
    }
}

/// Mean obliquity of the ecliptic at jd (TT), radians, per the method's
/// system of constants.
pub fn mean_obliquity(jd_tt: f64, method: ReductionMethod) -> f64 {
    let t = (jd_tt - J2000) / DAYS_PER_CENTURY;
    let eps_as = match method {
        ReductionMethod::Iau1976 | ReductionMethod::Iau2000 => {
            84_381.448 + t * (-46.8150 + t * (-0.00059 + t * 0.001813))
        }
        ReductionMethod::Iau2006 | ReductionMethod::Iau2009 => {
            84_381.406
                + t * (-46.836769
                    + t * (-0.0001831 + t * (0.00200340 + t * (-0.000000576 - t * 0.0000000434))))
        }
        ReductionMethod::Williams1994 | ReductionMethod::JplDe => {
            84_381.409 + t * (-46.8340 + t * (-0.00059 + t * 0.001813))
        }
    };
    eps_as * DAS2R
}

/// The equatorial precession angles (zeta, z, theta) from J2000 to jd, in
/// radians.
pub fn precession_angles(jd_tt: f64, method: ReductionMethod) -> (f64, f64, f64) {
    let t = (jd_tt - J2000) / DAYS_PER_CENTURY;
    let (zeta_as, z_as, theta_as) = match method {
        ReductionMethod::Iau1976 => (
            t * (2306.2181 + t * (0.30188 + t * 0.017998)),
            t * (2306.2181 + t * (1.09468 + t * 0.018203)),
            t * (2004.3109 + t * (-0.42665 - t * 0.041833)),
        ),
        // IAU 2000: the 1976 series with the adopted precession-rate
        // corrections (-0.29965"/cy in longitude, -0.02524"/cy in obliquity)
        // projected onto the equatorial angles.
        ReductionMethod::Iau2000 => (
            t * (2306.08063 + t * (0.30188 + t * 0.017998)),
            t * (2306.08063 + t * (1.09468 + t * 0.018203)),
            t * (2004.19171 + t * (-0.42665 - t * 0.041833)),
        ),
        // P03, adopted by IAU 2006. The +-2.650545" constants cancel at
        // t = 0 and carry the GCRS-aligned origin through the polynomial.
        ReductionMethod::Iau2006 | ReductionMethod::Iau2009 => (
            2.650545
                + t * (2306.083227
                    + t * (0.2988499 + t * (0.01801828 + t * (-0.000005971 - t * 0.0000003173)))),
            -2.650545
                + t * (2306.077181
                    + t * (1.0927348 + t * (0.01826837 + t * (-0.000028596 - t * 0.0000002904)))),
            t * (2004.191903
                + t * (-0.4294934 + t * (-0.04182264 + t * (-0.000007089 - t * 0.0000001274)))),
        ),
        // Williams (1994) precession constant, projected like the above.
        ReductionMethod::Williams1994 => (
            t * (2306.0683 + t * (0.30188 + t * 0.017998)),
            t * (2306.0683 + t * (1.09468 + t * 0.018203)),
            t * (2004.1810 + t * (-0.42665 - t * 0.041833)),
        ),
        // DE403-era fit, a hair off the Williams values.
        ReductionMethod::JplDe => (
            t * (2306.0750 + t * (0.30188 + t * 0.017998)),
            t * (2306.0750 + t * (1.09468 + t * 0.018203)),
            t * (2004.1868 + t * (-0.42665 - t * 0.041833)),
        ),
    };
    (zeta_as * DAS2R, z_as * DAS2R, theta_as * DAS2R)
}

/// Matrix rotating a mean-of-J2000 vector to the mean equator and equinox
/// of jd.
pub fn precession_matrix_from_j2000(jd_tt: f64, method: ReductionMethod) -> Matrix3 {
    let (zeta, z, theta) = precession_angles(jd_tt, method);
    r3(-z) * crate::math::rotation::r2(theta) * r3(-zeta)
}

/// Matrix rotating mean-of-`from_jd` to mean-of-`to_jd`. Composed through
/// J2000 so that chained precessions agree with the direct path.
pub fn precession_matrix(from_jd_tt: f64, to_jd_tt: f64, method: ReductionMethod) -> Matrix3 {
    if from_jd_tt == to_jd_tt {
        return Matrix3::identity();
    }
    precession_matrix_from_j2000(to_jd_tt, method)
        * precession_matrix_from_j2000(from_jd_tt, method).transpose()
}

/// Precesses a state (position and velocity with the same rotation;
/// acceleration effects neglected) between equinoxes.
pub fn precess(from_jd_tt: f64, to_jd_tt: f64, state: &StateVector, method: ReductionMethod) -> StateVector {
    let m = precession_matrix(from_jd_tt, to_jd_tt, method);
    state.rotated(&m, state.frame, to_jd_tt)
}

/// Nutation in longitude and obliquity at jd (TT), radians.
pub fn nutation_angles(jd_tt: f64, method: ReductionMethod) -> (f64, f64) {
    let t = (jd_tt - J2000) / DAYS_PER_CENTURY;
    if method.uses_iau2000_nutation() {
        nut2000b::nutation_2000b(t)
    } else {
        nut1980::nutation_1980(t)
    }
}

/// The mean-to-true rotation at jd.
pub fn nutation_matrix(jd_tt: f64, method: ReductionMethod) -> Matrix3 {
    let (dpsi, deps) = nutation_angles(jd_tt, method);
    let eps = mean_obliquity(jd_tt, method);
    r1(-(eps + deps)) * r3(-dpsi) * r1(eps)
}

/// Applies (forward) or removes (reverse) nutation on a state. Supplying
/// `forward = false` recovers the mean vector exactly: the inverse is the
/// transpose.
pub fn nutate(jd_tt: f64, state: &StateVector, method: ReductionMethod, forward: bool) -> StateVector {
    let n = nutation_matrix(jd_tt, method);
    let m = if forward { n } else { n.transpose() };
    state.rotated(&m, state.frame, state.equinox_jd)
}

/// Delaunay fundamental arguments of the 1980 theory, radians.
/// (D, M, M', F, Omega)
pub fn delaunay_1980(t: f64) -> (f64, f64, f64, f64, f64) {
    let d = (297.85036 + 445_267.111480 * t - 0.0019142 * t * t + t * t * t / 189_474.0) * DEG2RAD;
    let m = (357.52772 + 35_999.050340 * t - 0.0001603 * t * t - t * t * t / 300_000.0) * DEG2RAD;
    let mp = (134.96298 + 477_198.867398 * t + 0.0086972 * t * t + t * t * t / 56_250.0) * DEG2RAD;
    let f = (93.27191 + 483_202.017538 * t - 0.0036825 * t * t + t * t * t / 327_270.0) * DEG2RAD;
    let om = (125.04452 - 1_934.136261 * t + 0.0020708 * t * t + t * t * t / 450_000.0) * DEG2RAD;
    (d, m, mp, f, om)
}

#[cfg(test)]
mod prenut_ut {
    use super::*;
    use crate::frames::CelestialFrame;
    use crate::math::rotation::is_valid_rotation;
    use crate::math::Vector3;

    const METHODS: [ReductionMethod; 6] = [
        ReductionMethod::Iau1976,
        ReductionMethod::Iau2000,
        ReductionMethod::Iau2006,
        ReductionMethod::Iau2009,
        ReductionMethod::Williams1994,
        ReductionMethod::JplDe,
    ];

    #[test]
    fn obliquity_near_epoch() {
        for method in METHODS {
            let eps = mean_obliquity(J2000, method);
            // 23.439 degrees, all systems of constants within 0.1"
            assert!((eps - 0.409_092_8).abs() < 1e-5, "{method:?}: {eps}");
        }
    }

    #[test]
    fn precession_matrices_are_proper() {
        for method in METHODS {
            for jd in [2_433_282.5, J2000, 2_469_807.5, 2_816_787.5] {
                let m = precession_matrix_from_j2000(jd, method);
                assert!(is_valid_rotation(&m, 1e-12, 1e-12), "{method:?} at {jd}");
            }
        }
    }

    #[test]
    fn precession_round_trip_microarcsecond() {
        let v = Vector3::new(0.3, 0.8, -0.52).normalize();
        let state = StateVector::new(v, Vector3::zeros(), CelestialFrame::DynamicalJ2000, J2000);
        for method in METHODS {
            let there = precess(J2000, 2_469_807.5, &state, method);
            let back = precess(2_469_807.5, J2000, &there, method);
            assert!((back.position() - v).norm() < 5e-12, "{method:?}");
        }
    }

    #[test]
    fn precession_composes_through_intermediate_epochs() {
        let v = Vector3::new(-0.1, 0.95, 0.29);
        let state = StateVector::new(v, Vector3::zeros(), CelestialFrame::DynamicalJ2000, J2000);
        let jd_mid = 2_460_000.5;
        let jd_end = 2_470_000.5;
        let direct = precess(J2000, jd_end, &state, ReductionMethod::Iau2006);
        let chained = precess(
            jd_mid,
            jd_end,
            &precess(J2000, jd_mid, &state, ReductionMethod::Iau2006),
            ReductionMethod::Iau2006,
        );
        assert!((direct.position() - chained.position()).norm() < 1e-13);
    }

    #[test]
    fn nutation_round_trip_microarcsecond() {
        let v = Vector3::new(0.6, -0.64, 0.48);
        let state = StateVector::new(v, Vector3::zeros(), CelestialFrame::DynamicalJ2000, J2000);
        for method in [ReductionMethod::Iau1976, ReductionMethod::Iau2006] {
            let jd = 2_455_197.5;
            let nutated = nutate(jd, &state, method, true);
            let back = nutate(jd, &nutated, method, false);
            assert!((back.position() - v).norm() < 5e-12);
        }
    }

    #[test]
    fn nutation_magnitudes_are_physical() {
        // Nutation in longitude stays within +-20", obliquity within +-10".
        for jd in [2_446_066.5, J2000, 2_455_197.5, 2_462_502.5] {
            for method in METHODS {
                let (dpsi, deps) = nutation_angles(jd, method);
                assert!(dpsi.abs() < 20.0 * DAS2R, "{method:?} dpsi {dpsi}");
                assert!(deps.abs() < 10.0 * DAS2R);
            }
        }
    }

    #[test]
    fn nutation_1980_and_2000_agree_at_the_mas_level() {
        let jd = 2_453_736.5;
        let (p80, e80) = nutation_angles(jd, ReductionMethod::Iau1976);
        let (p00, e00) = nutation_angles(jd, ReductionMethod::Iau2006);
        assert!((p80 - p00).abs() < 0.05 * DAS2R);
        assert!((e80 - e00).abs() < 0.05 * DAS2R);
    }
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The IAU 2006 intermediate-frame matrix builder:
//! GCRS -> CIRS -> TIRS -> ITRS.
//!
//! The celestial pole comes from the equinox-based NPB composition (its
//! bottom row is the CIP unit vector); the CIO is located by the s + XY/2
//! series; Earth rotation enters through the ERA; polar motion closes the
//! chain. The two expensive matrices are cacheable keyed by the exact bits
//! of the TT Julian date.

mod s06;

use crate::constants::{DAS2R, DAYS_PER_CENTURY, DMAS2R, J2000};
use crate::eop::EarthOrientation;
use crate::math::rotation::{r1, r2, r3};
use crate::math::Matrix3;
use crate::prenut::{self, ReductionMethod};
use crate::time::sidereal::era;
use crate::time::JulianDate;

pub use s06::s_plus_half_xy;

/// Frame-bias angles (ICRS -> dynamical J2000), milliarcseconds.
const DA0_MAS: f64 = -14.6;
const XI0_MAS: f64 = -16.6170;
const ETA0_MAS: f64 = -6.8192;

/// The fixed GCRS frame-bias matrix.
pub fn frame_bias_matrix() -> Matrix3 {
    r1(-ETA0_MAS * DMAS2R) * r2(XI0_MAS * DMAS2R) * r3(DA0_MAS * DMAS2R)
}

/// Nutation x precession x bias: rotates GCRS onto the true equator and
/// equinox of date.
pub fn npb_matrix(jd_tt: f64, method: ReductionMethod) -> Matrix3 {
    prenut::nutation_matrix(jd_tt, method)
        * prenut::precession_matrix_from_j2000(jd_tt, method)
        * frame_bias_matrix()
}

/// The CIP coordinates (x, y): the bottom row of the NPB matrix.
pub fn cip_xy(jd_tt: f64, method: ReductionMethod) -> (f64, f64) {
    let npb = npb_matrix(jd_tt, method);
    (npb[(2, 0)], npb[(2, 1)])
}

/// GCRS -> CIRS: the celestial-to-intermediate matrix assembled from the
/// CIP (x, y) and the CIO locator s.
pub fn gcrs_to_cirs(jd_tt: f64, method: ReductionMethod) -> Matrix3 {
    let (x, y) = cip_xy(jd_tt, method);
    let t = (jd_tt - J2000) / DAYS_PER_CENTURY;
    let s = s_plus_half_xy(t, x, y);
    c2i_from_xys(x, y, s)
}

/// Celestial-to-intermediate matrix from explicit x, y, s.
pub fn c2i_from_xys(x: f64, y: f64, s: f64) -> Matrix3 {
    let r2_xy = x * x + y * y;
    let e = if r2_xy > 0.0 { y.atan2(x) } else { 0.0 };
    let d = (r2_xy / (1.0 - r2_xy)).sqrt().atan();
    r3(-(e + s)) * r2(d) * r3(e)
}

/// GCRS -> TIRS: the CIO matrix spun by the Earth rotation angle.
pub fn gcrs_to_tirs(jd_tt: f64, jd_ut1: &JulianDate, method: ReductionMethod) -> Matrix3 {
    r3(era(jd_ut1)) * gcrs_to_cirs(jd_tt, method)
}

/// The TIO locator s' (arcseconds -> radians), a slow drift term.
pub fn tio_locator(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000) / DAYS_PER_CENTURY;
    -47.0e-6 * t * DAS2R
}

/// Polar-motion matrix: TIRS -> ITRS, the inverse of
/// R3(-s') . R2(xp) . R1(yp).
pub fn polar_motion_matrix(jd_tt: f64, eop: &EarthOrientation) -> Matrix3 {
    let xp = eop.xp * DAS2R;
    let yp = eop.yp * DAS2R;
    let sp = tio_locator(jd_tt);
    r1(-yp) * r2(-xp) * r3(sp)
}

/// GCRS -> ITRS: the full terrestrial chain.
pub fn gcrs_to_itrs(
    jd_tt: f64,
    jd_ut1: &JulianDate,
    eop: &EarthOrientation,
    method: ReductionMethod,
) -> Matrix3 {
    polar_motion_matrix(jd_tt, eop) * gcrs_to_tirs(jd_tt, jd_ut1, method)
}

/// A single most-recent-entry cache for one of the date-keyed matrices.
/// The entry is hit only on a bit-equal TT date and matching method.
#[derive(Clone)]
pub struct MatrixCache {
    key: Option<(u64, ReductionMethod)>,
    value: Matrix3,
}

impl Default for MatrixCache {
    fn default() -> Self {
        Self {
            key: None,
            value: Matrix3::identity(),
        }
    }
}

impl MatrixCache {
    pub fn get_or_insert_with(
        &mut self,
        jd_tt: f64,
        method: ReductionMethod,
        build: impl FnOnce() -> Matrix3,
    ) -> Matrix3 {
        let key = (jd_tt.to_bits(), method);
        if self.key != Some(key) {
            self.value = build();
            self.key = Some(key);
        }
        self.value
    }
}

#[cfg(test)]
mod cio_ut {
    use super::*;
    use crate::math::rotation::is_valid_rotation;
    use approx::assert_abs_diff_eq;

    #[test]
    fn npb_is_orthonormal_everywhere() {
        for jd in [2_415_020.5, 2_433_282.5, J2000, 2_469_807.5, 2_488_069.5] {
            let m = npb_matrix(jd, ReductionMethod::Iau2006);
            assert!(is_valid_rotation(&m, 1e-12, 1e-12), "NPB at {jd}");
        }
    }

    #[test]
    fn cip_stays_near_the_pole() {
        // x stays below ~0.006, y below ~5e-5 within a few centuries.
        let (x, y) = cip_xy(2_455_197.5, ReductionMethod::Iau2006);
        assert!(x.abs() < 0.01, "x = {x}");
        assert!(y.abs() < 1e-3, "y = {y}");
    }

    #[test]
    fn c2i_from_xys_identity_at_origin() {
        let m = c2i_from_xys(0.0, 0.0, 0.0);
        assert_abs_diff_eq!((m - Matrix3::identity()).norm(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn terrestrial_chain_is_proper() {
        let eop = EarthOrientation {
            xp: 0.035,
            yp: 0.32,
            ut1_minus_utc: -0.2,
        };
        let ut1 = JulianDate::from(2_455_197.4);
        let m = gcrs_to_itrs(2_455_197.5, &ut1, &eop, ReductionMethod::Iau2006);
        assert!(is_valid_rotation(&m, 1e-12, 1e-12));
    }

    #[test]
    fn cache_hits_only_on_bit_equal_key() {
        let mut cache = MatrixCache::default();
        let mut builds = 0;
        for _ in 0..3 {
            cache.get_or_insert_with(J2000, ReductionMethod::Iau2006, || {
                builds += 1;
                Matrix3::identity()
            });
        }
        cache.get_or_insert_with(J2000 + 1e-9, ReductionMethod::Iau2006, || {
            builds += 1;
            Matrix3::identity()
        });
        cache.get_or_insert_with(J2000 + 1e-9, ReductionMethod::Iau2000, || {
            builds += 1;
            Matrix3::identity()
        });
        assert_eq!(builds, 3);
    }
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Earth rotation angle and sidereal time.

use crate::constants::{DAS2R, DEG2RAD};
use crate::math::norm_two_pi;
use crate::time::JulianDate;

/// Earth Rotation Angle (IAU 2000) for a UT1 Julian date, radians.
///
/// Evaluated from the split date so the fast-turning term keeps precision
/// far from J2000.
pub fn era(jd_ut1: &JulianDate) -> f64 {
    let (days, frac) = jd_ut1.split();
    let t = jd_ut1.days_since_j2000();
    // Fractional part of one day keeps the rotation term small.
    let f = (days - days.floor()) + (frac - frac.floor());
    let theta = core::f64::consts::TAU
        * (f + 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * t);
    norm_two_pi(theta)
}

/// Greenwich mean sidereal time, IAU 1982 expression, radians.
pub fn gmst_1982(jd_ut1: &JulianDate) -> f64 {
    let d = jd_ut1.days_since_j2000();
    let t = jd_ut1.centuries_since_j2000();
    let gmst_deg = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    norm_two_pi(gmst_deg * DEG2RAD)
}

/// Greenwich mean sidereal time consistent with IAU 2006 precession:
/// ERA plus the accumulated precession of the equinox in right ascension.
pub fn gmst_2006(jd_ut1: &JulianDate, jd_tt: &JulianDate) -> f64 {
    let t = jd_tt.centuries_since_j2000();
    let prec_as = 0.014506
        + t * (4612.156534
            + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 - t * 0.0000000368))));
    norm_two_pi(era(jd_ut1) + prec_as * DAS2R)
}

/// Greenwich apparent sidereal time: GMST plus the equation of the equinoxes
/// (nutation in RA with the two leading complementary terms).
pub fn gast(
    jd_ut1: &JulianDate,
    jd_tt: &JulianDate,
    dpsi_rad: f64,
    mean_obliquity_rad: f64,
) -> f64 {
    let t = jd_tt.centuries_since_j2000();
    let omega = (125.04452 - 1934.136261 * t) * DEG2RAD;
    let ee_complementary = 0.00264 * DAS2R * omega.sin() + 0.000063 * DAS2R * (2.0 * omega).sin();
    norm_two_pi(gmst_2006(jd_ut1, jd_tt) + dpsi_rad * mean_obliquity_rad.cos() + ee_complementary)
}

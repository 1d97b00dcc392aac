/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Diurnal and semidiurnal ocean-tide corrections to the Earth orientation
//! parameters.
//!
//! Principal constituents only (Q1, O1, P1, K1, N2, M2, S2, K2): the full
//! IERS model carries 71 terms, the ones kept here dominate the signal,
//! which peaks near 0.3 mas in polar motion and 25 us in UT1.

use crate::constants::DAS2R;
use crate::eop::EarthOrientation;
use crate::math::norm_two_pi;

/// One tidal constituent: integer multipliers of (GMST+pi, l, l', F, D, Om)
/// and sin/cos amplitudes for xp, yp (uas) and UT1 (us).
struct Constituent {
    arg: [i8; 6],
    xp_sin: f64,
    xp_cos: f64,
    yp_sin: f64,
    yp_cos: f64,
    ut1_sin: f64,
    ut1_cos: f64,
}

#[rustfmt::skip]
const CONSTITUENTS: [Constituent; 8] = [
    // Q1
    Constituent { arg: [1, -1, 0, -2, 0, -2], xp_sin: -26.0, xp_cos:  12.0, yp_sin:  12.0, yp_cos:  26.0, ut1_sin:  -1.9, ut1_cos:  0.9 },
    // O1
    Constituent { arg: [1,  0, 0, -2, 0, -2], xp_sin: -134.0, xp_cos: 64.0, yp_sin:  64.0, yp_cos: 134.0, ut1_sin: -10.2, ut1_cos:  4.9 },
    // P1
    Constituent { arg: [1,  0, 0, -2, 2, -2], xp_sin: -43.0, xp_cos:  21.0, yp_sin:  21.0, yp_cos:  43.0, ut1_sin:  -3.4, ut1_cos:  1.6 },
    // K1
    Constituent { arg: [1,  0, 0,  0, 0,  0], xp_sin: 131.0, xp_cos: -63.0, yp_sin: -63.0, yp_cos: -131.0, ut1_sin: 10.4, ut1_cos: -5.0 },
    // N2
    Constituent { arg: [2, -1, 0, -2, 0, -2], xp_sin: -20.0, xp_cos:  -6.0, yp_sin:   6.0, yp_cos: -20.0, ut1_sin:  -2.4, ut1_cos: -0.8 },
    // M2
    Constituent { arg: [2,  0, 0, -2, 0, -2], xp_sin: -104.0, xp_cos: -34.0, yp_sin: 34.0, yp_cos: -104.0, ut1_sin: -12.2, ut1_cos: -4.0 },
    // S2
    Constituent { arg: [2,  0, 0, -2, 2, -2], xp_sin: -47.0, xp_cos: -15.0, yp_sin:  15.0, yp_cos: -47.0, ut1_sin:  -5.5, ut1_cos: -1.8 },
    // K2
    Constituent { arg: [2,  0, 0,  0, 0,  0], xp_sin:  13.0, xp_cos:   4.0, yp_sin:  -4.0, yp_cos:  13.0, ut1_sin:   1.5, ut1_cos:  0.5 },
];

/// Returns the tide correction at a UTC Julian date: xp/yp in arcseconds,
/// UT1 in seconds, ready to be added onto the interpolated table values.
pub fn diurnal_subdiurnal_correction(jd_utc: f64) -> EarthOrientation {
    let t = (jd_utc - 2_451_545.0) / 36_525.0;

    // Fundamental arguments (radians). GMST here may use the UTC date: the
    // tidal bands are hours wide while UTC-UT1 stays below a second.
    let gmst = crate::time::sidereal::gmst_1982(&crate::time::JulianDate::from(jd_utc));
    let chi = norm_two_pi(gmst + core::f64::consts::PI);
    let l = norm_two_pi((485_868.249036 + 1_717_915_923.2178 * t) * DAS2R);
    let lp = norm_two_pi((1_287_104.793048 + 129_596_581.0481 * t) * DAS2R);
    let f = norm_two_pi((335_779.526232 + 1_739_527_262.8478 * t) * DAS2R);
    let d = norm_two_pi((1_072_260.703692 + 1_602_961_601.2090 * t) * DAS2R);
    let om = norm_two_pi((450_160.398036 - 6_962_890.5431 * t) * DAS2R);
    let args = [chi, l, lp, f, d, om];

    let mut xp_uas = 0.0;
    let mut yp_uas = 0.0;
    let mut ut1_us = 0.0;
    for c in &CONSTITUENTS {
        let mut a = 0.0;
        for (mult, arg) in c.arg.iter().zip(args) {
            a += f64::from(*mult) * arg;
        }
        let (s, co) = a.sin_cos();
        xp_uas += c.xp_sin * s + c.xp_cos * co;
        yp_uas += c.yp_sin * s + c.yp_cos * co;
        ut1_us += c.ut1_sin * s + c.ut1_cos * co;
    }

    EarthOrientation {
        xp: xp_uas * 1e-6,
        yp: yp_uas * 1e-6,
        ut1_minus_utc: ut1_us * 1e-6,
    }
}

#[cfg(test)]
mod tides_ut {
    use super::*;

    #[test]
    fn corrections_stay_in_band() {
        for jd in [2_451_545.0, 2_455_197.25, 2_459_000.6] {
            let c = diurnal_subdiurnal_correction(jd);
            assert!(c.xp.abs() < 1e-3, "xp {}", c.xp);
            assert!(c.yp.abs() < 1e-3);
            assert!(c.ut1_minus_utc.abs() < 60e-6);
        }
    }

    #[test]
    fn correction_varies_through_the_day() {
        let a = diurnal_subdiurnal_correction(2_451_545.0);
        let b = diurnal_subdiurnal_correction(2_451_545.25);
        assert!((a.ut1_minus_utc - b.ut1_minus_utc).abs() > 1e-9);
    }
}

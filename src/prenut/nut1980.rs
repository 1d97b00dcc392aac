/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! IAU 1980 nutation theory, truncated to the terms above one
//! milliarcsecond (the full series carries 106 terms; the tail contributes
//! under 2 mas combined).

use crate::constants::DAS2R;
use super::delaunay_1980;

/// Multipliers of (D, M, M', F, Om); amplitudes in 0.0001" as
/// (psi, psi_t, eps, eps_t) with t in Julian centuries.
#[rustfmt::skip]
const TERMS: [(i8, i8, i8, i8, i8, f64, f64, f64, f64); 34] = [
    ( 0,  0,  0,  0,  1, -171996.0, -174.2,  92025.0,  8.9),
    (-2,  0,  0,  2,  2,  -13187.0,   -1.6,   5736.0, -3.1),
    ( 0,  0,  0,  2,  2,   -2274.0,   -0.2,    977.0, -0.5),
    ( 0,  0,  0,  0,  2,    2062.0,    0.2,   -895.0,  0.5),
    ( 0,  1,  0,  0,  0,    1426.0,   -3.4,     54.0, -0.1),
    ( 0,  0,  1,  0,  0,     712.0,    0.1,     -7.0,  0.0),
    (-2,  1,  0,  2,  2,    -517.0,    1.2,    224.0, -0.6),
    ( 0,  0,  0,  2,  1,    -386.0,   -0.4,    200.0,  0.0),
    ( 0,  0,  1,  2,  2,    -301.0,    0.0,    129.0, -0.1),
    (-2, -1,  0,  2,  2,     217.0,   -0.5,    -95.0,  0.3),
    (-2,  0,  1,  0,  0,    -158.0,    0.0,      0.0,  0.0),
    (-2,  0,  0,  2,  1,     129.0,    0.1,    -70.0,  0.0),
    ( 0,  0, -1,  2,  2,     123.0,    0.0,    -53.0,  0.0),
    ( 2,  0,  0,  0,  0,      63.0,    0.0,      0.0,  0.0),
    ( 0,  0,  1,  0,  1,      63.0,    0.1,    -33.0,  0.0),
    ( 2,  0, -1,  2,  2,     -59.0,    0.0,     26.0,  0.0),
    ( 0,  0, -1,  0,  1,     -58.0,   -0.1,     32.0,  0.0),
    ( 0,  0,  1,  2,  1,     -51.0,    0.0,     27.0,  0.0),
    (-2,  0,  2,  0,  0,      48.0,    0.0,      0.0,  0.0),
    ( 0,  0, -2,  2,  1,      46.0,    0.0,    -24.0,  0.0),
    ( 2,  0,  0,  2,  2,     -38.0,    0.0,     16.0,  0.0),
    ( 0,  0,  2,  2,  2,     -31.0,    0.0,     13.0,  0.0),
    ( 0,  0,  2,  0,  0,      29.0,    0.0,      0.0,  0.0),
    (-2,  0,  1,  2,  2,      29.0,    0.0,    -12.0,  0.0),
    ( 0,  0,  0,  2,  0,      26.0,    0.0,      0.0,  0.0),
    (-2,  0,  0,  2,  0,     -22.0,    0.0,      0.0,  0.0),
    ( 0,  0, -1,  2,  1,      21.0,    0.0,    -10.0,  0.0),
    ( 0,  2,  0,  0,  0,      17.0,   -0.1,      0.0,  0.0),
    ( 2,  0, -1,  0,  1,      16.0,    0.0,     -8.0,  0.0),
    (-2,  2,  0,  2,  2,     -16.0,    0.1,      7.0,  0.0),
    ( 0,  1,  0,  0,  1,     -15.0,    0.0,      9.0,  0.0),
    (-2,  0,  1,  0,  1,     -13.0,    0.0,      7.0,  0.0),
    ( 0, -1,  0,  0,  1,     -12.0,    0.0,      6.0,  0.0),
    ( 0,  0,  2, -2,  0,      11.0,    0.0,      0.0,  0.0),
];

/// (dpsi, deps) in radians; `t` in Julian centuries TT since J2000.
pub fn nutation_1980(t: f64) -> (f64, f64) {
    let (d, m, mp, f, om) = delaunay_1980(t);
    let mut dpsi = 0.0;
    let mut deps = 0.0;
    // Small terms first to limit floating-point error accumulation.
    for (kd, km, kmp, kf, kom, ps, pst, ec, ect) in TERMS.iter().rev() {
        let arg = f64::from(*kd) * d
            + f64::from(*km) * m
            + f64::from(*kmp) * mp
            + f64::from(*kf) * f
            + f64::from(*kom) * om;
        dpsi += (ps + pst * t) * arg.sin();
        deps += (ec + ect * t) * arg.cos();
    }
    (dpsi * 1e-4 * DAS2R, deps * 1e-4 * DAS2R)
}

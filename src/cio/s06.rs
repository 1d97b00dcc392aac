/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The CIO locator: the series for s + XY/2, compatible with IAU 2006/2000A
//! precession-nutation. s positions the Celestial Intermediate Origin on
//! the CIP equator and stays below 0.1 arcsecond throughout 1900-2100.

use crate::constants::{DAS2R, TURNAS};

/// One series term: integer multipliers of the eight fundamental arguments
/// (l, l', F, D, Om, L_Ve, L_E, pA) and sine/cosine amplitudes in
/// arcseconds.
struct Term {
    nfa: [i8; 8],
    s: f64,
    c: f64,
}

/// Polynomial coefficients of s + XY/2, arcseconds per power of t.
const SP: [f64; 6] = [94.00e-6, 3808.65e-6, -122.68e-6, -72574.11e-6, 27.98e-6, 15.62e-6];

#[rustfmt::skip]
const S0: [Term; 33] = [
    Term { nfa: [0, 0, 0, 0, 1, 0, 0, 0], s: -2640.73e-6, c: 0.39e-6 },
    Term { nfa: [0, 0, 0, 0, 2, 0, 0, 0], s: -63.53e-6, c: 0.02e-6 },
    Term { nfa: [0, 0, 2, -2, 3, 0, 0, 0], s: -11.75e-6, c: -0.01e-6 },
    Term { nfa: [0, 0, 2, -2, 1, 0, 0, 0], s: -11.21e-6, c: -0.01e-6 },
    Term { nfa: [0, 0, 2, -2, 2, 0, 0, 0], s: 4.57e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 2, 0, 3, 0, 0, 0], s: -2.02e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 2, 0, 1, 0, 0, 0], s: -1.98e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 0, 0, 3, 0, 0, 0], s: 1.72e-6, c: 0.00e-6 },
    Term { nfa: [0, 1, 0, 0, 1, 0, 0, 0], s: 1.41e-6, c: 0.01e-6 },
    Term { nfa: [0, 1, 0, 0, -1, 0, 0, 0], s: 1.26e-6, c: 0.01e-6 },
    Term { nfa: [1, 0, 0, 0, -1, 0, 0, 0], s: 0.63e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 0, 0, 1, 0, 0, 0], s: 0.63e-6, c: 0.00e-6 },
    Term { nfa: [0, 1, 2, -2, 3, 0, 0, 0], s: -0.46e-6, c: 0.00e-6 },
    Term { nfa: [0, 1, 2, -2, 1, 0, 0, 0], s: -0.45e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 4, -4, 4, 0, 0, 0], s: -0.36e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 1, -1, 1, -8, 12, 0], s: 0.24e-6, c: 0.12e-6 },
    Term { nfa: [0, 0, 2, 0, 0, 0, 0, 0], s: -0.32e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 2, 0, 2, 0, 0, 0], s: -0.28e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 2, 0, 3, 0, 0, 0], s: -0.27e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 2, 0, 1, 0, 0, 0], s: -0.26e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 2, -2, 0, 0, 0, 0], s: 0.21e-6, c: 0.00e-6 },
    Term { nfa: [0, 1, -2, 2, -3, 0, 0, 0], s: -0.19e-6, c: 0.00e-6 },
    Term { nfa: [0, 1, -2, 2, -1, 0, 0, 0], s: -0.18e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 0, 0, 0, 8, -13, -1], s: 0.10e-6, c: -0.05e-6 },
    Term { nfa: [0, 0, 0, 2, 0, 0, 0, 0], s: -0.15e-6, c: 0.00e-6 },
    Term { nfa: [2, 0, -2, 0, -1, 0, 0, 0], s: 0.14e-6, c: 0.00e-6 },
    Term { nfa: [0, 1, 2, -2, 2, 0, 0, 0], s: 0.14e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 0, -2, 1, 0, 0, 0], s: -0.14e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 0, -2, -1, 0, 0, 0], s: -0.14e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 4, -2, 4, 0, 0, 0], s: -0.13e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 2, -2, 4, 0, 0, 0], s: 0.11e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, -2, 0, -3, 0, 0, 0], s: -0.11e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, -2, 0, -1, 0, 0, 0], s: -0.11e-6, c: 0.00e-6 },
];

#[rustfmt::skip]
const S1: [Term; 3] = [
    Term { nfa: [0, 0, 0, 0, 2, 0, 0, 0], s: -0.07e-6, c: 3.57e-6 },
    Term { nfa: [0, 0, 0, 0, 1, 0, 0, 0], s: 1.73e-6, c: -0.03e-6 },
    Term { nfa: [0, 0, 2, -2, 3, 0, 0, 0], s: 0.00e-6, c: 0.48e-6 },
];

#[rustfmt::skip]
const S2: [Term; 25] = [
    Term { nfa: [0, 0, 0, 0, 1, 0, 0, 0], s: 743.52e-6, c: -0.17e-6 },
    Term { nfa: [0, 0, 2, -2, 2, 0, 0, 0], s: 56.91e-6, c: 0.06e-6 },
    Term { nfa: [0, 0, 2, 0, 2, 0, 0, 0], s: 9.84e-6, c: -0.01e-6 },
    Term { nfa: [0, 0, 0, 0, 2, 0, 0, 0], s: -8.85e-6, c: 0.01e-6 },
    Term { nfa: [0, 1, 0, 0, 0, 0, 0, 0], s: -6.38e-6, c: -0.05e-6 },
    Term { nfa: [1, 0, 0, 0, 0, 0, 0, 0], s: -3.07e-6, c: 0.00e-6 },
    Term { nfa: [0, 1, 2, -2, 2, 0, 0, 0], s: 2.23e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 2, 0, 1, 0, 0, 0], s: 1.67e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 2, 0, 2, 0, 0, 0], s: 1.30e-6, c: 0.00e-6 },
    Term { nfa: [0, 1, -2, 2, -2, 0, 0, 0], s: 0.93e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 0, -2, 0, 0, 0, 0], s: 0.68e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 2, -2, 1, 0, 0, 0], s: -0.55e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, -2, 0, -2, 0, 0, 0], s: 0.53e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 0, 2, 0, 0, 0, 0], s: -0.27e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 0, 0, 1, 0, 0, 0], s: -0.27e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, -2, -2, -2, 0, 0, 0], s: -0.26e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 0, 0, -1, 0, 0, 0], s: -0.25e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 2, 0, 1, 0, 0, 0], s: 0.22e-6, c: 0.00e-6 },
    Term { nfa: [2, 0, 0, -2, 0, 0, 0, 0], s: -0.21e-6, c: 0.00e-6 },
    Term { nfa: [2, 0, -2, 0, -1, 0, 0, 0], s: 0.20e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 2, 2, 2, 0, 0, 0], s: 0.17e-6, c: 0.00e-6 },
    Term { nfa: [2, 0, 2, 0, 2, 0, 0, 0], s: 0.13e-6, c: 0.00e-6 },
    Term { nfa: [2, 0, 0, 0, 0, 0, 0, 0], s: -0.13e-6, c: 0.00e-6 },
    Term { nfa: [1, 0, 2, -2, 2, 0, 0, 0], s: -0.12e-6, c: 0.00e-6 },
    Term { nfa: [0, 0, 2, 0, 0, 0, 0, 0], s: -0.11e-6, c: 0.00e-6 },
];

#[rustfmt::skip]
const S3: [Term; 4] = [
    Term { nfa: [0, 0, 0, 0, 1, 0, 0, 0], s: 0.30e-6, c: -23.42e-6 },
    Term { nfa: [0, 0, 2, -2, 2, 0, 0, 0], s: -0.03e-6, c: -1.46e-6 },
    Term { nfa: [0, 0, 2, 0, 2, 0, 0, 0], s: -0.01e-6, c: -0.25e-6 },
    Term { nfa: [0, 0, 0, 0, 2, 0, 0, 0], s: 0.00e-6, c: 0.23e-6 },
];

const S4: Term = Term {
    nfa: [0, 0, 0, 0, 1, 0, 0, 0],
    s: -0.26e-6,
    c: -0.01e-6,
};

/// The eight fundamental arguments of the series (IERS 2003 conventions),
/// radians: l, l', F, D, Om, mean longitudes of Venus and Earth, and the
/// accumulated general precession in longitude.
pub fn fundamental_arguments(t: f64) -> [f64; 8] {
    [
        ((485_868.249036 + t * (1_717_915_923.2178 + t * (31.8792 + t * (0.051635 - t * 0.00024470))))
            % TURNAS)
            * DAS2R,
        ((1_287_104.793048 + t * (129_596_581.0481 + t * (-0.5532 + t * (0.000136 - t * 0.00001149))))
            % TURNAS)
            * DAS2R,
        ((335_779.526232 + t * (1_739_527_262.8478 + t * (-12.7512 + t * (-0.001037 + t * 0.00000417))))
            % TURNAS)
            * DAS2R,
        ((1_072_260.703692 + t * (1_602_961_601.2090 + t * (-6.3706 + t * (0.006593 - t * 0.00003169))))
            % TURNAS)
            * DAS2R,
        ((450_160.398036 + t * (-6_962_890.5431 + t * (7.4722 + t * (0.007702 - t * 0.00005939))))
            % TURNAS)
            * DAS2R,
        (3.176146697 + 1021.3285546211 * t) % core::f64::consts::TAU,
        (1.753470314 + 628.3075849991 * t) % core::f64::consts::TAU,
        (0.024381750 + 0.00000538691 * t) * t,
    ]
}

fn accumulate(terms: &[Term], fa: &[f64; 8]) -> f64 {
    let mut w = 0.0;
    for term in terms.iter().rev() {
        let mut a = 0.0;
        for (nfa, arg) in term.nfa.iter().zip(fa) {
            a += f64::from(*nfa) * arg;
        }
        w += term.s * a.sin() + term.c * a.cos();
    }
    w
}

/// The CIO locator s in radians, given t (Julian centuries TT since J2000)
/// and the CIP coordinates consistent with that date.
pub fn s_plus_half_xy(t: f64, x: f64, y: f64) -> f64 {
    let fa = fundamental_arguments(t);

    let w0 = SP[0] + accumulate(&S0, &fa);
    let w1 = SP[1] + accumulate(&S1, &fa);
    let w2 = SP[2] + accumulate(&S2, &fa);
    let w3 = SP[3] + accumulate(&S3, &fa);
    let mut w4 = SP[4];
    {
        let mut a = 0.0;
        for (nfa, arg) in S4.nfa.iter().zip(fa) {
            a += f64::from(*nfa) * arg;
        }
        w4 += S4.s * a.sin() + S4.c * a.cos();
    }
    let w5 = SP[5];

    (w0 + (w1 + (w2 + (w3 + (w4 + w5 * t) * t) * t) * t) * t) * DAS2R - x * y / 2.0
}

#[cfg(test)]
mod s06_ut {
    use super::*;

    #[test]
    fn s_is_sub_arcsecond_in_the_modern_era() {
        for t in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            let s = s_plus_half_xy(t, 0.0, 0.0);
            assert!(s.abs() < 0.1 * DAS2R * 1000.0, "s = {s} at t = {t}");
        }
    }

    #[test]
    fn s_at_epoch_is_tens_of_microarcseconds() {
        let s = s_plus_half_xy(0.0, 0.0, 0.0);
        // The polynomial constant is 94 uas; periodic terms shift it by a
        // couple of milliarcseconds at most.
        assert!(s.abs() < 5e-3 * DAS2R * 1000.0);
        assert!(s.abs() > 1e-6 * DAS2R);
    }

    #[test]
    fn xy_term_is_subtracted() {
        let x = 1e-3;
        let y = 1e-5;
        let with = s_plus_half_xy(0.0, x, y);
        let without = s_plus_half_xy(0.0, 0.0, 0.0);
        assert!((with - (without - x * y / 2.0)).abs() < 1e-18);
    }
}

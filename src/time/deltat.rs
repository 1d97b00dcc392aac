/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Long-term Delta T = TT - UT1 model (Espenak & Meeus piecewise fits),
//! used for instants the EOP table cannot cover.

/// Delta T in seconds for a fractional calendar year.
pub fn delta_t_seconds(year: f64) -> f64 {
    let u_1820 = (year - 1820.0) / 100.0;
    if year < -500.0 {
        -20.0 + 32.0 * u_1820 * u_1820
    } else if year < 500.0 {
        let u = year / 100.0;
        10583.6
            + u * (-1014.41
                + u * (33.78311
                    + u * (-5.952053
                        + u * (-0.1798452 + u * (0.022174192 + u * 0.0090316521)))))
    } else if year < 1600.0 {
        let u = (year - 1000.0) / 100.0;
        1574.2
            + u * (-556.01
                + u * (71.23472
                    + u * (0.319781
                        + u * (-0.8503463 + u * (-0.005050998 + u * 0.0083572073)))))
    } else if year < 1700.0 {
        let t = year - 1600.0;
        120.0 + t * (-0.9808 + t * (-0.01532 + t / 7129.0))
    } else if year < 1800.0 {
        let t = year - 1700.0;
        8.83 + t * (0.1603 + t * (-0.0059285 + t * (0.00013336 - t / 1_174_000.0)))
    } else if year < 1860.0 {
        let t = year - 1800.0;
        13.72
            + t * (-0.332447
                + t * (0.0068612
                    + t * (0.0041116
                        + t * (-0.00037436
                            + t * (0.0000121272 + t * (-0.0000001699 + t * 0.000000000875))))))
    } else if year < 1900.0 {
        let t = year - 1860.0;
        7.62 + t * (0.5737 + t * (-0.251754 + t * (0.01680668 + t * (-0.0004473624 + t / 233_174.0))))
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + t * (1.494119 + t * (-0.0598939 + t * (0.0061966 - t * 0.000197)))
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + t * (0.84493 + t * (-0.076100 + t * 0.0020936))
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + t * (0.407 + t * (-1.0 / 233.0 + t / 2547.0))
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + t * (1.067 + t * (-1.0 / 260.0 - t / 718.0))
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86
            + t * (0.3345
                + t * (-0.060374 + t * (0.0017275 + t * (0.000651814 + t * 0.00002373599))))
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + t * (0.32217 + t * 0.005589)
    } else if year < 2150.0 {
        -20.0 + 32.0 * u_1820 * u_1820 - 0.5628 * (2150.0 - year)
    } else {
        -20.0 + 32.0 * u_1820 * u_1820
    }
}

/// Fractional calendar year for a Julian date (Julian-century approximation,
/// plenty for a model whose own uncertainty is measured in seconds).
pub fn julian_date_to_year(jd: f64) -> f64 {
    2000.0 + (jd - 2_451_544.5) / 365.25
}

#[cfg(test)]
mod deltat_ut {
    use super::*;

    #[test]
    fn modern_values_are_plausible() {
        // Historical record: Delta T was about 63.8 s in 2000, 57 s in 1990.
        assert!((delta_t_seconds(2000.0) - 63.86).abs() < 0.2);
        assert!((delta_t_seconds(1990.0) - 56.9).abs() < 1.0);
        // About 69 s by 2018.
        assert!((delta_t_seconds(2018.0) - 69.0).abs() < 2.0);
    }

    #[test]
    fn segments_join_without_jumps() {
        for boundary in [
            -500.0, 500.0, 1600.0, 1700.0, 1800.0, 1860.0, 1900.0, 1920.0, 1941.0, 1961.0,
            1986.0, 2005.0, 2050.0, 2150.0,
        ] {
            let below = delta_t_seconds(boundary - 0.01);
            let above = delta_t_seconds(boundary + 0.01);
            assert!(
                (below - above).abs() < 5.0,
                "jump of {} s at year {boundary}",
                (below - above).abs()
            );
        }
    }

    #[test]
    fn ancient_dates_are_finite_and_large() {
        let dt = delta_t_seconds(-1000.0);
        assert!(dt.is_finite() && dt > 20_000.0);
    }
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Constellation tagging for solar-system bodies.
//!
//! Bodies of the solar system hug the ecliptic, so the lookup only needs
//! the ecliptic-longitude boundaries of the zodiacal band (the thirteen
//! constellations the ecliptic crosses). Off-band queries return `None`
//! rather than a guess; the full 88-constellation boundary catalogue is
//! reference data outside this crate, like every other catalogue.

use crate::constants::DEG2RAD;

/// Ecliptic longitude (J2000, degrees) at which the ecliptic enters each
/// constellation, ascending order.
const ZODIAC_BAND: [(f64, &str); 13] = [
    (29.09, "Aries"),
    (53.46, "Taurus"),
    (90.43, "Gemini"),
    (118.26, "Cancer"),
    (138.18, "Leo"),
    (174.15, "Virgo"),
    (217.80, "Libra"),
    (241.05, "Scorpius"),
    (247.64, "Ophiuchus"),
    (266.27, "Sagittarius"),
    (299.71, "Capricornus"),
    (327.89, "Aquarius"),
    (351.57, "Pisces"),
];

/// Maximum ecliptic latitude the band lookup is meaningful for.
const BAND_HALF_WIDTH_RAD: f64 = 25.0 * DEG2RAD;

/// The constellation under an ecliptic J2000 position, when the position
/// sits within the zodiacal band.
pub fn zodiacal_constellation(ecl_lon_rad: f64, ecl_lat_rad: f64) -> Option<&'static str> {
    if ecl_lat_rad.abs() > BAND_HALF_WIDTH_RAD {
        return None;
    }
    let lon_deg = crate::math::norm_two_pi(ecl_lon_rad) / DEG2RAD;
    let mut current = "Pisces"; // wraps around through 0
    for (start, name) in ZODIAC_BAND {
        if lon_deg >= start {
            current = name;
        } else {
            break;
        }
    }
    Some(current)
}

#[cfg(test)]
mod constellation_ut {
    use super::*;

    #[test]
    fn solstice_sun_is_in_sagittarius() {
        // Ecliptic longitude 280 degrees: the Sun shortly after the
        // December solstice.
        assert_eq!(
            zodiacal_constellation(280.0 * DEG2RAD, 0.0),
            Some("Sagittarius")
        );
    }

    #[test]
    fn wrap_through_zero_lands_in_pisces() {
        assert_eq!(zodiacal_constellation(10.0 * DEG2RAD, 0.0), Some("Pisces"));
    }

    #[test]
    fn high_latitude_declines_to_answer() {
        assert_eq!(zodiacal_constellation(1.0, 0.6), None);
    }

    #[test]
    fn boundaries_are_sorted() {
        for pair in ZODIAC_BAND.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }
}

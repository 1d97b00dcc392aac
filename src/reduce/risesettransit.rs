/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Rise, set and transit times from an apparent place.
//!
//! The classical hour-angle solution over one UTC day, with the standard
//! altitudes: -34' of horizon refraction for a point source, -50' for the
//! Sun, and the parallax-corrected value for the Moon. The coordinates are
//! held fixed over the day (a few minutes of slack for the Moon, seconds
//! for everything else); multi-valued days near the poles fall out of the
//! hour-angle geometry naturally.

use crate::bodies::Target;
use crate::constants::DEG2RAD;
use crate::observer::Observer;
use crate::reduce::output::RiseSetTransit;
use crate::time::sidereal::gmst_1982;
use crate::time::JulianDate;

/// The standard rise/set altitude for a target, radians.
pub fn standard_altitude(target: Target, angular_radius_rad: f64, horizontal_parallax_rad: f64) -> f64 {
    match target {
        Target::Sun => -50.0 / 60.0 * DEG2RAD,
        Target::Moon => 0.7275 * horizontal_parallax_rad - 34.0 / 60.0 * DEG2RAD,
        _ => -34.0 / 60.0 * DEG2RAD - angular_radius_rad,
    }
}

/// Events within the UTC day containing `jd_utc`.
pub fn rise_set_transit(
    ra: f64,
    dec: f64,
    site: &Observer,
    jd_utc: f64,
    standard_altitude_rad: f64,
) -> RiseSetTransit {
    let mut events = RiseSetTransit::default();
    let day_start = (jd_utc - 0.5).floor() + 0.5;

    let (sphi, cphi) = site.latitude_rad.sin_cos();
    let (sdec, cdec) = dec.sin_cos();
    let cos_h0 = (standard_altitude_rad.sin() - sphi * sdec) / (cphi * cdec);

    // Transit: local sidereal time equals the right ascension.
    let sidereal_rate = 1.002_737_909_35;
    let lst0 = gmst_1982(&JulianDate::from(day_start)) + site.longitude_rad;
    let mut transit_frac = crate::math::norm_two_pi(ra - lst0) / core::f64::consts::TAU / sidereal_rate;
    while transit_frac < 1.0 {
        events.transit.push(day_start + transit_frac);
        transit_frac += 1.0 / sidereal_rate;
    }

    if cos_h0 > 1.0 {
        events.never_rises = true;
        return events;
    }
    if cos_h0 < -1.0 {
        events.circumpolar = true;
        return events;
    }

    let h0 = cos_h0.acos();
    let half_arc_days = h0 / core::f64::consts::TAU / sidereal_rate;
    for transit in events.transit.clone() {
        let rise = transit - half_arc_days;
        let set = transit + half_arc_days;
        if rise >= day_start && rise < day_start + 1.0 {
            events.rise.push(rise);
        }
        if set >= day_start && set < day_start + 1.0 {
            events.set.push(set);
        }
    }
    events
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The VSOP-class secondary planetary theory. Same public contract as the
//! fitted theory: heliocentric ecliptic J2000 in AU and AU/day.
//!
//! The series are spherical ecliptic of date; the chain of-date equator,
//! precession, J2000 ecliptic carries them to the common frame. The Moon
//! reuses the lunar series of the fitted theory (the classical VSOP+ELP
//! pairing).

mod tables;

use crate::bodies::Target;
use crate::constants::{EMRAT_DE405, J2000};
use crate::errors::{TheoryError, Warnings};
use crate::math::rotation::r1;
use crate::math::Vector3;
use crate::prenut::{self, ReductionMethod};
use crate::theories::{fitted, HeliocentricState};

use tables::{VsopSeries, VsopTerm};

const THEORY_NAME: &str = "VSOP planetary theory";

/// Rigorous use window of the truncated series, TDB Julian dates.
const RIGOROUS_SPAN: (f64, f64) = (990_557.5, 3_912_880.5);
const HARD_SPAN: (f64, f64) = (0.0, 5_373_484.5);

fn series_for(target: Target) -> Option<&'static VsopSeries> {
    match target {
        Target::Mercury => Some(&tables::MERCURY),
        Target::Venus => Some(&tables::VENUS),
        Target::Emb | Target::Earth => Some(&tables::EARTH),
        Target::Mars => Some(&tables::MARS),
        Target::Jupiter => Some(&tables::JUPITER),
        Target::Saturn => Some(&tables::SATURN),
        Target::Uranus => Some(&tables::URANUS),
        Target::Neptune => Some(&tables::NEPTUNE),
        _ => None,
    }
}

fn eval_series(groups: &[&[VsopTerm]; 3], tau: f64) -> f64 {
    let mut total = 0.0;
    let mut tau_pow = 1.0;
    for group in groups {
        let mut sum = 0.0;
        for (amp, phase, freq) in group.iter().rev() {
            sum += amp * (phase + freq * tau).cos();
        }
        total += sum * tau_pow;
        tau_pow *= tau;
    }
    total * 1e-8
}

/// Spherical ecliptic-of-date coordinates (lon rad, lat rad, r AU).
fn spherical_of_date(series: &VsopSeries, jd_tdb: f64) -> (f64, f64, f64) {
    let tau = (jd_tdb - J2000) / 365_250.0;
    let lon = crate::math::norm_two_pi(eval_series(&series.l, tau));
    let lat = eval_series(&series.b, tau);
    let r = eval_series(&series.r, tau);
    (lon, lat, r)
}

fn position_j2000(series: &VsopSeries, jd_tdb: f64) -> Vector3 {
    let (lon, lat, r) = spherical_of_date(series, jd_tdb);
    let ecl_date = crate::math::spherical_to_cartesian(lon, lat, r);
    let method = ReductionMethod::Iau2006;
    let eps_date = prenut::mean_obliquity(jd_tdb, method);
    let equ_date = r1(-eps_date) * ecl_date;
    let equ_j2000 = prenut::precession_matrix_from_j2000(jd_tdb, method).transpose() * equ_date;
    r1(prenut::mean_obliquity(J2000, method)) * equ_j2000
}

/// Heliocentric ecliptic J2000 state, AU and AU/day.
pub fn heliocentric_ecliptic_j2000(
    jd_tdb: f64,
    target: Target,
    warnings: &mut Warnings,
) -> Result<HeliocentricState, TheoryError> {
    if !(HARD_SPAN.0..=HARD_SPAN.1).contains(&jd_tdb) {
        return Err(TheoryError::DateOutOfRange {
            jd: jd_tdb,
            theory: THEORY_NAME,
        });
    }
    if !(RIGOROUS_SPAN.0..=RIGOROUS_SPAN.1).contains(&jd_tdb) {
        warnings.push(format!(
            "jd {jd_tdb:.1} is outside the rigorous span of the {THEORY_NAME}; accuracy degrades"
        ));
    }
    match target {
        Target::Sun => Ok(HeliocentricState::zero()),
        Target::Earth => {
            // The series row is the Earth-Moon barycenter at this
            // truncation depth; pull the Moon back out.
            let emb = state_of(&tables::EARTH, jd_tdb);
            let moon = fitted::geocentric_moon_ecliptic_j2000(jd_tdb);
            let f = 1.0 / (1.0 + EMRAT_DE405);
            Ok(HeliocentricState {
                pos_au: emb.pos_au - moon.pos_au * f,
                vel_au_d: emb.vel_au_d - moon.vel_au_d * f,
            })
        }
        Target::Moon => {
            let earth = heliocentric_ecliptic_j2000(jd_tdb, Target::Earth, warnings)?;
            let moon = fitted::geocentric_moon_ecliptic_j2000(jd_tdb);
            Ok(HeliocentricState {
                pos_au: earth.pos_au + moon.pos_au,
                vel_au_d: earth.vel_au_d + moon.vel_au_d,
            })
        }
        Target::Pluto => {
            // VSOP never covered Pluto; the fitted elements stand in.
            fitted::heliocentric_ecliptic_j2000(jd_tdb, Target::Pluto, warnings)
        }
        other => match series_for(other) {
            Some(series) => Ok(state_of(series, jd_tdb)),
            None => Err(TheoryError::UnknownBody { target: other }),
        },
    }
}

fn state_of(series: &VsopSeries, jd_tdb: f64) -> HeliocentricState {
    let pos = position_j2000(series, jd_tdb);
    let h = 0.05;
    let before = position_j2000(series, jd_tdb - h);
    let after = position_j2000(series, jd_tdb + h);
    HeliocentricState {
        pos_au: pos,
        vel_au_d: (after - before) / (2.0 * h),
    }
}

#[cfg(test)]
mod vsop_ut {
    use super::*;
    use crate::constants::DEG2RAD;

    #[test]
    fn earth_series_matches_the_fitted_theory() {
        let mut w = Warnings::default();
        for jd in [2_451_545.0, 2_455_197.5, 2_447_892.5] {
            let v = heliocentric_ecliptic_j2000(jd, Target::Earth, &mut w).unwrap();
            let f = fitted::heliocentric_ecliptic_j2000(jd, Target::Earth, &mut w).unwrap();
            let sep = crate::math::angular_separation(&v.pos_au, &f.pos_au);
            assert!(sep < 0.02 * DEG2RAD, "Earth theories disagree by {sep} rad at {jd}");
            assert!((v.pos_au.norm() - f.pos_au.norm()).abs() < 2e-3);
        }
    }

    #[test]
    fn sun_geocentric_longitude_at_j2000() {
        // The Sun's apparent geometric longitude on 2000-01-01.5 TT was
        // close to 280.0 degrees; geocentric Sun = -(heliocentric Earth).
        let mut w = Warnings::default();
        let earth = heliocentric_ecliptic_j2000(2_451_545.0, Target::Earth, &mut w).unwrap();
        let sun_geo = -earth.pos_au;
        let lon = crate::math::norm_two_pi(sun_geo[1].atan2(sun_geo[0]));
        assert!(
            (lon / DEG2RAD - 280.0).abs() < 0.05,
            "solar longitude {}",
            lon / DEG2RAD
        );
        let dist = sun_geo.norm();
        assert!((dist - 0.98329).abs() < 5e-4, "solar distance {dist}");
    }

    #[test]
    fn giants_stay_on_their_shells() {
        let mut w = Warnings::default();
        for (planet, lo, hi) in [
            (Target::Jupiter, 4.9, 5.5),
            (Target::Saturn, 9.0, 10.1),
            (Target::Uranus, 18.2, 20.2),
            (Target::Neptune, 29.7, 30.4),
        ] {
            let s = heliocentric_ecliptic_j2000(2_455_197.5, planet, &mut w).unwrap();
            let r = s.pos_au.norm();
            assert!(r > lo && r < hi, "{planet} at {r} AU");
        }
    }

    #[test]
    fn pluto_routes_to_the_fitted_elements() {
        let mut w = Warnings::default();
        let s = heliocentric_ecliptic_j2000(2_451_545.0, Target::Pluto, &mut w).unwrap();
        let r = s.pos_au.norm();
        assert!(r > 29.0 && r < 50.0, "Pluto at {r} AU");
    }
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The fitted long-period analytical theory.
//!
//! Planets ride on two-epoch fitted mean elements with secular rates and,
//! for the giants, the long-period mean-anomaly correction terms; the fit
//! spans 3000 BC to 3000 AD. The Moon comes from the truncated lunar
//! series; the Earth is derived from the Earth-Moon barycenter and the
//! geocentric Moon.

pub mod gplan;
mod moon;
mod tables;

use crate::bodies::Target;
use crate::constants::{AU_KM, DEG2RAD, EMRAT_DE405, J2000};
use crate::errors::{TheoryError, Warnings};
use crate::frames::CelestialFrame;
use crate::math::rotation::r1;
use crate::math::Vector3;
use crate::prenut::{self, ReductionMethod};
use crate::theories::{kepler, HeliocentricState, MagnitudeLaw, OrbitalElements};

use gplan::{gplan as eval_gplan, Term};
use tables::FittedElements;

/// Rigorous validity span (3000 BC to 3000 AD), TDB Julian dates.
const RIGOROUS_SPAN: (f64, f64) = (625_673.5, 2_816_787.5);
/// Hard span: beyond this the polynomial elements are meaningless.
const HARD_SPAN: (f64, f64) = (0.0, 5_373_484.5);

const THEORY_NAME: &str = "fitted long-period theory";

fn fitted_for(target: Target) -> Option<&'static FittedElements> {
    match target {
        Target::Mercury => Some(&tables::MERCURY),
        Target::Venus => Some(&tables::VENUS),
        Target::Emb => Some(&tables::EM_BARY),
        Target::Mars => Some(&tables::MARS),
        Target::Jupiter => Some(&tables::JUPITER),
        Target::Saturn => Some(&tables::SATURN),
        Target::Uranus => Some(&tables::URANUS),
        Target::Neptune => Some(&tables::NEPTUNE),
        Target::Pluto => Some(&tables::PLUTO),
        _ => None,
    }
}

fn check_span(jd_tdb: f64, warnings: &mut Warnings) -> Result<(), TheoryError> {
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
    Ok(())
}

/// Heliocentric ecliptic J2000 state of a body in AU and AU/day. The Moon
/// is carried heliocentric here as well (Earth plus the geocentric series)
/// so every caller sees one contract.
pub fn heliocentric_ecliptic_j2000(
    jd_tdb: f64,
    target: Target,
    warnings: &mut Warnings,
) -> Result<HeliocentricState, TheoryError> {
    check_span(jd_tdb, warnings)?;
    match target {
        Target::Sun => Ok(HeliocentricState::zero()),
        Target::Earth => {
            let emb = planet_state(jd_tdb, &tables::EM_BARY)?;
            let moon = geocentric_moon_ecliptic_j2000(jd_tdb);
            let f = 1.0 / (1.0 + EMRAT_DE405);
            Ok(HeliocentricState {
                pos_au: emb.pos_au - moon.pos_au * f,
                vel_au_d: emb.vel_au_d - moon.vel_au_d * f,
            })
        }
        Target::Moon => {
            let earth = heliocentric_ecliptic_j2000(jd_tdb, Target::Earth, warnings)?;
            let moon = geocentric_moon_ecliptic_j2000(jd_tdb);
            Ok(HeliocentricState {
                pos_au: earth.pos_au + moon.pos_au,
                vel_au_d: earth.vel_au_d + moon.vel_au_d,
            })
        }
        other => match fitted_for(other) {
            Some(elements) => planet_state(jd_tdb, elements),
            None => Err(TheoryError::UnknownBody { target: other }),
        },
    }
}

/// Propagates one fitted element set: elements at date, the long-period
/// mean-anomaly correction through the series machinery, then the conic.
fn planet_state(jd_tdb: f64, fit: &FittedElements) -> Result<HeliocentricState, TheoryError> {
    let t = (jd_tdb - J2000) / 36_525.0;

    let a = fit.a.0 + fit.a.1 * t;
    let e = (fit.e.0 + fit.e.1 * t).max(0.0);
    let incl = (fit.incl_deg.0 + fit.incl_deg.1 * t) * DEG2RAD;
    let mean_lon = fit.mean_longitude_deg.0 + fit.mean_longitude_deg.1 * t;
    let peri_lon = fit.perihelion_longitude_deg.0 + fit.perihelion_longitude_deg.1 * t;
    let node = (fit.node_longitude_deg.0 + fit.node_longitude_deg.1 * t) * DEG2RAD;

    // M = L - peri + b t^2 + c cos(f t) + s sin(f t), all in degrees; the
    // periodic part runs through the planetary series evaluator.
    let correction_terms = [Term::<1, 1> {
        mult: [1],
        amp: [(fit.s, fit.c)],
    }];
    let m_deg = eval_gplan(
        t,
        &[mean_lon - peri_lon, 0.0, fit.b],
        &correction_terms,
        &[fit.f * DEG2RAD * t],
    );

    let argp = crate::math::norm_two_pi((peri_lon * DEG2RAD) - node);
    let orbit = OrbitalElements {
        semimajor_axis_au: a,
        eccentricity: e,
        inclination_rad: incl,
        ascending_node_rad: crate::math::norm_two_pi(node),
        arg_perihelion_rad: argp,
        mean_anomaly_rad: crate::math::norm_two_pi(m_deg * DEG2RAD),
        mean_motion_rad_d: fit.mean_longitude_deg.1 * DEG2RAD / 36_525.0,
        epoch_jd: jd_tdb,
        equinox_jd: J2000,
        frame: CelestialFrame::DynamicalJ2000,
        perihelion_distance_au: a * (1.0 - e),
        perihelion_time_jd: f64::NAN,
        absolute_magnitude: f64::NAN,
        magnitude_slope: f64::NAN,
        magnitude_law: MagnitudeLaw::None,
        central_body: Target::Sun,
        valid_from_jd: RIGOROUS_SPAN.0,
        valid_to_jd: RIGOROUS_SPAN.1,
        radius_km: f64::NAN,
        reciprocal_mass: f64::INFINITY,
    };
    kepler::state(&orbit, jd_tdb)
}

/// Geocentric Moon in ecliptic J2000, AU and AU/day. The series produces
/// ecliptic of date; the rotation chain is equator-of-date, precession to
/// J2000, back to the J2000 ecliptic.
pub fn geocentric_moon_ecliptic_j2000(jd_tdb: f64) -> HeliocentricState {
    let pos = moon_of_date_to_j2000(jd_tdb);
    // Central difference for the velocity; the series is smooth and cheap.
    let h = 0.02;
    let before = moon_of_date_to_j2000(jd_tdb - h);
    let after = moon_of_date_to_j2000(jd_tdb + h);
    HeliocentricState {
        pos_au: pos,
        vel_au_d: (after - before) / (2.0 * h),
    }
}

fn moon_of_date_to_j2000(jd_tdb: f64) -> Vector3 {
    let t = (jd_tdb - J2000) / 36_525.0;
    let (lon, lat, dist) = moon::geocentric_of_date(t);
    let ecl_date = crate::math::spherical_to_cartesian(lon, lat, dist);
    let method = ReductionMethod::Iau2006;
    let eps_date = prenut::mean_obliquity(jd_tdb, method);
    let equ_date = r1(-eps_date) * ecl_date;
    let equ_j2000 = prenut::precession_matrix_from_j2000(jd_tdb, method).transpose() * equ_date;
    let eps0 = prenut::mean_obliquity(J2000, method);
    r1(eps0) * equ_j2000
}

/// Lunar libration: the three Euler angles (node, inclination-like tilt,
/// prime-meridian) of the lunar body-fixed frame with respect to the
/// ecliptic of J2000, radians. The conventional equatorial triplet follows
/// by chaining with the obliquity rotation and the precession matrix.
pub fn libration(jd_tdb: f64) -> [f64; 3] {
    let (alpha, delta, w) = crate::physical::moon_pole_and_meridian(jd_tdb);
    // Body frame with respect to ICRF as a 3-1-3 sequence.
    let icrf_to_body = crate::math::rotation::r3(w)
        * r1(core::f64::consts::FRAC_PI_2 - delta)
        * crate::math::rotation::r3(alpha + core::f64::consts::FRAC_PI_2);
    // Re-express against the J2000 ecliptic.
    let eps0 = prenut::mean_obliquity(J2000, ReductionMethod::Iau2006);
    let ecl_to_body = icrf_to_body * r1(eps0);
    // Extract the 3-1-3 Euler angles.
    let theta = ecl_to_body[(2, 2)].clamp(-1.0, 1.0).acos();
    let phi = ecl_to_body[(2, 0)].atan2(-ecl_to_body[(2, 1)]);
    let psi = ecl_to_body[(0, 2)].atan2(ecl_to_body[(1, 2)]);
    [crate::math::norm_two_pi(phi), theta, crate::math::norm_two_pi(psi)]
}

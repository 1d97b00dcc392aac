/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The ephemeris theories and the dispatcher that selects among them.
//!
//! Every theory answers the same question: the barycentric equatorial
//! J2000 state of a target at a TDB Julian date, in AU and AU/day. The
//! dispatcher resolves the requested algorithm, and on a recoverable
//! failure (date out of range, missing file) falls through the documented
//! order DE -> Series96 -> fitted -> VSOP exactly once; a second failure is
//! surfaced verbatim.

use serde_derive::{Deserialize, Serialize};

use crate::bodies::Target;
use crate::constants::{DAS2R, EPS0_J2000_AS, J2000};
use crate::errors::{TheoryError, Warnings};
use crate::frames::{CelestialFrame, StateVector};
use crate::math::rotation::r1;
use crate::math::{Matrix3, Vector3};

pub mod de;
pub mod fitted;
pub mod kepler;
pub mod vsop;

pub use kepler::MagnitudeModel;

/// The ephemeris algorithm requested for a target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    De200,
    De403,
    De405,
    De406,
    De413,
    De414,
    De422,
    De424,
    De430,
    /// The fitted long-period analytical theory
    Moshier,
    /// Series96, with the fitted theory for the Moon. The series
    /// coefficient files are catalogue data; requests route to the fitted
    /// theory with a warning.
    Series96,
    /// VSOP-class planetary theory with the lunar series for the Moon
    Vsop,
    /// Keplerian propagation of supplied osculating elements
    Kepler,
    NaturalSatellite,
    Star,
    Probe,
    ArtificialSatellite,
}

impl Algorithm {
    pub const fn de_version(&self) -> Option<u16> {
        match self {
            Algorithm::De200 => Some(200),
            Algorithm::De403 => Some(403),
            Algorithm::De405 => Some(405),
            Algorithm::De406 => Some(406),
            Algorithm::De413 => Some(413),
            Algorithm::De414 => Some(414),
            Algorithm::De422 => Some(422),
            Algorithm::De424 => Some(424),
            Algorithm::De430 => Some(430),
            _ => None,
        }
    }
}

/// Which magnitude law an orbital-element record carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MagnitudeLaw {
    /// Asteroid H/G law
    Hg,
    /// Comet g/k law
    Gk,
    None,
}

/// Osculating orbital elements, the input record for the Kepler theory.
///
/// Angles in radians, distances in AU, epochs as TDB Julian dates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semimajor_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_rad: f64,
    pub ascending_node_rad: f64,
    pub arg_perihelion_rad: f64,
    pub mean_anomaly_rad: f64,
    /// Mean motion, rad/day; when NaN it is derived from the semimajor axis
    pub mean_motion_rad_d: f64,
    pub epoch_jd: f64,
    pub equinox_jd: f64,
    pub frame: CelestialFrame,
    /// Perihelion distance, AU (primary element for parabolic orbits)
    pub perihelion_distance_au: f64,
    pub perihelion_time_jd: f64,
    /// Absolute magnitude H (or comet g)
    pub absolute_magnitude: f64,
    /// Slope G (or comet k)
    pub magnitude_slope: f64,
    pub magnitude_law: MagnitudeLaw,
    pub central_body: Target,
    /// Inclusive validity window, TDB Julian dates; NaN bounds mean open
    pub valid_from_jd: f64,
    pub valid_to_jd: f64,
    /// Body radius for angular-size work, km; NaN when unknown
    pub radius_km: f64,
    /// 1/mass in solar masses; infinite for a massless body
    pub reciprocal_mass: f64,
}

impl OrbitalElements {
    /// Checks the record invariants: e >= 0, and q = a(1-e) for closed
    /// orbits.
    pub fn validate(&self) -> Result<(), TheoryError> {
        if self.eccentricity < 0.0 {
            return Err(TheoryError::InvalidElements {
                reason: "negative eccentricity",
            });
        }
        if self.eccentricity < 1.0
            && self.perihelion_distance_au.is_finite()
            && self.semimajor_axis_au.is_finite()
        {
            let q = self.semimajor_axis_au * (1.0 - self.eccentricity);
            if (q - self.perihelion_distance_au).abs() > 1e-6 * q.abs().max(1e-9) {
                return Err(TheoryError::InvalidElements {
                    reason: "perihelion distance disagrees with a(1-e)",
                });
            }
        }
        Ok(())
    }

    /// Longitude of perihelion plus node: the mean longitude at epoch.
    pub fn mean_longitude_rad(&self) -> f64 {
        self.mean_anomaly_rad + self.arg_perihelion_rad + self.ascending_node_rad
    }

    /// Mean motion, falling back to Kepler's third law around the central
    /// body when the record does not carry one.
    pub fn mean_motion_or_derived(&self) -> f64 {
        if self.mean_motion_rad_d.is_finite() && self.mean_motion_rad_d > 0.0 {
            return self.mean_motion_rad_d;
        }
        let mu = 1.0 + 1.0 / self.reciprocal_mass.max(1.0);
        crate::constants::GAUSS_K * (mu / self.semimajor_axis_au.powi(3)).sqrt()
    }
}

/// The J2000 mean-ecliptic to mean-equator rotation.
pub fn ecliptic_to_equatorial_j2000() -> Matrix3 {
    r1(-EPS0_J2000_AS * DAS2R)
}

/// A heliocentric ecliptic J2000 position/velocity as produced by the
/// analytical theories, AU and AU/day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeliocentricState {
    pub pos_au: Vector3,
    pub vel_au_d: Vector3,
}

impl HeliocentricState {
    pub fn zero() -> Self {
        Self {
            pos_au: Vector3::zeros(),
            vel_au_d: Vector3::zeros(),
        }
    }
}

/// The set of theories the dispatcher can reach. DE file access is behind
/// an interior-mutability cache owned by the provider.
#[derive(Default)]
pub struct TheorySet {
    pub de: Option<de::DeProvider>,
}

impl TheorySet {
    /// Barycentric equatorial J2000 state of `target` under `algorithm`,
    /// with the documented single-recovery fallback.
    pub fn barycentric_state(
        &self,
        jd_tdb: f64,
        target: Target,
        algorithm: Algorithm,
        elements: Option<&OrbitalElements>,
        warnings: &mut Warnings,
    ) -> Result<StateVector, TheoryError> {
        let order = self.fallback_order(algorithm, warnings);
        let mut recovered: Option<TheoryError> = None;
        for attempt in order {
            match self.state_from(attempt, jd_tdb, target, elements, warnings) {
                Ok(state) => {
                    if recovered.is_some() {
                        warnings.push(format!(
                            "{target} fell back to the {attempt:?} theory at jd {jd_tdb:.5}"
                        ));
                    }
                    return Ok(state);
                }
                Err(err) if err.is_recoverable() && recovered.is_none() => {
                    log::debug!("theory {attempt:?} failed recoverably for {target}: {err}");
                    recovered = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(recovered.unwrap_or(TheoryError::UnknownBody { target }))
    }

    fn fallback_order(&self, algorithm: Algorithm, warnings: &mut Warnings) -> Vec<Algorithm> {
        match algorithm {
            Algorithm::Series96 => {
                warnings.push(
                    "Series96 coefficient files are external catalogue data; using the fitted theory"
                        .to_string(),
                );
                vec![Algorithm::Moshier, Algorithm::Vsop]
            }
            Algorithm::Moshier => vec![Algorithm::Moshier, Algorithm::Vsop],
            Algorithm::Vsop => vec![Algorithm::Vsop, Algorithm::Moshier],
            Algorithm::Kepler => vec![Algorithm::Kepler],
            a if a.de_version().is_some() => {
                vec![a, Algorithm::Moshier, Algorithm::Vsop]
            }
            other => vec![other],
        }
    }

    fn state_from(
        &self,
        algorithm: Algorithm,
        jd_tdb: f64,
        target: Target,
        elements: Option<&OrbitalElements>,
        warnings: &mut Warnings,
    ) -> Result<StateVector, TheoryError> {
        if let Some(version) = algorithm.de_version() {
            let provider = self.de.as_ref().ok_or(TheoryError::FileUnavailable {
                path: format!("DE{version} (no DE provider configured)"),
                source: crate::errors::InputOutputError::IOUnknownError,
            })?;
            return provider.barycentric_state(version, jd_tdb, target);
        }
        match algorithm {
            Algorithm::Moshier => analytic_barycentric(jd_tdb, target, Flavor::Fitted, warnings),
            Algorithm::Vsop => analytic_barycentric(jd_tdb, target, Flavor::Vsop, warnings),
            Algorithm::Kepler => {
                let orbit = elements.ok_or(TheoryError::InvalidAlgorithm {
                    algorithm,
                    target,
                })?;
                orbit.validate()?;
                let helio = kepler::state(orbit, jd_tdb)?;
                // The orbit frame is ecliptic of its own equinox; carry it
                // to equatorial J2000 and attach the Sun.
                let sun = analytic_barycentric(jd_tdb, Target::Sun, Flavor::Fitted, warnings)?;
                let m = ecliptic_to_equatorial_j2000();
                Ok(StateVector::new(
                    m * helio.pos_au + sun.position(),
                    m * helio.vel_au_d + sun.velocity(),
                    CelestialFrame::DynamicalJ2000,
                    J2000,
                ))
            }
            Algorithm::Series96 => {
                self.state_from(Algorithm::Moshier, jd_tdb, target, elements, warnings)
            }
            other => Err(TheoryError::InvalidAlgorithm {
                algorithm: other,
                target,
            }),
        }
    }
}

#[derive(Copy, Clone, PartialEq)]
enum Flavor {
    Fitted,
    Vsop,
}

/// Heliocentric ecliptic J2000 from the selected analytical flavor.
fn heliocentric(
    jd_tdb: f64,
    target: Target,
    flavor: Flavor,
    warnings: &mut Warnings,
) -> Result<HeliocentricState, TheoryError> {
    match flavor {
        Flavor::Fitted => fitted::heliocentric_ecliptic_j2000(jd_tdb, target, warnings),
        Flavor::Vsop => vsop::heliocentric_ecliptic_j2000(jd_tdb, target, warnings),
    }
}

/// Wraps an analytical heliocentric state into the barycentric equatorial
/// J2000 frame the pipeline works in. The Sun's barycentric offset is
/// rebuilt from the same theory's giant-planet positions, so differences of
/// two states remain exactly consistent.
fn analytic_barycentric(
    jd_tdb: f64,
    target: Target,
    flavor: Flavor,
    warnings: &mut Warnings,
) -> Result<StateVector, TheoryError> {
    let m = ecliptic_to_equatorial_j2000();

    if target == Target::Ssb {
        return Ok(StateVector::new(
            Vector3::zeros(),
            Vector3::zeros(),
            CelestialFrame::DynamicalJ2000,
            J2000,
        ));
    }

    let sun_bary = sun_barycentric(jd_tdb, flavor, warnings)?;
    if target == Target::Sun {
        return Ok(StateVector::new(
            m * sun_bary.pos_au,
            m * sun_bary.vel_au_d,
            CelestialFrame::DynamicalJ2000,
            J2000,
        ));
    }

    let helio = heliocentric(jd_tdb, target, flavor, warnings)?;
    Ok(StateVector::new(
        m * (helio.pos_au + sun_bary.pos_au),
        m * (helio.vel_au_d + sun_bary.vel_au_d),
        CelestialFrame::DynamicalJ2000,
        J2000,
    ))
}

/// The Sun with respect to the Solar System barycenter: the mass-weighted
/// reflex of the planets. The four giants dominate; the terrestrial
/// planets shift the result below the thousandth of their own offset.
fn sun_barycentric(
    jd_tdb: f64,
    flavor: Flavor,
    warnings: &mut Warnings,
) -> Result<HeliocentricState, TheoryError> {
    let mut pos = Vector3::zeros();
    let mut vel = Vector3::zeros();
    let mut total_mass = 1.0;
    for planet in [
        Target::Jupiter,
        Target::Saturn,
        Target::Uranus,
        Target::Neptune,
        Target::Emb,
        Target::Venus,
        Target::Mars,
        Target::Mercury,
    ] {
        let Some(recip) = planet.reciprocal_mass() else {
            continue;
        };
        let mass = 1.0 / recip;
        let state = heliocentric(jd_tdb, planet, flavor, warnings)?;
        pos += mass * state.pos_au;
        vel += mass * state.vel_au_d;
        total_mass += mass;
    }
    Ok(HeliocentricState {
        pos_au: -pos / total_mass,
        vel_au_d: -vel / total_mass,
    })
}

#[cfg(test)]
mod theories_ut {
    use super::*;

    #[test]
    fn ssb_is_exactly_zero() {
        let mut w = Warnings::default();
        let set = TheorySet::default();
        let state = set
            .barycentric_state(J2000, Target::Ssb, Algorithm::Moshier, None, &mut w)
            .unwrap();
        assert_eq!(state.position(), Vector3::zeros());
        assert_eq!(state.velocity(), Vector3::zeros());
    }

    #[test]
    fn sun_reflex_is_about_two_solar_radii() {
        let mut w = Warnings::default();
        let sun = sun_barycentric(J2000, Flavor::Fitted, &mut w).unwrap();
        let dist = sun.pos_au.norm();
        // The barycenter wanders within roughly 0.005 and 0.012 AU of the
        // solar center.
        assert!(dist > 0.002 && dist < 0.02, "reflex {dist}");
    }

    #[test]
    fn de_request_without_files_falls_back_to_fitted() {
        let mut w = Warnings::default();
        let set = TheorySet::default();
        let state = set
            .barycentric_state(J2000, Target::Mars, Algorithm::De405, None, &mut w)
            .unwrap();
        assert!(state.position().norm() > 1.0);
        assert!(w.iter().any(|msg| msg.contains("fell back")));
    }

    #[test]
    fn second_failure_is_fatal() {
        let mut w = Warnings::default();
        let set = TheorySet::default();
        // A date far outside every analytical theory: recovery is spent on
        // the DE miss, the fitted theory's range error surfaces.
        let err = set.barycentric_state(-1_000_000.0, Target::Mars, Algorithm::De405, None, &mut w);
        assert!(err.is_err());
    }

    #[test]
    fn kepler_requires_elements() {
        let mut w = Warnings::default();
        let set = TheorySet::default();
        let err = set.barycentric_state(J2000, Target::MinorBody(1), Algorithm::Kepler, None, &mut w);
        assert!(matches!(
            err,
            Err(TheoryError::InvalidAlgorithm { .. })
        ));
    }
}

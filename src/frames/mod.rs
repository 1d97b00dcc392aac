/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Celestial reference frames and the static small-angle rotations between
//! them.
//!
//! All pairwise conversions route through ICRS at J2000, the hub frame. The
//! FK4 rotation lands at (and departs from) the B1950 equinox; precession to
//! any other equinox is the reduction pipeline's job.

use serde_derive::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{B1950, DMAS2R, J2000};
use crate::math::rotation::{r1, r2, r3};
use crate::math::{Matrix3, Vector3};

/// The output frames understood by the pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CelestialFrame {
    /// International Celestial Reference Frame
    Icrf,
    /// FK5, mean equator and equinox of J2000
    Fk5,
    /// FK4, mean equator and equinox of B1950
    Fk4,
    /// Mean dynamical equator and equinox of J2000
    DynamicalJ2000,
}

impl CelestialFrame {
    /// The standard equinox this frame's static rotation is tied to.
    pub const fn native_equinox_jd(&self) -> f64 {
        match self {
            CelestialFrame::Fk4 => B1950,
            _ => J2000,
        }
    }
}

impl fmt::Display for CelestialFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The requested output equinox.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Equinox {
    /// Mean equinox of the observation date
    OfDate,
    /// A fixed equinox, as a TT Julian date
    Jd(f64),
}

impl Equinox {
    pub const J2000: Equinox = Equinox::Jd(J2000);

    /// Resolves `OfDate` against the observation instant.
    pub fn resolve(&self, jd_of_date: f64) -> f64 {
        match self {
            Equinox::OfDate => jd_of_date,
            Equinox::Jd(jd) => *jd,
        }
    }
}

/// Frame-bias angles, ICRS to dynamical J2000 (IAU 2000): dalpha_0, xi_0,
/// eta_0 in milliarcseconds.
const DA0_MAS: f64 = -14.6;
const XI0_MAS: f64 = -16.6170;
const ETA0_MAS: f64 = -6.8192;

/// FK5-to-ICRS orientation (Hipparcos alignment): epsilon_x/y/z in
/// milliarcseconds. The slow spin terms are negligible at this level.
const FK5_EPS_X_MAS: f64 = -19.9;
const FK5_EPS_Y_MAS: f64 = -9.1;
const FK5_EPS_Z_MAS: f64 = 22.9;

/// Rotation taking an ICRS vector onto the mean dynamical equator and
/// equinox of J2000.
pub fn icrs_to_dynamical_j2000() -> Matrix3 {
    r1(-ETA0_MAS * DMAS2R) * r2(XI0_MAS * DMAS2R) * r3(DA0_MAS * DMAS2R)
}

/// Rotation taking an ICRS vector into FK5 (J2000).
pub fn icrs_to_fk5() -> Matrix3 {
    r1(-FK5_EPS_X_MAS * DMAS2R) * r2(-FK5_EPS_Y_MAS * DMAS2R) * r3(-FK5_EPS_Z_MAS * DMAS2R)
}

/// The fixed FK4 (B1950) to FK5 (J2000) position rotation. The E-terms of
/// aberration are not removed here; the arcsecond-level FK4 catalogue frame
/// does not warrant them for solar-system work.
#[rustfmt::skip]
pub fn fk4_b1950_to_fk5_j2000() -> Matrix3 {
    Matrix3::new(
        0.999_925_678_2, -0.011_182_061_1, -0.004_857_947_7,
        0.011_182_061_0,  0.999_937_478_4, -0.000_027_176_5,
        0.004_857_947_9, -0.000_027_147_4,  0.999_988_199_7,
    )
}

/// Small frame tie applied to DE200-origin states to carry them onto FK5,
/// exposed behind a configuration knob (results are known to be debatable
/// either way at the ten-milliarcsecond level).
pub fn de200_to_fk5_tie() -> Matrix3 {
    // Frame tie of the DE200 dynamical system, milliarcseconds.
    const TIE_X_MAS: f64 = 2.0;
    const TIE_Y_MAS: f64 = 12.0;
    const TIE_Z_MAS: f64 = 6.0;
    r1(TIE_X_MAS * DMAS2R) * r2(TIE_Y_MAS * DMAS2R) * r3(TIE_Z_MAS * DMAS2R)
}

/// Rotation onto ICRS at J2000 from the frame's native equinox.
pub fn to_icrs_j2000(frame: CelestialFrame) -> Matrix3 {
    match frame {
        CelestialFrame::Icrf => Matrix3::identity(),
        CelestialFrame::Fk5 => icrs_to_fk5().transpose(),
        CelestialFrame::DynamicalJ2000 => icrs_to_dynamical_j2000().transpose(),
        CelestialFrame::Fk4 => icrs_to_fk5().transpose() * fk4_b1950_to_fk5_j2000(),
    }
}

/// Rotation from ICRS at J2000 into the frame's native equinox.
pub fn from_icrs_j2000(frame: CelestialFrame) -> Matrix3 {
    to_icrs_j2000(frame).transpose()
}

/// Rotation between any two frames, routed through the ICRS hub. Identity
/// short-circuit when input and output match.
pub fn conversion_matrix(from: CelestialFrame, to: CelestialFrame) -> Matrix3 {
    if from == to {
        return Matrix3::identity();
    }
    from_icrs_j2000(to) * to_icrs_j2000(from)
}

/// A six-component state in AU and AU/day with a frame tag and an equinox.
/// States compose only when the tags match; conversions are explicit.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub pos_au: [f64; 3],
    pub vel_au_d: [f64; 3],
    pub frame: CelestialFrame,
    pub equinox_jd: f64,
}

impl StateVector {
    pub fn new(
        pos_au: Vector3,
        vel_au_d: Vector3,
        frame: CelestialFrame,
        equinox_jd: f64,
    ) -> Self {
        Self {
            pos_au: [pos_au[0], pos_au[1], pos_au[2]],
            vel_au_d: [vel_au_d[0], vel_au_d[1], vel_au_d[2]],
            frame,
            equinox_jd,
        }
    }

    pub fn position(&self) -> Vector3 {
        Vector3::from(self.pos_au)
    }

    pub fn velocity(&self) -> Vector3 {
        Vector3::from(self.vel_au_d)
    }

    /// Componentwise difference. Panics in debug builds when the tags
    /// differ; composition of mismatched states is a programming error.
    pub fn minus(&self, other: &StateVector) -> StateVector {
        debug_assert_eq!(self.frame, other.frame);
        debug_assert_eq!(self.equinox_jd.to_bits(), other.equinox_jd.to_bits());
        StateVector::new(
            self.position() - other.position(),
            self.velocity() - other.velocity(),
            self.frame,
            self.equinox_jd,
        )
    }

    pub fn plus(&self, other: &StateVector) -> StateVector {
        debug_assert_eq!(self.frame, other.frame);
        StateVector::new(
            self.position() + other.position(),
            self.velocity() + other.velocity(),
            self.frame,
            self.equinox_jd,
        )
    }

    /// Applies a rotation to position AND velocity, retagging the frame.
    pub fn rotated(&self, m: &Matrix3, frame: CelestialFrame, equinox_jd: f64) -> StateVector {
        StateVector::new(m * self.position(), m * self.velocity(), frame, equinox_jd)
    }

    /// Converts to another frame through the ICRS hub. The state must sit at
    /// its frame's native equinox.
    pub fn to_frame(&self, to: CelestialFrame) -> StateVector {
        let m = conversion_matrix(self.frame, to);
        self.rotated(&m, to, to.native_equinox_jd())
    }
}

#[cfg(test)]
mod frames_ut {
    use super::*;
    use crate::math::rotation::is_valid_rotation;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bias_matrices_are_proper_rotations() {
        for m in [
            icrs_to_dynamical_j2000(),
            icrs_to_fk5(),
            fk4_b1950_to_fk5_j2000(),
            de200_to_fk5_tie(),
        ] {
            assert!(is_valid_rotation(&m, 1e-9, 1e-9));
        }
    }

    #[test]
    fn frame_chain_round_trip_microarcsecond() {
        // FK4 -> FK5 -> ICRS -> dynamical J2000 -> ICRS -> FK5 -> FK4
        let v = Vector3::new(0.5, -0.6, 0.62).normalize();
        let fk5 = conversion_matrix(CelestialFrame::Fk4, CelestialFrame::Fk5) * v;
        let icrs = conversion_matrix(CelestialFrame::Fk5, CelestialFrame::Icrf) * fk5;
        let dyn2000 = conversion_matrix(CelestialFrame::Icrf, CelestialFrame::DynamicalJ2000) * icrs;
        let icrs2 = conversion_matrix(CelestialFrame::DynamicalJ2000, CelestialFrame::Icrf) * dyn2000;
        let fk5b = conversion_matrix(CelestialFrame::Icrf, CelestialFrame::Fk5) * icrs2;
        let back = conversion_matrix(CelestialFrame::Fk5, CelestialFrame::Fk4) * fk5b;
        // 1 uas = 4.85e-12 rad
        assert!((back - v).norm() < 5e-12);
    }

    #[test]
    fn hub_routing_is_consistent() {
        let v = Vector3::new(1.0, 0.2, -0.4);
        let direct = conversion_matrix(CelestialFrame::Fk4, CelestialFrame::DynamicalJ2000) * v;
        let via = conversion_matrix(CelestialFrame::Icrf, CelestialFrame::DynamicalJ2000)
            * (conversion_matrix(CelestialFrame::Fk4, CelestialFrame::Icrf) * v);
        assert_abs_diff_eq!((direct - via).norm(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn identity_short_circuit() {
        let m = conversion_matrix(CelestialFrame::Icrf, CelestialFrame::Icrf);
        assert_eq!(m, Matrix3::identity());
    }

    #[test]
    fn fk4_native_equinox_is_b1950() {
        assert_eq!(CelestialFrame::Fk4.native_equinox_jd(), B1950);
        assert_eq!(CelestialFrame::Icrf.native_equinox_jd(), J2000);
    }
}

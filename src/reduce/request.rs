/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The ephemeris request: what to compute, how, and under which flags.

use serde_derive::{Deserialize, Serialize};

use crate::bodies::Target;
use crate::frames::{CelestialFrame, Equinox};
use crate::prenut::ReductionMethod;
use crate::theories::{Algorithm, OrbitalElements};

/// The coordinate type of the answer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateType {
    /// True instantaneous geometry, no light time
    Geometric,
    /// Light time and annual aberration, no deflection-free local effects
    Astrometric,
    /// The full apparent place
    Apparent,
}

/// Where the observer sits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObserverOrigin {
    Geocentric,
    Topocentric,
}

/// The refraction model selector (by wavelength regime).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefractionModel {
    OpticalBennett,
    RadioBennett,
    NumericalIntegration,
    YanOptical,
    YanRadio,
}

/// Behavior flags of one request.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReductionFlags {
    pub correct_for_eop: bool,
    pub correct_for_polar_motion: bool,
    pub correct_for_refraction: bool,
    pub correct_for_extinction: bool,
    /// Apply the full deflector list rather than the Sun alone
    pub prefer_precision: bool,
    pub correct_eop_for_diurnal_subdiurnal_tides: bool,
    /// Carry DE200 output through the small frame tie onto FK5
    pub apply_de200_frame_tie: bool,
}

impl Default for ReductionFlags {
    fn default() -> Self {
        Self {
            correct_for_eop: true,
            correct_for_polar_motion: false,
            correct_for_refraction: false,
            correct_for_extinction: false,
            prefer_precision: true,
            correct_eop_for_diurnal_subdiurnal_tides: false,
            apply_de200_frame_tie: true,
        }
    }
}

/// A full ephemeris request. Pure input: the pipeline never mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EphemRequest {
    pub target: Target,
    pub algorithm: Algorithm,
    pub method: ReductionMethod,
    pub frame: CelestialFrame,
    pub equinox: Equinox,
    pub coordinates: CoordinateType,
    pub origin: ObserverOrigin,
    pub flags: ReductionFlags,
    pub refraction_model: RefractionModel,
    /// Orbital elements when algorithm = Kepler
    pub elements: Option<OrbitalElements>,
    /// Also produce azimuth/elevation and rise/set/transit
    pub want_horizontal: bool,
}

impl EphemRequest {
    /// An apparent-place request with the modern defaults.
    pub fn apparent(target: Target, algorithm: Algorithm) -> Self {
        Self {
            target,
            algorithm,
            method: ReductionMethod::Iau2006,
            frame: CelestialFrame::Icrf,
            equinox: Equinox::OfDate,
            coordinates: CoordinateType::Apparent,
            origin: ObserverOrigin::Geocentric,
            flags: ReductionFlags::default(),
            refraction_model: RefractionModel::OpticalBennett,
            elements: None,
            want_horizontal: false,
        }
    }

    /// A geometric J2000 request.
    pub fn geometric(target: Target, algorithm: Algorithm) -> Self {
        Self {
            equinox: Equinox::J2000,
            coordinates: CoordinateType::Geometric,
            ..Self::apparent(target, algorithm)
        }
    }
}

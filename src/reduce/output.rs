/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The single flat ephemeris output record. Produced once per call and
//! never mutated; fields that do not apply to a target stay at their
//! sentinel (`NAN` or `None`).

use serde_derive::{Deserialize, Serialize};

use crate::errors::Warnings;

/// Rise/set/transit events for the request's UTC day. A polar day or night
/// leaves the lists empty with the matching status.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RiseSetTransit {
    /// UTC Julian dates of rising
    pub rise: Vec<f64>,
    /// UTC Julian dates of setting
    pub set: Vec<f64>,
    /// UTC Julian dates of upper transit
    pub transit: Vec<f64>,
    pub circumpolar: bool,
    pub never_rises: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ephemeris {
    pub name: String,
    /// Right ascension, radians in [0, 2pi)
    pub right_ascension: f64,
    /// Declination, radians in [-pi/2, pi/2]
    pub declination: f64,
    /// Apparent distance, AU
    pub distance: f64,
    /// Angular radius, radians
    pub angular_radius: f64,
    /// Apparent visual magnitude (NAN when no model applies)
    pub magnitude: f64,
    /// Mean surface brightness, mag per square arcsecond
    pub surface_magnitude: f64,
    /// Heliocentric ecliptic J2000 longitude/latitude (rad) and distance (AU)
    pub heliocentric_longitude: f64,
    pub heliocentric_latitude: f64,
    pub heliocentric_distance: f64,
    /// Illuminated disc fraction, 0..1
    pub phase: f64,
    /// Sun-target-observer angle, radians
    pub phase_angle: f64,
    /// Solar elongation, radians
    pub elongation: f64,
    /// Angular defect of illumination, radians
    pub defect_of_illumination: f64,
    /// Sub-solar point in the body-fixed frame, radians
    pub subsolar_longitude: f64,
    pub subsolar_latitude: f64,
    /// Sub-observer point in the body-fixed frame, radians
    pub subobserver_longitude: f64,
    pub subobserver_latitude: f64,
    /// Rotational-system longitudes I, II, III, radians
    pub longitude_system_i: f64,
    pub longitude_system_ii: f64,
    pub longitude_system_iii: f64,
    /// North-pole direction, radians
    pub north_pole_ra: f64,
    pub north_pole_dec: f64,
    /// Paralactic angle, radians (NAN unless horizontal output requested)
    pub paralactic_angle: f64,
    /// One-way light time, days (zero for geometric coordinates)
    pub light_time_days: f64,
    /// Azimuth/elevation, radians, when horizontal output was requested
    pub azimuth: f64,
    pub elevation: f64,
    /// Constellation tag (zodiac-band lookup; `None` far off the ecliptic)
    pub constellation: Option<String>,
    pub rise_set_transit: Option<RiseSetTransit>,
    /// The geocentric celestial (ICRS, J2000) direction this record was
    /// reduced from, AU. This is the value downstream physical-parameter
    /// consumers read.
    pub gcrs_position: [f64; 3],
    /// Warnings accumulated along the reduction; never fatal.
    pub warnings: Warnings,
    /// Human-readable completion status
    pub status: String,
}

impl Ephemeris {
    /// A record with every field at its sentinel.
    pub fn sentinel(name: String) -> Self {
        Self {
            name,
            right_ascension: f64::NAN,
            declination: f64::NAN,
            distance: f64::NAN,
            angular_radius: f64::NAN,
            magnitude: f64::NAN,
            surface_magnitude: f64::NAN,
            heliocentric_longitude: f64::NAN,
            heliocentric_latitude: f64::NAN,
            heliocentric_distance: f64::NAN,
            phase: f64::NAN,
            phase_angle: f64::NAN,
            elongation: f64::NAN,
            defect_of_illumination: f64::NAN,
            subsolar_longitude: f64::NAN,
            subsolar_latitude: f64::NAN,
            subobserver_longitude: f64::NAN,
            subobserver_latitude: f64::NAN,
            longitude_system_i: f64::NAN,
            longitude_system_ii: f64::NAN,
            longitude_system_iii: f64::NAN,
            north_pole_ra: f64::NAN,
            north_pole_dec: f64::NAN,
            paralactic_angle: f64::NAN,
            light_time_days: 0.0,
            azimuth: f64::NAN,
            elevation: f64::NAN,
            constellation: None,
            rise_set_transit: None,
            gcrs_position: [f64::NAN; 3],
            warnings: Warnings::default(),
            status: String::new(),
        }
    }
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Almagest computes high-accuracy astronomical ephemerides: apparent and
//! geometric positions, velocities, distances and orientation of Solar System
//! bodies as observed from a point on Earth or on another body, at arbitrary
//! instants spanning several millennia.
//!
//! The core is the reduction pipeline: the chain of time-scale, frame and
//! coordinate transformations that turns a theory-produced barycentric state
//! at one epoch into topocentric or apparent spherical coordinates at the
//! observer's instant.

extern crate log;

pub mod bodies;
pub mod cio;
pub mod constants;
pub mod context;
pub mod eop;
pub mod errors;
pub mod frames;
pub mod math;
pub mod observer;
pub mod physical;
pub mod prenut;
pub mod reduce;
pub mod theories;
pub mod time;

pub mod prelude {
    pub use crate::bodies::Target;
    pub use crate::context::Observatory;
    pub use crate::eop::EopTable;
    pub use crate::errors::{AlmagestError, InputOutputError};
    pub use crate::frames::CelestialFrame;
    pub use crate::observer::Observer;
    pub use crate::prenut::ReductionMethod;
    pub use crate::reduce::request::{CoordinateType, EphemRequest, ObserverOrigin};
    pub use crate::reduce::Ephemeris;
    pub use crate::theories::{Algorithm, OrbitalElements};
    pub use crate::time::{Instant, JulianDate, TimeScale};
    pub use std::fs::File;
}

/// Memory maps a file and **copies** the data on the heap prior to returning a pointer to this heap data.
#[macro_export]
macro_rules! file2heap {
    ($filename:tt) => {
        match File::open($filename) {
            Err(e) => Err($crate::errors::InputOutputError::IOError { kind: e.kind() }),
            Ok(file) => unsafe {
                use bytes::Bytes;
                use memmap2::MmapOptions;
                match MmapOptions::new().map(&file) {
                    Err(_) => Err($crate::errors::InputOutputError::IOUnknownError),
                    Ok(mmap) => {
                        let bytes = Bytes::copy_from_slice(&mmap);
                        Ok(bytes)
                    }
                }
            },
        }
    };
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use snafu::prelude::*;
use std::io::ErrorKind as IOErrorKind;

use crate::bodies::Target;
use crate::frames::CelestialFrame;
use crate::theories::Algorithm;

/// Top-level error returned by the reduction pipeline. Either a full
/// ephemeris record is produced or exactly one of these is returned;
/// partial success is not offered.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum AlmagestError {
    #[snafu(display("{action} encountered a time-scale error: {source}"))]
    Time {
        action: &'static str,
        source: TimeError,
    },
    #[snafu(display("{action} encountered an Earth-orientation error: {source}"))]
    Eop {
        action: &'static str,
        source: EopError,
    },
    #[snafu(display("{action} encountered a theory error: {source}"))]
    Theory {
        action: &'static str,
        #[snafu(source(from(TheoryError, Box::new)))]
        source: Box<TheoryError>,
    },
    #[snafu(display("{action} encountered a frame error: {source}"))]
    Frame {
        action: &'static str,
        source: FrameError,
    },
    #[snafu(display("{action} encountered a reduction error: {source}"))]
    Reduction {
        action: &'static str,
        source: ReductionError,
    },
    #[snafu(display("{source} encountered when loading {path}"))]
    Loading {
        path: String,
        source: InputOutputError,
    },
    #[snafu(display("{err}"))]
    GenericError { err: String },
}

pub type AlmagestResult<T> = Result<T, AlmagestError>;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum InputOutputError {
    /// Raised for an error in reading or writing the file(s)
    IOError { kind: IOErrorKind },
    /// Raised if an IO error occurred but its representation is not simple (and therefore not an std::io::ErrorKind).
    IOUnknownError,
}

#[derive(Copy, Clone, PartialEq, Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum MathError {
    #[snafu(display("prevented a division by zero when {action}"))]
    DivisionByZero { action: &'static str },
    #[snafu(display("{msg}: {value}"))]
    DomainError { value: f64, msg: &'static str },
    #[snafu(display("max iterations reached ({iter}) when {action}"))]
    MaxIterationsReached { iter: usize, action: &'static str },
}

#[derive(Copy, Clone, PartialEq, Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TimeError {
    #[snafu(display("cannot convert to UT1: {reason}"))]
    Ut1Unavailable { reason: &'static str },
    #[snafu(display("Julian date {jd} is outside the supported span while {action}"))]
    EpochOutOfSpan { jd: f64, action: &'static str },
}

/// Errors raised when loading an Earth-orientation table. Out-of-range
/// queries against a loaded table never raise; they clamp and warn.
#[derive(Clone, PartialEq, Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EopError {
    #[snafu(display("EOP table line {line} is malformed: {content:?}"))]
    MalformedRow { line: usize, content: String },
    #[snafu(display("EOP table carries no data rows"))]
    EmptyTable,
}

/// Errors raised by the ephemeris theories. `DateOutOfRange` and
/// `FileUnavailable` are recoverable by the dispatcher's fallback loop;
/// everything else propagates.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TheoryError {
    #[snafu(display("{target:?} cannot be resolved by any loaded theory"))]
    UnknownBody { target: Target },
    #[snafu(display("algorithm {algorithm:?} is unfit for {target:?}"))]
    InvalidAlgorithm {
        algorithm: Algorithm,
        target: Target,
    },
    #[snafu(display("jd {jd} TDB is outside the validity of {theory}"))]
    DateOutOfRange { jd: f64, theory: &'static str },
    #[snafu(display("no convergence after {iter} iterations when {action}"))]
    NoConvergence { iter: usize, action: &'static str },
    #[snafu(display("ephemeris file {path} unavailable: {source}"))]
    FileUnavailable {
        path: String,
        source: InputOutputError,
    },
    #[snafu(display("malformed ephemeris file {path}: {reason}"))]
    FileMalformed { path: String, reason: String },
    #[snafu(display("invalid input: {reason}"))]
    InvalidElements { reason: &'static str },
    #[snafu(display("{source}"))]
    TheoryMath { source: MathError },
}

impl TheoryError {
    /// Whether the dispatcher may retry this failure with the next theory
    /// in the fallback order.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TheoryError::DateOutOfRange { .. } | TheoryError::FileUnavailable { .. }
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum FrameError {
    /// A closed enumerator was asked for a missing case. Never normal.
    #[snafu(display("no conversion path from {from:?} to {to:?}"))]
    UnsupportedFrameConversion {
        from: CelestialFrame,
        to: CelestialFrame,
    },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ReductionError {
    #[snafu(display("refraction did not converge after {iter} iterations"))]
    RefractionNoConvergence { iter: usize },
    #[snafu(display("light-time iteration diverged for {target:?}"))]
    LightTimeDiverged { target: Target },
    #[snafu(display("observer is required to be on a planet for {action}"))]
    ObserverNotOnPlanet { action: &'static str },
    #[snafu(display("the computation was cancelled"))]
    Cancelled,
    #[snafu(display("{source}"))]
    ReductionMath { source: MathError },
}

/// Warnings are attached to the response record and never raise.
pub type Warnings = Vec<String>;

impl From<IOErrorKind> for InputOutputError {
    fn from(kind: IOErrorKind) -> Self {
        Self::IOError { kind }
    }
}

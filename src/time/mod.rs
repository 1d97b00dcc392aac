/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Time scales and the instants they tag.
//!
//! An [`Instant`] is a Julian date plus a scale tag; converting between
//! scales is a pure function returning a new instant. The Julian date is a
//! sum of two doubles so that conversions preserve precision through the
//! millisecond level over the full multi-millennia span.

use serde_derive::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DAYS_PER_CENTURY, J2000, TT_MINUS_TAI_S};
use crate::eop::EopTable;
use crate::errors::Warnings;

mod deltat;
mod leapsec;
pub mod sidereal;

pub use deltat::{delta_t_seconds, julian_date_to_year};
pub use leapsec::{tai_minus_utc, LEAP_SECONDS};

/// The five time scales understood by the converter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeScale {
    UTC,
    UT1,
    TAI,
    TT,
    TDB,
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A Julian date held as an unevaluated sum of two doubles.
///
/// `days` carries the integer-and-half part, `frac` the remainder; the split
/// is maintained by compensated arithmetic so that adding seconds near the
/// modern era keeps sub-microsecond resolution.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct JulianDate {
    days: f64,
    frac: f64,
}

impl JulianDate {
    pub fn new(days: f64, frac: f64) -> Self {
        Self { days, frac }.normalized()
    }

    /// Splits so that `days` ends in .5 (a midnight boundary) and
    /// `frac` lies in [0, 1).
    fn normalized(self) -> Self {
        let total_floor = (self.days - 0.5).floor();
        let rem = (self.days - 0.5) - total_floor;
        let mut frac = self.frac + rem;
        let mut days = total_floor + 0.5;
        let f_floor = frac.floor();
        if f_floor != 0.0 {
            days += f_floor;
            frac -= f_floor;
        }
        Self { days, frac }
    }

    /// The full Julian date as a single double (loses the split).
    pub fn value(&self) -> f64 {
        self.days + self.frac
    }

    /// Days elapsed since J2000.0, exact in the split representation.
    pub fn days_since_j2000(&self) -> f64 {
        (self.days - J2000) + self.frac
    }

    /// Julian centuries since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_CENTURY
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.days, self.frac + days)
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds / 86400.0)
    }

    /// Difference in days.
    pub fn minus(&self, other: &Self) -> f64 {
        (self.days - other.days) + (self.frac - other.frac)
    }

    /// The two components (midnight part, day fraction).
    pub fn split(&self) -> (f64, f64) {
        (self.days, self.frac)
    }

    /// Key for bit-exact cache lookups.
    pub fn bits(&self) -> (u64, u64) {
        (self.days.to_bits(), self.frac.to_bits())
    }
}

impl PartialEq for JulianDate {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.value())
    }
}

/// A time point: a Julian date and the scale it is counted in.
///
/// Two instants are equal iff their scales match and their Julian dates are
/// equal bit for bit.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instant {
    pub jd: JulianDate,
    pub scale: TimeScale,
}

impl Instant {
    pub fn new(jd: f64, scale: TimeScale) -> Self {
        Self {
            jd: JulianDate::from(jd),
            scale,
        }
    }

    pub fn from_julian_date(jd: JulianDate, scale: TimeScale) -> Self {
        Self { jd, scale }
    }

    /// Builds a TT instant from a hifitime epoch.
    pub fn from_epoch_tt(epoch: hifitime::Epoch) -> Self {
        Self {
            jd: JulianDate::from(epoch.to_jde_tt_days()),
            scale: TimeScale::TT,
        }
    }

    pub fn jd_value(&self) -> f64 {
        self.jd.value()
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.jd, self.scale)
    }
}

/// TDB minus TT in seconds: the leading periodic terms of the
/// Fairhead & Bretagnon series, good to a few microseconds. The full series
/// stays below two milliseconds.
pub fn tdb_minus_tt_seconds(jd_tt: &JulianDate) -> f64 {
    let t = jd_tt.centuries_since_j2000();
    0.001657 * (628.3076 * t + 6.2401).sin()
        + 0.000022 * (575.3385 * t + 4.2970).sin()
        + 0.000014 * (1256.6152 * t + 6.1969).sin()
        + 0.000005 * (606.9777 * t + 4.0212).sin()
        + 0.000005 * (52.9691 * t + 0.4444).sin()
        + 0.000002 * (21.3299 * t + 5.5431).sin()
        + 0.000010 * t * (628.3076 * t + 4.2490).sin()
}

/// The time-scale converter. Carries the optional EOP table used for the
/// UT1 link; with no table (or with EOP correction disabled) UT1 = UTC.
#[derive(Copy, Clone, Default)]
pub struct TimeScaleConverter<'a> {
    pub eop: Option<&'a EopTable>,
}

impl<'a> TimeScaleConverter<'a> {
    pub fn new(eop: Option<&'a EopTable>) -> Self {
        Self { eop }
    }

    /// Converts `t` to `target`, surfacing warnings (leap-second table
    /// overrun, EOP table overrun) into `warnings`.
    ///
    /// Conversions compose: A→B→C equals A→C to within rounding of the
    /// split Julian date.
    pub fn convert(&self, t: Instant, target: TimeScale, warnings: &mut Warnings) -> Instant {
        if t.scale == target {
            return t;
        }
        // Route through TAI, the hub scale.
        let tai = self.to_tai(t, warnings);
        self.from_tai(tai, target, warnings)
    }

    fn to_tai(&self, t: Instant, warnings: &mut Warnings) -> JulianDate {
        match t.scale {
            TimeScale::TAI => t.jd,
            TimeScale::TT => t.jd.add_seconds(-TT_MINUS_TAI_S),
            TimeScale::TDB => {
                // TDB -> TT: the series argument may be evaluated at TDB,
                // the difference is far below the microsecond.
                let dt = tdb_minus_tt_seconds(&t.jd);
                t.jd.add_seconds(-dt - TT_MINUS_TAI_S)
            }
            TimeScale::UTC => {
                let dat = tai_minus_utc(t.jd.value(), warnings);
                t.jd.add_seconds(dat)
            }
            TimeScale::UT1 => {
                let utc = t.jd.add_seconds(-self.dut1_seconds(&t.jd, warnings));
                let dat = tai_minus_utc(utc.value(), warnings);
                utc.add_seconds(dat)
            }
        }
    }

    fn from_tai(&self, tai: JulianDate, target: TimeScale, warnings: &mut Warnings) -> Instant {
        let jd = match target {
            TimeScale::TAI => tai,
            TimeScale::TT => tai.add_seconds(TT_MINUS_TAI_S),
            TimeScale::TDB => {
                let tt = tai.add_seconds(TT_MINUS_TAI_S);
                tt.add_seconds(tdb_minus_tt_seconds(&tt))
            }
            TimeScale::UTC => self.tai_to_utc(tai, warnings),
            TimeScale::UT1 => {
                let utc = self.tai_to_utc(tai, warnings);
                utc.add_seconds(self.dut1_seconds(&utc, warnings))
            }
        };
        Instant::from_julian_date(jd, target)
    }

    fn tai_to_utc(&self, tai: JulianDate, warnings: &mut Warnings) -> JulianDate {
        // First guess with the offset at the TAI instant, then refine once so
        // the offset is the one in force at the resulting UTC instant.
        let guess = tai.add_seconds(-tai_minus_utc(tai.value(), warnings));
        let dat = tai_minus_utc(guess.value(), warnings);
        tai.add_seconds(-dat)
    }

    fn dut1_seconds(&self, jd_utc: &JulianDate, warnings: &mut Warnings) -> f64 {
        match self.eop {
            Some(table) => table.ut1_minus_utc(jd_utc.value(), warnings),
            None => 0.0,
        }
    }
}

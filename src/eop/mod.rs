/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Earth orientation parameters: polar motion, UT1-UTC and the short-period
//! tide corrections.
//!
//! The table is loaded once and read-only thereafter. Queries interpolate
//! linearly in UTC; out-of-range queries return the nearest endpoint and
//! surface a warning so the pipeline still produces a finite output.

use serde_derive::{Deserialize, Serialize};

use crate::errors::{EopError, Warnings};

mod tides;

pub use tides::diurnal_subdiurnal_correction;

const MJD_OFFSET: f64 = 2_400_000.5;

/// One row of the table: values for a single UTC day.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EopEntry {
    /// Modified Julian date (UTC) of the row
    pub mjd: f64,
    /// Polar motion x, arcseconds
    pub xp: f64,
    /// Polar motion y, arcseconds
    pub yp: f64,
    /// UT1 - UTC, seconds
    pub ut1_minus_utc: f64,
    /// Celestial pole offset in longitude, arcseconds
    pub dpsi: Option<f64>,
    /// Celestial pole offset in obliquity, arcseconds
    pub deps: Option<f64>,
}

/// The values returned for one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EarthOrientation {
    /// UT1 - UTC, seconds
    pub ut1_minus_utc: f64,
    /// Polar motion, arcseconds
    pub xp: f64,
    /// Polar motion, arcseconds
    pub yp: f64,
}

#[derive(Clone, Debug, Default)]
pub struct EopTable {
    entries: Vec<EopEntry>,
}

impl EopTable {
    pub fn new(mut entries: Vec<EopEntry>) -> Self {
        entries.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        Self { entries }
    }

    /// Parses the plain text interchange format: one row per line,
    /// whitespace separated `MJD xp yp UT1-UTC [dpsi deps]`, `#` comments.
    ///
    /// A non-comment line that does not carry four to six numbers is a
    /// [`EopError::MalformedRow`]; a file with no data rows at all is
    /// [`EopError::EmptyTable`].
    pub fn from_text(text: &str) -> Result<Self, EopError> {
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = || EopError::MalformedRow {
                line: idx + 1,
                content: line.to_string(),
            };
            let mut cols = Vec::with_capacity(6);
            for tok in line.split_whitespace() {
                cols.push(tok.parse::<f64>().map_err(|_| malformed())?);
            }
            if !(4..=6).contains(&cols.len()) {
                return Err(malformed());
            }
            entries.push(EopEntry {
                mjd: cols[0],
                xp: cols[1],
                yp: cols[2],
                ut1_minus_utc: cols[3],
                dpsi: cols.get(4).copied(),
                deps: cols.get(5).copied(),
            });
        }
        if entries.is_empty() {
            return Err(EopError::EmptyTable);
        }
        Ok(Self::new(entries))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether a UTC Julian date falls inside the tabulated span.
    pub fn covers(&self, jd_utc: f64) -> bool {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => {
                let mjd = jd_utc - MJD_OFFSET;
                mjd >= first.mjd && mjd <= last.mjd
            }
            _ => false,
        }
    }

    /// UT1 - UTC in seconds at a UTC Julian date.
    pub fn ut1_minus_utc(&self, jd_utc: f64, warnings: &mut Warnings) -> f64 {
        self.obtain(jd_utc, warnings).ut1_minus_utc
    }

    /// The full parameter set at a UTC Julian date, linearly interpolated.
    pub fn obtain(&self, jd_utc: f64, warnings: &mut Warnings) -> EarthOrientation {
        if self.entries.is_empty() {
            return EarthOrientation::default();
        }
        let mjd = jd_utc - MJD_OFFSET;
        let first = &self.entries[0];
        let last = &self.entries[self.entries.len() - 1];
        if mjd <= first.mjd {
            if mjd < first.mjd - 0.5 {
                warnings.push(format!(
                    "EOP table starts at MJD {}; clamping query at MJD {mjd:.3}",
                    first.mjd
                ));
            }
            return Self::at(first);
        }
        if mjd >= last.mjd {
            if mjd > last.mjd + 0.5 {
                warnings.push(format!(
                    "EOP table ends at MJD {}; clamping query at MJD {mjd:.3}",
                    last.mjd
                ));
            }
            return Self::at(last);
        }
        let idx = self
            .entries
            .partition_point(|e| e.mjd <= mjd)
            .saturating_sub(1);
        let lo = &self.entries[idx];
        let hi = &self.entries[idx + 1];
        let f = (mjd - lo.mjd) / (hi.mjd - lo.mjd);
        EarthOrientation {
            ut1_minus_utc: lo.ut1_minus_utc + f * (hi.ut1_minus_utc - lo.ut1_minus_utc),
            xp: lo.xp + f * (hi.xp - lo.xp),
            yp: lo.yp + f * (hi.yp - lo.yp),
        }
    }

    /// Parameter set with the diurnal/semidiurnal ocean tide terms added.
    pub fn obtain_with_tides(&self, jd_utc: f64, warnings: &mut Warnings) -> EarthOrientation {
        let mut eo = self.obtain(jd_utc, warnings);
        let tide = diurnal_subdiurnal_correction(jd_utc);
        eo.ut1_minus_utc += tide.ut1_minus_utc;
        eo.xp += tide.xp;
        eo.yp += tide.yp;
        eo
    }

    fn at(entry: &EopEntry) -> EarthOrientation {
        EarthOrientation {
            ut1_minus_utc: entry.ut1_minus_utc,
            xp: entry.xp,
            yp: entry.yp,
        }
    }
}

#[cfg(test)]
mod eop_ut {
    use super::*;

    fn sample() -> EopTable {
        EopTable::from_text(
            "# mjd xp yp dut1\n\
             51544.0  0.043  0.378  0.3553\n\
             51545.0  0.042  0.377  0.3547\n\
             51546.0  0.041  0.376  0.3540\n",
        )
        .unwrap()
    }

    #[test]
    fn interpolates_linearly() {
        let t = sample();
        let mut w = Warnings::default();
        let eo = t.obtain(51_544.5 + MJD_OFFSET, &mut w);
        assert!((eo.ut1_minus_utc - 0.3550).abs() < 1e-12);
        assert!((eo.xp - 0.0425).abs() < 1e-12);
        assert!(w.is_empty());
    }

    #[test]
    fn clamps_and_warns_out_of_range() {
        let t = sample();
        let mut w = Warnings::default();
        let eo = t.obtain(51_600.0 + MJD_OFFSET, &mut w);
        assert_eq!(eo.ut1_minus_utc, 0.3540);
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn empty_table_returns_zeros() {
        let t = EopTable::default();
        let mut w = Warnings::default();
        assert_eq!(t.obtain(2_451_545.0, &mut w), EarthOrientation::default());
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let err = EopTable::from_text("51544.0  0.043  oops  0.3553\n").unwrap_err();
        assert!(matches!(err, EopError::MalformedRow { line: 1, .. }));

        let err = EopTable::from_text("51544.0  0.043  0.378\n").unwrap_err();
        assert!(matches!(err, EopError::MalformedRow { .. }));

        let err = EopTable::from_text("# only a comment\n").unwrap_err();
        assert_eq!(err, EopError::EmptyTable);
    }

    #[test]
    fn optional_pole_offsets_parse() {
        let t = EopTable::from_text("51544.0 0.043 0.378 0.3553 -0.052 -0.004\n").unwrap();
        assert_eq!(t.len(), 1);
    }
}

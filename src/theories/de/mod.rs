/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Reader for the JPL DE-series ephemerides in their ASCII interchange
//! form: a `header.VVV` file describing the layout plus `ascYEAR.VVV`
//! granule files of Chebyshev coefficients.
//!
//! Files are found lazily on first touch and kept on a small LRU (two
//! resident parsed files); positions come out barycentric in kilometers
//! and are converted to AU with the AU constant the header itself carries.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::bodies::Target;
use crate::constants::J2000;
use crate::errors::{InputOutputError, TheoryError};
use crate::frames::{CelestialFrame, StateVector};
use crate::math::chebyshev::chebyshev_eval;
use crate::math::Vector3;

mod parse;
mod pluto;

pub use parse::{parse_fortran_doubles, DeHeader};

/// The thirteen bodies of the interchange layout, in file order.
pub const BODY_ORDER: [&str; 13] = [
    "Mercury", "Venus", "EMB", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto",
    "Moon (geocentric)", "Sun", "Nutation", "Libration",
];

/// Published validity windows per DE version, TDB Julian dates. The loaded
/// granules are the final authority; this table pre-filters requests so a
/// missing file for a hopeless date reads as out-of-range, not as missing.
pub const fn version_span(version: u16) -> Option<(f64, f64)> {
    match version {
        200 => Some((2_305_424.5, 2_513_360.5)),
        403 => Some((2_305_200.5, 2_524_400.5)),
        405 => Some((2_305_424.5, 2_525_008.5)),
        406 => Some((625_360.5, 2_816_912.5)),
        413 => Some((2_414_992.5, 2_469_808.5)),
        414 => Some((2_305_424.5, 2_525_008.5)),
        422 => Some((625_648.5, 2_816_816.5)),
        424 => Some((2_305_424.5, 2_525_008.5)),
        430 => Some((2_287_184.5, 2_688_976.5)),
        _ => None,
    }
}

/// One parsed ASCII granule file.
struct LoadedFile {
    path: PathBuf,
    /// Flat granule records, each `ncoeff` doubles starting with the
    /// interval start/end JDs.
    records: Vec<Vec<f64>>,
    start_jd: f64,
    end_jd: f64,
}

struct FileIndexEntry {
    path: PathBuf,
    start_jd: f64,
}

/// Random access to one DE version's ASCII file set.
pub struct DeProvider {
    directory: PathBuf,
    version: u16,
    header: DeHeader,
    index: Vec<FileIndexEntry>,
    /// LRU of parsed files, most recently used first. Soft cap of two
    /// resident files.
    resident: RwLock<Vec<LoadedFile>>,
}

const RESIDENT_CAP: usize = 2;

impl DeProvider {
    /// Opens a version rooted at `directory`, which must hold
    /// `header.VVV` and at least one `asc*.VVV` granule file.
    pub fn open(directory: impl AsRef<Path>, version: u16) -> Result<Self, TheoryError> {
        let directory = directory.as_ref().to_path_buf();
        let header_path = directory.join(format!("header.{version}"));
        let text = std::fs::read_to_string(&header_path).map_err(|e| TheoryError::FileUnavailable {
            path: header_path.display().to_string(),
            source: InputOutputError::from(e.kind()),
        })?;
        let header = DeHeader::parse(&text).map_err(|reason| TheoryError::FileMalformed {
            path: header_path.display().to_string(),
            reason,
        })?;

        let mut index = Vec::new();
        let suffix = format!(".{version}");
        let entries = std::fs::read_dir(&directory).map_err(|e| TheoryError::FileUnavailable {
            path: directory.display().to_string(),
            source: InputOutputError::from(e.kind()),
        })?;
        for entry in entries.flatten() {
            let path = entry.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };
            if !name.starts_with("asc") || !name.ends_with(&suffix) {
                continue;
            }
            if let Some(start_jd) = parse::peek_first_interval(&path) {
                index.push(FileIndexEntry { path, start_jd });
            }
        }
        index.sort_by(|a, b| a.start_jd.partial_cmp(&b.start_jd).unwrap());
        if index.is_empty() {
            return Err(TheoryError::FileUnavailable {
                path: directory.join(format!("asc*{suffix}")).display().to_string(),
                source: InputOutputError::IOUnknownError,
            });
        }

        Ok(Self {
            directory,
            version,
            header,
            index,
            resident: RwLock::new(Vec::new()),
        })
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn header(&self) -> &DeHeader {
        &self.header
    }

    /// Barycentric state (AU, AU/day) of the target, in the frame the
    /// integration is referred to: ICRF for the modern versions, the
    /// dynamical J2000 frame for DE200.
    pub fn barycentric_state(
        &self,
        version: u16,
        jd_tdb: f64,
        target: Target,
    ) -> Result<StateVector, TheoryError> {
        if version != self.version {
            return Err(TheoryError::FileUnavailable {
                path: format!("DE{version} (provider holds DE{})", self.version),
                source: InputOutputError::IOUnknownError,
            });
        }
        if let Some((lo, hi)) = version_span(version) {
            if !(lo..=hi).contains(&jd_tdb) {
                return Err(TheoryError::DateOutOfRange {
                    jd: jd_tdb,
                    theory: "DE numerical integration",
                });
            }
        }

        let frame = if version == 200 {
            CelestialFrame::DynamicalJ2000
        } else {
            CelestialFrame::Icrf
        };
        let state = |pos: Vector3, vel: Vector3| StateVector::new(pos, vel, frame, J2000);

        match target {
            Target::Ssb => Ok(state(Vector3::zeros(), Vector3::zeros())),
            Target::Earth => {
                let (emb_p, emb_v) = self.raw_body(jd_tdb, 2)?;
                let (moon_p, moon_v) = self.raw_body(jd_tdb, 9)?;
                let f = 1.0 / (1.0 + self.header.emrat);
                Ok(state(emb_p - moon_p * f, emb_v - moon_v * f))
            }
            Target::Moon => {
                // Stored geocentric; attach the Earth.
                let (emb_p, emb_v) = self.raw_body(jd_tdb, 2)?;
                let (moon_p, moon_v) = self.raw_body(jd_tdb, 9)?;
                let f = 1.0 / (1.0 + self.header.emrat);
                Ok(state(
                    emb_p - moon_p * f + moon_p,
                    emb_v - moon_v * f + moon_v,
                ))
            }
            Target::Emb => {
                let (p, v) = self.raw_body(jd_tdb, 2)?;
                Ok(state(p, v))
            }
            Target::Sun => {
                let (p, v) = self.raw_body(jd_tdb, 10)?;
                Ok(state(p, v))
            }
            Target::Pluto => {
                let (p, v) = self.raw_body(jd_tdb, 8)?;
                let offset = pluto::barycenter_to_center_au(jd_tdb);
                Ok(state(p + offset, v))
            }
            Target::Mercury => self.raw_body(jd_tdb, 0).map(|(p, v)| state(p, v)),
            Target::Venus => self.raw_body(jd_tdb, 1).map(|(p, v)| state(p, v)),
            Target::Mars => self.raw_body(jd_tdb, 3).map(|(p, v)| state(p, v)),
            Target::Jupiter => self.raw_body(jd_tdb, 4).map(|(p, v)| state(p, v)),
            Target::Saturn => self.raw_body(jd_tdb, 5).map(|(p, v)| state(p, v)),
            Target::Uranus => self.raw_body(jd_tdb, 6).map(|(p, v)| state(p, v)),
            Target::Neptune => self.raw_body(jd_tdb, 7).map(|(p, v)| state(p, v)),
            other => Err(TheoryError::UnknownBody { target: other }),
        }
    }

    /// The two nutation angles (dpsi, deps in radians) and their rates, as
    /// integrated by the DE model.
    pub fn nutation_angles(&self, jd_tdb: f64) -> Result<(f64, f64), TheoryError> {
        let values = self.interpolate(jd_tdb, 11, 2)?;
        Ok((values[0].0, values[1].0))
    }

    /// The three lunar libration Euler angles, radians.
    pub fn libration_angles(&self, jd_tdb: f64) -> Result<[f64; 3], TheoryError> {
        let values = self.interpolate(jd_tdb, 12, 3)?;
        Ok([values[0].0, values[1].0, values[2].0])
    }

    /// Position/velocity of a Cartesian body index, converted km -> AU with
    /// the header's AU.
    fn raw_body(&self, jd_tdb: f64, body: usize) -> Result<(Vector3, Vector3), TheoryError> {
        let values = self.interpolate(jd_tdb, body, 3)?;
        let au = self.header.au_km;
        Ok((
            Vector3::new(values[0].0, values[1].0, values[2].0) / au,
            Vector3::new(values[0].1, values[1].1, values[2].1) / au,
        ))
    }

    /// Chebyshev evaluation of `ndim` components of a body at jd:
    /// locate granule, locate sub-interval, evaluate value and derivative.
    fn interpolate(
        &self,
        jd_tdb: f64,
        body: usize,
        ndim: usize,
    ) -> Result<Vec<(f64, f64)>, TheoryError> {
        let (offset, ncoef, nsets) = self.header.layout[body];
        if ncoef == 0 || nsets == 0 {
            return Err(TheoryError::UnknownBody {
                target: Target::Nutation,
            });
        }

        self.with_record(jd_tdb, |record| {
            let start = record[0];
            let end = record[1];
            debug_assert!(jd_tdb >= start && jd_tdb <= end);
            let interval = end - start;
            let sub_dur = interval / nsets as f64;
            let sub = (((jd_tdb - start) / sub_dur) as usize + 1).min(nsets);
            let cheb_t =
                2.0 * (jd_tdb - (sub - 1) as f64 * sub_dur - start) / sub_dur - 1.0;
            let radius = sub_dur / 2.0;

            // Coefficients: the offset is a 1-based pointer counting the
            // two date entries; per sub-interval, ndim blocks of ncoef.
            let base = (offset - 1) + (sub - 1) * ndim * ncoef;
            let mut out = Vec::with_capacity(ndim);
            for axis in 0..ndim {
                let lo = base + axis * ncoef;
                let hi = lo + ncoef;
                let coeffs = record.get(lo..hi).ok_or_else(|| TheoryError::FileMalformed {
                    path: format!("DE{}", self.version),
                    reason: format!(
                        "coefficient block {lo}..{hi} beyond record of {} doubles",
                        record.len()
                    ),
                })?;
                let (val, deriv) =
                    chebyshev_eval(cheb_t, coeffs, radius).map_err(|source| {
                        TheoryError::TheoryMath { source }
                    })?;
                out.push((val, deriv));
            }
            Ok(out)
        })
    }

    /// Runs `f` on the granule record covering jd, loading and evicting
    /// files as needed.
    fn with_record<T>(
        &self,
        jd_tdb: f64,
        f: impl FnOnce(&[f64]) -> Result<T, TheoryError>,
    ) -> Result<T, TheoryError> {
        let path = self.file_covering(jd_tdb)?;

        let mut resident = self.resident.write().map_err(|_| TheoryError::FileUnavailable {
            path: path.display().to_string(),
            source: InputOutputError::IOUnknownError,
        })?;

        let pos = resident.iter().position(|file| file.path == path);
        let file = match pos {
            Some(idx) => {
                let file = resident.remove(idx);
                resident.insert(0, file);
                &resident[0]
            }
            None => {
                log::debug!("loading DE{} granule file {}", self.version, path.display());
                let loaded = parse::load_granule_file(&path, self.header.ncoeff)?;
                resident.insert(0, loaded);
                resident.truncate(RESIDENT_CAP);
                &resident[0]
            }
        };

        if jd_tdb < file.start_jd || jd_tdb > file.end_jd {
            return Err(TheoryError::DateOutOfRange {
                jd: jd_tdb,
                theory: "DE numerical integration",
            });
        }
        let record = file
            .records
            .iter()
            .find(|r| jd_tdb >= r[0] && jd_tdb <= r[1])
            .ok_or(TheoryError::DateOutOfRange {
                jd: jd_tdb,
                theory: "DE numerical integration",
            })?;
        f(record)
    }

    fn file_covering(&self, jd_tdb: f64) -> Result<PathBuf, TheoryError> {
        let mut candidate: Option<&FileIndexEntry> = None;
        for entry in &self.index {
            if entry.start_jd <= jd_tdb {
                candidate = Some(entry);
            } else {
                break;
            }
        }
        candidate.map(|e| e.path.clone()).ok_or(TheoryError::DateOutOfRange {
            jd: jd_tdb,
            theory: "DE numerical integration",
        })
    }
}

impl std::fmt::Debug for DeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeProvider")
            .field("version", &self.version)
            .field("directory", &self.directory)
            .field("files", &self.index.len())
            .finish()
    }
}

#[cfg(test)]
mod de_ut {
    use super::*;

    #[test]
    fn version_spans_cover_the_modern_era() {
        for v in [200, 403, 405, 406, 413, 414, 422, 424, 430] {
            let (lo, hi) = version_span(v).unwrap();
            assert!(lo < J2000 && hi > J2000, "DE{v} span excludes J2000");
        }
        assert!(version_span(999).is_none());
    }

    #[test]
    fn missing_directory_is_file_unavailable() {
        let err = DeProvider::open("/definitely/not/here", 405).unwrap_err();
        assert!(matches!(err, TheoryError::FileUnavailable { .. }));
    }
}

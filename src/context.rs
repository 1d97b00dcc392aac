/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The observatory: the resources a reduction needs (EOP table, loaded
//! theories) plus the per-call pipeline context.
//!
//! There is no process-wide mutable state. Everything mutable is either
//! owned by the per-call [`PipelineContext`] (matrix caches, warnings) or
//! sits behind the DE provider's internal lock (the granule-file LRU), so
//! parallel `ephemeris` calls are safe.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::bodies::Target;
use crate::cio::MatrixCache;
use crate::eop::{EarthOrientation, EopTable};
use crate::errors::{AlmagestResult, ReductionError, Warnings};
use crate::observer::Observer;
use crate::reduce::request::EphemRequest;
use crate::reduce::Ephemeris;
use crate::theories::{de::DeProvider, TheorySet};
use crate::time::Instant;

/// Cooperative cancellation: the pipeline polls this token between the
/// light-time iterations and ahead of each matrix-producing sub-step.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> Result<(), ReductionError> {
        if self.is_cancelled() {
            Err(ReductionError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// The long-lived compute context.
#[derive(Default)]
pub struct Observatory {
    pub eop: EopTable,
    pub theories: TheorySet,
}

impl Observatory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_eop(mut self, eop: EopTable) -> Self {
        self.eop = eop;
        self
    }

    pub fn with_de(mut self, provider: DeProvider) -> Self {
        self.theories.de = Some(provider);
        self
    }

    /// Computes one ephemeris record. Either the full record is produced
    /// or a single typed error is returned.
    pub fn ephemeris(
        &self,
        request: &EphemRequest,
        instant: Instant,
        observer: &Observer,
    ) -> AlmagestResult<Ephemeris> {
        self.ephemeris_with_cancel(request, instant, observer, &CancelToken::new())
    }

    pub fn ephemeris_with_cancel(
        &self,
        request: &EphemRequest,
        instant: Instant,
        observer: &Observer,
        cancel: &CancelToken,
    ) -> AlmagestResult<Ephemeris> {
        crate::reduce::run_pipeline(self, request, instant, observer, cancel)
    }

    /// Heliocentric ICRS position and velocity of the observer's site, AU
    /// and AU/day, through the fitted theory. TDB stands in for TT/UT1 in
    /// the site rotation; the difference is far below the site radius.
    pub fn heliocentric_observer(
        &self,
        jd_tdb: f64,
        observer: &Observer,
        warnings: &mut crate::errors::Warnings,
    ) -> Result<(crate::math::Vector3, crate::math::Vector3), crate::errors::TheoryError> {
        let earth = self.theories.barycentric_state(
            jd_tdb,
            crate::bodies::Target::Earth,
            crate::theories::Algorithm::Moshier,
            None,
            warnings,
        )?;
        let sun = self.theories.barycentric_state(
            jd_tdb,
            crate::bodies::Target::Sun,
            crate::theories::Algorithm::Moshier,
            None,
            warnings,
        )?;
        let m = crate::frames::to_icrs_j2000(earth.frame);
        let (site_pos, site_vel) = observer.geocentric_icrf_au(
            jd_tdb,
            &crate::time::JulianDate::from(jd_tdb),
            None,
            crate::prenut::ReductionMethod::Iau2006,
        );
        Ok((
            m * (earth.position() - sun.position()) + site_pos,
            m * (earth.velocity() - sun.velocity()) + site_vel,
        ))
    }
}

/// Per-call mutable state threaded through the reduction: resolved time
/// arguments, Earth orientation, warning sink and the single-entry matrix
/// caches keyed by exact TT bits.
pub struct PipelineContext<'a> {
    pub target: Target,
    pub observer: &'a Observer,
    pub cancel: &'a CancelToken,
    pub warnings: Warnings,
    /// TT of the observation
    pub tt: Instant,
    /// TDB of the observation
    pub tdb: Instant,
    /// UT1 of the observation
    pub ut1: Instant,
    /// UTC of the observation
    pub utc: Instant,
    pub earth_orientation: EarthOrientation,
    pub nutation_cache: MatrixCache,
    pub polar_motion_cache: MatrixCache,
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The reduction pipeline: from a theory-produced barycentric state to the
//! requested apparent, astrometric or geometric place.
//!
//! The chain runs RESOLVE, time scales, light time, deflection,
//! aberration, frame and equinox, nutation, polar motion, the observer
//! view, topocentric parallax and diurnal aberration, horizontal
//! coordinates with refraction, and finally the physical ephemeris fields.

pub mod aberration;
pub mod constellation;
pub mod deflection;
mod output;
pub mod refraction;
pub mod request;
pub mod risesettransit;

pub use output::{Ephemeris, RiseSetTransit};

use log::trace;

use crate::bodies::Target;
use crate::constants::{AU_KM, LIGHT_TIME_DAYS_PER_AU};
use crate::context::{CancelToken, Observatory, PipelineContext};
use crate::errors::{
    AlmagestError, AlmagestResult, ReductionError, TheoryError, Warnings,
};
use crate::frames::{self, CelestialFrame, StateVector};
use crate::math::rotation::{r1, r3};
use crate::math::{cartesian_to_spherical, Vector3};
use crate::observer::Observer;
use crate::prenut;
use crate::reduce::request::{CoordinateType, EphemRequest, ObserverOrigin};
use crate::theories::{Algorithm, MagnitudeModel};
use crate::time::{sidereal, Instant, TimeScale, TimeScaleConverter};

/// Light-time convergence: one microsecond, in days.
const LIGHT_TIME_TOL_DAYS: f64 = 1.0e-6 / 86_400.0;
const LIGHT_TIME_MAX_ITER: usize = 10;

/// Sea-level visual extinction coefficient, magnitudes per airmass.
const EXTINCTION_MAG_PER_AIRMASS: f64 = 0.28;

/// Relative airmass at an apparent elevation (Kasten & Young fit; stays
/// finite through the horizon).
fn airmass(elevation_rad: f64) -> f64 {
    let h_deg = elevation_rad.to_degrees().max(-1.0);
    1.0 / (elevation_rad.sin().max(0.0) + 0.50572 * (h_deg + 6.07995).powf(-1.6364)).max(1e-3)
}

pub(crate) fn run_pipeline(
    observatory: &Observatory,
    request: &EphemRequest,
    instant: Instant,
    observer: &Observer,
    cancel: &CancelToken,
) -> AlmagestResult<Ephemeris> {
    // ----- RESOLVE ---------------------------------------------------
    let target = request.target;
    if !target.is_physical() && !matches!(target, Target::Emb | Target::Ssb) {
        return Err(AlmagestError::Theory {
            action: "resolving the request",
            source: Box::new(TheoryError::UnknownBody { target }),
        });
    }
    if request.algorithm == Algorithm::Kepler && request.elements.is_none() {
        return Err(AlmagestError::Theory {
            action: "resolving the request",
            source: Box::new(TheoryError::InvalidAlgorithm {
                algorithm: request.algorithm,
                target,
            }),
        });
    }
    if request.origin == ObserverOrigin::Topocentric && !observer.mother_body.is_physical() {
        return Err(AlmagestError::Reduction {
            action: "resolving the request",
            source: ReductionError::ObserverNotOnPlanet {
                action: "a topocentric reduction",
            },
        });
    }

    let mut warnings = Warnings::default();

    // ----- Time scales ----------------------------------------------
    let eop_ref = if request.flags.correct_for_eop {
        Some(&observatory.eop)
    } else {
        None
    };
    let converter = TimeScaleConverter::new(eop_ref);
    let tt = converter.convert(instant, TimeScale::TT, &mut warnings);
    let tdb = converter.convert(instant, TimeScale::TDB, &mut warnings);
    let utc = converter.convert(instant, TimeScale::UTC, &mut warnings);
    let ut1 = if request.flags.correct_for_eop && !observatory.eop.covers(utc.jd_value()) {
        // Beyond the table: the long-term Delta T model carries UT1.
        let year = crate::time::julian_date_to_year(utc.jd_value());
        let dt = crate::time::delta_t_seconds(year);
        if !observatory.eop.is_empty() {
            warnings.push(format!(
                "UT1 from the long-term Delta T model ({dt:.1} s) outside the EOP table"
            ));
        }
        Instant::from_julian_date(tt.jd.add_seconds(-dt), TimeScale::UT1)
    } else {
        converter.convert(instant, TimeScale::UT1, &mut warnings)
    };

    let earth_orientation = if request.flags.correct_for_eop {
        if request.flags.correct_eop_for_diurnal_subdiurnal_tides {
            observatory.eop.obtain_with_tides(utc.jd_value(), &mut warnings)
        } else {
            observatory.eop.obtain(utc.jd_value(), &mut warnings)
        }
    } else {
        Default::default()
    };

    let mut ctx = PipelineContext {
        target,
        observer,
        cancel,
        warnings,
        tt,
        tdb,
        ut1,
        utc,
        earth_orientation,
        nutation_cache: Default::default(),
        polar_motion_cache: Default::default(),
    };

    compute(observatory, request, &mut ctx).map_err(|err| match err {
        PipelineFailure::Theory(source) => AlmagestError::Theory {
            action: "computing the ephemeris",
            source: Box::new(source),
        },
        PipelineFailure::Reduction(source) => AlmagestError::Reduction {
            action: "computing the ephemeris",
            source,
        },
    })
}

enum PipelineFailure {
    Theory(TheoryError),
    Reduction(ReductionError),
}

impl From<TheoryError> for PipelineFailure {
    fn from(e: TheoryError) -> Self {
        Self::Theory(e)
    }
}

impl From<ReductionError> for PipelineFailure {
    fn from(e: ReductionError) -> Self {
        Self::Reduction(e)
    }
}

/// Rotation taking the dispatcher's output frame onto ICRS at J2000,
/// honoring the DE200 frame-tie knob.
fn state_to_icrs(state: &StateVector, request: &EphemRequest) -> (Vector3, Vector3) {
    let m = if request.algorithm == Algorithm::De200 && request.flags.apply_de200_frame_tie {
        frames::to_icrs_j2000(CelestialFrame::Fk5) * frames::de200_to_fk5_tie()
    } else {
        frames::to_icrs_j2000(state.frame)
    };
    (m * state.position(), m * state.velocity())
}

fn compute(
    observatory: &Observatory,
    request: &EphemRequest,
    ctx: &mut PipelineContext<'_>,
) -> Result<Ephemeris, PipelineFailure> {
    let target = ctx.target;
    let jd_tdb = ctx.tdb.jd_value();
    let jd_tt = ctx.tt.jd_value();
    let method = request.method;

    // The Earth always comes from an analytical theory when the target
    // algorithm cannot produce it.
    let earth_algorithm = match request.algorithm {
        a if a.de_version().is_some() => a,
        Algorithm::Moshier | Algorithm::Series96 => request.algorithm,
        Algorithm::Vsop => Algorithm::Vsop,
        _ => Algorithm::Moshier,
    };

    let bary = |jd: f64, who: Target, w: &mut Warnings| -> Result<(Vector3, Vector3), TheoryError> {
        let algo = if who == target {
            request.algorithm
        } else {
            earth_algorithm
        };
        let state = observatory.theories.barycentric_state(
            jd,
            who,
            algo,
            request.elements.as_ref(),
            w,
        )?;
        Ok(state_to_icrs(&state, request))
    };

    // ----- TDB: first-order geocentric state ------------------------
    let mut w = std::mem::take(&mut ctx.warnings);
    let (earth_pos, earth_vel) = bary(jd_tdb, Target::Earth, &mut w)?;
    let (mut target_pos, mut target_vel) = bary(jd_tdb, target, &mut w)?;

    // Topocentric observer in the ICRF, for the light-time distance and
    // the parallax subtraction later.
    let eop_for_site = if request.flags.correct_for_polar_motion {
        Some(&ctx.earth_orientation)
    } else {
        None
    };
    let (site_pos, _site_vel) = match request.origin {
        ObserverOrigin::Topocentric => {
            ctx.observer
                .geocentric_icrf_au(jd_tt, &ctx.ut1.jd, eop_for_site, method)
        }
        ObserverOrigin::Geocentric => (Vector3::zeros(), Vector3::zeros()),
    };

    // ----- LIGHT_TIME ------------------------------------------------
    let mut tau_days = 0.0;
    if request.coordinates != CoordinateType::Geometric {
        for iteration in 0..LIGHT_TIME_MAX_ITER {
            ctx.cancel.check()?;
            let geo = target_pos - earth_pos;
            let topo = geo - site_pos;
            let tau_next = topo.norm() * LIGHT_TIME_DAYS_PER_AU;
            let converged = (tau_next - tau_days).abs() < LIGHT_TIME_TOL_DAYS;
            tau_days = tau_next;
            let (p, v) = bary(jd_tdb - tau_days, target, &mut w)?;
            target_pos = p;
            target_vel = v;
            if converged {
                trace!("light time converged to {tau_days} d after {iteration} iterations");
                break;
            }
        }
    }
    let mut geocentric = target_pos - earth_pos;
    let geometric_distance = (geocentric - site_pos).norm();

    // Heliocentric bookkeeping for the physical ephemeris fields.
    let (sun_pos, _) = bary(jd_tdb, Target::Sun, &mut w)?;
    let target_heliocentric = target_pos - sun_pos;
    let observer_heliocentric = earth_pos + site_pos - sun_pos;

    // ----- DEFLECTION ------------------------------------------------
    if request.coordinates == CoordinateType::Apparent {
        ctx.cancel.check()?;
        let deflect_by_sun = !(target == Target::Sun
            || (target == Target::Moon && ctx.observer.mother_body == Target::Earth));
        let mut deflectors: Vec<Target> = Vec::new();
        if deflect_by_sun {
            deflectors.push(Target::Sun);
        }
        if request.flags.prefer_precision {
            for body in deflection::EXTRA_DEFLECTORS {
                let observer_is_there = body == ctx.observer.mother_body;
                if body != target && !observer_is_there {
                    deflectors.push(body);
                }
            }
        }
        let distance = geocentric.norm();
        for deflector in deflectors {
            let mass = match deflector.reciprocal_mass() {
                Some(recip) if recip > 0.0 => 1.0 / recip,
                _ => continue,
            };
            // Deflector fetched at the ray's closest-approach time,
            // approximated by the deflector-to-observer light time.
            let (rough_pos, _) = bary(jd_tdb, deflector, &mut w)?;
            let lt = (rough_pos - earth_pos).norm() * LIGHT_TIME_DAYS_PER_AU;
            let (defl_pos, _) = bary(jd_tdb - lt.min(tau_days), deflector, &mut w)?;

            let e_vec = earth_pos - defl_pos;
            let em = e_vec.norm();
            if em < 1e-8 {
                continue;
            }
            let q_vec = target_pos - defl_pos;
            let p = geocentric.normalize();
            let q = q_vec.normalize();
            let e = e_vec.normalize();
            let deflected = deflection::deflect_one(mass, &p, &q, &e, em);
            geocentric = deflected * distance;
        }
    }

    // ----- ABERRATION ------------------------------------------------
    if request.coordinates != CoordinateType::Geometric && tau_days > 0.0 {
        ctx.cancel.check()?;
        // Annual aberration only; the spin term enters as diurnal
        // aberration in the topocentric step.
        geocentric = aberration::annual_aberration(&geocentric, &earth_vel);
    }

    // ----- GCRS snapshot ---------------------------------------------
    let gcrs_snapshot = geocentric;

    // ----- FRAME -----------------------------------------------------
    ctx.cancel.check()?;
    let frame_matrix = frames::conversion_matrix(CelestialFrame::Icrf, request.frame);
    let mut vector = frame_matrix * geocentric;
    let mut velocity = frame_matrix * (target_vel - earth_vel);
    let native_equinox = request.frame.native_equinox_jd();

    // ----- PRECESSION ------------------------------------------------
    let equinox_jd = request.equinox.resolve(jd_tt);
    if equinox_jd != native_equinox {
        ctx.cancel.check()?;
        let pm = prenut::precession_matrix(native_equinox, equinox_jd, method);
        vector = pm * vector;
        velocity = pm * velocity;
    }

    // ----- NUTATION --------------------------------------------------
    let apparent = request.coordinates == CoordinateType::Apparent;
    if apparent && ctx.observer.mother_body == Target::Earth {
        ctx.cancel.check()?;
        let nm = ctx
            .nutation_cache
            .get_or_insert_with(jd_tt, method, || prenut::nutation_matrix(jd_tt, method));
        vector = nm * vector;
        velocity = nm * velocity;
    }

    // Apparent sidereal time, used by polar motion, parallax and the
    // horizontal output.
    let (dpsi, _) = prenut::nutation_angles(jd_tt, method);
    let eps = prenut::mean_obliquity(jd_tt, method);
    let gast = sidereal::gast(&ctx.ut1.jd, &ctx.tt.jd, dpsi, eps);
    // On another mother body the prime-meridian angle plays the role of
    // Greenwich sidereal time.
    let lst = if ctx.observer.mother_body == Target::Earth {
        crate::math::norm_two_pi(gast + ctx.observer.longitude_rad)
    } else {
        match crate::physical::pole_and_meridian(ctx.observer.mother_body, jd_tdb) {
            Some((_, _, w)) => crate::math::norm_two_pi(w + ctx.observer.longitude_rad),
            None => crate::math::norm_two_pi(gast + ctx.observer.longitude_rad),
        }
    };

    // ----- POLAR_MOTION ----------------------------------------------
    if apparent
        && ctx.observer.mother_body == Target::Earth
        && request.flags.correct_for_polar_motion
    {
        ctx.cancel.check()?;
        let pm = ctx.polar_motion_cache.get_or_insert_with(jd_tt, method, || {
            crate::cio::polar_motion_matrix(jd_tt, &ctx.earth_orientation)
        });
        let wrap = r3(gast) * pm * r3(-gast);
        vector = wrap * vector;
        velocity = wrap * velocity;
    }

    // ----- OBSERVER_VIEW ---------------------------------------------
    if ctx.observer.mother_body != Target::Earth {
        if let Some((alpha0, delta0, _)) =
            crate::physical::pole_and_meridian(ctx.observer.mother_body, jd_tdb)
        {
            let m = r1(core::f64::consts::FRAC_PI_2 - delta0)
                * r3(alpha0 + core::f64::consts::FRAC_PI_2);
            vector = m * vector;
            velocity = m * velocity;
        }
    }

    // ----- TOPOCENTRIC -----------------------------------------------
    let mut diurnal = (0.0, 0.0);
    if request.origin == ObserverOrigin::Topocentric && ctx.observer.mother_body.is_physical() {
        let rho = ctx.observer.geocentric_radius_km() / AU_KM;
        let phi_p = ctx.observer.geocentric_latitude_rad();
        let (sphi, cphi) = phi_p.sin_cos();
        let (slst, clst) = lst.sin_cos();
        let offset = Vector3::new(rho * cphi * clst, rho * cphi * slst, rho * sphi);
        vector -= offset;

        if apparent {
            let (ra, dec, _) = cartesian_to_spherical(&vector);
            let re_km = ctx
                .observer
                .mother_body
                .equatorial_radius_km()
                .unwrap_or(ctx.observer.geocentric_radius_km());
            let rho_cos_phi = ctx.observer.geocentric_radius_km() / re_km * cphi;
            diurnal = aberration::diurnal_aberration(
                ra,
                dec,
                rho_cos_phi,
                re_km,
                ctx.observer.rotation_rate_rad_s(),
                lst,
            );
        }
    }

    // ----- Spherical output ------------------------------------------
    let (mut ra, mut dec, distance) = cartesian_to_spherical(&vector);
    ra = crate::math::norm_two_pi(ra + diurnal.0);
    dec = (dec + diurnal.1).clamp(-core::f64::consts::FRAC_PI_2, core::f64::consts::FRAC_PI_2);

    let mut record = Ephemeris::sentinel(target.name());
    record.right_ascension = ra;
    record.declination = dec;
    record.distance = distance;
    record.light_time_days = tau_days;
    record.gcrs_position = [gcrs_snapshot[0], gcrs_snapshot[1], gcrs_snapshot[2]];

    // ----- HORIZONTAL ------------------------------------------------
    if request.want_horizontal {
        let hour_angle = crate::math::norm_pm_pi(lst - ra);
        let (sphi, cphi) = ctx.observer.latitude_rad.sin_cos();
        let (sdec, cdec) = dec.sin_cos();
        let sin_alt = sphi * sdec + cphi * cdec * hour_angle.cos();
        let mut elevation = sin_alt.clamp(-1.0, 1.0).asin();
        let azimuth = crate::math::norm_two_pi(
            (hour_angle.sin()).atan2(hour_angle.cos() * sphi - sdec / cdec.max(1e-12) * cphi)
                + core::f64::consts::PI,
        );

        // ----- REFRACTION --------------------------------------------
        if apparent
            && request.flags.correct_for_refraction
            && ctx.observer.mother_body == Target::Earth
        {
            ctx.cancel.check()?;
            elevation = refraction::apparent_from_geometric(
                elevation,
                request.refraction_model,
                ctx.observer,
            )?;
        }

        record.azimuth = azimuth;
        record.elevation = elevation;
        record.paralactic_angle = hour_angle
            .sin()
            .atan2(ctx.observer.latitude_rad.tan() * dec.cos() - dec.sin() * hour_angle.cos());
    }

    // ----- Physical ephemeris ----------------------------------------
    if target.is_physical() {
        let radius_km = request.elements.and_then(|e| {
            if e.radius_km.is_finite() {
                Some(e.radius_km)
            } else {
                None
            }
        });
        let observer_to_target = geocentric - site_pos;
        let disc = crate::physical::disc_quantities(
            target,
            &observer_to_target,
            &target_heliocentric,
            &observer_heliocentric,
            radius_km,
        );
        record.angular_radius = disc.angular_radius;
        record.phase = disc.phase;
        record.phase_angle = disc.phase_angle;
        record.elongation = disc.elongation;
        record.defect_of_illumination = disc.defect_of_illumination;

        // Heliocentric ecliptic coordinates (J2000).
        let to_ecliptic = crate::theories::ecliptic_to_equatorial_j2000().transpose();
        let helio_ecl = to_ecliptic * target_heliocentric;
        let (hlon, hlat, hdist) = cartesian_to_spherical(&helio_ecl);
        record.heliocentric_longitude = hlon;
        record.heliocentric_latitude = hlat;
        record.heliocentric_distance = hdist;

        // Sub-points and rotational quantities.
        let sub_obs_dir = (-observer_to_target).normalize();
        let sub_sun_dir = (-target_heliocentric).normalize();
        if let Some((lon, lat)) = crate::physical::sub_point(target, jd_tdb - tau_days, &sub_obs_dir)
        {
            record.subobserver_longitude = lon;
            record.subobserver_latitude = lat;
        }
        if let Some((lon, lat)) = crate::physical::sub_point(target, jd_tdb - tau_days, &sub_sun_dir)
        {
            record.subsolar_longitude = lon;
            record.subsolar_latitude = lat;
        }
        if let Some(lons) =
            crate::physical::rotational_longitudes(target, jd_tdb - tau_days, &sub_obs_dir)
        {
            record.longitude_system_i = lons[0];
            record.longitude_system_ii = lons[1];
            record.longitude_system_iii = lons[2];
        }
        if let Some((pa, pd, _)) = crate::physical::pole_and_meridian(target, jd_tdb - tau_days) {
            record.north_pole_ra = crate::math::norm_two_pi(pa);
            record.north_pole_dec = pd;
        }

        // Magnitudes.
        let saturn_sin_b = if target == Target::Saturn {
            record.subobserver_latitude.sin()
        } else {
            0.0
        };
        let magnitude = match request.elements.as_ref().and_then(MagnitudeModel::from_elements) {
            Some(model) => Some(model.apparent(
                target_heliocentric.norm(),
                geometric_distance,
                disc.phase_angle,
            )),
            None => crate::physical::apparent_magnitude(
                target,
                target_heliocentric.norm(),
                geometric_distance,
                disc.phase_angle,
                saturn_sin_b,
            ),
        };
        if let Some(mut m) = magnitude {
            // Atmospheric extinction dims the target along its airmass.
            if request.flags.correct_for_extinction
                && request.want_horizontal
                && ctx.observer.mother_body == Target::Earth
                && record.elevation.is_finite()
                && record.elevation > 0.0
            {
                m += EXTINCTION_MAG_PER_AIRMASS * airmass(record.elevation);
            }
            record.magnitude = m;
            if disc.angular_radius > 0.0 {
                record.surface_magnitude =
                    crate::physical::surface_magnitude(m, disc.angular_radius, disc.phase);
            }
        } else {
            ctx.warnings
                .push(format!("no magnitude model applies to {target}"));
        }

        // Constellation from the geocentric ecliptic place.
        let geo_ecl = to_ecliptic * geocentric;
        let (glon, glat, _) = cartesian_to_spherical(&geo_ecl);
        record.constellation =
            constellation::zodiacal_constellation(glon, glat).map(str::to_string);
    }

    // ----- Rise/set/transit ------------------------------------------
    if request.want_horizontal && ctx.observer.mother_body == Target::Earth {
        let horizontal_parallax = (ctx.observer.geocentric_radius_km() / AU_KM
            / distance.max(1e-9))
        .min(1.0)
        .asin();
        let h0 = risesettransit::standard_altitude(
            target,
            record.angular_radius.max(0.0),
            horizontal_parallax,
        );
        record.rise_set_transit = Some(risesettransit::rise_set_transit(
            ra,
            dec,
            ctx.observer,
            ctx.utc.jd_value(),
            h0,
        ));
    }

    record.status = "OK".to_string();
    record.warnings = {
        let mut collected = std::mem::take(&mut ctx.warnings);
        collected.extend(w);
        collected
    };
    Ok(record)
}

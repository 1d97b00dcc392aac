/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Atmospheric refraction.
//!
//! Four models: the Bennett cotangent formula (optical and radio
//! variants), a two-layer numerical ray integration, and the two-constant
//! tan/tan^3 closed form fed by the meteorological refraction constants.
//! All models answer "refraction at this apparent elevation"; the
//! geometric-to-apparent direction is solved by secant iteration.

use crate::constants::DEG2RAD;
use crate::errors::ReductionError;
use crate::observer::Observer;
use crate::reduce::request::RefractionModel;

const INV_TOL_RAD: f64 = 5.0e-9;
const INV_MAX_ITER: usize = 50;

/// Refraction in radians at an APPARENT elevation (radians), for the given
/// model and site meteorology. Zero above the zenith guard or for
/// elevations below the model floor.
pub fn refraction_at_apparent(
    apparent_elevation_rad: f64,
    model: RefractionModel,
    site: &Observer,
) -> f64 {
    // Below -3 degrees the models are meaningless; clamp.
    let e = apparent_elevation_rad.max(-3.0 * DEG2RAD);
    if e >= 89.9 * DEG2RAD {
        return 0.0;
    }
    match model {
        RefractionModel::OpticalBennett => bennett(e, 7.31, 4.4) * meteo_scale(site),
        RefractionModel::RadioBennett => bennett(e, 5.9, 2.5) * radio_scale(site),
        RefractionModel::NumericalIntegration => integrate_ray(e, site),
        RefractionModel::YanOptical => two_term(e, site, 0.55),
        RefractionModel::YanRadio => two_term(e, site, 1.0e3),
    }
}

/// Bennett's cotangent formula: one arcminute times cot(E + a/(E + b)),
/// E in degrees.
fn bennett(apparent_elevation_rad: f64, a: f64, b: f64) -> f64 {
    let e_deg = apparent_elevation_rad / DEG2RAD;
    let arg = (e_deg + a / (e_deg + b)) * DEG2RAD;
    0.016_667 * DEG2RAD * (core::f64::consts::FRAC_PI_2 - arg).tan().abs()
}

/// Pressure/temperature scaling of the optical formula.
fn meteo_scale(site: &Observer) -> f64 {
    0.28 * site.pressure_mbar / (site.temperature_c + 273.0)
}

/// The radio variant scales with the radio refractivity, which also feels
/// the water vapour.
fn radio_scale(site: &Observer) -> f64 {
    let tk = site.temperature_c + 273.15;
    let pw = water_vapour_pressure(site);
    let n_radio = (77.6890e-6 * site.pressure_mbar - (6.3938e-6 - 0.375_463 / tk) * pw) / tk;
    let n_std = 77.6890e-6 * 1010.0 / 283.15;
    (n_radio / n_std).max(0.0)
}

fn water_vapour_pressure(site: &Observer) -> f64 {
    let t = site.temperature_c;
    let p = site.pressure_mbar;
    let r = site.humidity.clamp(0.0, 1.0);
    if p <= 0.0 {
        return 0.0;
    }
    let ps = 10f64.powf((0.7859 + 0.03477 * t) / (1.0 + 0.00412 * t))
        * (1.0 + p * (4.5e-6 + 6e-10 * t * t));
    r * ps / (1.0 - (1.0 - r) * ps / p)
}

/// The two-constant closed form dZ = A1 tan Z + A2 tan^3 Z with the
/// meteorological constants of the site (wavelength in micrometers;
/// values above 100 select the radio branch).
fn two_term(apparent_elevation_rad: f64, site: &Observer, wavelength_um: f64) -> f64 {
    let (a1, a2) = refraction_constants(
        site.pressure_mbar,
        site.temperature_c,
        site.humidity,
        wavelength_um,
    );
    // The tangent form diverges at the horizon; hold it at 15 degrees of
    // zenith distance margin.
    let z = (core::f64::consts::FRAC_PI_2 - apparent_elevation_rad).min(87.0 * DEG2RAD);
    let tz = z.tan();
    (a1 * tz + a2 * tz * tz * tz).max(0.0)
}

/// The A1/A2 refraction constants from pressure, temperature, humidity and
/// wavelength.
pub fn refraction_constants(phpa: f64, tc: f64, rh: f64, wl_um: f64) -> (f64, f64) {
    let optic = wl_um <= 100.0;
    let t = tc.clamp(-150.0, 200.0);
    let p = phpa.clamp(0.0, 10_000.0);
    let r = rh.clamp(0.0, 1.0);
    let w = wl_um.clamp(0.1, 1e6);

    let pw = if p > 0.0 {
        let ps = 10f64.powf((0.7859 + 0.03477 * t) / (1.0 + 0.00412 * t))
            * (1.0 + p * (4.5e-6 + 6e-10 * t * t));
        r * ps / (1.0 - (1.0 - r) * ps / p)
    } else {
        0.0
    };

    let tk = t + 273.15;
    let gamma = if optic {
        let wlsq = w * w;
        ((77.534_84e-6 + (4.391_08e-7 + 3.666e-9 / wlsq) / wlsq) * p - 11.2684e-6 * pw) / tk
    } else {
        (77.6890e-6 * p - (6.3938e-6 - 0.375_463 / tk) * pw) / tk
    };

    let mut beta = 4.4474e-6 * tk;
    if !optic {
        beta -= 0.0074 * pw * beta;
    }

    (gamma * (1.0 - beta), -gamma * (beta - gamma / 2.0))
}

/// Two-layer numerical ray integration: a polytropic troposphere to the
/// 11 km tropopause, an isothermal stratosphere to the 80 km ceiling.
/// Simpson's rule with interval doubling from 16 sub-intervals until the
/// result settles below 1e-9 rad.
fn integrate_ray(apparent_elevation_rad: f64, site: &Observer) -> f64 {
    const TROPOPAUSE_KM: f64 = 11.0;
    const CEILING_KM: f64 = 80.0;
    const LAPSE_K_PER_KM: f64 = 6.5;

    let r0 = site.geocentric_radius_km();
    let t0 = site.temperature_c + 273.15;
    let p0 = site.pressure_mbar;

    // Surface refractivity from the meteorological constants.
    let (a1, _) = refraction_constants(p0, site.temperature_c, site.humidity, 0.55);
    let n0_minus_1 = a1; // gamma*(1-beta) ~ n-1 to first order
    let t_tropopause = t0 - LAPSE_K_PER_KM * TROPOPAUSE_KM;
    // Polytropic exponent for hydrostatic equilibrium.
    let poly = 34.16 / LAPSE_K_PER_KM - 1.0;
    // Stratosphere scale height, km.
    let h_scale = t_tropopause / 34.16;

    // n(h) - 1, proportional to density.
    let refractivity = |h_km: f64| -> f64 {
        if h_km <= TROPOPAUSE_KM {
            let t = t0 - LAPSE_K_PER_KM * h_km;
            n0_minus_1 * (t / t0).powf(poly)
        } else {
            let at_tropopause = n0_minus_1 * (t_tropopause / t0).powf(poly);
            at_tropopause * (-(h_km - TROPOPAUSE_KM) / h_scale).exp()
        }
    };
    let n_of = |h_km: f64| 1.0 + refractivity(h_km);
    let dndh = |h_km: f64| -> f64 {
        let dh = 1e-3;
        (refractivity(h_km + dh) - refractivity(h_km - dh)) / (2.0 * dh)
    };

    // Zenith distance, held at the 93 degree split for depressed horizons.
    let z0 = (core::f64::consts::FRAC_PI_2 - apparent_elevation_rad).min(93.0 * DEG2RAD);
    let n_surface = n_of(0.0);
    // Refractive invariant along the ray.
    let k = n_surface * r0 * z0.sin();

    // dR = -tan(zeta) dn / n with sin(zeta) = k / (n r). Near the horizon
    // the integrand carries an inverse-square-root turning point at the
    // site, so integrate over x = sqrt(h - h_lo) per layer.
    let integrand = |h_km: f64| -> f64 {
        let n = n_of(h_km);
        let r = r0 + h_km;
        let nr = n * r;
        let denom = (nr * nr - k * k).max(1e-12).sqrt();
        (k / denom) * dndh(h_km) / n
    };

    let simpson = |h_lo: f64, h_hi: f64, steps: usize| -> f64 {
        let x_hi = (h_hi - h_lo).sqrt();
        let dx = x_hi / steps as f64;
        let g = |x: f64| integrand(h_lo + x * x) * 2.0 * x;
        let mut sum = g(0.0) + g(x_hi);
        for i in 1..steps {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * g(i as f64 * dx);
        }
        sum * dx / 3.0
    };

    let mut steps = 16;
    let mut total = simpson(0.0, TROPOPAUSE_KM, steps) + simpson(TROPOPAUSE_KM, CEILING_KM, steps);
    loop {
        steps *= 2;
        let refined =
            simpson(0.0, TROPOPAUSE_KM, steps) + simpson(TROPOPAUSE_KM, CEILING_KM, steps);
        if (refined - total).abs() < 1e-9 || steps >= 8192 {
            total = refined;
            break;
        }
        total = refined;
    }
    (-total).max(0.0)
}

/// Geometric (in vacuo) elevation from an apparent one: direct subtraction
/// of the model refraction.
pub fn geometric_from_apparent(
    apparent_elevation_rad: f64,
    model: RefractionModel,
    site: &Observer,
) -> f64 {
    apparent_elevation_rad - refraction_at_apparent(apparent_elevation_rad, model, site)
}

/// Apparent elevation from a geometric one, by secant iteration on the
/// model (50 iterations, 5e-9 rad).
pub fn apparent_from_geometric(
    geometric_elevation_rad: f64,
    model: RefractionModel,
    site: &Observer,
) -> Result<f64, ReductionError> {
    let f = |app: f64| geometric_from_apparent(app, model, site) - geometric_elevation_rad;
    let mut x0 = geometric_elevation_rad;
    let mut x1 = geometric_elevation_rad + refraction_at_apparent(geometric_elevation_rad, model, site);
    let mut f0 = f(x0);
    let mut f1 = f(x1);
    for _ in 0..INV_MAX_ITER {
        if (x1 - x0).abs() < INV_TOL_RAD {
            return Ok(x1);
        }
        if (f1 - f0).abs() < 1e-18 {
            return Ok(x1);
        }
        let x2 = x1 - f1 * (x1 - x0) / (f1 - f0);
        x0 = x1;
        f0 = f1;
        x1 = x2;
        f1 = f(x1);
    }
    Err(ReductionError::RefractionNoConvergence { iter: INV_MAX_ITER })
}

#[cfg(test)]
mod refraction_ut {
    use super::*;

    fn site() -> Observer {
        let mut s = Observer::on_earth(0.7, 0.0, 0.0);
        s.pressure_mbar = 1013.0;
        s.temperature_c = 10.0;
        s
    }

    #[test]
    fn horizon_refraction_is_about_half_a_degree() {
        let r = refraction_at_apparent(0.0, RefractionModel::OpticalBennett, &site());
        let arcmin = r / DEG2RAD * 60.0;
        assert!((arcmin - 34.0).abs() < 5.0, "horizon refraction {arcmin}'");
    }

    #[test]
    fn refraction_decreases_with_elevation() {
        let s = site();
        let lo = refraction_at_apparent(5.0 * DEG2RAD, RefractionModel::OpticalBennett, &s);
        let hi = refraction_at_apparent(45.0 * DEG2RAD, RefractionModel::OpticalBennett, &s);
        assert!(lo > hi && hi > 0.0);
        // About one arcminute at 45 degrees.
        assert!((hi / DEG2RAD * 60.0 - 0.96).abs() < 0.3);
    }

    #[test]
    fn bennett_round_trip_to_5e9() {
        let s = site();
        for geo_deg in [-1.0, 0.5, 2.0, 10.0, 45.0, 89.0] {
            let geo = geo_deg * DEG2RAD;
            let app =
                apparent_from_geometric(geo, RefractionModel::OpticalBennett, &s).unwrap();
            let back = geometric_from_apparent(app, RefractionModel::OpticalBennett, &s);
            assert!(
                (back - geo).abs() < 5.0e-9,
                "round trip miss {} at {geo_deg} deg",
                (back - geo).abs()
            );
        }
    }

    #[test]
    fn scenario_half_degree_rises_above_one() {
        // Geometric 0.5 deg, P = 1013 mbar, T = 10 C: the apparent place
        // sits near one degree.
        let s = site();
        let app = apparent_from_geometric(0.5 * DEG2RAD, RefractionModel::OpticalBennett, &s)
            .unwrap();
        let app_deg = app / DEG2RAD;
        assert!(app_deg > 0.85 && app_deg < 1.15, "apparent {app_deg} deg");
    }

    #[test]
    fn numerical_model_matches_bennett_at_altitude() {
        let s = site();
        for e_deg in [10.0, 30.0, 60.0] {
            let e = e_deg * DEG2RAD;
            let bennett = refraction_at_apparent(e, RefractionModel::OpticalBennett, &s);
            let numerical =
                refraction_at_apparent(e, RefractionModel::NumericalIntegration, &s);
            let diff_arcsec = (bennett - numerical).abs() / DEG2RAD * 3600.0;
            assert!(diff_arcsec < 20.0, "{diff_arcsec} arcsec apart at {e_deg}");
        }
    }

    #[test]
    fn numerical_round_trip_within_1e8() {
        let s = site();
        for geo_deg in [-2.0, 0.0, 5.0, 30.0] {
            let geo = geo_deg * DEG2RAD;
            let app =
                apparent_from_geometric(geo, RefractionModel::NumericalIntegration, &s).unwrap();
            let back = geometric_from_apparent(app, RefractionModel::NumericalIntegration, &s);
            assert!((back - geo).abs() < 1e-8);
        }
    }

    #[test]
    fn radio_exceeds_optical_near_horizon() {
        let mut s = site();
        s.humidity = 0.8;
        let optical = refraction_at_apparent(1.0 * DEG2RAD, RefractionModel::OpticalBennett, &s);
        let radio = refraction_at_apparent(1.0 * DEG2RAD, RefractionModel::RadioBennett, &s);
        assert!(radio > optical * 0.9);
    }

    #[test]
    fn yan_closed_form_is_sane() {
        let s = site();
        let r = refraction_at_apparent(20.0 * DEG2RAD, RefractionModel::YanOptical, &s);
        let arcsec = r / DEG2RAD * 3600.0;
        assert!(arcsec > 100.0 && arcsec < 200.0, "{arcsec} arcsec at 20 deg");
    }
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Keplerian propagation of osculating elements and orbit determination.
//!
//! The anomaly solvers branch on eccentricity: Newton for the ellipse and
//! the hyperbola, Barker's equation (fixed point, then closed form) for the
//! parabolic band. All iterate to 1e-15 within 25 rounds.

use crate::bodies::Target;
use crate::constants::{GAUSS_K, J2000};
use crate::errors::TheoryError;
use crate::frames::CelestialFrame;
use crate::math::rotation::{r1, r3};
use crate::math::{Matrix3, Vector3};
use crate::theories::{HeliocentricState, MagnitudeLaw, OrbitalElements};

const MAX_ITER: usize = 25;
const TOL: f64 = 1e-15;

/// Solves Kepler's equation M = E - e sin E by Newton iteration, starting
/// from E = M + 0.85 e sign(sin M).
pub fn solve_elliptic(mean_anomaly: f64, e: f64) -> Result<f64, TheoryError> {
    let m = crate::math::norm_pm_pi(mean_anomaly);
    let mut big_e = m + 0.85 * e * m.sin().signum();
    for _ in 0..MAX_ITER {
        let f = big_e - e * big_e.sin() - m;
        let fp = 1.0 - e * big_e.cos();
        let delta = f / fp;
        big_e -= delta;
        if delta.abs() < TOL {
            return Ok(big_e);
        }
    }
    Err(TheoryError::NoConvergence {
        iter: MAX_ITER,
        action: "solving Kepler's equation (elliptic)",
    })
}

/// Solves Barker's equation s + s^3/3 = B for s = tan(nu/2) by fixed-point
/// iteration with the Cardano closed form as fallback.
pub fn solve_barker(b: f64) -> f64 {
    let mut s = b;
    for _ in 0..MAX_ITER {
        let next = b - next_cube_term(s);
        if (next - s).abs() < TOL {
            return next;
        }
        s = next;
    }
    // Closed form: s^3 + 3 s - 3 B = 0.
    let w = 1.5 * b;
    let u = (w + (w * w + 1.0).sqrt()).cbrt();
    u - 1.0 / u
}

fn next_cube_term(s: f64) -> f64 {
    s * s * s / 3.0
}

/// Solves the hyperbolic Kepler equation M = e sinh H - H by Newton, with
/// the cube-root fallback initial guess on non-convergence.
pub fn solve_hyperbolic(mean_anomaly: f64, e: f64) -> Result<f64, TheoryError> {
    for guess in [
        (mean_anomaly / e).asinh(),
        mean_anomaly.signum() * (6.0 * mean_anomaly.abs()).cbrt(),
    ] {
        let mut h = guess;
        for _ in 0..MAX_ITER {
            let f = e * h.sinh() - h - mean_anomaly;
            let fp = e * h.cosh() - 1.0;
            let delta = f / fp;
            h -= delta;
            if delta.abs() < TOL * (1.0 + h.abs()) {
                return Ok(h);
            }
        }
    }
    Err(TheoryError::NoConvergence {
        iter: MAX_ITER,
        action: "solving Kepler's equation (hyperbolic)",
    })
}

/// The perifocal-to-ecliptic rotation: the 3-1-3 Euler sequence
/// R3(-node) R1(-incl) R3(-argp).
pub fn perifocal_to_ecliptic(node: f64, incl: f64, argp: f64) -> Matrix3 {
    r3(-node) * r1(-incl) * r3(-argp)
}

/// Position and velocity at `jd_tdb` in the ecliptic frame and equinox the
/// elements are referred to, AU and AU/day, relative to the central body.
pub fn state(orbit: &OrbitalElements, jd_tdb: f64) -> Result<HeliocentricState, TheoryError> {
    let e = orbit.eccentricity;
    if e < 0.0 {
        return Err(TheoryError::InvalidElements {
            reason: "negative eccentricity",
        });
    }
    let mu = GAUSS_K
        * GAUSS_K
        * (1.0
            + if orbit.reciprocal_mass.is_finite() && orbit.reciprocal_mass > 0.0 {
                1.0 / orbit.reciprocal_mass
            } else {
                0.0
            });

    // True anomaly and radius by conic branch.
    let near_parabolic = (e - 1.0).abs() < 1e-6;
    let (nu, r) = if near_parabolic {
        let q = orbit.perihelion_distance_au;
        if !(q.is_finite() && q > 0.0) {
            return Err(TheoryError::InvalidElements {
                reason: "parabolic orbit without a perihelion distance",
            });
        }
        let dt = jd_tdb - orbit.perihelion_time_jd;
        let b = (mu / (2.0 * q * q * q)).sqrt() * dt;
        let s = solve_barker(b);
        let nu = 2.0 * s.atan();
        (nu, q * (1.0 + s * s))
    } else if e < 1.0 {
        let a = if orbit.semimajor_axis_au.is_finite() && orbit.semimajor_axis_au > 0.0 {
            orbit.semimajor_axis_au
        } else {
            orbit.perihelion_distance_au / (1.0 - e)
        };
        let n = orbit.mean_motion_or_derived();
        let m = orbit.mean_anomaly_rad + n * (jd_tdb - orbit.epoch_jd);
        let big_e = match solve_elliptic(m, e) {
            Ok(v) => v,
            // The near-parabolic band can defeat Newton; Barker is the
            // documented fallback there.
            Err(err) if e >= 0.98 => return barker_fallback(orbit, jd_tdb, mu).ok_or(err),
            Err(err) => return Err(err),
        };
        let nu = 2.0 * ((1.0 + e).sqrt() * (big_e / 2.0).sin())
            .atan2((1.0 - e).sqrt() * (big_e / 2.0).cos());
        (nu, a * (1.0 - e * big_e.cos()))
    } else {
        let a = if orbit.semimajor_axis_au.is_finite() && orbit.semimajor_axis_au < 0.0 {
            orbit.semimajor_axis_au
        } else {
            orbit.perihelion_distance_au / (1.0 - e)
        };
        let n = (mu / (-a).powi(3)).sqrt();
        let m = if orbit.perihelion_time_jd.is_finite() {
            n * (jd_tdb - orbit.perihelion_time_jd)
        } else {
            orbit.mean_anomaly_rad + n * (jd_tdb - orbit.epoch_jd)
        };
        let h = match solve_hyperbolic(m, e) {
            Ok(v) => v,
            Err(err) if e <= 1.1 => return barker_fallback(orbit, jd_tdb, mu).ok_or(err),
            Err(err) => return Err(err),
        };
        let nu = 2.0 * ((e + 1.0).sqrt() * (h / 2.0).sinh())
            .atan2((e - 1.0).sqrt() * (h / 2.0).cosh());
        (nu, a * (1.0 - e * h.cosh()))
    };

    // Semi-latus rectum covers every branch.
    let p = if near_parabolic {
        2.0 * orbit.perihelion_distance_au
    } else {
        let a = if e < 1.0 {
            if orbit.semimajor_axis_au.is_finite() && orbit.semimajor_axis_au > 0.0 {
                orbit.semimajor_axis_au
            } else {
                orbit.perihelion_distance_au / (1.0 - e)
            }
        } else if orbit.semimajor_axis_au.is_finite() && orbit.semimajor_axis_au < 0.0 {
            orbit.semimajor_axis_au
        } else {
            orbit.perihelion_distance_au / (1.0 - e)
        };
        a * (1.0 - e * e)
    };

    let (snu, cnu) = nu.sin_cos();
    let pos_pf = Vector3::new(r * cnu, r * snu, 0.0);
    let vfac = (mu / p).sqrt();
    let vel_pf = Vector3::new(-vfac * snu, vfac * (e + cnu), 0.0);

    let m_rot = perifocal_to_ecliptic(
        orbit.ascending_node_rad,
        orbit.inclination_rad,
        orbit.arg_perihelion_rad,
    );
    Ok(HeliocentricState {
        pos_au: m_rot * pos_pf,
        vel_au_d: m_rot * vel_pf,
    })
}

fn barker_fallback(
    orbit: &OrbitalElements,
    jd_tdb: f64,
    mu: f64,
) -> Option<HeliocentricState> {
    let q = orbit.perihelion_distance_au;
    if !(q.is_finite() && q > 0.0 && orbit.perihelion_time_jd.is_finite()) {
        return None;
    }
    let dt = jd_tdb - orbit.perihelion_time_jd;
    let b = (mu / (2.0 * q * q * q)).sqrt() * dt;
    let s = solve_barker(b);
    let nu = 2.0 * s.atan();
    let r = q * (1.0 + s * s);
    let p = 2.0 * q;
    let (snu, cnu) = nu.sin_cos();
    let vfac = (mu / p).sqrt();
    let m_rot = perifocal_to_ecliptic(
        orbit.ascending_node_rad,
        orbit.inclination_rad,
        orbit.arg_perihelion_rad,
    );
    Some(HeliocentricState {
        pos_au: m_rot * Vector3::new(r * cnu, r * snu, 0.0),
        vel_au_d: m_rot * Vector3::new(-vfac * snu, vfac * (1.0 + cnu), 0.0),
    })
}

/// Recovers osculating elements from a position/velocity pair, both in the
/// ecliptic frame of some equinox (AU, AU/day), around a central body of
/// reciprocal mass `recip_mass` plus the Sun.
pub fn elements_from_state_and_mass(
    pos: Vector3,
    vel: Vector3,
    jd_tdb: f64,
    recip_mass: f64,
) -> Result<OrbitalElements, TheoryError> {
    let mu = GAUSS_K
        * GAUSS_K
        * (1.0
            + if recip_mass.is_finite() && recip_mass > 0.0 {
                1.0 / recip_mass
            } else {
                0.0
            });
    let r = pos.norm();
    let v2 = vel.norm_squared();
    if r < f64::EPSILON {
        return Err(TheoryError::InvalidElements {
            reason: "zero-length position vector",
        });
    }
    let h = pos.cross(&vel);
    let hn = h.norm();
    if hn < f64::EPSILON {
        return Err(TheoryError::InvalidElements {
            reason: "rectilinear orbit (zero angular momentum)",
        });
    }

    let e_vec = ((v2 - mu / r) * pos - pos.dot(&vel) * vel) / mu;
    let e = e_vec.norm();
    let energy = v2 / 2.0 - mu / r;
    let a = if energy.abs() < 1e-14 {
        f64::INFINITY
    } else {
        -mu / (2.0 * energy)
    };
    let p = hn * hn / mu;
    let q = p / (1.0 + e);

    let incl = (h[2] / hn).acos();
    let node_vec = Vector3::new(-h[1], h[0], 0.0);
    let node = if node_vec.norm() < f64::EPSILON {
        0.0
    } else {
        crate::math::norm_two_pi(node_vec[1].atan2(node_vec[0]))
    };
    let argp = if e < 1e-12 {
        0.0
    } else if node_vec.norm() < f64::EPSILON {
        crate::math::norm_two_pi(e_vec[1].atan2(e_vec[0]))
    } else {
        let cos_w = node_vec.dot(&e_vec) / (node_vec.norm() * e);
        let w = cos_w.clamp(-1.0, 1.0).acos();
        if e_vec[2] < 0.0 {
            crate::math::norm_two_pi(-w)
        } else {
            w
        }
    };

    // True anomaly, then the mean anomaly of the matching branch.
    let cos_nu = (e_vec.dot(&pos) / (e * r)).clamp(-1.0, 1.0);
    let nu = if pos.dot(&vel) >= 0.0 {
        cos_nu.acos()
    } else {
        crate::math::norm_two_pi(-cos_nu.acos())
    };
    let (mean_anomaly, mean_motion, tp) = if e < 1.0 {
        let big_e = 2.0 * ((1.0 - e).sqrt() * (nu / 2.0).sin()).atan2((1.0 + e).sqrt() * (nu / 2.0).cos());
        let m = big_e - e * big_e.sin();
        let n = (mu / a.powi(3)).sqrt();
        (crate::math::norm_two_pi(m), n, jd_tdb - m / n)
    } else {
        let hh = 2.0 * (((e - 1.0) / (e + 1.0)).sqrt() * (nu / 2.0).tan()).atanh();
        let m = e * hh.sinh() - hh;
        let n = (mu / (-a).powi(3)).sqrt();
        (m, n, jd_tdb - m / n)
    };

    Ok(OrbitalElements {
        semimajor_axis_au: a,
        eccentricity: e,
        inclination_rad: incl,
        ascending_node_rad: node,
        arg_perihelion_rad: argp,
        mean_anomaly_rad: mean_anomaly,
        mean_motion_rad_d: mean_motion,
        epoch_jd: jd_tdb,
        equinox_jd: J2000,
        frame: CelestialFrame::DynamicalJ2000,
        perihelion_distance_au: q,
        perihelion_time_jd: tp,
        absolute_magnitude: f64::NAN,
        magnitude_slope: f64::NAN,
        magnitude_law: MagnitudeLaw::None,
        central_body: Target::Sun,
        valid_from_jd: f64::NAN,
        valid_to_jd: f64::NAN,
        radius_km: f64::NAN,
        reciprocal_mass: if recip_mass.is_finite() {
            recip_mass
        } else {
            f64::INFINITY
        },
    })
}

/// The sector-to-triangle ratio for Gauss's two-position problem.
///
/// `m` and `l` are the classical auxiliaries; the ratio is found by secant
/// iteration on eta = 1 + (m / eta^2) W(m / eta^2 - l).
fn sector_triangle_ratio(m: f64, l: f64) -> Result<f64, TheoryError> {
    fn w_of(g: f64) -> f64 {
        if g.abs() < 0.1 {
            // Series expansion about the parabola.
            let mut w = 4.0 / 3.0;
            let mut term = 4.0 / 3.0;
            let mut gp = 1.0;
            for k in 1..25 {
                gp *= g;
                term *= (2.0 * k as f64 + 4.0) / (2.0 * k as f64 + 3.0);
                w += term * gp;
            }
            w
        } else if g > 0.0 {
            let gam = 2.0 * g.sqrt().min(1.0).asin();
            (2.0 * gam - (2.0 * gam).sin()) / gam.sin().powi(3)
        } else {
            let gam = 2.0 * (-g).sqrt().asinh();
            ((2.0 * gam).sinh() - 2.0 * gam) / gam.sinh().powi(3)
        }
    }

    let mut eta0 = 0.9;
    let mut eta1 = 1.1;
    let f = |eta: f64| 1.0 + (m / (eta * eta)) * w_of(m / (eta * eta) - l) - eta;
    let mut f0 = f(eta0);
    let mut f1 = f(eta1);
    for _ in 0..MAX_ITER {
        if (f1 - f0).abs() < 1e-18 {
            break;
        }
        let eta2 = eta1 - f1 * (eta1 - eta0) / (f1 - f0);
        eta0 = eta1;
        f0 = f1;
        eta1 = eta2;
        f1 = f(eta1);
        if (eta1 - eta0).abs() < 1e-12 {
            return Ok(eta1);
        }
    }
    Err(TheoryError::NoConvergence {
        iter: MAX_ITER,
        action: "sector/triangle ratio iteration",
    })
}

/// Orbit from two heliocentric positions and their times (Gauss): solves
/// the sector/triangle ratio, then reads the conic through both points.
pub fn elements_from_two_positions(
    jd1: f64,
    jd2: f64,
    r1_vec: Vector3,
    r2_vec: Vector3,
) -> Result<OrbitalElements, TheoryError> {
    let tau = GAUSS_K * (jd2 - jd1);
    if tau.abs() < 1e-12 {
        return Err(TheoryError::InvalidElements {
            reason: "two-position orbit needs distinct times",
        });
    }
    let r1 = r1_vec.norm();
    let r2 = r2_vec.norm();
    let cos_dnu = (r1_vec.dot(&r2_vec) / (r1 * r2)).clamp(-1.0, 1.0);
    let dnu = cos_dnu.acos();
    if dnu.sin().abs() < 1e-12 {
        return Err(TheoryError::InvalidElements {
            reason: "two-position orbit needs a nonzero transfer angle",
        });
    }

    let kappa = (2.0 * (r1 * r2 + r1_vec.dot(&r2_vec))).sqrt();
    let m = tau * tau / kappa.powi(3);
    let l = (r1 + r2) / (2.0 * kappa) - 0.5;
    let eta = sector_triangle_ratio(m, l)?;

    // Specific angular momentum from the swept sector, then the conic.
    let triangle = 0.5 * r1 * r2 * dnu.sin();
    let h = 2.0 * eta * triangle / (jd2 - jd1);
    let p = h * h / (GAUSS_K * GAUSS_K);
    let ecos1 = p / r1 - 1.0;
    let ecos2 = p / r2 - 1.0;
    let esin1 = (ecos1 * dnu.cos() - ecos2) / dnu.sin();
    let e = (ecos1 * ecos1 + esin1 * esin1).sqrt();
    let nu1 = esin1.atan2(ecos1);

    // Orbit plane from the two positions.
    let w_hat = r1_vec.cross(&r2_vec).normalize();
    let incl = (w_hat[2]).acos();
    let node = crate::math::norm_two_pi(w_hat[0].atan2(-w_hat[1]));
    // Argument of latitude of the first position.
    let node_hat = Vector3::new(node.cos(), node.sin(), 0.0);
    let u1 = (r1_vec.dot(&node_hat) / r1).clamp(-1.0, 1.0).acos();
    let u1 = if r1_vec[2] < 0.0 {
        crate::math::norm_two_pi(-u1)
    } else {
        u1
    };
    let argp = crate::math::norm_two_pi(u1 - nu1);

    let a = p / (1.0 - e * e);
    let big_e = 2.0 * ((1.0 - e).sqrt() * (nu1 / 2.0).sin()).atan2((1.0 + e).sqrt() * (nu1 / 2.0).cos());
    let m_anom = big_e - e * big_e.sin();
    let n = (GAUSS_K * GAUSS_K / a.powi(3)).sqrt();

    Ok(OrbitalElements {
        semimajor_axis_au: a,
        eccentricity: e,
        inclination_rad: incl,
        ascending_node_rad: node,
        arg_perihelion_rad: argp,
        mean_anomaly_rad: crate::math::norm_two_pi(m_anom),
        mean_motion_rad_d: n,
        epoch_jd: jd1,
        equinox_jd: J2000,
        frame: CelestialFrame::DynamicalJ2000,
        perihelion_distance_au: a * (1.0 - e),
        perihelion_time_jd: jd1 - m_anom / n,
        absolute_magnitude: f64::NAN,
        magnitude_slope: f64::NAN,
        magnitude_law: MagnitudeLaw::None,
        central_body: Target::Sun,
        valid_from_jd: f64::NAN,
        valid_to_jd: f64::NAN,
        radius_km: f64::NAN,
        reciprocal_mass: f64::INFINITY,
    })
}

/// Angles-only preliminary orbit from three observations (the Gauss
/// method): unit line-of-sight directions, heliocentric observer positions
/// (ecliptic J2000, AU) and TDB dates, middle observation determining the
/// epoch.
pub fn elements_from_three_angles(
    los: [Vector3; 3],
    observer: [Vector3; 3],
    jd: [f64; 3],
) -> Result<OrbitalElements, TheoryError> {
    let mu = GAUSS_K * GAUSS_K;
    let tau1 = GAUSS_K * (jd[0] - jd[1]);
    let tau3 = GAUSS_K * (jd[2] - jd[1]);
    let tau = tau3 - tau1;

    let p1 = los[1].cross(&los[2]);
    let p2 = los[0].cross(&los[2]);
    let p3 = los[0].cross(&los[1]);
    let d0 = los[0].dot(&p1);
    if d0.abs() < 1e-12 {
        return Err(TheoryError::InvalidElements {
            reason: "coplanar lines of sight",
        });
    }
    let d = [
        [observer[0].dot(&p1), observer[0].dot(&p2), observer[0].dot(&p3)],
        [observer[1].dot(&p1), observer[1].dot(&p2), observer[1].dot(&p3)],
        [observer[2].dot(&p1), observer[2].dot(&p2), observer[2].dot(&p3)],
    ];

    let a1 = tau3 / tau;
    let a3 = -tau1 / tau;
    let a1u = tau3 * (tau * tau - tau3 * tau3) / (6.0 * tau);
    let a3u = -tau1 * (tau * tau - tau1 * tau1) / (6.0 * tau);

    // rho2 = A + B * mu / r2^3, from the coplanarity condition dotted with
    // rho1 x rho3.
    let big_a = (d[1][1] - a1 * d[0][1] - a3 * d[2][1]) / d0;
    let big_b = -(a1u * d[0][1] + a3u * d[2][1]) / d0;
    let e_dot = los[1].dot(&observer[1]);
    let r22 = observer[1].norm_squared();

    // r2^8 - (A^2 + 2 A E + R^2) r2^6 - 2 mu B (A + E) r2^3 - mu^2 B^2 = 0
    let c6 = -(big_a * big_a + 2.0 * big_a * e_dot + r22);
    let c3 = -2.0 * mu * big_b * (big_a + e_dot);
    let c0 = -mu * mu * big_b * big_b;
    let mut r2: f64 = 2.5;
    let mut converged = false;
    for _ in 0..50 {
        let f = r2.powi(8) + c6 * r2.powi(6) + c3 * r2.powi(3) + c0;
        let fp = 8.0 * r2.powi(7) + 6.0 * c6 * r2.powi(5) + 3.0 * c3 * r2 * r2;
        let delta = f / fp;
        r2 -= delta;
        if delta.abs() < 1e-12 {
            converged = true;
            break;
        }
    }
    if !converged || !r2.is_finite() || r2 <= 0.0 {
        return Err(TheoryError::NoConvergence {
            iter: 50,
            action: "Gauss range polynomial",
        });
    }

    let u = mu / (r2 * r2 * r2);
    let c1 = a1 + a1u * u;
    let c3c = a3 + a3u * u;
    let rho1 = (d[1][0] - c1 * d[0][0] - c3c * d[2][0]) / (c1 * d0);
    let rho2 = big_a + big_b * u;
    let rho3 = (d[1][2] - c1 * d[0][2] - c3c * d[2][2]) / (c3c * d0);

    let r1_vec = observer[0] + rho1 * los[0];
    let r2_vec = observer[1] + rho2 * los[1];
    let r3_vec = observer[2] + rho3 * los[2];

    // f and g series around the middle observation for the velocity.
    let f1 = 1.0 - 0.5 * u * tau1 * tau1;
    let f3 = 1.0 - 0.5 * u * tau3 * tau3;
    let g1 = tau1 - u * tau1.powi(3) / 6.0;
    let g3 = tau3 - u * tau3.powi(3) / 6.0;
    let denom = f1 * g3 - f3 * g1;
    let v2 = (-f3 * r1_vec + f1 * r3_vec) / denom * GAUSS_K;

    let _ = r3_vec;
    elements_from_state_and_mass(r2_vec, v2, jd[1], f64::INFINITY)
}

/// Apparent-magnitude models for minor bodies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MagnitudeModel {
    /// IAU H/G asteroid law
    Hg { h: f64, g: f64 },
    /// Comet g/k law
    Gk { g: f64, k: f64 },
}

impl MagnitudeModel {
    pub fn from_elements(orbit: &OrbitalElements) -> Option<Self> {
        match orbit.magnitude_law {
            MagnitudeLaw::Hg => Some(MagnitudeModel::Hg {
                h: orbit.absolute_magnitude,
                g: orbit.magnitude_slope,
            }),
            MagnitudeLaw::Gk => Some(MagnitudeModel::Gk {
                g: orbit.absolute_magnitude,
                k: orbit.magnitude_slope,
            }),
            MagnitudeLaw::None => None,
        }
    }

    /// Apparent magnitude at heliocentric distance `r`, observer distance
    /// `delta` (both AU) and phase angle `alpha` (radians).
    pub fn apparent(&self, r_au: f64, delta_au: f64, phase_angle_rad: f64) -> f64 {
        match self {
            MagnitudeModel::Hg { h, g } => {
                let tan_half = (phase_angle_rad / 2.0).tan().abs();
                let phi1 = (-3.33 * tan_half.powf(0.63)).exp();
                let phi2 = (-1.87 * tan_half.powf(1.22)).exp();
                h + 5.0 * (r_au * delta_au).log10()
                    - 2.5 * ((1.0 - g) * phi1 + g * phi2).max(1e-12).log10()
            }
            MagnitudeModel::Gk { g, k } => g + 5.0 * delta_au.log10() + 2.5 * k * r_au.log10(),
        }
    }
}

#[cfg(test)]
mod kepler_ut {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn lcg(seed: &mut u64) -> f64 {
        // Numerical Recipes LCG, plenty for test sampling.
        *seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (*seed >> 11) as f64 / (1u64 << 53) as f64
    }

    #[test]
    fn kepler_equation_residual_below_1e14() {
        let mut seed = 0x5eed_cafe;
        for _ in 0..10_000 {
            let e = 0.99 * lcg(&mut seed);
            let m = (lcg(&mut seed) - 0.5) * 2.0 * core::f64::consts::PI;
            let big_e = solve_elliptic(m, e).unwrap();
            let residual = (crate::math::norm_pm_pi(m) - (big_e - e * big_e.sin())).abs();
            assert!(residual < 1e-14, "e={e} m={m} residual={residual}");
        }
    }

    #[test]
    fn barker_satisfies_its_cubic() {
        for b in [-10.0, -0.5, 0.0, 0.3, 2.0, 50.0] {
            let s = solve_barker(b);
            assert_abs_diff_eq!(s + s * s * s / 3.0, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn hyperbolic_residual() {
        for (m, e) in [(0.5, 1.3), (-4.0, 2.5), (30.0, 1.05), (-0.01, 1.8)] {
            let h = solve_hyperbolic(m, e).unwrap();
            assert!((e * h.sinh() - h - m).abs() < 1e-10, "m={m} e={e}");
        }
    }

    fn circularish_orbit() -> OrbitalElements {
        OrbitalElements {
            semimajor_axis_au: 2.77,
            eccentricity: 0.078,
            inclination_rad: 0.1848,
            ascending_node_rad: 1.4016,
            arg_perihelion_rad: 1.2810,
            mean_anomaly_rad: 0.1,
            mean_motion_rad_d: f64::NAN,
            epoch_jd: J2000,
            equinox_jd: J2000,
            frame: CelestialFrame::DynamicalJ2000,
            perihelion_distance_au: 2.77 * (1.0 - 0.078),
            perihelion_time_jd: f64::NAN,
            absolute_magnitude: 3.34,
            magnitude_slope: 0.12,
            magnitude_law: MagnitudeLaw::Hg,
            central_body: Target::Sun,
            valid_from_jd: f64::NAN,
            valid_to_jd: f64::NAN,
            radius_km: 470.0,
            reciprocal_mass: f64::INFINITY,
        }
    }

    #[test]
    fn state_radius_matches_conic() {
        let orbit = circularish_orbit();
        let s = state(&orbit, J2000 + 100.0).unwrap();
        let r = s.pos_au.norm();
        assert!(r > orbit.semimajor_axis_au * (1.0 - orbit.eccentricity) - 1e-9);
        assert!(r < orbit.semimajor_axis_au * (1.0 + orbit.eccentricity) + 1e-9);
        // Vis-viva check.
        let mu = GAUSS_K * GAUSS_K;
        let v2 = s.vel_au_d.norm_squared();
        let expected = mu * (2.0 / r - 1.0 / orbit.semimajor_axis_au);
        assert_abs_diff_eq!(v2, expected, epsilon = 1e-12);
    }

    #[test]
    fn elements_round_trip_through_state() {
        let orbit = circularish_orbit();
        let s = state(&orbit, J2000).unwrap();
        let rec = elements_from_state_and_mass(s.pos_au, s.vel_au_d, J2000, f64::INFINITY).unwrap();
        assert_abs_diff_eq!(rec.semimajor_axis_au, orbit.semimajor_axis_au, epsilon = 1e-9);
        assert_abs_diff_eq!(rec.eccentricity, orbit.eccentricity, epsilon = 1e-9);
        assert_abs_diff_eq!(rec.inclination_rad, orbit.inclination_rad, epsilon = 1e-9);
        assert_abs_diff_eq!(rec.ascending_node_rad, orbit.ascending_node_rad, epsilon = 1e-9);
        assert_abs_diff_eq!(rec.arg_perihelion_rad, orbit.arg_perihelion_rad, epsilon = 1e-8);
    }

    #[test]
    fn two_position_orbit_recovers_the_conic() {
        let orbit = circularish_orbit();
        let s1 = state(&orbit, J2000).unwrap();
        let s2 = state(&orbit, J2000 + 60.0).unwrap();
        let rec = elements_from_two_positions(J2000, J2000 + 60.0, s1.pos_au, s2.pos_au).unwrap();
        assert_abs_diff_eq!(rec.semimajor_axis_au, orbit.semimajor_axis_au, epsilon = 1e-4);
        assert_abs_diff_eq!(rec.eccentricity, orbit.eccentricity, epsilon = 1e-4);
        assert_abs_diff_eq!(rec.inclination_rad, orbit.inclination_rad, epsilon = 1e-6);
    }

    #[test]
    fn hg_magnitude_brightens_at_opposition() {
        let model = MagnitudeModel::Hg { h: 3.34, g: 0.12 };
        let at_opposition = model.apparent(2.77, 1.77, 0.01);
        let at_quadrature = model.apparent(2.77, 2.5, 0.35);
        assert!(at_opposition < at_quadrature);
        // Ceres sits around magnitude 7 at a typical opposition.
        assert!((at_opposition - 6.8).abs() < 1.0, "got {at_opposition}");
    }
}

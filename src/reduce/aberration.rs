/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Annual (and diurnal) aberration.

use crate::constants::{AU_KM, SPEED_OF_LIGHT_KM_S};
use crate::math::Vector3;

/// Speed of light in AU/day.
pub const C_AU_D: f64 = SPEED_OF_LIGHT_KM_S * 86_400.0 / AU_KM;

/// Applies relativistic annual aberration to a position vector (the Murray
/// 1981 factorization): `pos_au` is the observer-to-target vector and
/// `obs_vel_au_d` the observer's barycentric velocity.
///
/// The magnitude of the vector is preserved so distances survive.
pub fn annual_aberration(pos_au: &Vector3, obs_vel_au_d: &Vector3) -> Vector3 {
    let dist = pos_au.norm();
    if dist <= 0.0 {
        return *pos_au;
    }
    let p = pos_au / dist;
    let v = obs_vel_au_d / C_AU_D;
    let beta2 = v.norm_squared();
    if beta2 >= 1.0 {
        // Superluminal observers have no aberration formula; leave the
        // vector alone rather than produce NaNs.
        return *pos_au;
    }
    let inv_gamma = (1.0 - beta2).sqrt();
    let pdv = p.dot(&v);
    let f = 1.0 + pdv / (1.0 + inv_gamma);
    let aberrated = (inv_gamma * p + f * v) / (1.0 + pdv);
    aberrated.normalize() * dist
}

/// Diurnal aberration offsets in right ascension and declination, radians:
/// the classical first-order expressions in the observer's spin velocity.
///
/// `rho_cos_phi` is the geocentric radius times cos(geocentric latitude) in
/// Earth radii, `lst` the local apparent sidereal time.
pub fn diurnal_aberration(
    ra: f64,
    dec: f64,
    rho_cos_phi: f64,
    equatorial_radius_km: f64,
    rotation_rate_rad_s: f64,
    lst: f64,
) -> (f64, f64) {
    // Linear spin speed over c.
    let k = rotation_rate_rad_s * equatorial_radius_km * rho_cos_phi / SPEED_OF_LIGHT_KM_S;
    let dra = k * (lst - ra).cos() / dec.cos().max(1e-12);
    let ddec = k * (lst - ra).sin() * dec.sin();
    (dra, ddec)
}

#[cfg(test)]
mod aberration_ut {
    use super::*;
    use crate::constants::DAS2R;

    #[test]
    fn aberration_peaks_near_20_5_arcsec() {
        // Earth-like velocity perpendicular to the line of sight.
        let pos = Vector3::new(1.0, 0.0, 0.0);
        let vel = Vector3::new(0.0, 0.0172, 0.0);
        let shifted = annual_aberration(&pos, &vel);
        let angle = crate::math::angular_separation(&pos, &shifted);
        assert!(
            (angle / DAS2R - 20.5).abs() < 0.3,
            "aberration {} arcsec",
            angle / DAS2R
        );
    }

    #[test]
    fn no_velocity_no_shift() {
        let pos = Vector3::new(0.3, -0.4, 1.2);
        let shifted = annual_aberration(&pos, &Vector3::zeros());
        assert!((shifted - pos).norm() < 1e-15);
    }

    #[test]
    fn distance_is_preserved() {
        let pos = Vector3::new(2.0, 1.0, 0.5);
        let vel = Vector3::new(0.01, -0.005, 0.002);
        let shifted = annual_aberration(&pos, &vel);
        assert!((shifted.norm() - pos.norm()).abs() < 1e-12);
    }

    #[test]
    fn diurnal_aberration_is_sub_arcsecond() {
        let (dra, ddec) = diurnal_aberration(1.0, 0.5, 0.9, 6378.14, 7.292e-5, 2.0);
        assert!(dra.abs() < 0.35 * DAS2R * 3.0);
        assert!(ddec.abs() < 0.35 * DAS2R * 3.0);
    }
}

/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Relativistic light deflection by solar-system bodies.

use crate::bodies::Target;
use crate::constants::SUN_GRAV_RADIUS_AU;
use crate::math::Vector3;

/// The fixed deflector list beyond the Sun, applied in decreasing order of
/// typical deflection when full precision is requested. Earth only
/// participates for observers away from it.
pub const EXTRA_DEFLECTORS: [Target; 7] = [
    Target::Jupiter,
    Target::Saturn,
    Target::Earth,
    Target::Venus,
    Target::Uranus,
    Target::Neptune,
    Target::Moon,
];

/// Deflects the observer-to-target unit direction by one gravitating body.
///
/// * `mass_solar` - deflector mass in solar masses
/// * `p` - observer-to-target unit vector
/// * `q` - deflector-to-target unit vector
/// * `e` - deflector-to-observer unit vector
/// * `em_au` - deflector-to-observer distance
///
/// Skips quietly when the deflector sits on the ray (the limiter guards
/// the divergence there). Magnitude is preserved by the caller.
pub fn deflect_one(
    mass_solar: f64,
    p: &Vector3,
    q: &Vector3,
    e: &Vector3,
    em_au: f64,
) -> Vector3 {
    // Alignment guard: deflector on the observer-target ray.
    if q.dot(e).abs() > 1.0 - 1e-11 {
        return *p;
    }
    let qpe = q + e;
    let qdqpe = q.dot(&qpe);
    // Limiter equivalent to a minimum separation angle.
    let w = mass_solar * SUN_GRAV_RADIUS_AU / em_au / qdqpe.max(1e-9);
    let eq = e.cross(q);
    let peq = p.cross(&eq);
    (p + w * peq).normalize()
}

#[cfg(test)]
mod deflection_ut {
    use super::*;
    use crate::constants::DAS2R;

    #[test]
    fn grazing_solar_deflection_is_1_75_arcsec() {
        // Target far behind the Sun, ray grazing the limb: the classical
        // 1.75 arcsecond.
        let sun_radius_au = 0.004_652;
        let p = Vector3::new(1.0, 0.0, 0.0);
        // Observer at 1 AU, deflector (Sun) offset so the ray passes at one
        // solar radius.
        let e = Vector3::new(-1.0, sun_radius_au, 0.0).normalize();
        let q = Vector3::new(1.0, sun_radius_au * 1e-9, 0.0).normalize();
        let deflected = deflect_one(1.0, &p, &q, &e, 1.0);
        let angle = crate::math::angular_separation(&p, &deflected);
        assert!(
            (angle / DAS2R - 1.75).abs() < 0.1,
            "grazing deflection {} arcsec",
            angle / DAS2R
        );
    }

    #[test]
    fn on_ray_deflector_is_skipped() {
        let p = Vector3::new(1.0, 0.0, 0.0);
        let q = Vector3::new(1.0, 0.0, 0.0);
        let e = Vector3::new(-1.0, 0.0, 0.0);
        let out = deflect_one(1.0, &p, &q, &e, 1.0);
        assert_eq!(out, p);
    }

    #[test]
    fn deflection_shrinks_with_distance_from_ray() {
        let p = Vector3::new(1.0, 0.0, 0.0);
        let e_near = Vector3::new(-1.0, 0.01, 0.0).normalize();
        let e_far = Vector3::new(-1.0, 0.3, 0.0).normalize();
        let q = Vector3::new(1.0, 1e-12, 0.0).normalize();
        let near = crate::math::angular_separation(&p, &deflect_one(1.0, &p, &q, &e_near, 1.0));
        let far = crate::math::angular_separation(&p, &deflect_one(1.0, &p, &q, &e_far, 1.0));
        assert!(near > far);
    }
}

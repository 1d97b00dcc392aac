/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

// Double-precision nalgebra aliases used throughout the crate.
pub type Vector3 = nalgebra::Vector3<f64>;
pub type Vector6 = nalgebra::Vector6<f64>;
pub type Matrix3 = nalgebra::Matrix3<f64>;
pub type Matrix6 = nalgebra::Matrix6<f64>;

pub mod chebyshev;
pub mod rotation;

use core::f64::consts::TAU;

/// Returns the projection of a onto b
pub fn project_vector(a: &Vector3, b: &Vector3) -> Vector3 {
    b * a.dot(b) / b.dot(b)
}

/// Rotate the vector a around the provided axis by angle theta.
pub fn rotate_vector(a: &Vector3, axis: &Vector3, theta_rad: f64) -> Vector3 {
    let x = axis.normalize();
    let p = project_vector(a, &x);
    let v1 = a - p;
    let v2 = x.cross(&v1);
    let r_plane = v1 * theta_rad.cos() + v2 * theta_rad.sin();
    r_plane + p
}

/// Normalize an angle into [0, 2pi).
pub fn norm_two_pi(angle_rad: f64) -> f64 {
    let r = angle_rad % TAU;
    if r < 0.0 {
        r + TAU
    } else {
        r
    }
}

/// Normalize an angle into (-pi, pi].
pub fn norm_pm_pi(angle_rad: f64) -> f64 {
    let mut r = angle_rad % TAU;
    if r > core::f64::consts::PI {
        r -= TAU;
    } else if r <= -core::f64::consts::PI {
        r += TAU;
    }
    r
}

/// Spherical (ra, dec, r) from a Cartesian vector. RA is normalized to [0, 2pi).
pub fn cartesian_to_spherical(v: &Vector3) -> (f64, f64, f64) {
    let r = v.norm();
    if r < f64::EPSILON {
        return (0.0, 0.0, 0.0);
    }
    let ra = norm_two_pi(v[1].atan2(v[0]));
    let dec = (v[2] / r).asin();
    (ra, dec, r)
}

/// Cartesian vector from spherical (ra, dec, r).
pub fn spherical_to_cartesian(ra: f64, dec: f64, r: f64) -> Vector3 {
    let (sra, cra) = ra.sin_cos();
    let (sd, cd) = dec.sin_cos();
    Vector3::new(r * cd * cra, r * cd * sra, r * sd)
}

/// Angular separation between two directions, numerically safe at small angles.
pub fn angular_separation(a: &Vector3, b: &Vector3) -> f64 {
    let cross = a.cross(b).norm();
    let dot = a.dot(b);
    cross.atan2(dot)
}

#[cfg(test)]
mod math_ut {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn spherical_round_trip() {
        let v = Vector3::new(0.3, -1.2, 0.75);
        let (ra, dec, r) = cartesian_to_spherical(&v);
        let back = spherical_to_cartesian(ra, dec, r);
        assert_abs_diff_eq!((v - back).norm(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn norm_ranges() {
        assert_abs_diff_eq!(norm_two_pi(-0.1), TAU - 0.1, epsilon = 1e-15);
        assert!(norm_pm_pi(3.5) < 0.0);
        assert_abs_diff_eq!(norm_two_pi(TAU), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn rotation_about_axis() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let z = Vector3::new(0.0, 0.0, 1.0);
        let r = rotate_vector(&v, &z, core::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(r[0], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(r[1], 1.0, epsilon = 1e-15);
    }
}

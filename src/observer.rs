/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The observer: geodetic site on a reference ellipsoid, with the rotation
//! from the body-fixed frame into the ICRF.

use serde_derive::{Deserialize, Serialize};

use crate::bodies::Target;
use crate::constants::{ellipsoids, AU_KM, J2000};
use crate::eop::EarthOrientation;
use crate::math::rotation::r1 as rot1;
use crate::math::rotation::r3 as rot3;
use crate::math::{Matrix3, Vector3};
use crate::prenut::ReductionMethod;
use crate::time::JulianDate;

/// Mean Earth rotation rate, rad/s.
const EARTH_OMEGA_RAD_S: f64 = 7.292_115_0e-5;

/// An immutable observing site. Derived geocentric quantities are fixed at
/// construction.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub mother_body: Target,
    /// Geodetic latitude, radians, north positive
    pub latitude_rad: f64,
    /// Longitude, radians, east positive
    pub longitude_rad: f64,
    /// Height above the ellipsoid, meters
    pub height_m: f64,
    /// Site pressure, millibars
    pub pressure_mbar: f64,
    /// Site temperature, Celsius
    pub temperature_c: f64,
    /// Relative humidity, 0..1
    pub humidity: f64,
    /// Reference ellipsoid: equatorial radius km, flattening
    pub ellipsoid: (f64, f64),
    geocentric_latitude_rad: f64,
    geocentric_radius_km: f64,
}

impl Observer {
    /// An Earth site on WGS84 with standard atmosphere.
    pub fn on_earth(latitude_rad: f64, longitude_rad: f64, height_m: f64) -> Self {
        Self::new(
            Target::Earth,
            latitude_rad,
            longitude_rad,
            height_m,
            1013.25,
            10.0,
            0.5,
            ellipsoids::WGS84,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mother_body: Target,
        latitude_rad: f64,
        longitude_rad: f64,
        height_m: f64,
        pressure_mbar: f64,
        temperature_c: f64,
        humidity: f64,
        ellipsoid: (f64, f64),
    ) -> Self {
        let (re_km, flattening) = ellipsoid;
        let e2 = flattening * (2.0 - flattening);
        let (sphi, cphi) = latitude_rad.sin_cos();
        let n = re_km / (1.0 - e2 * sphi * sphi).sqrt();
        let h_km = height_m / 1000.0;
        let x = (n + h_km) * cphi;
        let z = (n * (1.0 - e2) + h_km) * sphi;
        Self {
            mother_body,
            latitude_rad,
            longitude_rad,
            height_m,
            pressure_mbar,
            temperature_c,
            humidity,
            ellipsoid,
            geocentric_latitude_rad: z.atan2(x),
            geocentric_radius_km: (x * x + z * z).sqrt(),
        }
    }

    pub fn geocentric_latitude_rad(&self) -> f64 {
        self.geocentric_latitude_rad
    }

    pub fn geocentric_radius_km(&self) -> f64 {
        self.geocentric_radius_km
    }

    /// Mean rotation rate of the mother body, rad/s.
    pub fn rotation_rate_rad_s(&self) -> f64 {
        match self.mother_body {
            Target::Earth => EARTH_OMEGA_RAD_S,
            other => match (
                crate::physical::pole_and_meridian(other, J2000),
                crate::physical::pole_and_meridian(other, J2000 + 1.0),
            ) {
                (Some((_, _, w0)), Some((_, _, w1))) => {
                    crate::math::norm_pm_pi(w1 - w0) / 86_400.0
                }
                _ => 0.0,
            },
        }
    }

    /// Site position in the body-fixed frame, kilometers.
    pub fn body_fixed_km(&self) -> Vector3 {
        let (slam, clam) = self.longitude_rad.sin_cos();
        let rho = self.geocentric_radius_km;
        let (sphi, cphi) = self.geocentric_latitude_rad.sin_cos();
        Vector3::new(rho * cphi * clam, rho * cphi * slam, rho * sphi)
    }

    /// The rotation from the mother body's body-fixed axes into the ICRF
    /// (GCRS for Earth) at the given instant.
    ///
    /// Earth runs through the full IAU 2006 chain, with polar motion when
    /// the caller supplies Earth orientation values; other bodies use their
    /// IAU pole and prime meridian.
    pub fn body_fixed_to_icrf(
        &self,
        jd_tt: f64,
        jd_ut1: &JulianDate,
        eop: Option<&EarthOrientation>,
        method: ReductionMethod,
    ) -> Matrix3 {
        match self.mother_body {
            Target::Earth => match eop {
                Some(eo) => crate::cio::gcrs_to_itrs(jd_tt, jd_ut1, eo, method).transpose(),
                None => crate::cio::gcrs_to_tirs(jd_tt, jd_ut1, method).transpose(),
            },
            other => match crate::physical::pole_and_meridian(other, jd_tt) {
                Some((alpha0, delta0, w)) => (rot3(w)
                    * rot1(core::f64::consts::FRAC_PI_2 - delta0)
                    * rot3(alpha0 + core::f64::consts::FRAC_PI_2))
                .transpose(),
                None => Matrix3::identity(),
            },
        }
    }

    /// Observer position and velocity with respect to the mother body
    /// center, in the ICRF, AU and AU/day.
    pub fn geocentric_icrf_au(
        &self,
        jd_tt: f64,
        jd_ut1: &JulianDate,
        eop: Option<&EarthOrientation>,
        method: ReductionMethod,
    ) -> (Vector3, Vector3) {
        let m = self.body_fixed_to_icrf(jd_tt, jd_ut1, eop, method);
        let r_fixed = self.body_fixed_km();
        let pos = m * r_fixed / AU_KM;
        // Velocity from the spin: omega x r in the body frame, rotated out.
        let omega = Vector3::new(0.0, 0.0, self.rotation_rate_rad_s());
        let vel = m * omega.cross(&r_fixed) * 86_400.0 / AU_KM;
        (pos, vel)
    }
}

#[cfg(test)]
mod observer_ut {
    use super::*;
    use crate::constants::DEG2RAD;

    fn madrid() -> Observer {
        Observer::on_earth(40.42 * DEG2RAD, -3.70 * DEG2RAD, 667.0)
    }

    #[test]
    fn geocentric_latitude_is_south_of_geodetic() {
        let site = madrid();
        assert!(site.geocentric_latitude_rad() < site.latitude_rad);
        let diff_arcmin = (site.latitude_rad - site.geocentric_latitude_rad()) / DEG2RAD * 60.0;
        // The flattening correction peaks near 11.5 arcminutes at 45 deg.
        assert!(diff_arcmin > 5.0 && diff_arcmin < 12.0, "{diff_arcmin}'");
    }

    #[test]
    fn geocentric_radius_is_earthlike() {
        let site = madrid();
        let r = site.geocentric_radius_km();
        assert!(r > 6_356.0 && r < 6_379.0, "radius {r} km");
    }

    #[test]
    fn observer_velocity_is_below_half_km_s() {
        let site = madrid();
        let (pos, vel) = site.geocentric_icrf_au(
            2_455_197.5,
            &JulianDate::from(2_455_197.5),
            None,
            ReductionMethod::Iau2006,
        );
        let v_km_s = vel.norm() * AU_KM / 86_400.0;
        assert!(v_km_s > 0.2 && v_km_s < 0.5, "spin velocity {v_km_s} km/s");
        assert!((pos.norm() * AU_KM - site.geocentric_radius_km()).abs() < 1.0);
    }

    #[test]
    fn equality_and_copy_semantics() {
        let a = madrid();
        let b = a;
        assert_eq!(a, b);
    }
}

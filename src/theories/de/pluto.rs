/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The DE integrations carry the Pluto *system* barycenter. Charon is
//! massive enough (about an eighth of Pluto) to displace the body center by
//! two thousand kilometers, so the barycenter-to-center offset is always
//! applied when the target is Pluto itself.

use crate::constants::{AU_KM, DEG2RAD, J2000};
use crate::math::Vector3;

/// Charon orbit: semimajor axis around Pluto, km, and the mass fraction
/// m_charon / (m_pluto + m_charon).
const CHARON_A_KM: f64 = 19_596.0;
const CHARON_MASS_FRACTION: f64 = 0.1085;
/// Charon's orbital (and Pluto's rotation) period, days.
const CHARON_PERIOD_D: f64 = 6.387_223;

/// Offset from the Pluto-system barycenter to the Pluto body center, AU,
/// in the ICRF. Charon circles in Pluto's equatorial plane and is locked
/// opposite the prime meridian, so the IAU pole and meridian angles fix its
/// direction.
pub fn barycenter_to_center_au(jd_tdb: f64) -> Vector3 {
    let d = jd_tdb - J2000;
    // IAU pole of Pluto and prime-meridian angle.
    let alpha0 = 132.993 * DEG2RAD;
    let delta0 = -6.163 * DEG2RAD;
    let w = (302.695 + 360.0 / CHARON_PERIOD_D * d) * DEG2RAD;

    // Basis of Pluto's equatorial plane in the ICRF.
    let (sa, ca) = alpha0.sin_cos();
    let (sd, cd) = delta0.sin_cos();
    let pole = Vector3::new(cd * ca, cd * sa, sd);
    // Node of the body equator on the ICRF equator.
    let node = Vector3::new(-sa, ca, 0.0);
    let in_plane = pole.cross(&node);

    // Charon sits opposite the prime meridian.
    let angle = w + core::f64::consts::PI;
    let charon_dir = node * angle.cos() + in_plane * angle.sin();

    -charon_dir * (CHARON_A_KM * CHARON_MASS_FRACTION / AU_KM)
}

#[cfg(test)]
mod pluto_ut {
    use super::*;

    #[test]
    fn offset_magnitude_is_two_thousand_kilometers() {
        let off = barycenter_to_center_au(J2000);
        let km = off.norm() * AU_KM;
        assert!((km - CHARON_A_KM * CHARON_MASS_FRACTION).abs() < 1.0);
    }

    #[test]
    fn offset_turns_with_the_charon_period() {
        let a = barycenter_to_center_au(J2000);
        let b = barycenter_to_center_au(J2000 + CHARON_PERIOD_D / 2.0);
        // Half a revolution flips the offset.
        assert!((a + b).norm() < 1e-3 * a.norm());
    }
}

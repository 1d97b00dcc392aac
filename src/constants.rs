/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Speed of light in kilometers per second (km/s)
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

/// Astronomical unit in kilometers (IAU 2012 definition)
pub const AU_KM: f64 = 149_597_870.7;

/// One-way light time for 1 AU, in days
pub const LIGHT_TIME_DAYS_PER_AU: f64 = AU_KM / SPEED_OF_LIGHT_KM_S / 86400.0;

/// Julian date of the J2000.0 epoch (2000 January 1.5 TT)
pub const J2000: f64 = 2_451_545.0;

/// Julian date of the B1950.0 epoch
pub const B1950: f64 = 2_433_282.42345905;

/// Julian date of the B1875.0 epoch (constellation boundary equinox)
pub const B1875: f64 = 2_405_889.258550475;

/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Days per Julian millenium
pub const DAYS_PER_MILLENIUM: f64 = 365_250.0;

/// Arcseconds in a full circle
pub const TURNAS: f64 = 1_296_000.0;

/// Arcseconds to radians
pub const DAS2R: f64 = 4.848136811095359935899141e-6;

/// Milliarcseconds to radians
pub const DMAS2R: f64 = DAS2R / 1.0e3;

/// Degrees to radians
pub const DEG2RAD: f64 = core::f64::consts::PI / 180.0;

/// TT minus TAI, seconds (exact by definition)
pub const TT_MINUS_TAI_S: f64 = 32.184;

/// Gaussian gravitational constant (AU^1.5 / day per solar mass^0.5)
pub const GAUSS_K: f64 = 0.01720209895;

/// Heliocentric gravitational constant, AU^3/day^2
pub const GM_SUN_AU3_D2: f64 = GAUSS_K * GAUSS_K;

/// Schwarzschild radius of the Sun over two, AU (2*GM_sun/c^2 in AU)
pub const SUN_GRAV_RADIUS_AU: f64 = 1.97412574336e-8;

/// Default Earth/Moon mass ratio (DE405), used until a theory header overrides it
pub const EMRAT_DE405: f64 = 81.30056;

/// Mean obliquity of the ecliptic at J2000.0, arcseconds (IAU 2006)
pub const EPS0_J2000_AS: f64 = 84_381.406;

/// Reference ellipsoids for the geodetic observer model.
pub mod ellipsoids {
    /// (equatorial radius in km, flattening)
    pub const WGS84: (f64, f64) = (6_378.137, 1.0 / 298.257223563);
    pub const IERS_2003: (f64, f64) = (6_378.1366, 1.0 / 298.25642);
    pub const IAU_1976: (f64, f64) = (6_378.140, 1.0 / 298.257);
}

/// Reciprocal masses of the gravitating bodies, Sun/body (IAU 1976 / DE405 set).
/// Used by the relativistic deflection model and the Kepler propagator.
pub mod reciprocal_masses {
    pub const MERCURY: f64 = 6_023_600.0;
    pub const VENUS: f64 = 408_523.71;
    pub const EARTH: f64 = 332_946.050895;
    pub const EARTH_MOON: f64 = 328_900.5614;
    pub const MARS: f64 = 3_098_708.0;
    pub const JUPITER: f64 = 1_047.3486;
    pub const SATURN: f64 = 3_497.898;
    pub const URANUS: f64 = 22_902.98;
    pub const NEPTUNE: f64 = 19_412.24;
    pub const PLUTO: f64 = 135_200_000.0;
    pub const MOON: f64 = 27_068_700.387534;
}

/// Equatorial radii in kilometers (IAU 2009 report values).
pub mod equatorial_radii_km {
    pub const SUN: f64 = 696_000.0;
    pub const MERCURY: f64 = 2_439.7;
    pub const VENUS: f64 = 6_051.8;
    pub const EARTH: f64 = 6_378.1366;
    pub const MARS: f64 = 3_396.19;
    pub const JUPITER: f64 = 71_492.0;
    pub const SATURN: f64 = 60_268.0;
    pub const URANUS: f64 = 25_559.0;
    pub const NEPTUNE: f64 = 24_764.0;
    pub const PLUTO: f64 = 1_188.3;
    pub const MOON: f64 = 1_737.4;
}

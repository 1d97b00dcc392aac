/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Fitted two-epoch mean elements of the planets, valid 3000 BC - 3000 AD,
//! with the long-period mean-anomaly correction terms for the giants.
//!
//! Layout per body: element value at J2000 and its rate per Julian century
//! for (a AU, e, I deg, L deg, long.peri deg, long.node deg), then the
//! correction coefficients (b, c, s, f) entering
//! M = L - long.peri + b T^2 + c cos(f T) + s sin(f T), degrees.

/// Fitted elements and rates of one body.
#[derive(Copy, Clone, Debug)]
pub struct FittedElements {
    pub a: (f64, f64),
    pub e: (f64, f64),
    pub incl_deg: (f64, f64),
    pub mean_longitude_deg: (f64, f64),
    pub perihelion_longitude_deg: (f64, f64),
    pub node_longitude_deg: (f64, f64),
    pub b: f64,
    pub c: f64,
    pub s: f64,
    pub f: f64,
}

pub const MERCURY: FittedElements = FittedElements {
    a: (0.38709843, 0.00000000),
    e: (0.20563661, 0.00002123),
    incl_deg: (7.00559432, -0.00590158),
    mean_longitude_deg: (252.25166724, 149_472.67486623),
    perihelion_longitude_deg: (77.45771895, 0.15940013),
    node_longitude_deg: (48.33961819, -0.12214182),
    b: 0.0,
    c: 0.0,
    s: 0.0,
    f: 0.0,
};

pub const VENUS: FittedElements = FittedElements {
    a: (0.72332102, -0.00000026),
    e: (0.00676399, -0.00005107),
    incl_deg: (3.39777545, 0.00043494),
    mean_longitude_deg: (181.97970850, 58_517.81560260),
    perihelion_longitude_deg: (131.76755713, 0.05679648),
    node_longitude_deg: (76.67261496, -0.27274174),
    b: 0.0,
    c: 0.0,
    s: 0.0,
    f: 0.0,
};

pub const EM_BARY: FittedElements = FittedElements {
    a: (1.00000018, -0.00000003),
    e: (0.01673163, -0.00003661),
    incl_deg: (-0.00054346, -0.01337178),
    mean_longitude_deg: (100.46691572, 35_999.37306329),
    perihelion_longitude_deg: (102.93005885, 0.31795260),
    node_longitude_deg: (-5.11260389, -0.24123856),
    b: 0.0,
    c: 0.0,
    s: 0.0,
    f: 0.0,
};

pub const MARS: FittedElements = FittedElements {
    a: (1.52371243, 0.00000097),
    e: (0.09336511, 0.00009149),
    incl_deg: (1.85181869, -0.00724757),
    mean_longitude_deg: (-4.56813164, 19_140.29934243),
    perihelion_longitude_deg: (-23.91744784, 0.45223625),
    node_longitude_deg: (49.71320984, -0.26852431),
    b: 0.0,
    c: 0.0,
    s: 0.0,
    f: 0.0,
};

pub const JUPITER: FittedElements = FittedElements {
    a: (5.20248019, -0.00002864),
    e: (0.04853590, 0.00018026),
    incl_deg: (1.29861416, -0.00322699),
    mean_longitude_deg: (34.33479152, 3_034.90371757),
    perihelion_longitude_deg: (14.27495244, 0.18199196),
    node_longitude_deg: (100.29282654, 0.13024619),
    b: -0.00012452,
    c: 0.06064060,
    s: -0.35635438,
    f: 38.35125000,
};

pub const SATURN: FittedElements = FittedElements {
    a: (9.54149883, -0.00003065),
    e: (0.05550825, -0.00032044),
    incl_deg: (2.49424102, 0.00451969),
    mean_longitude_deg: (50.07571329, 1_222.11494724),
    perihelion_longitude_deg: (92.86136063, 0.54179478),
    node_longitude_deg: (113.63998702, -0.25015002),
    b: 0.00025899,
    c: -0.13434469,
    s: 0.87320147,
    f: 38.35125000,
};

pub const URANUS: FittedElements = FittedElements {
    a: (19.18797948, -0.00020455),
    e: (0.04685740, -0.00001550),
    incl_deg: (0.77298127, -0.00180155),
    mean_longitude_deg: (314.20276625, 428.49512595),
    perihelion_longitude_deg: (172.43404441, 0.09266985),
    node_longitude_deg: (73.96250215, 0.05739699),
    b: 0.00058331,
    c: -0.97731848,
    s: 0.17689245,
    f: 7.67025000,
};

pub const NEPTUNE: FittedElements = FittedElements {
    a: (30.06952752, 0.00006447),
    e: (0.00895439, 0.00000818),
    incl_deg: (1.77005520, 0.00022400),
    mean_longitude_deg: (304.22289287, 218.46515314),
    perihelion_longitude_deg: (46.68158724, 0.01009938),
    node_longitude_deg: (131.78635853, -0.00606302),
    b: -0.00041348,
    c: 0.68346318,
    s: -0.10162547,
    f: 7.67025000,
};

pub const PLUTO: FittedElements = FittedElements {
    a: (39.48686035, 0.00449751),
    e: (0.24885238, 0.00006016),
    incl_deg: (17.14104260, 0.00000501),
    mean_longitude_deg: (238.96535011, 145.18042903),
    perihelion_longitude_deg: (224.09702598, -0.00968827),
    node_longitude_deg: (110.30167986, -0.00809981),
    b: -0.01262724,
    c: 0.0,
    s: 0.0,
    f: 0.0,
};

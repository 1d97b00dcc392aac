/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use almagest::errors::Warnings;
use almagest::prelude::*;
use almagest::theories::TheorySet;
use rstest::rstest;

#[test]
fn ssb_state_is_exactly_zero() {
    let _ = pretty_env_logger::try_init();
    let set = TheorySet::default();
    let mut w = Warnings::default();
    for jd in [2_433_282.5, 2_451_545.0, 2_469_807.5] {
        let s = set
            .barycentric_state(jd, Target::Ssb, Algorithm::Moshier, None, &mut w)
            .unwrap();
        assert_eq!(s.pos_au, [0.0; 3]);
        assert_eq!(s.vel_au_d, [0.0; 3]);
    }
}

#[rstest]
#[case(Target::Mercury, 0.6)]
#[case(Target::Venus, 0.9)]
#[case(Target::Earth, 1.1)]
#[case(Target::Moon, 1.1)]
#[case(Target::Mars, 1.8)]
#[case(Target::Jupiter, 5.6)]
#[case(Target::Saturn, 10.2)]
#[case(Target::Uranus, 20.2)]
#[case(Target::Neptune, 30.5)]
#[case(Target::Pluto, 51.0)]
fn bodies_stay_finite_and_bounded(#[case] target: Target, #[case] max_au: f64) {
    let set = TheorySet::default();
    let mut w = Warnings::default();
    for year in [1850.0, 1950.0, 2000.0, 2050.0, 2200.0] {
        let jd = 2_451_545.0 + (year - 2000.0) * 365.25;
        let s = set
            .barycentric_state(jd, target, Algorithm::Moshier, None, &mut w)
            .unwrap();
        let pos = s.position();
        let vel = s.velocity();
        assert!(pos.norm().is_finite() && vel.norm().is_finite());
        assert!(pos.norm() < max_au, "{target} at {} AU in {year}", pos.norm());
        // Mercury peaks near 0.034 AU/day at perihelion; nothing exceeds it.
        assert!(vel.norm() < 0.04, "{target} at {} AU/day", vel.norm());
    }
}

#[test]
fn both_analytic_theories_agree_on_mars_within_arcminutes() {
    let set = TheorySet::default();
    let mut w = Warnings::default();
    for jd in [2_444_239.5, 2_451_545.0, 2_458_849.5] {
        let fitted = set
            .barycentric_state(jd, Target::Mars, Algorithm::Moshier, None, &mut w)
            .unwrap();
        let vsop = set
            .barycentric_state(jd, Target::Mars, Algorithm::Vsop, None, &mut w)
            .unwrap();
        let sep = almagest::math::angular_separation(&fitted.position(), &vsop.position());
        assert!(
            sep.to_degrees() < 0.12,
            "theories {} deg apart at {jd}",
            sep.to_degrees()
        );
    }
}

#[test]
fn series96_request_warns_and_resolves() {
    let set = TheorySet::default();
    let mut w = Warnings::default();
    let s = set
        .barycentric_state(2_451_545.0, Target::Venus, Algorithm::Series96, None, &mut w)
        .unwrap();
    assert!(s.position().norm() > 0.5);
    assert!(w.iter().any(|m| m.contains("Series96")));
}

#[test]
fn unknown_algorithm_for_planet_is_invalid() {
    let set = TheorySet::default();
    let mut w = Warnings::default();
    let err = set
        .barycentric_state(2_451_545.0, Target::Mars, Algorithm::Star, None, &mut w)
        .unwrap_err();
    assert!(matches!(
        err,
        almagest::errors::TheoryError::InvalidAlgorithm { .. }
    ));
}

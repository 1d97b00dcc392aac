/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use almagest::eop::EopTable;
use almagest::errors::Warnings;
use almagest::prelude::*;
use almagest::time::TimeScaleConverter;

#[test]
fn tt_tai_round_trip_to_the_microsecond() {
    let _ = pretty_env_logger::try_init();
    let converter = TimeScaleConverter::default();
    let mut warnings = Warnings::default();
    for jd in [2_441_317.5, 2_451_545.0, 2_457_754.5, 2_469_807.25] {
        let t = Instant::new(jd, TimeScale::TT);
        let tai = converter.convert(t, TimeScale::TAI, &mut warnings);
        let back = converter.convert(tai, TimeScale::TT, &mut warnings);
        let us = back.jd.minus(&t.jd).abs() * 86_400.0 * 1e6;
        assert!(us < 1.0, "round trip error {us} us at {jd}");
    }
}

#[test]
fn conversion_composition_is_path_independent() {
    let converter = TimeScaleConverter::default();
    let mut warnings = Warnings::default();
    let t = Instant::new(2_453_736.25, TimeScale::UTC);
    // UTC -> TDB directly and via every intermediate scale.
    let direct = converter.convert(t, TimeScale::TDB, &mut warnings);
    for hop in [TimeScale::TAI, TimeScale::TT, TimeScale::UT1] {
        let via = converter.convert(
            converter.convert(t, hop, &mut warnings),
            TimeScale::TDB,
            &mut warnings,
        );
        let ns = direct.jd.minus(&via.jd).abs() * 86_400.0 * 1e9;
        assert!(ns < 100.0, "via {hop:?} differs by {ns} ns");
    }
}

#[test]
fn ut1_follows_the_eop_table() {
    let table = EopTable::from_text("53736.0 0.035 0.380 0.3341\n53737.0 0.034 0.379 0.3322\n")
        .unwrap();
    let converter = TimeScaleConverter::new(Some(&table));
    let mut warnings = Warnings::default();
    let utc = Instant::new(2_453_736.5, TimeScale::UTC);
    let ut1 = converter.convert(utc, TimeScale::UT1, &mut warnings);
    let dut1 = ut1.jd.minus(&utc.jd) * 86_400.0;
    assert!((dut1 - 0.333).abs() < 0.005, "UT1-UTC {dut1}");
    assert!(warnings.is_empty());
}

#[test]
fn leap_second_steps_are_visible_across_2017() {
    let converter = TimeScaleConverter::default();
    let mut warnings = Warnings::default();
    let before = Instant::new(2_457_753.5, TimeScale::UTC); // 2016-12-31
    let after = Instant::new(2_457_755.5, TimeScale::UTC); // 2017-01-02
    let tai_b = converter.convert(before, TimeScale::TAI, &mut warnings);
    let tai_a = converter.convert(after, TimeScale::TAI, &mut warnings);
    let step = (tai_a.jd.minus(&after.jd) - tai_b.jd.minus(&before.jd)) * 86_400.0;
    assert!((step - 1.0).abs() < 1e-6, "leap step {step}");
}

#[test]
fn tdb_oscillates_around_tt_within_two_ms() {
    let converter = TimeScaleConverter::default();
    let mut warnings = Warnings::default();
    let mut max_abs: f64 = 0.0;
    for k in 0..400 {
        let jd = 2_451_545.0 + f64::from(k);
        let tt = Instant::new(jd, TimeScale::TT);
        let tdb = converter.convert(tt, TimeScale::TDB, &mut warnings);
        let ms = tdb.jd.minus(&tt.jd) * 86_400.0 * 1e3;
        max_abs = max_abs.max(ms.abs());
    }
    assert!(max_abs < 2.0, "peak TDB-TT {max_abs} ms");
    assert!(max_abs > 1.0, "TDB-TT amplitude suspiciously small: {max_abs} ms");
}

#[test]
fn historical_dates_warn_but_stay_finite() {
    let converter = TimeScaleConverter::default();
    let mut warnings = Warnings::default();
    // Kepler's era.
    let t = Instant::new(2_305_447.5, TimeScale::UTC);
    let tai = converter.convert(t, TimeScale::TAI, &mut warnings);
    assert!(tai.jd_value().is_finite());
    assert!(!warnings.is_empty());
}

#[test]
fn hifitime_epochs_bridge_to_instants() {
    let epoch = hifitime::Epoch::from_gregorian_utc_at_midnight(2000, 1, 1);
    let instant = Instant::from_epoch_tt(epoch);
    assert_eq!(instant.scale, TimeScale::TT);
    // 2000-01-01 00:00 UTC sits 64.184 s (32 leap + 32.184) behind TT.
    let expected = 2_451_544.5 + 64.184 / 86_400.0;
    assert!((instant.jd_value() - expected).abs() < 1e-6);
}

#[test]
fn split_julian_date_keeps_sub_microsecond_resolution() {
    let base = JulianDate::new(2_451_545.0, 0.0);
    let stepped = base.add_seconds(1e-4);
    let diff_us = stepped.minus(&base) * 86_400.0 * 1e6;
    assert!((diff_us - 100.0).abs() < 1e-6, "step read back {diff_us} us");
}

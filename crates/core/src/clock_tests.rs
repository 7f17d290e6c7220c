// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

#[test]
fn system_clock_does_not_go_backwards() {
    let clock = SystemClock;
    let t1 = clock.now();
    let t2 = clock.now();
    assert!(t2 >= t1);
}

#[test]
fn gps_epoch_maps_to_leap_seconds() {
    let epoch = Utc.with_ymd_and_hms(1980, 1, 6, 0, 0, 0).unwrap();
    assert_eq!(gps_time(epoch), LEAP_SECONDS as f64);
}

#[test]
fn gps_time_keeps_sub_second_precision() {
    let at = DateTime::from_timestamp(1_300_000_000, 500_000_000).unwrap();
    assert_eq!(gps_time(at), 984_035_218.5);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::default();
    let t1 = clock.now();
    clock.advance(Duration::seconds(60));
    assert_eq!(clock.now() - t1, Duration::seconds(60));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::default();
    let clock2 = clock1.clone();
    clock2.advance(Duration::seconds(30));
    assert_eq!(clock1.now(), clock2.now());
    assert_eq!(clock1.gps_now(), gps_time(clock2.now()));
}

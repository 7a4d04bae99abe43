// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the interrupt-guarded cells.

use super::{IrqCounter, IrqFlag};

#[test]
fn counter_starts_at_zero() {
    let c = IrqCounter::new();
    assert_eq!(c.load(), 0);
}

#[test]
fn counter_add_sub() {
    let c = IrqCounter::new();
    c.add(3);
    c.add(2);
    assert_eq!(c.load(), 5);
    c.sub(1);
    assert_eq!(c.load(), 4);
}

#[test]
fn counter_saturates_high() {
    let c = IrqCounter::new();
    c.add(250);
    c.add(250);
    assert_eq!(c.load(), u8::MAX);
}

#[test]
fn counter_saturates_low() {
    let c = IrqCounter::new();
    c.add(1);
    c.sub(5);
    assert_eq!(c.load(), 0);
}

#[test]
fn flag_starts_cleared() {
    let f = IrqFlag::new();
    assert!(!f.get());
}

#[test]
fn flag_set_and_clear() {
    let f = IrqFlag::new();
    f.set(true);
    assert!(f.get());
    f.set(false);
    assert!(!f.get());
}

#[test]
fn flag_take_clears() {
    let f = IrqFlag::new();
    f.set(true);
    assert!(f.take());
    assert!(!f.get());
    assert!(!f.take());
}

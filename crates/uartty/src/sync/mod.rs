// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Interrupt-guarded cells.
//!
//! A handful of fields in the line discipline are mutated from one interrupt
//! handler and observed from another handler or from foreground code (the
//! erase backlog, the completed-line count, the flow-control halt flag).
//! These wrappers make every such access a single-bus-cycle atomic so a
//! handler preempting mid-access can never observe a torn or stale-forever
//! value. They are deliberately minimal; wider state stays owned by exactly
//! one context.

#[cfg(test)]
mod sync_test;

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Saturating byte counter shared across interrupt contexts.
pub struct IrqCounter(AtomicU8);

impl IrqCounter {
    /// Create a counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    /// Current value.
    #[must_use]
    pub fn load(&self) -> u8 {
        self.0.load(Ordering::Acquire)
    }

    /// Add `n`, saturating at `u8::MAX`.
    ///
    /// Saturation can only be reached by pathological input (a maximal line
    /// of control characters with `ECHOCTL`); the cost is a missed visual
    /// erase replay, never corrupted state.
    pub fn add(&self, n: u8) {
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                Some(v.saturating_add(n))
            });
    }

    /// Subtract `n`, saturating at zero.
    pub fn sub(&self, n: u8) {
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                Some(v.saturating_sub(n))
            });
    }
}

impl Default for IrqCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Boolean flag shared across interrupt contexts.
pub struct IrqFlag(AtomicBool);

impl IrqFlag {
    /// Create a cleared flag.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set or clear the flag.
    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for IrqFlag {
    fn default() -> Self {
        Self::new()
    }
}

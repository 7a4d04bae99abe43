// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Erase coordinator: backward walks over the unterminated line tail.
//!
//! The receive handler decides *what* to erase; actually wiping the
//! characters from the remote display happens asynchronously in the
//! transmit handler. Each retracted byte adds its echoed column count to
//! the erase backlog, and the transmit engine later replays one
//! backspace-space-backspace sequence per column. No call stack connects
//! the two sides - the backlog counter is the entire protocol.

use super::Uartty;
use crate::ascii;
use crate::config::Flags;

/// When a backward erase walk stops, besides the line boundary.
///
/// A closed set instead of predicate functions keeps the interrupt path
/// free of indirect calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EraseStop {
    /// Erase until the line is empty.
    Never,
    /// Stop when a space is uncovered (word-erase phase two).
    AtSpace,
    /// Stop when a non-space is uncovered (word-erase phase one).
    AtNonSpace,
}

impl EraseStop {
    fn stops(self, byte: u8) -> bool {
        match self {
            Self::Never => false,
            Self::AtSpace => byte == ascii::SPACE,
            Self::AtNonSpace => byte != ascii::SPACE,
        }
    }
}

impl<const RX: usize, const TX: usize> Uartty<RX, TX> {
    /// Retract the most recently queued byte of the current line.
    ///
    /// A NL is re-queued untouched - erasing never crosses into a
    /// completed line. A byte matching `stop` is also re-queued and ends
    /// the walk. Otherwise the byte is gone; if the governing echo flag
    /// (`ECHOK` for kill, `ECHOE` otherwise) is on, the backlog grows by
    /// the number of columns the byte occupied when echoed.
    ///
    /// Returns whether a byte was erased.
    pub(super) fn retract_one(&self, stop: EraseStop, kill: bool) -> bool {
        let Some(byte) = self.rxq.unput() else {
            return false;
        };
        if byte == ascii::NL || stop.stops(byte) {
            // The slot was just freed, re-queueing cannot fail
            let _ = self.rxq.put(byte);
            return false;
        }

        let flags = self.cfg.flags();
        let governing = if kill { Flags::ECHOK } else { Flags::ECHOE };
        if flags.contains(governing) {
            let columns = if flags.contains(Flags::ECHOCTL) && !ascii::is_printable(byte) {
                // Echoed as ^X, two columns wide
                2
            } else {
                1
            };
            self.erase_backlog.add(columns);
        }
        true
    }

    /// Repeat [`Self::retract_one`] until it stops.
    ///
    /// Returns whether any byte was erased.
    pub(super) fn retract_until(&self, stop: EraseStop, kill: bool) -> bool {
        let mut any = false;
        while self.retract_one(stop, kill) {
            any = true;
        }
        any
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Transmit engine: one byte per transmitter-ready interrupt.
//!
//! Work is drained in priority order: flow-control halt, the pending half
//! of a split NL, the erase-replay backlog, then the transmit queue. The
//! erase backlog outranks queued output so a visual erase always lands
//! before any echo or write that was enqueued after it.

use core::sync::atomic::Ordering;

use super::{EraseState, Uartty};
use crate::ascii;
use crate::config::Flags;
use crate::port::Port;

impl<const RX: usize, const TX: usize> Uartty<RX, TX> {
    /// Send at most one byte. Called from the transmitter-ready interrupt.
    pub fn transmit_isr<P: Port>(&self, port: &mut P) {
        if self.halt_output.get() {
            port.set_tx_interrupt(false);
            return;
        }

        if self.send_lf.take() {
            port.write_byte(ascii::NL);
            return;
        }

        // Start the next erase replay once the current one has finished
        let mut state = EraseState::from_raw(self.erase_state.load(Ordering::Acquire));
        if state == EraseState::Idle && self.erase_backlog.load() != 0 {
            self.erase_backlog.sub(1);
            state = EraseState::Backspace1;
        }
        match state {
            EraseState::Backspace1 => {
                self.store_erase_state(EraseState::Space);
                port.write_byte(ascii::BS);
                return;
            }
            EraseState::Space => {
                self.store_erase_state(EraseState::Backspace2);
                port.write_byte(ascii::SPACE);
                return;
            }
            EraseState::Backspace2 => {
                self.store_erase_state(EraseState::Idle);
                port.write_byte(ascii::BS);
                return;
            }
            EraseState::Idle => {}
        }

        if let Some(byte) = self.txq.get() {
            let flags = self.cfg.flags();
            // CR mapping wins, mirroring the input side
            if flags.contains(Flags::OCRNL) && byte == ascii::CR {
                port.write_byte(ascii::NL);
            } else if flags.contains(Flags::ONLCR) && byte == ascii::NL {
                self.send_lf.set(true);
                port.write_byte(ascii::CR);
            } else {
                port.write_byte(byte);
            }
            return;
        }

        // Nothing left; the next enqueue re-enables the source
        port.set_tx_interrupt(false);
    }

    fn store_erase_state(&self, state: EraseState) {
        self.erase_state.store(state as u8, Ordering::Release);
    }
}

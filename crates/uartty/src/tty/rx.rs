// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Receive engine: per-byte processing on the byte-received interrupt.
//!
//! Stage order is fixed: flow control, high-bit strip, CR handling, input
//! mapping, canonical special dispatch, admission. Each special character
//! consumes the byte; only ordinary bytes reach the queue.

use super::Uartty;
use super::erase::EraseStop;
use crate::ascii;
use crate::config::Flags;
use crate::port::Port;

impl<const RX: usize, const TX: usize> Uartty<RX, TX> {
    /// Process one received byte. Called from the byte-received interrupt.
    pub fn receive_isr<P: Port>(&self, port: &mut P) {
        let mut data = port.read_byte();
        let flags = self.cfg.flags();

        if flags.contains(Flags::IXON) {
            if data == ascii::XOFF {
                self.halt_output.set(true);
                port.set_tx_interrupt(false);
                return;
            }
            if data == ascii::XON {
                self.halt_output.set(false);
                port.set_tx_interrupt(true);
                return;
            }
        }

        if flags.contains(Flags::ISTRIP) {
            data &= 0x7F;
        }

        if flags.contains(Flags::IGNCR) && data == ascii::CR {
            return;
        }

        // CR mapping wins when both directions are configured
        if flags.contains(Flags::ICRNL) && data == ascii::CR {
            data = ascii::NL;
        } else if flags.contains(Flags::INLCR) && data == ascii::NL {
            data = ascii::CR;
        }

        if flags.contains(Flags::ICANON) && self.dispatch_special(data, port) {
            return;
        }

        self.admit(data, port);
    }

    /// Canonical editing controls. Returns whether the byte was consumed.
    fn dispatch_special<P: Port>(&self, data: u8, port: &mut P) -> bool {
        let flags = self.cfg.flags();

        // BS is always accepted as an erase alias next to the configured code
        if data == self.cfg.erase() || data == ascii::BS {
            let erased = self.retract_one(EraseStop::Never, false);
            self.finish_erase(erased, Flags::ECHOE, data, port);
            return true;
        }

        if data == self.cfg.kill() {
            let erased = self.retract_until(EraseStop::Never, true);
            self.finish_erase(erased, Flags::ECHOK, data, port);
            return true;
        }

        if flags.contains(Flags::IEXTEN) && data == self.cfg.werase() {
            // Gobble trailing spaces, then the word before them
            let spaces = self.retract_until(EraseStop::AtNonSpace, false);
            let word = self.retract_until(EraseStop::AtSpace, false);
            self.finish_erase(spaces || word, Flags::ECHOE, data, port);
            return true;
        }

        false
    }

    /// Wrap up an editing control: wake the transmit engine for the queued
    /// visual replay, or fall back to echoing the triggering byte itself
    /// when the visual-erase flag is off.
    fn finish_erase<P: Port>(&self, erased: bool, visual: Flags, data: u8, port: &mut P) {
        if self.cfg.flags().contains(visual) {
            if erased {
                self.kick_tx(port);
            }
        } else {
            self.echo(data, port);
        }
    }

    /// Queue an ordinary byte if the line limit allows, and echo it.
    ///
    /// Canonical mode keeps one slot in reserve for a line terminator: a
    /// non-NL byte needs two free slots, so an unterminated line can never
    /// fill the queue and starve the reader of the NL that would complete
    /// it. Raw mode admits up to plain queue capacity.
    fn admit<P: Port>(&self, data: u8, port: &mut P) {
        let canonical = self.cfg.flags().contains(Flags::ICANON);
        let fits = if canonical && data != ascii::NL {
            self.rxq.len() + 2 < RX
        } else {
            !self.rxq.is_full()
        };

        if fits && self.rxq.put(data).is_ok() {
            if canonical && data == ascii::NL {
                self.lines.add(1);
            }
            self.echo(data, port);
        } else if self.cfg.flags().contains(Flags::IMAXBEL) {
            // Best effort: a full transmit queue drops the bell
            let _ = self.txq.put(ascii::BELL);
            self.kick_tx(port);
        }
    }

    /// Echo one received byte back through the transmit queue.
    ///
    /// NL echoes under `ECHO` or `ECHONL`; other bytes only under `ECHO`,
    /// rendered as `^X` when `ECHOCTL` is set and the byte is not
    /// printable. Dropped bytes on a full transmit queue are acceptable -
    /// echo is advisory, the input itself is already queued.
    fn echo<P: Port>(&self, data: u8, port: &mut P) {
        let flags = self.cfg.flags();
        if data == ascii::NL {
            if flags.intersects(Flags::ECHO | Flags::ECHONL) {
                let _ = self.txq.put(ascii::NL);
                self.kick_tx(port);
            }
            return;
        }
        if !flags.contains(Flags::ECHO) {
            return;
        }
        if flags.contains(Flags::ECHOCTL) && !ascii::is_printable(data) {
            let _ = self.txq.put(b'^');
            let _ = self.txq.put(data ^ 0x40);
        } else {
            let _ = self.txq.put(data);
        }
        self.kick_tx(port);
    }
}

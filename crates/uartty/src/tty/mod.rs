// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The line discipline engine.
//!
//! [`Uartty`] owns the receive and transmit queues and all state shared
//! between the two interrupt handlers. Platform glue calls
//! [`Uartty::receive_isr`] from the byte-received interrupt and
//! [`Uartty::transmit_isr`] from the transmitter-ready interrupt; foreground
//! code uses the blocking or non-blocking byte-stream calls. Nothing here
//! ever blocks in interrupt context.
//!
//! In canonical mode input becomes readable line by line: the reader is
//! gated on the count of completed lines, and the editing controls (erase,
//! kill, word erase) rewrite only the still-unterminated tail of the
//! receive queue. That split is what makes the concurrent erase protocol
//! sound - the receive handler retracts bytes the reader can not reach yet.


mod erase;
mod rx;
mod tx;

use core::sync::atomic::AtomicU8;

use crate::ascii;
use crate::config::{Config, ConfigError, Flags};
use crate::port::{Idle, Port};
use crate::queue::{Full, Queue};
use crate::sync::{IrqCounter, IrqFlag};

/// Transmit-side sub-state for replaying one erased column.
///
/// A single erased column goes out as backspace, space, backspace - three
/// bytes, three transmitter-ready firings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum EraseState {
    /// No replay in progress.
    Idle = 0,
    /// Next firing sends the first backspace.
    Backspace1 = 1,
    /// Next firing sends the covering space.
    Space = 2,
    /// Next firing sends the closing backspace.
    Backspace2 = 3,
}

impl EraseState {
    const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Backspace1,
            2 => Self::Space,
            3 => Self::Backspace2,
            _ => Self::Idle,
        }
    }
}

/// Interrupt-driven UART TTY line discipline.
///
/// `RX` and `TX` are the queue sizes (powers of two, 2 to 256); the usable
/// capacity is one byte less on each side. All methods take `&self`, so a
/// `Uartty` can live in a `static` and be reached from interrupt handlers
/// and foreground code alike.
pub struct Uartty<const RX: usize, const TX: usize> {
    cfg: Config,
    rxq: Queue<RX>,
    txq: Queue<TX>,
    /// Completed lines resident in `rxq` (canonical mode read gate).
    lines: IrqCounter,
    /// Erased columns still owed to the transmit engine.
    erase_backlog: IrqCounter,
    /// Set by XOFF, cleared by XON.
    halt_output: IrqFlag,
    /// Only touched from transmit context; atomic so the struct stays
    /// `Sync`.
    erase_state: AtomicU8,
    /// Second half of a NL -> CR NL split, owed by the next firing.
    send_lf: IrqFlag,
}

impl<const RX: usize, const TX: usize> Uartty<RX, TX> {
    /// Build a fresh discipline: queues empty, counters zero, flags clear.
    ///
    /// Rejects invalid queue sizes and contradictory configurations; after
    /// that nothing can fail at runtime.
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        if !capacity_ok(RX) {
            return Err(ConfigError::BadCapacity(RX));
        }
        if !capacity_ok(TX) {
            return Err(ConfigError::BadCapacity(TX));
        }
        cfg.validate()?;
        Ok(Self {
            cfg: cfg.normalize(),
            rxq: Queue::new(),
            txq: Queue::new(),
            lines: IrqCounter::new(),
            erase_backlog: IrqCounter::new(),
            halt_output: IrqFlag::new(),
            erase_state: AtomicU8::new(EraseState::Idle as u8),
            send_lf: IrqFlag::new(),
        })
    }

    /// The configuration the discipline runs with, after normalization.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.cfg
    }

    /// Number of completed lines waiting in the receive queue.
    #[must_use]
    pub fn lines_ready(&self) -> u8 {
        self.lines.load()
    }

    /// Read one byte without blocking.
    ///
    /// In canonical mode bytes become readable only once their line has
    /// been terminated; in raw mode any received byte is readable at once.
    pub fn read_nonblocking(&self) -> Option<u8> {
        let canonical = self.cfg.flags().contains(Flags::ICANON);
        if canonical && self.lines.load() == 0 {
            return None;
        }
        let byte = self.rxq.get()?;
        if canonical && byte == ascii::NL {
            self.lines.sub(1);
        }
        Some(byte)
    }

    /// Read one byte, spinning on `idle` until one is readable.
    pub fn read<I: Idle>(&self, idle: &mut I) -> u8 {
        loop {
            if let Some(byte) = self.read_nonblocking() {
                return byte;
            }
            idle.idle();
        }
    }

    /// Queue one byte for transmission without blocking.
    ///
    /// Fails with [`Full`] when the transmit queue has no free slot.
    pub fn write_nonblocking<P: Port>(&self, byte: u8, port: &mut P) -> Result<(), Full> {
        self.txq.put(byte)?;
        self.kick_tx(port);
        Ok(())
    }

    /// Queue one byte for transmission, spinning on `idle` while full.
    pub fn write<P: Port, I: Idle>(&self, byte: u8, port: &mut P, idle: &mut I) {
        while self.write_nonblocking(byte, port).is_err() {
            idle.idle();
        }
    }

    /// Wake the transmit engine after enqueueing, unless output is halted.
    ///
    /// XON is the only event that revives a halted transmitter.
    fn kick_tx<P: Port>(&self, port: &mut P) {
        if !self.halt_output.get() {
            port.set_tx_interrupt(true);
        }
    }
}

const fn capacity_ok(n: usize) -> bool {
    n >= 2 && n <= 256 && n.is_power_of_two()
}

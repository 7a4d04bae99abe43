// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # uartty
//!
//! Interrupt-driven UART line discipline for single-core bare-metal targets.
//!
//! This crate provides:
//! - Lock-free single-producer/single-consumer byte queues
//! - A receive engine with termios-like input translation and canonical
//!   line editing (erase, kill, word erase)
//! - A transmit engine that replays visual erase sequences asynchronously,
//!   one byte per interrupt firing
//! - XON/XOFF software flow control
//! - A blocking/non-blocking byte-stream interface for foreground code
//!
//! The hardware is reached only through the [`port::Port`] trait; interrupt
//! glue on the target platform reads the data register, dispatches to
//! [`tty::Uartty::receive_isr`] / [`tty::Uartty::transmit_isr`], and wires
//! `set_tx_interrupt` to the peripheral's transmit interrupt enable bit.
//! Everything above that line is platform independent and runs unmodified
//! on the host for testing.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod ascii;
pub mod config;
pub mod port;
pub mod queue;
pub mod sync;
pub mod tty;

// Re-export commonly used types at crate root
pub use config::{Config, ConfigError, Flags, Preset};
#[cfg(any(test, feature = "std"))]
pub use port::MockPort;
pub use port::{Idle, Port, Spin};
pub use queue::{Full, Queue};
pub use tty::Uartty;

// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared harness for line discipline integration tests.

use uartty::{Config, MockPort, Uartty};

/// A discipline wired to a mock port, driven the way real interrupt glue
/// would drive it: one receive firing per typed byte, transmit firings
/// whenever the transmit interrupt source is enabled.
pub struct Session {
    pub tty: Uartty<64, 64>,
    pub port: MockPort,
}

impl Session {
    /// Start a session with the given configuration.
    #[expect(clippy::expect_used, reason = "test setup fails loudly")]
    pub fn new(cfg: Config) -> Self {
        Self {
            tty: Uartty::new(cfg).expect("test configuration must be valid"),
            port: MockPort::new(),
        }
    }

    /// Deliver bytes from the remote side, one receive interrupt each,
    /// letting the transmitter drain between keystrokes as real hardware
    /// would.
    pub fn type_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.port.push_input(&[*byte]);
            self.tty.receive_isr(&mut self.port);
            self.drain();
        }
    }

    /// Fire the transmit interrupt until the engine goes idle.
    pub fn drain(&mut self) {
        let mut guard = 0;
        while self.port.tx_interrupt_enabled() {
            self.tty.transmit_isr(&mut self.port);
            guard += 1;
            assert!(guard < 10_000, "transmit engine never went idle");
        }
    }

    /// Everything sent to the remote side so far.
    pub fn wire(&self) -> &[u8] {
        self.port.output()
    }

    /// Read one completed line, including its terminator.
    pub fn read_line(&self) -> Vec<u8> {
        let mut line = Vec::new();
        while let Some(byte) = self.tty.read_nonblocking() {
            line.push(byte);
            if byte == b'\n' {
                break;
            }
        }
        line
    }
}

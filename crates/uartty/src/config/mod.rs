// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Line discipline configuration.
//!
//! A [`Config`] is built once at startup - from a [`Preset`] plus individual
//! overrides - validated, and then never changes for the life of the
//! process. Every behavioral branch in the engines is gated by it.
//!
//! Flag names follow their termios ancestors so the mapping to `stty`
//! output stays obvious.

#[cfg(test)]
mod config_test;

use bitflags::bitflags;

use crate::ascii;

bitflags! {
    /// Behavior flags of the line discipline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u16 {
        /// Strip the high bit from received bytes.
        const ISTRIP = 1 << 0;
        /// Map received NL to CR.
        const INLCR = 1 << 1;
        /// Discard received CR.
        const IGNCR = 1 << 2;
        /// Map received CR to NL (takes priority over `INLCR`).
        const ICRNL = 1 << 3;
        /// XON/XOFF software flow control on output.
        const IXON = 1 << 4;
        /// Ring the bell instead of silently dropping on a full input line.
        const IMAXBEL = 1 << 5;
        /// Enable output post-processing (`OCRNL`/`ONLCR` depend on it).
        const OPOST = 1 << 6;
        /// Map transmitted CR to NL (takes priority over `ONLCR`).
        const OCRNL = 1 << 7;
        /// Map transmitted NL to CR-NL.
        const ONLCR = 1 << 8;
        /// Canonical mode: line-buffered input with editing controls.
        const ICANON = 1 << 9;
        /// Extended editing: enables word erase.
        const IEXTEN = 1 << 10;
        /// Echo received bytes back for visual feedback.
        const ECHO = 1 << 11;
        /// Echo erase as a visual backspace-space-backspace wipe.
        const ECHOE = 1 << 12;
        /// Echo kill by visually wiping the whole pending line.
        const ECHOK = 1 << 13;
        /// Echo NL even when `ECHO` is off.
        const ECHONL = 1 << 14;
        /// Echo control characters as `^X`.
        const ECHOCTL = 1 << 15;
    }
}

/// Starting point for a [`Config`], mirroring the `stty` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Everything off, bytes pass through untouched (`cfmakeraw`-alike).
    Raw,
    /// `stty cooked`: input mapping, flow control, output processing,
    /// canonical mode.
    Cooked,
    /// `stty sane`: cooked plus echo, visual editing and bell-on-overflow.
    Sane,
}

impl Preset {
    /// Expand the preset into its flag set.
    #[must_use]
    pub const fn flags(self) -> Flags {
        match self {
            Self::Raw => Flags::empty(),
            Self::Cooked => Flags::ICRNL
                .union(Flags::IXON)
                .union(Flags::OPOST)
                .union(Flags::ICANON),
            Self::Sane => Flags::ICRNL
                .union(Flags::IMAXBEL)
                .union(Flags::OPOST)
                .union(Flags::ONLCR)
                .union(Flags::ICANON)
                .union(Flags::IEXTEN)
                .union(Flags::ECHO)
                .union(Flags::ECHOE)
                .union(Flags::ECHOK)
                .union(Flags::ECHOCTL),
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A canonical special character collides with another one, with NL,
    /// with the hardwired BS erase alias, or with a flow-control code while
    /// `IXON` is set. The keystroke could never reach its handler.
    SpecialCharConflict(u8),
    /// A queue capacity is not a power of two between 2 and 256.
    BadCapacity(usize),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpecialCharConflict(byte) => {
                write!(f, "special character {byte:#04x} conflicts with another role")
            }
            Self::BadCapacity(n) => {
                write!(f, "queue capacity {n} is not a power of two in 2..=256")
            }
        }
    }
}

/// Immutable line discipline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    flags: Flags,
    erase: u8,
    kill: u8,
    werase: u8,
}

impl Config {
    /// Build a configuration from a preset with the default editing
    /// characters (erase `^?`, kill `^U`, word erase `^W`).
    #[must_use]
    pub const fn preset(preset: Preset) -> Self {
        Self {
            flags: preset.flags(),
            erase: ascii::DEL,
            kill: ascii::ctrl(b'U'),
            werase: ascii::ctrl(b'W'),
        }
    }

    /// Turn the given flags on.
    #[must_use]
    pub const fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Turn the given flags off.
    #[must_use]
    pub const fn without_flags(mut self, flags: Flags) -> Self {
        self.flags = self.flags.difference(flags);
        self
    }

    /// Override the erase character.
    #[must_use]
    pub const fn with_erase_char(mut self, byte: u8) -> Self {
        self.erase = byte;
        self
    }

    /// Override the kill character.
    #[must_use]
    pub const fn with_kill_char(mut self, byte: u8) -> Self {
        self.kill = byte;
        self
    }

    /// Override the word-erase character.
    #[must_use]
    pub const fn with_werase_char(mut self, byte: u8) -> Self {
        self.werase = byte;
        self
    }

    /// The active flag set.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// The erase character code.
    #[must_use]
    pub const fn erase(&self) -> u8 {
        self.erase
    }

    /// The kill character code.
    #[must_use]
    pub const fn kill(&self) -> u8 {
        self.kill
    }

    /// The word-erase character code.
    #[must_use]
    pub const fn werase(&self) -> u8 {
        self.werase
    }

    /// Clear flags whose prerequisite flag is off.
    ///
    /// Output mapping requires `OPOST`; the visual echo variants require
    /// `ECHO`. Canonical editing and word erase are gated at dispatch time
    /// by `ICANON` and `IEXTEN` instead, since those carry character codes
    /// rather than derived flags.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if !self.flags.contains(Flags::OPOST) {
            self.flags.remove(Flags::OCRNL | Flags::ONLCR);
        }
        if !self.flags.contains(Flags::ECHO) {
            self.flags.remove(Flags::ECHOE | Flags::ECHOK | Flags::ECHOCTL);
        }
        self
    }

    /// Reject contradictory combinations.
    ///
    /// Only meaningful in canonical mode, where the special characters are
    /// live: each must be distinguishable from every other byte the receive
    /// engine intercepts earlier or at the same dispatch stage.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.flags.contains(Flags::ICANON) {
            return Ok(());
        }
        let specials = [self.erase, self.kill, self.werase];
        if self.erase == self.kill || self.kill == self.werase {
            return Err(ConfigError::SpecialCharConflict(self.kill));
        }
        if self.erase == self.werase {
            return Err(ConfigError::SpecialCharConflict(self.werase));
        }
        for byte in specials {
            if byte == ascii::NL {
                return Err(ConfigError::SpecialCharConflict(byte));
            }
            if self.flags.contains(Flags::IXON) && (byte == ascii::XON || byte == ascii::XOFF) {
                return Err(ConfigError::SpecialCharConflict(byte));
            }
        }
        // BS is accepted as an erase alias unconditionally, so it cannot
        // double as kill or word erase.
        if self.kill == ascii::BS || self.werase == ascii::BS {
            return Err(ConfigError::SpecialCharConflict(ascii::BS));
        }
        Ok(())
    }
}

impl Default for Config {
    /// The `sane` preset, the configuration an interactive terminal wants.
    fn default() -> Self {
        Self::preset(Preset::Sane)
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! ASCII control bytes used by the line discipline.

/// Line feed.
pub const NL: u8 = b'\n';

/// Carriage return.
pub const CR: u8 = b'\r';

/// Backspace.
pub const BS: u8 = 0x08;

/// Space.
pub const SPACE: u8 = b' ';

/// Bell, sent when input overflows under `IMAXBEL`.
pub const BELL: u8 = 0x07;

/// Delete (`^?`), the default erase character.
pub const DEL: u8 = 0x7F;

/// Resume output (`^Q`, DC1).
pub const XON: u8 = 0x11;

/// Halt output (`^S`, DC3).
pub const XOFF: u8 = 0x13;

/// The control character for an uppercase letter, e.g. `ctrl(b'U')` is `^U`.
#[must_use]
pub const fn ctrl(byte: u8) -> u8 {
    byte & 0x1F
}

/// Whether a byte occupies one printable column on a terminal.
#[must_use]
pub const fn is_printable(byte: u8) -> bool {
    byte >= 0x20 && byte < 0x7F
}

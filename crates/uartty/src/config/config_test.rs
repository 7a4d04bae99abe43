// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for configuration building, normalization and validation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::{Config, ConfigError, Flags, Preset};
use crate::ascii;

#[test]
fn raw_preset_is_empty() {
    let cfg = Config::preset(Preset::Raw);
    assert_eq!(cfg.flags(), Flags::empty());
}

#[test]
fn cooked_preset_matches_stty() {
    let cfg = Config::preset(Preset::Cooked);
    assert_eq!(
        cfg.flags(),
        Flags::ICRNL | Flags::IXON | Flags::OPOST | Flags::ICANON
    );
}

#[test]
fn sane_preset_enables_visual_editing() {
    let cfg = Config::preset(Preset::Sane);
    assert!(cfg.flags().contains(Flags::ICANON | Flags::ECHO | Flags::ECHOE));
    assert!(cfg.flags().contains(Flags::ONLCR | Flags::ECHOCTL | Flags::IMAXBEL));
    assert!(!cfg.flags().contains(Flags::INLCR));
    assert!(!cfg.flags().contains(Flags::ECHONL));
}

#[test]
fn default_editing_characters() {
    let cfg = Config::preset(Preset::Sane);
    assert_eq!(cfg.erase(), 0x7F);
    assert_eq!(cfg.kill(), ascii::ctrl(b'U'));
    assert_eq!(cfg.werase(), ascii::ctrl(b'W'));
}

#[test]
fn flag_overrides() {
    let cfg = Config::preset(Preset::Sane)
        .without_flags(Flags::ONLCR)
        .with_flags(Flags::OCRNL);
    assert!(!cfg.flags().contains(Flags::ONLCR));
    assert!(cfg.flags().contains(Flags::OCRNL));
}

#[test]
fn character_overrides() {
    let cfg = Config::preset(Preset::Sane)
        .with_erase_char(ascii::ctrl(b'H'))
        .with_kill_char(ascii::ctrl(b'X'))
        .with_werase_char(ascii::ctrl(b'B'));
    assert_eq!(cfg.erase(), 0x08);
    assert_eq!(cfg.kill(), 0x18);
    assert_eq!(cfg.werase(), 0x02);
}

#[test]
fn normalize_strips_output_mapping_without_opost() {
    let cfg = Config::preset(Preset::Raw)
        .with_flags(Flags::ONLCR | Flags::OCRNL)
        .normalize();
    assert!(!cfg.flags().intersects(Flags::ONLCR | Flags::OCRNL));
}

#[test]
fn normalize_strips_echo_variants_without_echo() {
    let cfg = Config::preset(Preset::Sane)
        .without_flags(Flags::ECHO)
        .normalize();
    assert!(!cfg.flags().intersects(Flags::ECHOE | Flags::ECHOK | Flags::ECHOCTL));
    // ECHONL is independent of ECHO
    let cfg = Config::preset(Preset::Raw)
        .with_flags(Flags::ECHONL)
        .normalize();
    assert!(cfg.flags().contains(Flags::ECHONL));
}

#[test]
fn normalize_keeps_enabled_prerequisites() {
    let cfg = Config::preset(Preset::Sane).normalize();
    assert_eq!(cfg, Config::preset(Preset::Sane));
}

#[test]
fn validate_accepts_presets() {
    for preset in [Preset::Raw, Preset::Cooked, Preset::Sane] {
        Config::preset(preset).validate().unwrap();
    }
}

#[test]
fn validate_rejects_duplicate_specials() {
    let cfg = Config::preset(Preset::Sane).with_kill_char(0x7F);
    assert_eq!(cfg.validate(), Err(ConfigError::SpecialCharConflict(0x7F)));
}

#[test]
fn validate_rejects_newline_special() {
    let cfg = Config::preset(Preset::Sane).with_werase_char(b'\n');
    assert_eq!(cfg.validate(), Err(ConfigError::SpecialCharConflict(b'\n')));
}

#[test]
fn validate_rejects_flow_control_collision() {
    let cfg = Config::preset(Preset::Cooked).with_kill_char(ascii::XOFF);
    assert_eq!(cfg.validate(), Err(ConfigError::SpecialCharConflict(ascii::XOFF)));
    // Without IXON the code is free for other roles
    let cfg = cfg.without_flags(Flags::IXON);
    cfg.validate().unwrap();
}

#[test]
fn validate_rejects_backspace_reuse() {
    let cfg = Config::preset(Preset::Sane).with_kill_char(0x08);
    assert_eq!(cfg.validate(), Err(ConfigError::SpecialCharConflict(0x08)));
}

#[test]
fn validate_ignores_specials_in_raw_mode() {
    // Non-canonical mode never dispatches on the codes
    let cfg = Config::preset(Preset::Raw).with_kill_char(0x7F);
    cfg.validate().unwrap();
}

#[test]
fn default_is_sane() {
    assert_eq!(Config::default(), Config::preset(Preset::Sane));
}

//! Marquee Sign Input Protocol
//!
//! This crate defines the boundary between a host surface (terminal, GUI,
//! LED panel front-end) and the sign engine. The host captures raw key
//! presses; everything it hands to the engine is expressed in the small
//! vocabulary defined here.
//!
//! # Event Flow
//!
//! ```text
//! raw key ──► RawKey::to_payload ──► EditEvent { line, payload } ──► controller
//! ```
//!
//! Key translation is table driven: a handful of fixed control codes plus a
//! table of modifier combinations that produce symbols a plain key press
//! cannot reach.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod keys;

pub use events::{EditEvent, EditPayload};
pub use keys::{Combo, Modifiers, RawKey, SPECIAL_COMBOS};

/// Number of text lines on the sign
pub const SIGN_LINES: u8 = 3;

/// Maximum characters per sign line
pub const LINE_LEN: usize = 20;

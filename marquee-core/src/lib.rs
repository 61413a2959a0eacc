//! Board-agnostic core logic for the Marquee message sign
//!
//! This crate contains everything between a key press and a lit pixel:
//!
//! - The 7x5 glyph table and the fixed alphabet
//! - Per-line edit buffers with their editing/displayed state machine
//! - The encoder that composes a line into a dot-matrix bitmap
//! - The renderer that maps bitmap cells onto host styles
//! - The edit controller that routes input events to lines

#![no_std]
#![deny(unsafe_code)]

pub mod alphabet;
pub mod config;
pub mod controller;
pub mod encoder;
pub mod error;
pub mod glyph;
pub mod line;
pub mod render;
pub mod state;

pub use alphabet::{Alphabet, ALPHABET};
pub use controller::{EditController, Outcome};
pub use encoder::{encode, Bitmap, Cell};
pub use error::SignError;
pub use glyph::Glyph;
pub use line::LineBuffer;
pub use render::{render, Palette, Stroke};
pub use state::LineMode;

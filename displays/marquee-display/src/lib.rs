//! Display abstraction for Marquee sign hosts
//!
//! This crate provides:
//! - `DisplayBackend` trait for the surfaces a sign can be drawn on
//! - `Screen`, a mirror of the sign's lines that tracks what needs redrawing
//!
//! # Architecture
//!
//! The edit controller owns the lines. After each event the host refreshes a
//! `Screen` from the controller and renders it to its backend; only lines
//! whose text or bitmap changed are redrawn.
//!
//! ## Backends
//!
//! - **Terminal**: cells drawn as colored block characters
//! - **LED panels**: cells mapped straight to pixel brightness
//! - **Test recorders**: capture draw calls for assertions

#![no_std]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{RowView, Screen};

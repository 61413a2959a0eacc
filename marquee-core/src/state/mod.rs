//! Line state machine
//!
//! Each sign line is an independent two-state machine. The state decides
//! which input a line accepts; presentation derives from it.

pub mod machine;

pub use machine::LineMode;

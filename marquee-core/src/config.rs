//! Sign geometry and built-in messages

pub use marquee_protocol::{LINE_LEN as MAX_LEN, SIGN_LINES};

/// Number of lines as an array length
pub const LINE_COUNT: usize = SIGN_LINES as usize;

/// Message shown by the arrow preset
///
/// Ten arrows separated by blanks, sized to fit one line.
pub const ARROW_MESSAGE: &str = "> > > > > > > > > >";

/// Line the arrow preset is shown on
pub const ARROW_LINE: u8 = 1;

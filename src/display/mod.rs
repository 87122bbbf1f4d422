//! Terminal rendering of the slideshow and the one-shot printout

pub mod colors;
pub mod frame;
pub mod printout;
pub mod text;
pub mod ticker;

pub use frame::{FrameContext, StyledLine, present, render_frame};
pub use printout::{write_json, write_plain};
pub use ticker::Ticker;

//! Big-screen slide rotation

pub mod runner;
pub mod sequencer;
pub mod slides;

pub use runner::{KeyAction, Slideshow, key_action, run_slideshow};
pub use sequencer::{SequencerEvent, SlideSequencer};
pub use slides::{SlideDescriptor, build_view_list, resolve_flash_text, resolve_ticker_items};

//! Ambient playback core.
//!
//! Platform-independent pieces of the background-music player: the track list,
//! the controller state machine, and the seams (media output, status bus,
//! first-gesture trigger) that the UI layer plugs into.

mod config;
mod controller;
mod error;
mod events;
mod gesture;
mod media;
mod tracks;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use events::*;
pub use gesture::*;
pub use media::*;
pub use tracks::*;

//! The components module contains all shared components for our app.

mod app;
mod audio_manager;
mod background_music;
mod icons;
mod loading_screen;

pub use app::*;
pub use audio_manager::*;
pub use background_music::*;
pub use icons::*;
pub use loading_screen::*;

use thiserror::Error;

/// Errors raised while setting up ambient playback.
///
/// Nothing here is ever shown to the listener; failures during playback itself
/// are absorbed by the controller and only logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("track list is empty")]
    EmptyTrackList,

    #[error("track {index} has a blank resource path")]
    BlankTrack { index: usize },

    #[error("media output unavailable: {0}")]
    MediaUnavailable(String),
}

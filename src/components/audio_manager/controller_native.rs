// Native builds render in a webview the session cannot reach directly, so the
// session starts detached and every transport control is a no-op.
#[cfg(not(target_arch = "wasm32"))]
fn open_platform_output(
    _sink: MediaEventSink,
    _load_timeout_ms: u32,
) -> Result<Box<dyn MediaOutput>, PlaybackError> {
    Err(PlaybackError::MediaUnavailable(
        "no browser audio element on this target".to_string(),
    ))
}

#[cfg(not(target_arch = "wasm32"))]
fn attach_first_gesture(_trigger: FirstGestureTrigger) -> Option<DetachFn> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn defer_media_event<F>(_f: F)
where
    F: FnOnce() + 'static,
{
    tracing::debug!("dropping re-entrant media event");
}

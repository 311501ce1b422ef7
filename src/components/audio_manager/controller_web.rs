#[cfg(target_arch = "wasm32")]
fn open_platform_output(
    sink: MediaEventSink,
    load_timeout_ms: u32,
) -> Result<Box<dyn MediaOutput>, PlaybackError> {
    let output = WebAudioOutput::attach(sink, load_timeout_ms)?;
    Ok(Box::new(output))
}

#[cfg(target_arch = "wasm32")]
fn defer_media_event<F>(f: F)
where
    F: FnOnce() + 'static,
{
    spawn_local(async move { f() });
}

// Browser media output built on a detached HtmlAudioElement.
#[cfg(target_arch = "wasm32")]
pub struct WebAudioOutput {
    audio: HtmlAudioElement,
    sink: MediaEventSink,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
    load_timeout: Option<Timeout>,
    load_timeout_ms: u32,
}

#[cfg(target_arch = "wasm32")]
impl WebAudioOutput {
    pub fn attach(sink: MediaEventSink, load_timeout_ms: u32) -> Result<Self, PlaybackError> {
        let audio = HtmlAudioElement::new()
            .map_err(|err| PlaybackError::MediaUnavailable(describe_js_error(&err)))?;
        audio.set_preload("auto");

        let mut output = Self {
            audio,
            sink,
            listeners: Vec::new(),
            load_timeout: None,
            load_timeout_ms,
        };
        output.listen("canplay", |_| MediaEvent::Ready);
        output.listen("play", |_| MediaEvent::Playing);
        output.listen("pause", |_| MediaEvent::Paused);
        output.listen("ended", |_| MediaEvent::Ended);
        output.listen("error", |audio| MediaEvent::LoadFailed(media_error_message(audio)));
        Ok(output)
    }

    fn listen(&mut self, event_type: &'static str, to_event: fn(&HtmlAudioElement) -> MediaEvent) {
        let sink = self.sink.clone();
        let audio = self.audio.clone();
        let callback = Closure::wrap(Box::new(move || sink(to_event(&audio))) as Box<dyn FnMut()>);
        if let Err(err) = self
            .audio
            .add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event_type, error = %describe_js_error(&err), "failed to attach media listener");
        }
        self.listeners.push((event_type, callback));
    }

    fn detach_listeners(&mut self) {
        for (event_type, callback) in self.listeners.drain(..) {
            let _ = self
                .audio
                .remove_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref());
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaOutput for WebAudioOutput {
    fn bind(&mut self, resource: &str) {
        self.load_timeout = None;
        self.audio.set_src(resource);
    }

    fn load(&mut self, ticket: LoadTicket) {
        self.audio.load();
        let sink = self.sink.clone();
        self.load_timeout = Some(Timeout::new(self.load_timeout_ms, move || {
            // Dispatch after the timer callback returns; handling it replaces this timer.
            spawn_local(async move { sink(MediaEvent::LoadTimedOut(ticket)) });
        }));
    }

    fn play(&mut self) {
        let sink = self.sink.clone();
        match self.audio.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    sink(MediaEvent::PlayRejected(describe_js_error(&err)));
                }
            }),
            Err(err) => {
                let reason = describe_js_error(&err);
                spawn_local(async move { sink(MediaEvent::PlayRejected(reason)) });
            }
        }
    }

    fn pause(&mut self) {
        let _ = self.audio.pause();
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume);
    }

    fn release(&mut self) {
        self.load_timeout = None;
        let _ = self.audio.pause();
        self.detach_listeners();
        self.audio.set_src("");
        let _ = self.audio.remove_attribute("src");
        self.audio.load();
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for WebAudioOutput {
    fn drop(&mut self) {
        self.detach_listeners();
    }
}

#[cfg(target_arch = "wasm32")]
fn media_error_message(audio: &HtmlAudioElement) -> String {
    let Some(error) = audio.error() else {
        return "Unable to load this audio source.".to_string();
    };
    match error.code() {
        1 => "Playback was aborted before the track loaded.".to_string(),
        2 => "Network error while loading this track.".to_string(),
        3 => "Audio playback failed due to a decode error.".to_string(),
        4 => "Failed to load audio because no supported source was found.".to_string(),
        code => format!("Unable to load this audio source (code {code})."),
    }
}

#[cfg(target_arch = "wasm32")]
fn describe_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", error.name(), error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

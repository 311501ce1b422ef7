use crossbeam_channel::Receiver;

use super::{
    normalize_volume, LoadTicket, MediaEvent, MediaOutput, PlaybackConfig, StatusBus, TrackList,
};

/// Lifecycle phase of a [`PlaybackController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// Only observable before the first track has been bound.
    #[default]
    Uninitialized,
    /// A track is bound and the output has not reported readiness yet.
    Loading,
    /// The current track can play; `is_playing` tells paused from playing.
    Ready,
    /// Every track failed to load in a row; no further loads are issued
    /// until a transport control is used.
    Stalled,
    /// Torn down. Nothing changes any more.
    Released,
}

/// Snapshot of everything presentation layers need to render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackStatus {
    pub phase: PlaybackPhase,
    pub current_track_index: usize,
    pub current_track_name: String,
    pub track_count: usize,
    pub is_playing: bool,
    pub is_loaded: bool,
    pub volume: f64,
}

/// Background music state machine.
///
/// Owns one media output, sequences the track list through it and mirrors
/// its play/pause notifications. All outcomes of requests made to the output
/// come back through [`PlaybackController::handle_event`].
pub struct PlaybackController<M: MediaOutput> {
    tracks: TrackList,
    media: M,
    bus: StatusBus,
    phase: PlaybackPhase,
    index: usize,
    is_playing: bool,
    is_loaded: bool,
    volume: f64,
    autoplay: bool,
    // Play as soon as the current load reports readiness.
    resume_on_ready: bool,
    ticket: LoadTicket,
    failed_loads: usize,
}

impl<M: MediaOutput> PlaybackController<M> {
    /// Build a controller and immediately start loading the first track.
    pub fn new(tracks: TrackList, config: &PlaybackConfig, media: M) -> Self {
        let mut controller = Self {
            tracks,
            media,
            bus: StatusBus::new(),
            phase: PlaybackPhase::Uninitialized,
            index: 0,
            is_playing: false,
            is_loaded: false,
            volume: config.effective_volume(),
            autoplay: config.autoplay,
            resume_on_ready: false,
            ticket: LoadTicket::default(),
            failed_loads: 0,
        };
        controller.media.set_volume(controller.volume);
        controller.begin_load(config.autoplay);
        controller
    }

    pub fn play(&mut self) {
        match self.phase {
            PlaybackPhase::Released | PlaybackPhase::Uninitialized => {}
            PlaybackPhase::Stalled => {
                tracing::debug!(index = self.index, "retrying stalled playlist");
                self.failed_loads = 0;
                self.begin_load(true);
            }
            PlaybackPhase::Loading | PlaybackPhase::Ready => self.media.play(),
        }
    }

    /// Ask the output to stop. `is_playing` follows the resulting notification.
    pub fn pause(&mut self) {
        if self.is_released() {
            return;
        }
        self.resume_on_ready = false;
        self.media.pause();
    }

    pub fn toggle(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn next(&mut self) {
        if self.is_released() {
            return;
        }
        let target = self.tracks.next_index(self.index);
        self.switch_to(target);
    }

    pub fn previous(&mut self) {
        if self.is_released() {
            return;
        }
        let target = self.tracks.previous_index(self.index);
        self.switch_to(target);
    }

    /// Apply a new volume, clamped to `[0, 1]`. Returns the effective volume.
    pub fn set_volume(&mut self, volume: f64) -> f64 {
        if self.is_released() {
            return self.volume;
        }
        if !volume.is_finite() {
            tracing::warn!(volume, "ignoring non-finite volume");
            return self.volume;
        }
        self.volume = normalize_volume(volume, self.volume);
        self.media.set_volume(self.volume);
        self.publish();
        self.volume
    }

    /// Feed a notification from the media output into the state machine.
    pub fn handle_event(&mut self, event: MediaEvent) {
        if self.is_released() {
            tracing::debug!(?event, "dropping media event after teardown");
            return;
        }

        match event {
            MediaEvent::Ready => {
                if self.phase != PlaybackPhase::Loading {
                    return;
                }
                self.phase = PlaybackPhase::Ready;
                self.is_loaded = true;
                self.failed_loads = 0;
                tracing::debug!(index = self.index, ticket = %self.ticket, "track ready");
                if std::mem::take(&mut self.resume_on_ready) {
                    self.media.play();
                }
            }
            MediaEvent::Playing => self.is_playing = true,
            MediaEvent::Paused => self.is_playing = false,
            MediaEvent::Ended => {
                let next = self.tracks.next_index(self.index);
                tracing::debug!(from = self.index, to = next, "track finished");
                self.index = next;
                self.begin_load(true);
            }
            MediaEvent::PlayRejected(reason) => {
                // Expected before the first user gesture; the gesture trigger retries.
                tracing::info!(%reason, "playback request refused");
            }
            MediaEvent::LoadFailed(reason) => match self.phase {
                PlaybackPhase::Loading => {
                    tracing::warn!(index = self.index, %reason, "track failed to load");
                    self.skip_failed_track();
                }
                PlaybackPhase::Ready => {
                    // The track had loaded, so this does not count as a load failure.
                    let next = self.tracks.next_index(self.index);
                    let resume = self.is_playing;
                    tracing::warn!(
                        from = self.index,
                        to = next,
                        %reason,
                        resume,
                        "track failed mid-playback"
                    );
                    self.index = next;
                    self.begin_load(resume);
                }
                _ => return,
            },
            MediaEvent::LoadTimedOut(ticket) => {
                if ticket != self.ticket || self.phase != PlaybackPhase::Loading {
                    return;
                }
                tracing::warn!(index = self.index, %ticket, "track load timed out");
                self.skip_failed_track();
            }
        }

        self.publish();
    }

    /// Stop playback and release the media output. Idempotent.
    pub fn teardown(&mut self) {
        if self.is_released() {
            return;
        }
        self.media.pause();
        self.media.release();
        self.phase = PlaybackPhase::Released;
        self.is_playing = false;
        self.resume_on_ready = false;
        tracing::debug!("playback controller released");
        self.publish();
    }

    /// Receiver of status snapshots, starting with the current one.
    pub fn subscribe(&self) -> Receiver<PlaybackStatus> {
        self.bus.subscribe()
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            phase: self.phase,
            current_track_index: self.index,
            current_track_name: self.current_track_name(),
            track_count: self.track_count(),
            is_playing: self.is_playing,
            is_loaded: self.is_loaded,
            volume: self.volume,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn current_track_index(&self) -> usize {
        self.index
    }

    pub fn current_track_name(&self) -> String {
        self.tracks.display_name(self.index)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[cfg(test)]
    pub fn load_ticket(&self) -> LoadTicket {
        self.ticket
    }

    fn is_released(&self) -> bool {
        self.phase == PlaybackPhase::Released
    }

    fn switch_to(&mut self, index: usize) {
        let resume = self.is_playing || self.autoplay;
        tracing::debug!(from = self.index, to = index, resume, "switching track");
        self.index = index;
        self.failed_loads = 0;
        self.begin_load(resume);
    }

    fn skip_failed_track(&mut self) {
        self.failed_loads += 1;
        if self.failed_loads >= self.tracks.len() {
            tracing::warn!(failed = self.failed_loads, "no track could be loaded, stalling");
            self.phase = PlaybackPhase::Stalled;
            self.is_loaded = false;
            return;
        }
        self.index = self.tracks.next_index(self.index);
        let resume = self.resume_on_ready || self.is_playing;
        self.begin_load(resume);
    }

    // Bind and load happen back to back, so a new load never overlaps a
    // previous one on this controller.
    fn begin_load(&mut self, resume: bool) {
        let Some(resource) = self.tracks.get(self.index) else {
            return;
        };
        self.ticket = self.ticket.next();
        self.phase = PlaybackPhase::Loading;
        self.is_loaded = false;
        self.resume_on_ready = resume;
        self.media.bind(resource);
        self.media.load(self.ticket);
        self.publish();
    }

    fn publish(&self) {
        self.bus.publish(self.status());
    }
}

impl<M: MediaOutput> Drop for PlaybackController<M> {
    fn drop(&mut self) {
        self.teardown();
    }
}

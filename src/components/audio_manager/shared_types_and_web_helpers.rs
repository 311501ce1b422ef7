// Shared imports and the application-scoped playback session.
use dioxus::prelude::*;

use crate::db::{save_settings, AmbientSettings};
use crate::playback::{
    FirstGestureTrigger, MediaEvent, MediaEventSink, MediaOutput, PlaybackConfig,
    PlaybackController, PlaybackError, PlaybackStatus,
};
use crossbeam_channel::Receiver;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[cfg(target_arch = "wasm32")]
use crate::playback::{GestureKind, LoadTicket};
#[cfg(target_arch = "wasm32")]
use gloo_timers::callback::Timeout;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::{spawn_local, JsFuture};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, Document, HtmlAudioElement};

type AmbientController = PlaybackController<Box<dyn MediaOutput>>;
type SharedController = Rc<RefCell<Option<AmbientController>>>;
type DetachFn = Box<dyn FnOnce()>;

/// Handle to the ambient playback session, provided through context.
///
/// Created once by the application root and shut down once when it unmounts.
/// Cloning is cheap; every clone drives the same controller.
#[derive(Clone)]
pub struct AmbientAudio {
    controller: SharedController,
    updates: Option<Receiver<PlaybackStatus>>,
    status: Signal<PlaybackStatus>,
    settings: Signal<AmbientSettings>,
    gesture_detach: Rc<RefCell<Option<DetachFn>>>,
}

impl AmbientAudio {
    /// Build the session. Must run inside a component (signals are created here).
    pub fn start(settings: AmbientSettings) -> Self {
        let config = settings.apply_to(PlaybackConfig::default());
        let controller: SharedController = Rc::new(RefCell::new(None));

        let (updates, initial) = match open_controller(&config, &controller) {
            Ok(ctrl) => {
                let updates = ctrl.subscribe();
                let initial = ctrl.status();
                *controller.borrow_mut() = Some(ctrl);
                (Some(updates), initial)
            }
            Err(err) => {
                tracing::warn!(%err, "ambient audio disabled");
                (None, PlaybackStatus::default())
            }
        };

        let audio = Self {
            controller,
            updates,
            status: Signal::new(initial),
            settings: Signal::new(settings),
            gesture_detach: Rc::default(),
        };
        if config.autoplay && audio.is_available() {
            audio.arm_first_gesture();
        }
        audio
    }

    pub fn is_available(&self) -> bool {
        self.controller.borrow().is_some()
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.settings.peek().autoplay
    }

    /// Reactive status; reading it subscribes the calling component.
    pub fn status(&self) -> Signal<PlaybackStatus> {
        self.status
    }

    pub fn play(&self) {
        self.with_controller(|c| c.play());
    }

    pub fn pause(&self) {
        self.with_controller(|c| c.pause());
    }

    pub fn toggle(&self) {
        self.with_controller(|c| c.toggle());
    }

    pub fn next(&self) {
        self.with_controller(|c| c.next());
    }

    pub fn previous(&self) {
        self.with_controller(|c| c.previous());
    }

    /// Apply and persist a new volume.
    pub fn set_volume(&self, volume: f64) {
        let Some(effective) = self.with_controller(|c| c.set_volume(volume)) else {
            return;
        };
        let mut settings = self.settings;
        if settings.peek().volume == effective {
            return;
        }
        settings.write().volume = effective;
        if let Err(err) = save_settings(&settings.peek()) {
            tracing::warn!(%err, "failed to persist ambient volume");
        };
    }

    /// Copy pending status updates into the status signal.
    pub fn sync(&self) {
        let Some(updates) = self.updates.as_ref() else {
            return;
        };
        if let Some(latest) = updates.try_iter().last() {
            let mut status = self.status;
            if *status.peek() != latest {
                status.set(latest);
            }
        }
    }

    /// Stop playback, drop the first-gesture listeners and release the
    /// media output. Later calls do nothing.
    pub fn shutdown(&self) {
        if let Some(detach) = self.gesture_detach.borrow_mut().take() {
            detach();
        }
        let released = self.controller.borrow_mut().take();
        if released.is_some() {
            drop(released);
            tracing::debug!("ambient audio session shut down");
        }
    }

    fn with_controller<R>(&self, f: impl FnOnce(&mut AmbientController) -> R) -> Option<R> {
        let result = run_on_controller(&self.controller, f)?;
        self.sync();
        Some(result)
    }

    // Retry playback once, on the first click/key/touch anywhere in the page.
    fn arm_first_gesture(&self) {
        let weak = Rc::downgrade(&self.controller);
        let trigger = FirstGestureTrigger::new(move |_| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Ok(mut guard) = shared.try_borrow_mut() else {
                return;
            };
            if let Some(ctrl) = guard.as_mut() {
                if !ctrl.is_playing() {
                    ctrl.play();
                }
            }
        });
        *self.gesture_detach.borrow_mut() = attach_first_gesture(trigger);
    }
}

fn open_controller(
    config: &PlaybackConfig,
    controller: &SharedController,
) -> Result<AmbientController, PlaybackError> {
    let tracks = config.track_list()?;
    let sink = event_sink(Rc::downgrade(controller));
    let output = open_platform_output(sink, config.load_timeout_ms)?;
    Ok(PlaybackController::new(tracks, config, output))
}

// Transport requests are not queued: a call that lands while the controller
// is mid-call is dropped.
fn run_on_controller<R>(
    controller: &SharedController,
    f: impl FnOnce(&mut AmbientController) -> R,
) -> Option<R> {
    let Ok(mut guard) = controller.try_borrow_mut() else {
        tracing::debug!("controller busy, dropping transport request");
        return None;
    };
    guard.as_mut().map(f)
}

fn event_sink(controller: Weak<RefCell<Option<AmbientController>>>) -> MediaEventSink {
    Rc::new(move |event| dispatch_media_event(&controller, event))
}

fn dispatch_media_event(controller: &Weak<RefCell<Option<AmbientController>>>, event: MediaEvent) {
    let Some(shared) = controller.upgrade() else {
        return;
    };
    match shared.try_borrow_mut() {
        Ok(mut guard) => {
            if let Some(ctrl) = guard.as_mut() {
                ctrl.handle_event(event);
            }
        }
        Err(_) => {
            // Delivered while the controller is mid-call; retry once it returns.
            let controller = controller.clone();
            defer_media_event(move || dispatch_media_event(&controller, event));
        }
    };
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use crate::playback::LoadTicket;

    struct SilentOutput;

    impl MediaOutput for SilentOutput {
        fn bind(&mut self, _resource: &str) {}
        fn load(&mut self, _ticket: LoadTicket) {}
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn set_volume(&mut self, _volume: f64) {}
        fn release(&mut self) {}
    }

    fn shared_controller() -> SharedController {
        let config = PlaybackConfig::default();
        let tracks = config.track_list().unwrap();
        let output: Box<dyn MediaOutput> = Box::new(SilentOutput);
        Rc::new(RefCell::new(Some(PlaybackController::new(tracks, &config, output))))
    }

    #[test]
    fn busy_controller_drops_transport_request() {
        let shared = shared_controller();
        let held = shared.borrow_mut();
        let mut ran = false;
        assert_eq!(run_on_controller(&shared, |_| ran = true), None);
        assert!(!ran);
        drop(held);

        let index = run_on_controller(&shared, |ctrl| {
            ctrl.next();
            ctrl.current_track_index()
        });
        assert_eq!(index, Some(1));
    }

    #[test]
    fn detached_session_runs_nothing() {
        let shared: SharedController = Rc::new(RefCell::new(None));
        assert_eq!(run_on_controller(&shared, |ctrl| ctrl.volume()), None);
    }
}

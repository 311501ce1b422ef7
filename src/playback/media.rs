use std::fmt;
use std::rc::Rc;

/// Generation number of a load request.
///
/// Notifications that belong to one particular load carry its ticket so the
/// controller can drop the ones that arrive after the track has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadTicket(pub u64);

impl LoadTicket {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notifications emitted by a media output.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The bound resource can begin playback.
    Ready,
    Playing,
    Paused,
    /// Playback reached the end of the resource.
    Ended,
    /// A play request was refused, usually by an autoplay policy.
    PlayRejected(String),
    /// The bound resource could not be fetched or decoded.
    LoadFailed(String),
    /// No readiness was reported for the given load in time.
    LoadTimedOut(LoadTicket),
}

/// Callback through which a media output reports its notifications.
pub type MediaEventSink = Rc<dyn Fn(MediaEvent)>;

/// Audio rendering capability driven by the playback controller.
///
/// Every request is fire-and-forget: outcomes come back later as
/// [`MediaEvent`]s, never synchronously.
pub trait MediaOutput {
    /// Point the output at a new resource, stopping whatever was bound.
    fn bind(&mut self, resource: &str);

    /// Start fetching the bound resource.
    fn load(&mut self, ticket: LoadTicket);

    fn play(&mut self);

    fn pause(&mut self);

    fn set_volume(&mut self, volume: f64);

    /// Stop playback, detach every listener and unbind the resource.
    /// No notification may be delivered afterwards.
    fn release(&mut self);
}

impl<M: MediaOutput + ?Sized> MediaOutput for Box<M> {
    fn bind(&mut self, resource: &str) {
        (**self).bind(resource)
    }

    fn load(&mut self, ticket: LoadTicket) {
        (**self).load(ticket)
    }

    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn set_volume(&mut self, volume: f64) {
        (**self).set_volume(volume)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

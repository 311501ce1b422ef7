use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::PlaybackStatus;

#[derive(Default)]
struct BusState {
    subscribers: Vec<Sender<PlaybackStatus>>,
    last: Option<PlaybackStatus>,
}

/// Fan-out of playback status snapshots to any number of observers.
#[derive(Clone, Default)]
pub struct StatusBus {
    state: Rc<RefCell<BusState>>,
}

impl StatusBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// New receiver, primed with the most recent status if one was published.
    pub fn subscribe(&self) -> Receiver<PlaybackStatus> {
        let (tx, rx) = unbounded::<PlaybackStatus>();
        let mut state = self.state.borrow_mut();
        if let Some(last) = state.last.clone() {
            let _ = tx.send(last);
        }
        state.subscribers.push(tx);
        rx
    }

    /// Broadcast `status` unless it equals the previous one.
    /// Returns whether anything was sent.
    pub fn publish(&self, status: PlaybackStatus) -> bool {
        let mut state = self.state.borrow_mut();
        if state.last.as_ref() == Some(&status) {
            return false;
        }
        state
            .subscribers
            .retain(|tx| tx.send(status.clone()).is_ok());
        state.last = Some(status);
        true
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackPhase;

    fn status(index: usize) -> PlaybackStatus {
        PlaybackStatus {
            phase: PlaybackPhase::Loading,
            current_track_index: index,
            current_track_name: format!("music{}", index + 1),
            track_count: 4,
            is_playing: false,
            is_loaded: false,
            volume: 0.3,
        }
    }

    #[test]
    fn late_subscriber_gets_last_status() {
        let bus = StatusBus::new();
        bus.publish(status(0));
        bus.publish(status(2));

        let rx = bus.subscribe();
        assert_eq!(rx.try_recv().unwrap().current_track_index, 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn duplicate_statuses_are_dropped() {
        let bus = StatusBus::new();
        let rx = bus.subscribe();
        assert!(bus.publish(status(1)));
        assert!(!bus.publish(status(1)));
        assert!(bus.publish(status(2)));

        let seen: Vec<usize> = rx.try_iter().map(|s| s.current_track_index).collect();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn disconnected_subscribers_are_pruned() {
        let bus = StatusBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(status(0));
        assert_eq!(bus.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }
}

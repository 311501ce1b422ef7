/// User input gestures that count as page interaction for autoplay purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Click,
    KeyDown,
    TouchStart,
}

impl GestureKind {
    pub const ALL: [GestureKind; 3] = [
        GestureKind::Click,
        GestureKind::KeyDown,
        GestureKind::TouchStart,
    ];

    /// DOM event type to listen for.
    pub fn event_type(self) -> &'static str {
        match self {
            GestureKind::Click => "click",
            GestureKind::KeyDown => "keydown",
            GestureKind::TouchStart => "touchstart",
        }
    }
}

/// Single-use subscription to the first user gesture.
pub struct FirstGestureTrigger {
    action: Option<Box<dyn FnOnce(GestureKind)>>,
}

impl FirstGestureTrigger {
    pub fn new(action: impl FnOnce(GestureKind) + 'static) -> Self {
        Self {
            action: Some(Box::new(action)),
        }
    }

    /// Run the action if it has not run yet. Returns whether it ran.
    pub fn fire(&mut self, kind: GestureKind) -> bool {
        match self.action.take() {
            Some(action) => {
                tracing::debug!(gesture = kind.event_type(), "first user gesture");
                action(kind);
                true
            }
            None => false,
        }
    }

    pub fn disarm(&mut self) {
        self.action = None;
    }

    pub fn is_armed(&self) -> bool {
        self.action.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fires_only_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut trigger = {
            let seen = seen.clone();
            FirstGestureTrigger::new(move |kind| seen.borrow_mut().push(kind))
        };

        assert!(trigger.fire(GestureKind::KeyDown));
        assert!(!trigger.fire(GestureKind::Click));
        assert!(!trigger.fire(GestureKind::TouchStart));
        assert!(!trigger.is_armed());
        assert_eq!(*seen.borrow(), vec![GestureKind::KeyDown]);
    }

    #[test]
    fn disarmed_trigger_never_runs() {
        let ran = Rc::new(RefCell::new(false));
        let mut trigger = {
            let ran = ran.clone();
            FirstGestureTrigger::new(move |_| *ran.borrow_mut() = true)
        };
        trigger.disarm();
        assert!(!trigger.fire(GestureKind::Click));
        assert!(!*ran.borrow());
    }

    #[test]
    fn event_types_match_dom_names() {
        let names: Vec<_> = GestureKind::ALL.iter().map(|g| g.event_type()).collect();
        assert_eq!(names, vec!["click", "keydown", "touchstart"]);
    }
}

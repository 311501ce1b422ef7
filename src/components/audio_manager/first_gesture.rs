// Document-level click/keydown/touchstart listeners feeding a FirstGestureTrigger.
#[cfg(target_arch = "wasm32")]
struct GestureListeners {
    document: Document,
    callbacks: Vec<(GestureKind, Closure<dyn FnMut()>)>,
}

#[cfg(target_arch = "wasm32")]
type GestureSlot = Rc<RefCell<Option<GestureListeners>>>;

/// Register the trigger on every gesture kind. Whichever fires first runs the
/// trigger and removes all of them. Returns a detach function for shutdown.
#[cfg(target_arch = "wasm32")]
fn attach_first_gesture(trigger: FirstGestureTrigger) -> Option<DetachFn> {
    let document = window()?.document()?;
    let trigger = Rc::new(RefCell::new(trigger));
    let slot: GestureSlot = Rc::default();

    let mut callbacks = Vec::with_capacity(GestureKind::ALL.len());
    for kind in GestureKind::ALL {
        let trigger = trigger.clone();
        let slot = slot.clone();
        let callback = Closure::wrap(Box::new(move || {
            trigger.borrow_mut().fire(kind);
            detach_gesture_listeners(&slot);
        }) as Box<dyn FnMut()>);
        if let Err(err) = document
            .add_event_listener_with_callback(kind.event_type(), callback.as_ref().unchecked_ref())
        {
            tracing::warn!(
                event_type = kind.event_type(),
                error = %describe_js_error(&err),
                "failed to attach gesture listener"
            );
        }
        callbacks.push((kind, callback));
    }
    *slot.borrow_mut() = Some(GestureListeners {
        document,
        callbacks,
    });

    Some(Box::new(move || {
        trigger.borrow_mut().disarm();
        detach_gesture_listeners(&slot);
    }))
}

#[cfg(target_arch = "wasm32")]
fn detach_gesture_listeners(slot: &GestureSlot) {
    let Some(listeners) = slot.borrow_mut().take() else {
        return;
    };
    for (kind, callback) in &listeners.callbacks {
        let _ = listeners
            .document
            .remove_event_listener_with_callback(kind.event_type(), callback.as_ref().unchecked_ref());
    }
    // One of these closures may be the one running right now.
    spawn_local(async move { drop(listeners) });
}

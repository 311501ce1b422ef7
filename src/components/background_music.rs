use crate::components::{AmbientAudio, Icon};
use crate::playback::{PlaybackPhase, PlaybackStatus};
use dioxus::prelude::*;

/// Status line under the transport controls.
pub fn status_label(status: &PlaybackStatus) -> &'static str {
    match status.phase {
        PlaybackPhase::Uninitialized | PlaybackPhase::Released => "غير متاح",
        PlaybackPhase::Stalled => "تعذر التحميل",
        PlaybackPhase::Loading if !status.is_playing => "جاري التحميل...",
        _ if status.is_playing => "يتم التشغيل",
        _ => "متوقف",
    }
}

/// `music2 (2/4)`
pub fn track_label(status: &PlaybackStatus) -> String {
    if status.track_count == 0 {
        return String::new();
    }
    format!(
        "{} ({}/{})",
        status.current_track_name,
        status.current_track_index + 1,
        status.track_count
    )
}

/// Floating transport widget for the ambient soundtrack.
#[component]
pub fn BackgroundMusic(#[props(default = true)] show_controls: bool) -> Element {
    let audio = use_context::<AmbientAudio>();
    let status = audio.status();

    if !show_controls {
        return rsx! {};
    }

    let current = status();
    let volume_percent = (current.volume * 100.0).round();
    let available = audio.is_available();
    let can_toggle = current.is_loaded || current.phase == PlaybackPhase::Stalled;

    let on_prev = {
        let audio = audio.clone();
        move |_| audio.previous()
    };
    let on_toggle = {
        let audio = audio.clone();
        move |_| audio.toggle()
    };
    let on_next = {
        let audio = audio.clone();
        move |_| audio.next()
    };
    let on_volume = {
        let audio = audio.clone();
        move |e: Event<FormData>| {
            if let Ok(val) = e.value().parse::<f64>() {
                audio.set_volume(val / 100.0);
            }
        }
    };

    rsx! {
        div { class: "ambient-card fixed bottom-4 right-4 z-50 w-80 p-4",
            div { class: "flex items-center gap-3 mb-3",
                Icon { name: "music".to_string(), class: "w-5 h-5 text-metallic".to_string() }
                div { class: "flex-1 min-w-0",
                    div { class: "text-sm font-mono text-glow", dir: "rtl", "موسيقى خلفية" }
                    div { class: "text-xs font-mono text-muted truncate", "{track_label(&current)}" }
                }
            }

            div { class: "flex items-center justify-center gap-2 mb-3",
                button {
                    id: "ambient-prev-btn",
                    r#type: "button",
                    class: "ambient-btn",
                    disabled: !available,
                    onclick: on_prev,
                    Icon { name: "prev".to_string(), class: "w-4 h-4".to_string() }
                }
                button {
                    id: "ambient-toggle-btn",
                    r#type: "button",
                    class: "ambient-btn",
                    disabled: !available || !can_toggle,
                    onclick: on_toggle,
                    if current.phase == PlaybackPhase::Stalled {
                        Icon { name: "alert".to_string(), class: "w-5 h-5".to_string() }
                    } else if current.is_playing {
                        Icon { name: "pause".to_string(), class: "w-5 h-5".to_string() }
                    } else if current.is_loaded {
                        Icon { name: "play".to_string(), class: "w-5 h-5".to_string() }
                    } else {
                        Icon { name: "loader".to_string(), class: "w-5 h-5".to_string() }
                    }
                }
                button {
                    id: "ambient-next-btn",
                    r#type: "button",
                    class: "ambient-btn",
                    disabled: !available,
                    onclick: on_next,
                    Icon { name: "next".to_string(), class: "w-4 h-4".to_string() }
                }
            }

            div { class: "flex items-center gap-2",
                Icon { name: "volume-x".to_string(), class: "w-4 h-4 text-muted".to_string() }
                input {
                    r#type: "range",
                    class: "flex-1",
                    min: "0",
                    max: "100",
                    step: "1",
                    value: "{volume_percent}",
                    disabled: !available,
                    oninput: on_volume,
                }
                Icon { name: "volume".to_string(), class: "w-4 h-4 text-muted".to_string() }
            }

            div { class: "text-xs font-mono text-muted mt-2 text-center", dir: "rtl",
                "{status_label(&current)}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(phase: PlaybackPhase, is_loaded: bool, is_playing: bool) -> PlaybackStatus {
        PlaybackStatus {
            phase,
            current_track_index: 1,
            current_track_name: "music2".to_string(),
            track_count: 4,
            is_playing,
            is_loaded,
            volume: 0.3,
        }
    }

    #[test]
    fn labels_follow_phase_and_play_state() {
        assert_eq!(status_label(&status(PlaybackPhase::Loading, false, false)), "جاري التحميل...");
        assert_eq!(status_label(&status(PlaybackPhase::Ready, true, false)), "متوقف");
        assert_eq!(status_label(&status(PlaybackPhase::Ready, true, true)), "يتم التشغيل");
        // Switching tracks mid-playback keeps showing playback.
        assert_eq!(status_label(&status(PlaybackPhase::Loading, false, true)), "يتم التشغيل");
        assert_eq!(status_label(&status(PlaybackPhase::Stalled, false, false)), "تعذر التحميل");
        assert_eq!(status_label(&PlaybackStatus::default()), "غير متاح");
    }

    #[test]
    fn track_label_is_one_based() {
        assert_eq!(track_label(&status(PlaybackPhase::Ready, true, false)), "music2 (2/4)");
        assert_eq!(track_label(&PlaybackStatus::default()), "");
    }
}

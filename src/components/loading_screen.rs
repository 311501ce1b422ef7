use crate::components::AmbientAudio;
use crate::utils::sleep_ms;
use dioxus::prelude::*;
use rand::Rng;

const PROGRESS_TICK_MS: u32 = 200;
const PROGRESS_MAX_STEP: f64 = 15.0;
const ENTER_BUTTON_DELAY_MS: u32 = 500;
const EXIT_FADE_MS: u32 = 800;
// Second attempt at starting the soundtrack once the splash is on screen.
const AUTOPLAY_NUDGE_MS: u32 = 1000;

const AGENCY_EMBLEM: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a4/Emblem_of_Quwat_Dir_al-Amn_al-Askari_%28The_Military_Security_Shield_Forces%29.svg/834px-Emblem_of_Quwat_Dir_al-Amn_al-Askari_%28The_Military_Security_Shield_Forces%29.svg.png";

/// Next progress value, capped at 100.
pub fn advance_progress(current: f64, step: f64) -> f64 {
    (current + step.max(0.0)).min(100.0)
}

/// Splash screen shown before the console. Calls `on_complete` once the
/// operator presses the enter button and the fade-out has finished.
#[component]
pub fn LoadingScreen(on_complete: EventHandler<()>) -> Element {
    let audio = use_context::<AmbientAudio>();
    let mut progress = use_signal(|| 0.0f64);
    let mut show_button = use_signal(|| false);
    let mut exiting = use_signal(|| false);

    use_future(move || async move {
        loop {
            sleep_ms(PROGRESS_TICK_MS).await;
            let step = rand::thread_rng().gen_range(0.0..PROGRESS_MAX_STEP);
            let next = advance_progress(*progress.peek(), step);
            progress.set(next);
            if next >= 100.0 {
                break;
            }
        }
        sleep_ms(ENTER_BUTTON_DELAY_MS).await;
        show_button.set(true);
    });

    {
        let audio = audio.clone();
        use_future(move || {
            let audio = audio.clone();
            async move {
                sleep_ms(AUTOPLAY_NUDGE_MS).await;
                if audio.autoplay_enabled() && !audio.status().peek().is_playing {
                    audio.play();
                }
            }
        });
    }

    let on_enter = move |_| {
        if exiting() {
            return;
        }
        exiting.set(true);
        spawn(async move {
            sleep_ms(EXIT_FADE_MS).await;
            on_complete.call(());
        });
    };

    let width = progress();
    let percent = width.round() as u32;
    let opacity = if exiting() { "opacity-0" } else { "opacity-100" };

    rsx! {
        div { class: "splash fixed inset-0 z-50 flex items-center justify-center {opacity}",
            div { class: "splash-glow absolute inset-0" }

            div { class: "relative text-center space-y-8",
                div { class: "flex justify-center mb-8",
                    img {
                        src: AGENCY_EMBLEM,
                        alt: "NESA",
                        class: "w-24 h-24 opacity-80 matrix-glow",
                    }
                }

                div { class: "space-y-2",
                    h1 { class: "text-4xl font-mono font-bold text-glow tracking-wider flicker",
                        dir: "rtl",
                        "استخبارات الإشارات"
                    }
                    h2 { class: "text-2xl font-mono font-bold text-metallic tracking-widest",
                        dir: "rtl",
                        "هيئة الأمن الإلكتروني الوطنية"
                    }
                }

                div { class: "w-80 mx-auto space-y-4",
                    div { class: "text-sm font-mono text-secondary tracking-wider",
                        "جاري تهيئة الاتصال الآمن..."
                    }
                    div { class: "progress-track h-1 rounded-full overflow-hidden",
                        div {
                            class: "progress-bar h-full",
                            style: "width: {width}%",
                        }
                    }
                    div { class: "text-xs font-mono text-muted", "{percent}% مكتمل" }
                }

                if show_button() {
                    div { class: "fade-in",
                        button {
                            id: "enter-console-btn",
                            r#type: "button",
                            class: "enter-btn px-8 py-3 font-mono font-bold tracking-wider rounded-lg",
                            onclick: on_enter,
                            "[ دخول النظام ]"
                        }
                    }
                }

                div { class: "absolute bottom-8 left-1/2 text-xs font-mono text-muted opacity-50 flicker",
                    "سري // للموظفين المخولين فقط"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_capped_and_monotonic() {
        assert_eq!(advance_progress(0.0, 7.5), 7.5);
        assert_eq!(advance_progress(95.0, 14.9), 100.0);
        assert_eq!(advance_progress(100.0, 3.0), 100.0);
        assert_eq!(advance_progress(40.0, -2.0), 40.0);

        let mut value = 0.0;
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let next = advance_progress(value, rng.gen_range(0.0..PROGRESS_MAX_STEP));
            assert!(next >= value && next <= 100.0);
            value = next;
        }
    }
}

use crate::components::{AmbientAudio, BackgroundMusic, LoadingScreen};
use crate::db::load_settings;
use crate::utils::sleep_ms;
use dioxus::prelude::*;

// How often the status signal catches up with the playback controller.
const STATUS_POLL_MS: u32 = 100;

#[component]
pub fn AppShell() -> Element {
    let audio = use_hook(|| AmbientAudio::start(load_settings()));
    let mut entered = use_signal(|| false);

    use_context_provider(|| audio.clone());

    // Mirror controller status changes into the status signal.
    {
        let audio = audio.clone();
        use_future(move || {
            let audio = audio.clone();
            async move {
                loop {
                    sleep_ms(STATUS_POLL_MS).await;
                    audio.sync();
                }
            }
        });
    }

    // One session per application: released exactly when the shell goes away.
    {
        let audio = audio.clone();
        use_drop(move || audio.shutdown());
    }

    rsx! {
        if entered() {
            ConsoleHome {}
            BackgroundMusic { show_controls: true }
        } else {
            LoadingScreen { on_complete: move |_| entered.set(true) }
        }
    }
}

#[component]
fn ConsoleHome() -> Element {
    rsx! {
        main { class: "console min-h-screen flex flex-col items-center justify-center gap-4",
            h1 { class: "text-3xl font-mono font-bold text-glow tracking-wider", dir: "rtl",
                "هيئة الأمن الإلكتروني الوطنية"
            }
            p { class: "text-sm font-mono text-muted tracking-widest", dir: "rtl",
                "قناة الاتصال الآمن نشطة"
            }
        }
    }
}

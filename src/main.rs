use dioxus::prelude::*;

mod components;
mod db;
mod playback;
mod utils;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#0a0c0f" }
        document::Title { "NESA // SIGINT" }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}

use dioxus::prelude::*;

/// Inline SVG icon for the console widgets. Unknown names render a plain circle.
#[component]
pub fn Icon(name: String, class: String) -> Element {
    let svg_content = match name.as_str() {
        "play" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "currentColor",
                polygon { points: "5 3 19 12 5 21 5 3" }
            }
        },
        "pause" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "currentColor",
                rect {
                    x: "6",
                    y: "4",
                    width: "4",
                    height: "16",
                }
                rect {
                    x: "14",
                    y: "4",
                    width: "4",
                    height: "16",
                }
            }
        },
        "prev" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "currentColor",
                polygon { points: "19 20 9 12 19 4 19 20" }
                line {
                    x1: "5",
                    y1: "19",
                    x2: "5",
                    y2: "5",
                    stroke: "currentColor",
                    stroke_width: "2",
                }
            }
        },
        "next" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "currentColor",
                polygon { points: "5 4 15 12 5 20 5 4" }
                line {
                    x1: "19",
                    y1: "5",
                    x2: "19",
                    y2: "19",
                    stroke: "currentColor",
                    stroke_width: "2",
                }
            }
        },
        "volume" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                polygon { points: "11 5 6 9 2 9 2 15 6 15 11 19 11 5" }
                path { d: "M15.54 8.46a5 5 0 0 1 0 7.07" }
                path { d: "M19.07 4.93a10 10 0 0 1 0 14.14" }
            }
        },
        "volume-x" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                polygon { points: "11 5 6 9 2 9 2 15 6 15 11 19 11 5" }
                line {
                    x1: "23",
                    y1: "9",
                    x2: "17",
                    y2: "15",
                }
                line {
                    x1: "17",
                    y1: "9",
                    x2: "23",
                    y2: "15",
                }
            }
        },
        "alert" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M10.29 3.86L1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0z" }
                line {
                    x1: "12",
                    y1: "9",
                    x2: "12",
                    y2: "13",
                }
                line {
                    x1: "12",
                    y1: "17",
                    x2: "12.01",
                    y2: "17",
                }
            }
        },
        "music" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M9 18V5l12-2v13" }
                circle { cx: "6", cy: "18", r: "3" }
                circle { cx: "18", cy: "16", r: "3" }
            }
        },
        "loader" => rsx! {
            svg {
                class: "{class} animate-spin",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle {
                    cx: "12",
                    cy: "12",
                    r: "10",
                    opacity: "0.25",
                }
                path { d: "M12 2a10 10 0 0 1 10 10", opacity: "0.75" }
            }
        },
        _ => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle { cx: "12", cy: "12", r: "10" }
            }
        },
    };

    svg_content
}

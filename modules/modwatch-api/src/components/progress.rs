use dioxus::prelude::*;

use modwatch_core::Progress;

use super::layout::{render_document, Layout};

#[allow(non_snake_case)]
#[component]
fn ProgressPage(reviewed: usize, total: usize, percent: u8) -> Element {
    let bar_style = format!("width: {percent}%");
    rsx! {
        Layout { title: "Progress".to_string(), active_page: "progress".to_string(),
            h1 { class: "text-2xl font-semibold mb-6", "Review progress" }
            div { class: "bg-white border border-gray-200 rounded-lg p-6",
                div { class: "w-full h-4 bg-gray-200 rounded",
                    div { class: "h-4 bg-blue-600 rounded", style: "{bar_style}" }
                }
                p { class: "mt-4 text-3xl font-semibold", "{percent}%" }
                p { class: "text-gray-500 text-sm", "{reviewed} of {total} submissions reviewed" }
            }
        }
    }
}

pub fn render_progress(progress: Progress) -> String {
    render_document(VirtualDom::new_with_props(
        ProgressPage,
        ProgressPageProps {
            reviewed: progress.reviewed,
            total: progress.total,
            percent: progress.percent,
        },
    ))
}

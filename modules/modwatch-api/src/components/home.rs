use dioxus::prelude::*;

use super::layout::{render_document, Layout};

#[allow(non_snake_case)]
#[component]
fn Home() -> Element {
    rsx! {
        Layout { title: "Home".to_string(), active_page: "home".to_string(),
            h1 { class: "text-2xl font-semibold mb-2", "Community blocklist reports" }
            p { class: "text-gray-600 mb-6",
                "Report sites that should be on the blocklist, or dispute a listing you believe is wrong. Every submission is reviewed by a moderator."
            }
            div { class: "grid gap-4 sm:grid-cols-3",
                a { href: "/forms/report", class: "block bg-white border border-gray-200 rounded-lg p-4 hover:border-blue-600",
                    "Report a site"
                }
                a { href: "/forms/falsepositive", class: "block bg-white border border-gray-200 rounded-lg p-4 hover:border-blue-600",
                    "Report a false positive"
                }
                a { href: "/pages/progress", class: "block bg-white border border-gray-200 rounded-lg p-4 hover:border-blue-600",
                    "Review progress"
                }
            }
            h2 { class: "text-lg font-semibold mt-8 mb-2", "API" }
            ul { class: "text-sm font-mono text-gray-600 space-y-1",
                li { "POST /api/v1/report?falsepositive=false" }
                li { "GET /api/v1/waitlist" }
                li { "GET /api/v1/blacklist" }
                li { "GET /api/v1/progress" }
            }
        }
    }
}

pub fn render_home() -> String {
    render_document(VirtualDom::new(Home))
}

use dioxus::prelude::*;

struct NavItem {
    key: &'static str,
    label: &'static str,
    href: &'static str,
}

/// Build `dom` and serialize it as a complete HTML document.
pub fn render_document(mut dom: VirtualDom) -> String {
    dom.rebuild_in_place();
    let html = dioxus::ssr::render(&dom);
    format!("<!DOCTYPE html>\n<html lang=\"en\">{html}</html>")
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem { key: "home", label: "Home", href: "/" },
    NavItem { key: "report", label: "Report a site", href: "/forms/report" },
    NavItem { key: "falsepositive", label: "False positive", href: "/forms/falsepositive" },
    NavItem { key: "progress", label: "Progress", href: "/pages/progress" },
];

/// Public page shell with a top navigation bar.
#[allow(non_snake_case)]
#[component]
pub fn Layout(title: String, active_page: String, children: Element) -> Element {
    let full_title = format!("{title} | modwatch");
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{full_title}" }
            script { src: "https://cdn.tailwindcss.com" }
        }
        body { class: "min-h-screen bg-gray-50 font-sans text-gray-900",
            nav { class: "bg-gray-900 text-white",
                div { class: "max-w-3xl mx-auto flex items-center gap-1 px-4",
                    span { class: "py-3 pr-4 font-semibold", "modwatch" }
                    for item in NAV_ITEMS.iter() {
                        {
                            let class = if item.key == active_page {
                                "px-3 py-3 text-sm text-white bg-blue-600"
                            } else {
                                "px-3 py-3 text-sm text-gray-400 hover:text-white hover:bg-gray-700"
                            };
                            let href = item.href;
                            let label = item.label;
                            rsx! { a { href: href, class: class, "{label}" } }
                        }
                    }
                }
            }
            main { class: "max-w-3xl mx-auto px-4 py-8",
                {children}
            }
        }
    }
}

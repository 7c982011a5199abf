use dioxus::prelude::*;

use super::layout::{render_document, Layout};
use crate::alert::Alert;

#[allow(non_snake_case)]
#[component]
fn AlertBanner(alert: Alert) -> Element {
    let class = if alert.is_error() {
        "bg-red-50 border border-red-200 text-red-800 text-sm px-4 py-3 rounded mb-6"
    } else {
        "bg-green-50 border border-green-200 text-green-800 text-sm px-4 py-3 rounded mb-6"
    };
    let title = alert.title();
    let message = alert.message();
    rsx! {
        div { class: class, role: "alert",
            p { class: "font-semibold", "{title}" }
            p { "{message}" }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn SubmissionForm(false_positive: bool, alert: Option<Alert>, sitekey: Option<String>) -> Element {
    let (title, active, intro, description_label) = if false_positive {
        (
            "Report a false positive",
            "falsepositive",
            "Is a site on the blocklist that should not be? Tell us why and a moderator will take another look.",
            "Why should this site be removed?",
        )
    } else {
        (
            "Report a site",
            "report",
            "Found a site reposting mods without permission? Submit it for review.",
            "What is wrong with this site?",
        )
    };

    rsx! {
        Layout { title: title.to_string(), active_page: active.to_string(),
            h1 { class: "text-2xl font-semibold mb-2", "{title}" }
            p { class: "text-gray-500 text-sm mb-6", "{intro}" }
            if let Some(alert) = alert {
                AlertBanner { alert: alert }
            }
            form { method: "POST", action: "/api/v1/formreport",
                class: "bg-white border border-gray-200 rounded-lg p-6",
                if false_positive {
                    input { r#type: "hidden", name: "falsepositive", value: "true" }
                }
                label { r#for: "domain", class: "block text-sm text-gray-500 mb-1", "Domain or URL" }
                input {
                    r#type: "text", name: "domain", id: "domain", required: true,
                    placeholder: "example.com",
                    class: "w-full px-3 py-2.5 border border-gray-300 rounded text-base mb-4",
                }
                label { r#for: "description", class: "block text-sm text-gray-500 mb-1", "{description_label}" }
                textarea {
                    name: "description", id: "description", required: true, rows: "4",
                    class: "w-full px-3 py-2.5 border border-gray-300 rounded text-base mb-4",
                }
                if let Some(key) = sitekey {
                    div { class: "h-captcha mb-4", "data-sitekey": "{key}" }
                    script { src: "https://js.hcaptcha.com/1/api.js", defer: true }
                }
                button {
                    r#type: "submit",
                    class: "w-full py-2.5 bg-blue-600 text-white rounded text-sm font-medium cursor-pointer hover:bg-blue-800",
                    "Submit"
                }
            }
        }
    }
}

pub fn render_submission_form(
    false_positive: bool,
    alert: Option<Alert>,
    sitekey: Option<String>,
) -> String {
    render_document(VirtualDom::new_with_props(
        SubmissionForm,
        SubmissionFormProps {
            false_positive,
            alert,
            sitekey,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_form_posts_to_form_endpoint() {
        let html = render_submission_form(false, None, None);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("/api/v1/formreport"));
        assert!(html.contains("Report a site"));
        assert!(!html.contains("name=\"falsepositive\""));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn dispute_form_carries_flag() {
        let html = render_submission_form(true, None, None);
        assert!(html.contains("name=\"falsepositive\""));
    }

    #[test]
    fn banner_and_widget_render() {
        let html = render_submission_form(false, Some(Alert::Captcha), Some("site-key-1".into()));
        assert!(html.contains("complete the CAPTCHA challenge"));
        assert!(html.contains("site-key-1"));
    }
}

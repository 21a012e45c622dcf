use dioxus::prelude::*;

/// Landing screen: intro copy, an optional fetch error, and the start
/// button. Also serves as the retry screen after a failed fetch.
#[component]
pub fn StartView(error_message: Option<String>, on_start: EventHandler<()>) -> Element {
    rsx! {
        div { class: "start-screen",
            h1 { class: "start-title", "Selamat Datang!" }
            p { class: "start-lead",
                "Uji kemampuan Bahasa Inggris kamu dengan fokus pada "
                strong { "Simple Present" }
                ", "
                strong { "Simple Past" }
                ", dan "
                strong { "Present Perfect Tense" }
                "."
            }

            if let Some(message) = error_message.as_ref() {
                div { class: "start-error",
                    p { class: "start-error-title", "Error" }
                    p { class: "start-error-body", "{message}" }
                }
            }

            button {
                class: "btn btn-primary start-cta",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                "Mulai Kuis"
            }

            p { class: "start-footnote", "Didukung oleh Gemini AI • Dibuat soal secara otomatis" }
        }
    }
}

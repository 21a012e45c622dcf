use dioxus::prelude::*;

use crate::vm::{ReviewItemVm, ScoreVm};

fn score_class(percentage: u32) -> &'static str {
    if percentage >= 80 {
        "score score--good"
    } else if percentage >= 60 {
        "score score--mid"
    } else {
        "score score--low"
    }
}

/// Result screen: percentage header, restart button, and the expandable
/// per-question review with explanations.
#[component]
pub fn ResultView(
    score: ScoreVm,
    items: Vec<ReviewItemVm>,
    on_restart: EventHandler<()>,
) -> Element {
    let mut expanded = use_signal(|| None::<u32>);

    let review_rows = items.iter().map(|item| {
        let item = item.clone();
        let id = item.id;
        let is_open = expanded() == Some(id);
        let status_class = if item.is_correct {
            "review-status review-status--correct"
        } else {
            "review-status review-status--wrong"
        };
        rsx! {
            div { class: if is_open { "review-item review-item--open" } else { "review-item" },
                button {
                    class: "review-toggle",
                    r#type: "button",
                    onclick: move |_| {
                        if expanded() == Some(id) {
                            expanded.set(None);
                        } else {
                            expanded.set(Some(id));
                        }
                    },
                    span { class: "{status_class}", if item.is_correct { "✓" } else { "✗" } }
                    span { class: "review-heading",
                        h4 { class: "review-question", "{item.text}" }
                        p { class: "review-topic", "Topic: {item.topic_label}" }
                    }
                    span { class: "review-caret", if is_open { "▲" } else { "▼" } }
                }

                if is_open {
                    div { class: "review-detail",
                        if !item.is_correct {
                            div { class: "review-answer review-answer--user",
                                span { class: "review-answer-label", "Jawaban Kamu" }
                                p { "{item.user_answer}" }
                            }
                        }
                        div { class: "review-answer review-answer--correct",
                            span { class: "review-answer-label", "Jawaban Benar" }
                            p { "{item.correct_answer}" }
                        }
                        div { class: "review-explanation",
                            span { class: "review-answer-label", "Penjelasan" }
                            p { "{item.explanation}" }
                        }
                    }
                }
            }
        }
    });

    rsx! {
        div { class: "result-screen",
            div { class: "result-card",
                h2 { class: "result-title", "Kuis Selesai!" }
                div { class: score_class(score.percentage), "{score.percentage}%" }
                p { class: "result-line",
                    "Kamu menjawab benar {score.correct} dari {score.total} soal"
                }
                button {
                    class: "btn btn-dark result-restart",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "Main Lagi"
                }
            }

            h3 { class: "review-section-title", "Pembahasan & Jawaban" }
            div { class: "review-list", {review_rows} }
        }
    }
}

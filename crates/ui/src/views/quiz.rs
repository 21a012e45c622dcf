use dioxus::prelude::*;

use crate::vm::QuizVm;

/// Active-quiz screen: progress bar, the current question, its four
/// options, and a single confirm button per question.
#[component]
pub fn QuizView(vm: Signal<QuizVm>, on_confirm: EventHandler<()>) -> Element {
    let guard = vm.read();
    let Some(question) = guard.session().current_question() else {
        // Only rendered while active, so there is always a current question.
        return rsx! {};
    };

    let number = guard.session().current_index() + 1;
    let total = guard.session().total_questions();
    let percent = if total == 0 { 0 } else { number * 100 / total };
    let is_last = number == total;
    let selected = guard.selected();
    let text = question.text().to_string();
    let options = question.options().to_vec();
    drop(guard);

    let option_buttons = options.into_iter().enumerate().map(|(index, option)| {
        let mut vm = vm;
        let is_selected = selected == Some(index);
        let class = if is_selected {
            "option option--selected"
        } else {
            "option"
        };
        rsx! {
            button {
                class: "{class}",
                r#type: "button",
                onclick: move |_| vm.write().select(index),
                span { class: "option-marker", aria_hidden: "true" }
                span { class: "option-text", "{option}" }
            }
        }
    });

    rsx! {
        div { class: "quiz-screen",
            div { class: "quiz-progress",
                span { class: "quiz-progress-label", "Soal {number} dari {total}" }
                div { class: "quiz-progress-track",
                    div { class: "quiz-progress-fill", style: "width: {percent}%" }
                }
            }

            div { class: "quiz-card",
                h2 { class: "quiz-question", "{text}" }
                div { class: "options", {option_buttons} }
            }

            div { class: "quiz-actions",
                button {
                    class: "btn btn-primary quiz-confirm",
                    r#type: "button",
                    disabled: selected.is_none(),
                    onclick: move |_| on_confirm.call(()),
                    if is_last { "Selesai" } else { "Lanjut" }
                }
            }
        }
    }
}

use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::QuizStatus;

use crate::context::AppContext;
use crate::views::{QuizView, ResultView, StartView};
use crate::vm::{QuizVm, map_review_items, map_score};

/// Root component. Owns the quiz view-model signal and wires the screen
/// callbacks to the loop service pulled from [`AppContext`].
#[component]
pub fn App() -> Element {
    let context = use_context::<AppContext>();
    let mut vm = use_signal(QuizVm::new);
    // A fetch is in flight. Kept outside the view-model so the UI can
    // render the loading panel while the signal value is taken out
    // across the await below.
    let mut loading = use_signal(|| false);

    let start_loop = context.quiz_loop();
    let on_start = use_callback(move |()| {
        if loading() {
            return;
        }
        let quiz_loop = Arc::clone(&start_loop);
        spawn(async move {
            loading.set(true);
            // Take the value out of the signal so the borrow does not
            // live across the await, then put it back.
            let mut working = std::mem::take(&mut *vm.write());
            if let Err(err) = working.start(&quiz_loop).await {
                log::warn!("start rejected: {err}");
            }
            vm.set(working);
            loading.set(false);
        });
    });

    let quiz_loop = context.quiz_loop();
    let on_confirm = use_callback(move |()| {
        if let Err(err) = vm.write().confirm(&quiz_loop) {
            log::warn!("confirm rejected: {err}");
        }
    });

    let on_restart = use_callback(move |()| {
        if let Err(err) = vm.write().restart() {
            log::warn!("restart rejected: {err}");
        }
    });

    let status = if loading() {
        QuizStatus::Loading
    } else {
        vm.read().status()
    };

    let screen = match status {
        QuizStatus::Idle => rsx! {
            StartView { error_message: None, on_start }
        },
        QuizStatus::Loading => rsx! {
            div { class: "loading-panel",
                div { class: "spinner" }
                p { "Menyiapkan Soal..." }
            }
        },
        QuizStatus::Active => rsx! {
            QuizView { vm, on_confirm }
        },
        QuizStatus::Finished => {
            let guard = vm.read();
            let score = guard.session().summary().map(map_score);
            let items = map_review_items(guard.session());
            drop(guard);
            match score {
                Some(score) => rsx! {
                    ResultView { score, items, on_restart }
                },
                None => rsx! {
                    p { class: "fatal", "Hasil kuis tidak tersedia." }
                },
            }
        }
        QuizStatus::Error => rsx! {
            StartView {
                error_message: vm.read().error_message().map(str::to_owned),
                on_start,
            }
        },
    };

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "GrammarMaster" }

        div { class: "app-root",
            header { class: "app-header",
                h1 { class: "app-brand",
                    "Grammar"
                    span { class: "app-brand-accent", "Master" }
                }
            }

            main { class: "app-main", {screen} }
        }
    }
}

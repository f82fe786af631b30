use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{ResultsFilter, ReviewCardVm, filter_heading, filter_reviews, map_results};

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let scope = ctx.scope();

    // Snapshot the parked report once; it survives re-renders but not a
    // navigation home, which clears it.
    let scope_for_init = ctx.scope();
    let report = use_hook(move || scope_for_init.report());
    let mut filter = use_signal(ResultsFilter::default);

    let Some(report) = report else {
        return rsx! {
            div { class: "page results empty",
                h2 { "No test results found" }
                p { "Please take a test first." }
                button {
                    class: "primary",
                    onclick: move |_| { navigator.push(Route::Home {}); },
                    "Back to Home"
                }
            }
        };
    };

    let vm = map_results(&report);
    let cards = filter_reviews(&report, filter());
    let heading = filter_heading(filter(), cards.len());

    let on_go_home = use_callback(move |()| {
        scope.clear_report();
        navigator.push(Route::Home {});
    });

    rsx! {
        div { class: "page results",
            header { class: "scoreboard",
                if vm.show_ai_disclaimer {
                    p { class: "ai-disclaimer",
                        "This test was generated by AI; grading follows the generated answer key."
                    }
                }
                p { class: "score {vm.scoreboard.score_class}", "{vm.scoreboard.score_text}" }
                div { class: "score-tiles",
                    ScoreTile {
                        label: "Total",
                        value: vm.scoreboard.total,
                        active: filter() == ResultsFilter::All,
                        on_click: move |()| filter.set(ResultsFilter::All),
                    }
                    ScoreTile {
                        label: "Correct",
                        value: vm.scoreboard.correct,
                        active: filter() == ResultsFilter::Correct,
                        on_click: move |()| filter.set(ResultsFilter::Correct),
                    }
                    ScoreTile {
                        label: "Incorrect",
                        value: vm.scoreboard.incorrect,
                        active: filter() == ResultsFilter::Incorrect,
                        on_click: move |()| filter.set(ResultsFilter::Incorrect),
                    }
                }
            }

            section { class: "review",
                h3 { "{heading}" }
                if cards.is_empty() {
                    p { class: "hint", "No questions to show in this filter." }
                } else {
                    for card in cards {
                        ReviewCard { card }
                    }
                }
            }

            footer { class: "results-nav",
                button { class: "primary", onclick: move |_| on_go_home.call(()), "Back to Home" }
                button {
                    onclick: move |_| { navigator.push(Route::History {}); },
                    "View History"
                }
            }
        }
    }
}

#[component]
fn ScoreTile(label: &'static str, value: usize, active: bool, on_click: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: if active { "score-tile active" } else { "score-tile" },
            onclick: move |_| on_click.call(()),
            span { class: "tile-value", "{value}" }
            span { class: "tile-label", "{label}" }
        }
    }
}

#[component]
fn ReviewCard(card: ReviewCardVm) -> Element {
    rsx! {
        div { class: if card.is_correct { "answer-card correct" } else { "answer-card incorrect" },
            div { class: "answer-header",
                span { class: "question-number", "Question {card.number}" }
                span {
                    class: if card.is_correct { "status status-correct" } else { "status status-incorrect" },
                    "{card.status_text}"
                }
            }
            p { class: "question-text", "{card.question}" }
            div { class: "answer-row",
                span { class: "answer-label", "Your Answer:" }
                span {
                    class: if card.not_answered { "answer-text not-answered" } else { "answer-text" },
                    "{card.user_answer}"
                }
            }
            if card.show_correct {
                div { class: "answer-row correct-answer",
                    span { class: "answer-label", "Correct Answer:" }
                    span { class: "answer-text", "{card.correct_answer}" }
                }
            }
        }
    }
}

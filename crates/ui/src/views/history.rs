use dioxus::prelude::*;
use dioxus_router::use_navigator;

use mcq_core::normalize_display_text;
use services::{AttemptDetail, AttemptQuestion};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryRowVm, HistoryStatsVm, map_history_rows, map_history_stats};

#[derive(Clone, Debug, PartialEq)]
enum HistoryData {
    Unidentified,
    Attempts {
        rows: Vec<HistoryRowVm>,
        stats: Option<HistoryStatsVm>,
    },
}

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let mut detail = use_signal(|| None::<AttemptDetail>);
    let mut detail_error = use_signal(|| None::<String>);

    let on_open_detail = {
        let history = ctx.history();
        use_callback(move |test_id: i64| {
            let history = history.clone();
            let mut detail = detail;
            let mut detail_error = detail_error;
            spawn(async move {
                match history.attempt_detail(test_id).await {
                    Ok(loaded) => {
                        detail_error.set(None);
                        detail.set(Some(loaded));
                    }
                    Err(err) => detail_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let identity = ctx.identity();
    let history = ctx.history();
    let resource = use_resource(move || {
        let identity = identity.clone();
        let history = history.clone();
        async move {
            let Some(profile) = identity
                .current()
                .await
                .map_err(|_| ViewError::Unknown)?
            else {
                return Ok(HistoryData::Unidentified);
            };

            let entries = history
                .list(profile.user_id())
                .await
                .map_err(|err| ViewError::Load {
                    message: err.to_string(),
                })?;
            Ok::<_, ViewError>(HistoryData::Attempts {
                stats: map_history_stats(&entries),
                rows: map_history_rows(&entries),
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page history",
            h2 { "Test History" }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(HistoryData::Unidentified) => rsx! {
                    div { class: "empty",
                        h3 { "User not identified" }
                        p { "Please go back and enter your details before viewing history." }
                        button {
                            class: "primary",
                            onclick: move |_| { navigator.push(Route::Home {}); },
                            "Back to Home"
                        }
                    }
                },
                ViewState::Ready(HistoryData::Attempts { rows, stats }) => rsx! {
                    if rows.is_empty() {
                        div { class: "empty",
                            h3 { "No test history yet" }
                            p { "Take your first test to see results here!" }
                            button {
                                class: "primary",
                                onclick: move |_| { navigator.push(Route::Home {}); },
                                "Start Test"
                            }
                        }
                    } else {
                        if let Some(stats) = stats {
                            div { class: "history-stats",
                                StatTile { label: "Attempts", value: stats.attempts.to_string() }
                                StatTile { label: "Average", value: stats.average_text }
                                StatTile { label: "Best", value: stats.best_text }
                            }
                        }
                        table { class: "history-table",
                            thead {
                                tr {
                                    th { "#" }
                                    th { "Date" }
                                    th { "Time" }
                                    th { "Subject" }
                                    th { "Score" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    HistoryRow { row, on_open: on_open_detail }
                                }
                            }
                        }
                    }
                },
            }

            if let Some(message) = detail_error() {
                p { class: "error", "{message}" }
            }

            if let Some(loaded) = detail() {
                AttemptDetailPanel {
                    detail: loaded,
                    on_close: move |()| detail.set(None),
                }
            }
        }
    }
}

#[component]
fn HistoryRow(row: HistoryRowVm, on_open: EventHandler<i64>) -> Element {
    let test_id = row.id;
    rsx! {
        tr {
            td { "{row.test_no}" }
            td { "{row.date}" }
            td { "{row.time}" }
            td { "{row.subject}" }
            td { "{row.score}" }
            td {
                button { onclick: move |_| on_open.call(test_id), "View" }
            }
        }
    }
}

#[component]
fn AttemptDetailPanel(detail: AttemptDetail, on_close: EventHandler<()>) -> Element {
    let score_text = format!("{:.1}%", detail.test_info.score);
    rsx! {
        div { class: "confirm-overlay",
            div { class: "confirm-box detail-box",
                h3 { "{detail.test_info.subject}" }
                p {
                    "{detail.test_info.correct_answers}/{detail.test_info.total_questions} correct"
                    " ({score_text}) on {detail.test_info.timestamp}"
                }
                div { class: "detail-questions",
                    for question in detail.questions {
                        DetailQuestionRow { question }
                    }
                }
                button { class: "primary", onclick: move |_| on_close.call(()), "Close" }
            }
        }
    }
}

#[component]
fn DetailQuestionRow(question: AttemptQuestion) -> Element {
    let text = normalize_display_text(&question.question).into_owned();
    rsx! {
        div {
            class: if question.is_correct { "answer-card correct" } else { "answer-card incorrect" },
            p { class: "question-text", "{text}" }
            div { class: "answer-row",
                span { class: "answer-label", "Your Answer:" }
                span { class: "answer-text", "{question.user_answer}" }
            }
            if !question.is_correct {
                div { class: "answer-row correct-answer",
                    span { class: "answer-label", "Correct Answer:" }
                    span { class: "answer-text", "{question.correct_answer}" }
                }
            }
        }
    }
}

#[component]
fn StatTile(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat-tile",
            span { class: "tile-value", "{value}" }
            span { class: "tile-label", "{label}" }
        }
    }
}

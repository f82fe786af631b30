use dioxus::prelude::*;
use dioxus_router::use_navigator;

use mcq_core::model::{QuestionSource, Subject, UserProfile};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Shown when the subjects endpoint is unreachable, so the home screen
/// still works against a cold backend.
const FALLBACK_SUBJECTS: [&str; 4] = ["Physics", "Chemistry", "Biology", "Maths"];

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    profile: Option<UserProfile>,
    subjects: Vec<String>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);
    let scope_for_init = ctx.scope();
    let mut genai_mode =
        use_signal(move || scope_for_init.question_source().is_generated());

    let identity = ctx.identity();
    let bank = ctx.question_bank();
    let tracking = ctx.tracking();
    let resource = use_resource(move || {
        let identity = identity.clone();
        let bank = bank.clone();
        let tracking = tracking.clone();
        async move {
            let profile = identity
                .current()
                .await
                .map_err(|_| ViewError::Unknown)?;
            if let Some(profile) = &profile {
                tracking.page_visit(profile, "home").await;
            }
            let subjects = match bank.list_subjects().await {
                Ok(list) if !list.is_empty() => {
                    list.into_iter().map(|s| s.name().to_string()).collect()
                }
                _ => FALLBACK_SUBJECTS.iter().map(ToString::to_string).collect(),
            };
            Ok::<_, ViewError>(HomeData { profile, subjects })
        }
    });
    let state = view_state_from_resource(&resource);

    let on_onboard = {
        let identity = ctx.identity();
        use_callback(move |()| {
            let identity = identity.clone();
            let mut resource = resource;
            let mut form_error = form_error;
            let name_value = name();
            let email_value = email();
            spawn(async move {
                match identity.onboard(&name_value, &email_value).await {
                    Ok(_) => {
                        form_error.set(None);
                        resource.restart();
                    }
                    Err(err) => form_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_select_source = {
        let scope = ctx.scope();
        use_callback(move |source: QuestionSource| {
            scope.set_question_source(source);
            genai_mode.set(source.is_generated());
        })
    };

    let on_start_test = {
        let scope = ctx.scope();
        let identity = ctx.identity();
        let tracking = ctx.tracking();
        use_callback(move |subject_name: String| {
            let scope = scope.clone();
            let identity = identity.clone();
            let tracking = tracking.clone();
            spawn(async move {
                let Ok(Some(profile)) = identity.current().await else {
                    return;
                };
                let Ok(subject) = Subject::new(subject_name) else {
                    return;
                };
                scope.set_subject(subject.clone());
                tracking.test_start(&profile, &subject).await;
                navigator.push(Route::Test {});
            });
        })
    };

    rsx! {
        div { class: "page home",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    if let Some(profile) = data.profile {
                        div { class: "greeting",
                            h2 { "Welcome back, {profile.user_name()}" }
                            p { "Pick a subject to start a test." }
                        }

                        div { class: "mode-toggle",
                            button {
                                class: if genai_mode() { "mode-btn" } else { "mode-btn active" },
                                onclick: move |_| on_select_source.call(QuestionSource::Database),
                                "Question Bank"
                            }
                            button {
                                class: if genai_mode() { "mode-btn active" } else { "mode-btn" },
                                onclick: move |_| on_select_source.call(QuestionSource::Generated),
                                "AI Generated"
                            }
                        }
                        if genai_mode() {
                            p { class: "mode-hint",
                                "Fresh questions are generated for every test and may take a little longer to load."
                            }
                        }

                        div { class: "subject-grid",
                            for subject in data.subjects {
                                SubjectCard { subject, on_start: on_start_test }
                            }
                        }
                    } else {
                        OnboardingForm {
                            name,
                            email,
                            form_error: form_error(),
                            on_submit: on_onboard,
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn SubjectCard(subject: String, on_start: EventHandler<String>) -> Element {
    let label = subject.clone();
    rsx! {
        button {
            class: "subject-card",
            onclick: move |_| on_start.call(subject.clone()),
            h3 { "{label}" }
        }
    }
}

#[component]
fn OnboardingForm(
    name: Signal<String>,
    email: Signal<String>,
    form_error: Option<String>,
    on_submit: EventHandler<()>,
) -> Element {
    let mut name = name;
    let mut email = email;
    rsx! {
        div { class: "onboarding",
            h2 { "Welcome to MCQ Test" }
            p { "Please enter your details to continue:" }

            label { r#for: "user-name", "Your Name" }
            input {
                id: "user-name",
                value: "{name}",
                oninput: move |evt| name.set(evt.value()),
                placeholder: "Enter your full name",
            }

            label { r#for: "user-email", "Email / Roll Number" }
            input {
                id: "user-email",
                value: "{email}",
                oninput: move |evt| email.set(evt.value()),
                placeholder: "Enter email or roll number",
            }

            if let Some(message) = form_error {
                p { class: "error", "{message}" }
            }

            button {
                class: "primary",
                onclick: move |_| on_submit.call(()),
                "Continue to Tests"
            }
            p { class: "hint", "Your information helps us track your progress." }
        }
    }
}

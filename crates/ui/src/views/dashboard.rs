use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, LastSessionVm, WordRowVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let dashboard = ctx.dashboard();
    let mut notice = use_signal(|| None::<&'static str>);

    let dashboard_for_resource = dashboard.clone();
    let mut resource = use_resource(move || {
        let dashboard = dashboard_for_resource.clone();
        async move {
            let stats = dashboard.load().await;
            Ok::<_, ViewError>(map_dashboard(&stats))
        }
    });
    let state = view_state_from_resource(&resource);

    let on_reset = use_callback(move |()| {
        let dashboard = dashboard.clone();
        spawn(async move {
            dashboard.reset_progress().await;
            notice.set(Some("Progress reset."));
            resource.restart();
        });
    });

    rsx! {
        div { class: "page dashboard",
            header { class: "dashboard__header",
                h1 { "Oxford 3000" }
                p { class: "dashboard__subtitle", "Vocabulary trainer" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { class: "loading", "Loading words..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    if vm.has_words() {
                        DashboardBody {
                            vm,
                            notice: notice(),
                            on_start: move |random: bool| {
                                let _ = navigator.push(Route::Flashcards { random });
                            },
                            on_reset,
                        }
                    } else {
                        div { class: "card empty-words",
                            h2 { "No words yet" }
                            p { "No words have been assigned to you yet." }
                            button {
                                class: "btn btn-secondary",
                                id: "dashboard-retry",
                                r#type: "button",
                                onclick: move |_| resource.restart(),
                                "Try again"
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(
    vm: DashboardVm,
    notice: Option<&'static str>,
    on_start: EventHandler<bool>,
    on_reset: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "stats",
            div { class: "card stat",
                div { class: "stat__value", "{vm.total_words}" }
                div { class: "stat__label", "Total words" }
            }
            div { class: "card stat",
                div { class: "stat__value stat__value--good", "{vm.mastered_words}" }
                div { class: "stat__label", "Learned" }
            }
        }
        section { class: "card progress",
            h2 { "Overall progress" }
            div { class: "progress__row",
                span { "Progress" }
                span { class: "progress__percent", "{vm.progress_label}" }
            }
            div { class: "bar",
                div { class: "bar__fill", style: "width: {vm.progress_percent}%" }
            }
            div { class: "progress__row progress__row--small",
                span { "{vm.mastered_words} words learned" }
                span { "{vm.remaining_words} words left" }
            }
        }
        if let Some(last) = vm.last_session {
            LastSession { last }
        }
        section { class: "actions",
            button {
                class: "btn btn-primary",
                id: "dashboard-start",
                r#type: "button",
                onclick: move |_| on_start.call(false),
                "Start studying"
            }
            div { class: "actions__row",
                button {
                    class: "btn btn-secondary",
                    id: "dashboard-random",
                    r#type: "button",
                    onclick: move |_| on_start.call(true),
                    "Random"
                }
                button {
                    class: "btn btn-secondary",
                    id: "dashboard-reset",
                    r#type: "button",
                    onclick: move |_| on_reset.call(()),
                    "Reset"
                }
            }
            if let Some(notice) = notice {
                p { class: "notice", "{notice}" }
            }
        }
        section { class: "card words",
            h2 { "Word status" }
            ul { class: "words__list",
                for row in vm.words {
                    WordRow { key: "{row.id}", row }
                }
            }
            if let Some(more) = vm.more_label {
                p { class: "words__more", "{more}" }
            }
        }
    }
}

#[component]
fn LastSession(last: LastSessionVm) -> Element {
    rsx! {
        section { class: "card last-session",
            h2 { "Last session" }
            div { class: "last-session__grid",
                div {
                    div { class: "stat__value stat__value--good", "{last.correct}" }
                    div { class: "stat__label", "Correct" }
                }
                div {
                    div { class: "stat__value stat__value--bad", "{last.wrong}" }
                    div { class: "stat__label", "Wrong" }
                }
                div {
                    div { class: "stat__value", "{last.time_label}" }
                    div { class: "stat__label", "Time" }
                }
            }
            if let Some(completed) = last.completed_label {
                p { class: "last-session__completed", "Finished {completed}" }
            }
        }
    }
}

#[component]
fn WordRow(row: WordRowVm) -> Element {
    rsx! {
        li { class: "word-row",
            div { class: "word-row__text",
                div { class: "word-row__source", "{row.source}" }
                div { class: "word-row__target", "{row.target}" }
            }
            span { class: "{row.tier_class}", "{row.score_label}" }
        }
    }
}

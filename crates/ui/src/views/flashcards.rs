use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::StudyOrder;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{Flashcard, ViewError, ViewState, view_state_from_resource};
use crate::vm::{StudyIntent, StudyOutcome, StudyVm, completion_message, start_study};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const ADVANCE_DELAY: Duration = Duration::from_secs(1);
const TICK_INTERVAL: Duration = Duration::from_secs(1);
const COMPLETION_DELAY: Duration = Duration::from_millis(1_500);

#[component]
pub fn FlashcardsView(random: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let study = ctx.study();
    let progress = ctx.progress();
    let order = StudyOrder::from_random_flag(random);

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<StudyVm>);
    // Set while an answer is being saved and shown.
    let busy = use_signal(|| false);
    let completion = use_signal(|| None::<String>);

    let study_for_resource = study.clone();
    let resource = use_resource(move || {
        let study = study_for_resource.clone();
        let progress = progress.clone();
        let mut vm = vm;
        async move {
            let started = match start_study(&study, &progress, order).await {
                Ok(started) => started,
                Err(ViewError::EmptyWords) => {
                    tracing::debug!("no words to study, returning to dashboard");
                    let _ = navigator.replace(Route::Dashboard {});
                    return Err(ViewError::EmptyWords);
                }
                Err(err) => return Err(err),
            };
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let study_for_timer = study.clone();
    use_future(move || {
        let study = study_for_timer.clone();
        let mut vm = vm;
        async move {
            loop {
                tokio::time::sleep(TICK_INTERVAL).await;
                let snapshot = vm
                    .write()
                    .as_mut()
                    .and_then(|current| current.refresh_elapsed(&study));
                if let Some(session) = snapshot {
                    study.save_tick(&session).await;
                }
            }
        }
    });

    let dispatch_intent = {
        let study = study.clone();
        use_callback(move |intent: StudyIntent| {
            let mut error = error;
            let mut vm = vm;
            let mut busy = busy;
            let mut completion = completion;

            if busy() {
                return;
            }
            match intent {
                StudyIntent::Flip => {
                    if let Some(current) = vm.write().as_mut() {
                        current.flip();
                    }
                }
                StudyIntent::Answer(answer) => {
                    let snapshot = vm.read().clone();
                    let Some(mut current) = snapshot else {
                        return;
                    };
                    if current.is_answered() {
                        return;
                    }
                    busy.set(true);
                    let study = study.clone();
                    spawn(async move {
                        let answered = current.answer(&study, answer).await;
                        vm.set(Some(current));
                        if answered.is_err() {
                            error.set(Some(ViewError::Unknown));
                            busy.set(false);
                            return;
                        }

                        tokio::time::sleep(ADVANCE_DELAY).await;

                        let snapshot = vm.read().clone();
                        let Some(mut current) = snapshot else {
                            busy.set(false);
                            return;
                        };
                        let outcome = current.advance(&study).await;
                        vm.set(Some(current));
                        busy.set(false);
                        match outcome {
                            Ok(StudyOutcome::Continue) => error.set(None),
                            Ok(StudyOutcome::Completed { correct, total }) => {
                                error.set(None);
                                completion.set(Some(completion_message(correct, total)));
                                tokio::time::sleep(COMPLETION_DELAY).await;
                                let _ = navigator.push(Route::Dashboard {});
                            }
                            Err(err) => error.set(Some(err)),
                        }
                    });
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<FlashcardsTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let vm_guard = vm.read();
    let face = vm_guard.as_ref().and_then(StudyVm::face);
    let (position_label, tally_label, elapsed_label) = vm_guard.as_ref().map_or_else(
        || (String::new(), String::new(), String::new()),
        |current| {
            (
                current.position_label(),
                current.tally_label(),
                current.elapsed_label(),
            )
        },
    );
    drop(vm_guard);
    let completion_text = completion.read().clone();

    rsx! {
        div { class: "page flashcards",
            header { class: "flashcards__header",
                button {
                    class: "btn btn-ghost",
                    id: "flashcards-back",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Dashboard {});
                    },
                    "Back"
                }
                if matches!(state, ViewState::Ready(())) && completion_text.is_none() {
                    div { class: "flashcards__status",
                        div { class: "flashcards__position", "{position_label}" }
                        div { class: "flashcards__tally", "{tally_label}" }
                        div { class: "flashcards__time", "{elapsed_label}" }
                    }
                }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { class: "loading", "Loading words..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "card empty-words",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Dashboard {});
                            },
                            "Back to dashboard"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "error", "{err.message()}" }
                    }
                    if let Some(message) = completion_text {
                        div { class: "card flashcards__complete",
                            h2 { "Session complete" }
                            p { "{message}" }
                        }
                    } else if let Some(face) = face {
                        Flashcard { face, on_intent: dispatch_intent }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct FlashcardsTestHandles {
    dispatch: Rc<RefCell<Option<Callback<StudyIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<StudyVm>>>>>,
}

#[cfg(test)]
impl FlashcardsTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<StudyIntent>, vm: Signal<Option<StudyVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<StudyIntent> {
        (*self.dispatch.borrow()).expect("flashcards dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<StudyVm>> {
        (*self.vm.borrow()).expect("flashcards vm registered")
    }
}

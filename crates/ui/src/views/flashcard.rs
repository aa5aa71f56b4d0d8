use dioxus::prelude::*;
use vocab_core::model::Answer;

use crate::vm::{FlashcardFace, StudyIntent};

/// A flip-card with the answer buttons underneath.
#[component]
pub fn Flashcard(face: FlashcardFace, on_intent: EventHandler<StudyIntent>) -> Element {
    let card_class = if face.flipped {
        "flip-card flipped"
    } else {
        "flip-card"
    };

    rsx! {
        div { class: "flashcard",
            div { class: "flashcard__meta",
                span { class: "badge", "{face.position_label}" }
                div { class: "bar bar--thin",
                    div { class: "bar__fill", style: "width: {face.run_percent}%" }
                }
                span { class: "flashcard__score", "{face.score_label}" }
            }
            div { class: "flashcard__word-progress",
                div { class: "progress__row progress__row--small",
                    span { "Progress for this word" }
                    span { "{face.word_percent_label}" }
                }
                div { class: "bar bar--thin",
                    div { class: "bar__fill {face.tier_class}", style: "width: {face.word_percent}%" }
                }
            }
            div {
                class: "{card_class}",
                id: "flashcard-card",
                onclick: move |_| on_intent.call(StudyIntent::Flip),
                div { class: "flip-card__inner",
                    div { class: "flip-card__front",
                        div { class: "flip-card__text", "{face.front}" }
                        div { class: "flip-card__hint", "Tap to see the translation" }
                    }
                    div { class: "flip-card__back",
                        div { class: "flip-card__text", "{face.back}" }
                        div { class: "flip-card__hint", "Tap to see the word" }
                    }
                }
            }
            if face.answered {
                div { class: "flashcard__answered",
                    div { class: "flashcard__answered-title", "✓ Great!" }
                    div { class: "flashcard__answered-note", "Moving on to the next word..." }
                }
            } else {
                div { class: "flashcard__answers",
                    button {
                        class: "btn btn-bad",
                        id: "flashcard-unknown",
                        r#type: "button",
                        onclick: move |_| on_intent.call(StudyIntent::Answer(Answer::Incorrect)),
                        "I don't know"
                    }
                    button {
                        class: "btn btn-good",
                        id: "flashcard-known",
                        r#type: "button",
                        onclick: move |_| on_intent.call(StudyIntent::Answer(Answer::Correct)),
                        "I know"
                    }
                }
            }
        }
    }
}

use std::time::Duration;

use storage::repository::{KeyValueStore, Storage, StorageKey};
use vocab_core::model::{Answer, MasteryMap, MasteryScore, StudySession, WordId};

use super::test_harness::{ViewKind, sample_words, setup_view_harness};
use crate::vm::StudyIntent;

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_stats_and_preview() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, sample_words(12));
    let progress = harness.services.progress();
    let mastery: MasteryMap = [
        (WordId::new(1), MasteryScore::new(5).unwrap()),
        (WordId::new(2), MasteryScore::new(4).unwrap()),
        (WordId::new(3), MasteryScore::new(3).unwrap()),
    ]
    .into_iter()
    .collect();
    progress.set_mastery(&mastery).await;
    let mut session = StudySession::start(12).unwrap();
    session.record(Answer::Correct);
    session.record(Answer::Incorrect);
    session.record(Answer::Correct);
    session.set_elapsed(75);
    progress.set_session(&session).await;

    harness.settle().await;
    let html = harness.render();
    for expected in [
        "Total words",
        "2 words learned",
        "10 words left",
        "20%",
        "Last session",
        "1:15",
        "word1",
        "kelime1",
        "5/5",
        "tier tier--learning",
        "and 2 more words...",
        "Start studying",
        "Random",
        "Reset",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("word11"), "preview should stop at ten words: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_hides_untouched_session() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, sample_words(3));
    harness
        .services
        .progress()
        .set_session(&StudySession::start(3).unwrap())
        .await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("0%"), "missing progress in {html}");
    assert!(!html.contains("Last session"), "unexpected session card in {html}");
    assert!(!html.contains("more words"), "unexpected overflow line in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_empty_state_with_retry() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Vec::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No words yet"), "missing empty state in {html}");
    assert!(html.contains("Try again"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_smoke_renders_first_card() {
    let mut harness = setup_view_harness(ViewKind::Flashcards { random: false }, sample_words(3));
    harness.settle().await;
    let html = harness.render();
    for expected in ["1 / 3", "✓ 0 | ✗ 0", "0:00", "word1", "kelime1", "I know"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }

    let stored = harness.services.progress().get_session().await.unwrap();
    assert_eq!(stored.total_words(), 3);
    assert_eq!(stored.studied_words(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_smoke_flip_and_answer() {
    let mut harness = setup_view_harness(ViewKind::Flashcards { random: false }, sample_words(2));
    harness.settle().await;
    let handles = harness.flashcards_handles.clone().expect("handles");

    harness
        .dom
        .in_runtime(|| handles.dispatch().call(StudyIntent::Flip));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("flip-card flipped"), "card should flip in {html}");

    harness
        .dom
        .in_runtime(|| handles.dispatch().call(StudyIntent::Answer(Answer::Correct)));
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("✓ 1 | ✗ 0"), "missing tally in {html}");
    assert!(html.contains("Moving on to the next word"), "missing transition in {html}");

    let mastery = harness.services.progress().get_mastery().await;
    assert_eq!(mastery.score(WordId::new(1)).value(), 1);
    let answered = harness
        .dom
        .in_runtime(|| handles.vm().read().as_ref().map(|vm| vm.is_answered()));
    assert_eq!(answered, Some(true));
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_smoke_empty_words_never_starts() {
    let storage = Storage::in_memory();
    let mut harness = super::test_harness::setup_view_harness_with_storage(
        ViewKind::Flashcards { random: true },
        Vec::new(),
        storage.clone(),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No words found."), "missing empty message in {html}");
    let raw = storage.kv.get(StorageKey::CurrentSession).await.unwrap();
    assert!(raw.is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn flashcards_smoke_walks_run_to_completion() {
    let mut harness = setup_view_harness(ViewKind::Flashcards { random: false }, sample_words(2));
    harness.settle().await;
    let handles = harness.flashcards_handles.clone().expect("handles");

    harness
        .dom
        .in_runtime(|| handles.dispatch().call(StudyIntent::Answer(Answer::Correct)));
    harness.drive_async().await;
    harness.idle_for(Duration::from_millis(1_200)).await;
    let html = harness.render();
    assert!(html.contains("2 / 2"), "should auto-advance to the second card in {html}");
    assert!(html.contains("word2"), "missing second word in {html}");
    assert!(!html.contains("Moving on"), "second card should be unanswered in {html}");

    harness
        .dom
        .in_runtime(|| handles.dispatch().call(StudyIntent::Answer(Answer::Incorrect)));
    harness.drive_async().await;
    harness.idle_for(Duration::from_millis(1_200)).await;
    let html = harness.render();
    assert!(
        html.contains("Congratulations! You answered 1/2 correctly."),
        "missing completion message in {html}"
    );

    let stored = harness.services.progress().get_session().await.unwrap();
    assert!(stored.is_completed());
    assert!(stored.completed_at().is_some());
    assert_eq!(stored.correct_answers(), 1);
    assert_eq!(stored.wrong_answers(), 1);

    // Timer ticks after completion leave the completed record alone.
    harness.idle_for(Duration::from_millis(2_000)).await;
    let after = harness.services.progress().get_session().await.unwrap();
    assert_eq!(after, stored);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn flashcards_smoke_ignores_answers_while_busy() {
    let mut harness = setup_view_harness(ViewKind::Flashcards { random: false }, sample_words(2));
    harness.settle().await;
    let handles = harness.flashcards_handles.clone().expect("handles");

    harness
        .dom
        .in_runtime(|| handles.dispatch().call(StudyIntent::Answer(Answer::Correct)));
    harness
        .dom
        .in_runtime(|| handles.dispatch().call(StudyIntent::Answer(Answer::Incorrect)));
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("word1"), "card should stay on screen in {html}");
    assert!(html.contains("✓ 1 | ✗ 0"), "only the first answer counts in {html}");
    let stored = harness.services.progress().get_session().await.unwrap();
    assert_eq!(stored.studied_words(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn flashcards_smoke_timer_persists_running_session() {
    let storage = Storage::in_memory();
    let mut harness = super::test_harness::setup_view_harness_with_storage(
        ViewKind::Flashcards { random: false },
        sample_words(2),
        storage.clone(),
    );
    harness.settle().await;
    storage.kv.remove(StorageKey::CurrentSession).await.unwrap();

    harness.idle_for(Duration::from_millis(1_200)).await;
    let stored = harness.services.progress().get_session().await.unwrap();
    assert_eq!(stored.total_words(), 2);
    assert!(!stored.is_completed());
}

use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, Clock, StaticWordSource};
use storage::repository::Storage;
use vocab_core::model::{Word, WordId};
use vocab_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::flashcards::FlashcardsTestHandles;
use crate::views::{DashboardView, FlashcardsView};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Flashcards { random: bool },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    flashcards_handles: Option<FlashcardsTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.flashcards_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Flashcards { random } => rsx! { FlashcardsView { random } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub services: Arc<AppServices>,
    pub flashcards_handles: Option<FlashcardsTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Keep driving the dom until `span` of tokio time has passed.
    pub async fn idle_for(&mut self, span: std::time::Duration) {
        let deadline = tokio::time::Instant::now() + span;
        while tokio::time::Instant::now() < deadline {
            self.drive_async().await;
        }
    }

    /// Rebuild, then let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_words(count: u64) -> Vec<Word> {
    (1..=count)
        .map(|id| {
            Word::new(WordId::new(id), format!("word{id}"), format!("kelime{id}"))
                .expect("valid word")
        })
        .collect()
}

pub fn setup_view_harness(view: ViewKind, words: Vec<Word>) -> ViewHarness {
    setup_view_harness_with_storage(view, words, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(
    view: ViewKind,
    words: Vec<Word>,
    storage: Storage,
) -> ViewHarness {
    let services = Arc::new(AppServices::new(
        Clock::fixed(fixed_now()),
        &storage,
        Arc::new(StaticWordSource::new(words)),
    ));
    let flashcards_handles = match view {
        ViewKind::Flashcards { .. } => Some(FlashcardsTestHandles::default()),
        ViewKind::Dashboard => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&services),
            view,
            flashcards_handles: flashcards_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        services,
        flashcards_handles,
    }
}

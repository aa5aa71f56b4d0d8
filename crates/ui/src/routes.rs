use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{DashboardView, FlashcardsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/flashcards?:random", FlashcardsView)] Flashcards { random: bool },
}

#[component]
fn Layout() -> Element {
    rsx! {
        main { class: "content",
            Outlet::<Route> {}
        }
    }
}

use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HistoryView, HomeView, ResultsView, TestView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/test", TestView)] Test {},
        #[route("/results", ResultsView)] Results {},
        #[route("/history", HistoryView)] History {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "MCQ Test" }
                nav {
                    Link { to: Route::Home {}, "Home" }
                    Link { to: Route::History {}, "History" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

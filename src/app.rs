use crate::components::provide_user_context;
use crate::pages;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="stylesheet" href="/pkg/poll_planner.css" />

                <title>"Poll Planner"</title>
                <meta
                    name="description"
                    content="Find a date that works for everyone. Share a poll, let people mark the days and time slots they can make, and pick the one with the most votes."
                />

                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_user_context();

    view! {
        <Router>
            <main>
                <Routes fallback=pages::NotFound>
                    <Route path=path!("/") view=pages::HomePage />
                    <Route path=path!("/polls") view=pages::PollsPage />
                    <Route path=path!("/invite/:url_id") view=pages::PollUrlPage />
                    <Route path=path!("/admin/:url_id") view=pages::PollUrlPage />
                    <Route path=path!("/poll/:id") view=pages::ManagePage />
                </Routes>
            </main>
        </Router>
    }
}

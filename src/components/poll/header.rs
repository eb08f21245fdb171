use crate::model::Poll;
use leptos::{either::Either, prelude::*};
use leptos_meta::Title;

#[component]
pub fn PollHeader(#[prop(into)] poll: Signal<Poll>) -> impl IntoView {
    let title = move || poll.with(|poll| poll.title.clone());
    view! {
        <Title text=title />
        <header class="poll-header">
            <h1>{title}</h1>
            {move || {
                if poll.with(|poll| poll.closed) {
                    Either::Left(view! { <span class="badge closed">"Closed"</span> })
                } else {
                    Either::Right(())
                }
            }}
        </header>
    }
}

/// Summary of the event: description, location and how many people answered.
#[component]
pub fn EventCard(#[prop(into)] poll: Signal<Poll>) -> impl IntoView {
    let description = move || poll.with(|poll| poll.description.clone());
    let location = move || poll.with(|poll| poll.location.clone());
    let responses = move || {
        poll.with(|poll| match poll.participants.len() {
            1 => "1 response".to_string(),
            count => format!("{count} responses"),
        })
    };

    view! {
        <section class="event-card">
            {move || description().map(|description| view! { <p class="description">{description}</p> })}
            {move || location().map(|location| view! { <p class="location">"Location: " {location}</p> })}
            <p class="responses">{responses}</p>
        </section>
    }
}

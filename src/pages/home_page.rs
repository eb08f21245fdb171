use crate::components::{Icon, TimeZonePicker, use_user};
use crate::model::*;
use icondata::{IoAddCircle, IoTrash};
use leptos::{logging::*, prelude::*};
use leptos_meta::Title;
use leptos_router::{NavigateOptions, components::A, hooks::use_navigate};

#[server]
pub async fn create_poll(new_poll: NewPoll, user_id: String) -> Result<Poll, ServerFnError> {
    use crate::model::{self, AppState};
    let app_state = expect_context::<AppState>();
    Ok(model::create_poll(new_poll, &user_id, &app_state.db.pool).await?)
}

#[component]
fn OptionInput(index: usize, draft: RwSignal<PollDraft>) -> impl IntoView {
    let field = move |read: fn(&OptionDraft) -> &String| {
        move || draft.with(|draft| draft.options.get(index).map(read).cloned().unwrap_or_default())
    };
    let set = move |value: String, write: fn(&mut OptionDraft) -> &mut String| {
        draft.update(|draft| {
            if let Some(option) = draft.options.get_mut(index) {
                *write(option) = value;
            }
        });
    };

    view! {
        <div class="option-input">
            <input
                type="date"
                prop:value=field(|option| &option.date)
                on:input=move |ev| set(event_target_value(&ev), |option| &mut option.date)
            />
            <input
                type="time"
                prop:value=field(|option| &option.start)
                on:input=move |ev| set(event_target_value(&ev), |option| &mut option.start)
            />
            <input
                type="time"
                prop:value=field(|option| &option.end)
                on:input=move |ev| set(event_target_value(&ev), |option| &mut option.end)
            />
            <button
                type="button"
                class="button"
                disabled=move || draft.with(|draft| draft.options.len() <= 1)
                on:click=move |_| draft.update(|draft| draft.remove_option(index))
            >
                <Icon icon=IoTrash />
            </button>
        </div>
    }
}

/// Create poll form. The creator is sent to the admin page of the new poll.
#[component]
pub fn HomePage() -> impl IntoView {
    let user = use_user();
    let draft = RwSignal::new(PollDraft::default());
    let (error_message, set_error_message) = signal(None::<String>);

    let create = Action::new(move |new_poll: &NewPoll| {
        let new_poll = new_poll.clone();
        let user_id = user.user_id().unwrap_or_default();
        async move { create_poll(new_poll, user_id).await }
    });

    let navigate = use_navigate();
    Effect::new(move |_| match create.value().get() {
        Some(Ok(poll)) => match poll.admin_url_id {
            Some(admin_url_id) => {
                log!("created poll {}", poll.id);
                navigate(&admin_path(&admin_url_id), NavigateOptions::default());
            }
            None => error!("created poll {} has no admin link", poll.id),
        },
        Some(Err(e)) => {
            error!("creating poll failed: {}", e);
            set_error_message.set(Some(e.to_string()));
        }
        None => {}
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if user.user.with_untracked(Option::is_none) {
            set_error_message.set(Some("Still loading, try again in a moment".to_string()));
            return;
        }
        match draft.with_untracked(PollDraft::to_new_poll) {
            Ok(new_poll) => {
                set_error_message.set(None);
                create.dispatch(new_poll);
            }
            Err(e) => set_error_message.set(Some(e.to_string())),
        }
    };

    let text = move |read: fn(&PollDraft) -> &String| move || draft.with(|draft| read(draft).clone());

    view! {
        <Title text="New poll" />
        <div id="home-page">
            <form class="create-poll" on:submit=on_submit>
                <h1>"Create a poll"</h1>
                <input
                    type="text"
                    class="text-input"
                    placeholder="Title"
                    prop:value=text(|d| &d.title)
                    on:input=move |ev| draft.update(|draft| draft.title = event_target_value(&ev))
                />
                <input
                    type="text"
                    class="text-input"
                    placeholder="Location"
                    prop:value=text(|d| &d.location)
                    on:input=move |ev| draft.update(|draft| draft.location = event_target_value(&ev))
                />
                <textarea
                    class="text-input"
                    placeholder="Description"
                    prop:value=text(|d| &d.description)
                    on:input=move |ev| draft.update(|draft| draft.description = event_target_value(&ev))
                ></textarea>
                <TimeZonePicker
                    value=Signal::derive(move || draft.with(|draft| draft.time_zone.clone()))
                    on_change=Callback::new(move |zone| draft.update(|draft| draft.time_zone = zone))
                />
                <h2>"Options"</h2>
                <p class="hint">"Leave both times empty for an all day option."</p>
                {move || {
                    (0..draft.with(|draft| draft.options.len()))
                        .map(|index| view! { <OptionInput index draft /> })
                        .collect_view()
                }}
                <button type="button" class="button" on:click=move |_| draft.update(PollDraft::add_option)>
                    <Icon icon=IoAddCircle />
                    "Add option"
                </button>
                {move || error_message.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <button type="submit" class="button primary" disabled=move || create.pending().get()>
                    {move || if create.pending().get() { "Creating..." } else { "Create poll" }}
                </button>
            </form>
            <A href=POLL_LIST_PATH>"Your polls"</A>
        </div>
    }
}

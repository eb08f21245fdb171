use crate::components::{DeletePollDialog, Icon};
use crate::model::Poll;
use icondata::{IoLockClosed, IoLockOpen};
use leptos::{either::Either, logging::*, prelude::*};

#[server]
pub async fn set_poll_closed(admin_url_id: String, closed: bool) -> Result<(), ServerFnError> {
    use crate::model::{self, AppState};
    let app_state = expect_context::<AppState>();
    model::set_poll_closed(&admin_url_id, closed, &app_state.db.pool).await?;
    Ok(())
}

/// Admin controls: close or reopen voting and delete the poll.
#[component]
pub fn ManagePoll(#[prop(into)] poll: Signal<Poll>, on_change: Callback<()>) -> impl IntoView {
    let admin_url_id = Signal::derive(move || poll.with(|poll| poll.admin_url_id.clone()));
    let closed = move || poll.with(|poll| poll.closed);

    let toggle = Action::new(move |(admin_url_id, closed): &(String, bool)| {
        let admin_url_id = admin_url_id.clone();
        let closed = *closed;
        async move {
            let result = set_poll_closed(admin_url_id, closed).await;
            match &result {
                Ok(()) => {
                    log!("poll closed: {}", closed);
                    on_change.run(());
                }
                Err(e) => error!("changing poll state failed: {}", e),
            }
            result
        }
    });

    move || match admin_url_id.get() {
        Some(admin_url_id) => Either::Left(view! {
            <div class="manage-poll">
                <button
                    type="button"
                    class="button"
                    disabled=move || toggle.pending().get()
                    on:click={
                        let admin_url_id = admin_url_id.clone();
                        move |_| {
                            toggle.dispatch((admin_url_id.clone(), !closed()));
                        }
                    }
                >
                    {move || if closed() {
                        Either::Left(view! { <Icon icon=IoLockOpen /> "Reopen poll" })
                    } else {
                        Either::Right(view! { <Icon icon=IoLockClosed /> "Close poll" })
                    }}
                </button>
                <DeletePollDialog admin_url_id />
            </div>
        }),
        None => Either::Right(()),
    }
}

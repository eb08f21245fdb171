use crate::components::{FullPageLoader, use_user};
use crate::model::*;
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

#[server]
pub async fn list_polls(user_id: String) -> Result<Vec<PollSummary>, ServerFnError> {
    use crate::model::{self, AppState};
    let app_state = expect_context::<AppState>();
    Ok(model::list_polls(&user_id, &app_state.db.pool).await?)
}

#[component]
fn PollRow(poll: PollSummary) -> impl IntoView {
    let responses = match poll.participant_count {
        1 => "1 response".to_string(),
        count => format!("{count} responses"),
    };
    view! {
        <li class="poll-row">
            <A href=admin_path(&poll.admin_url_id)>{poll.title}</A>
            {poll.closed.then(|| view! { <span class="badge closed">"Closed"</span> })}
            <span class="responses">{responses}</span>
            <span class="created">{poll.created_at.format("%b %d, %Y").to_string()}</span>
        </li>
    }
}

/// Polls created from this browser, newest first.
#[component]
pub fn PollsPage() -> impl IntoView {
    let user = use_user().user;
    let polls = Resource::new(
        move || user.with(|user| user.as_ref().map(|user| user.id.clone())),
        |user_id| async move {
            match user_id {
                Some(user_id) => list_polls(user_id).await.map(Some),
                None => Ok(None),
            }
        },
    );

    let list = move || {
        polls.get().map(|polls| match polls {
            Ok(Some(polls)) if polls.is_empty() => {
                view! { <p class="empty">"You have not created a poll yet."</p> }.into_any()
            }
            Ok(Some(polls)) => view! {
                <ul class="poll-list">
                    {polls.into_iter().map(|poll| view! { <PollRow poll /> }).collect_view()}
                </ul>
            }
            .into_any(),
            Ok(None) => view! { <FullPageLoader /> }.into_any(),
            Err(e) => view! { <p class="form-error">{e.to_string()}</p> }.into_any(),
        })
    };

    view! {
        <Title text="Your polls" />
        <div class="polls-page">
            <h1>"Your polls"</h1>
            <A href="/">"New poll"</A>
            <Suspense fallback=|| view! { <FullPageLoader /> }>{list}</Suspense>
        </div>
    }
}

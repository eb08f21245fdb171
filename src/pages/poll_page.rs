use crate::components::*;
use crate::model::*;
use crate::pages::NotFound;
use leptos::{either::EitherOf3, logging::*, prelude::*, task::spawn_local};
use leptos_router::hooks::{use_location, use_params_map};

#[server]
pub async fn fetch_poll(
    url_id: String,
    admin: bool,
    user_id: Option<String>,
) -> Result<Poll, ServerFnError> {
    use crate::model::{self, AppState};
    let app_state = expect_context::<AppState>();
    let viewer = user_id.map(User::new);
    Ok(model::get_poll(&url_id, admin, viewer.as_ref(), &app_state.db.pool).await?)
}

#[server]
pub async fn fetch_owned_poll(poll_id: String, user_id: String) -> Result<Poll, ServerFnError> {
    use crate::model::{self, AppState};
    let app_state = expect_context::<AppState>();
    Ok(model::get_owned_poll(&poll_id, &user_id, &app_state.db.pool).await?)
}

/// How a poll page finds its poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollSource {
    /// invite or admin link, `user_id` is the viewer
    Url {
        url_id: String,
        admin: bool,
        user_id: Option<String>,
    },
    /// manage page of the poll's creator
    Owned { poll_id: PollId, user_id: String },
}

impl PollSource {
    pub fn role(&self) -> Role {
        match self {
            PollSource::Url { admin: false, .. } => Role::Participant,
            PollSource::Url { admin: true, .. } | PollSource::Owned { .. } => Role::Admin,
        }
    }

    pub async fn fetch(self) -> Result<Poll, ServerFnError> {
        match self {
            PollSource::Url {
                url_id,
                admin,
                user_id,
            } => fetch_poll(url_id, admin, user_id).await,
            PollSource::Owned { poll_id, user_id } => fetch_owned_poll(poll_id, user_id).await,
        }
    }
}

/// Header, event details, admin tools and the voting form of a loaded poll.
#[component]
pub fn PollPage(
    #[prop(into)] poll: Signal<Poll>,
    role: Role,
    on_change: Callback<()>,
) -> impl IntoView {
    let participant_url_id = Signal::derive(move || poll.with(|poll| poll.participant_url_id.clone()));

    view! {
        <div class="poll-page">
            <PollHeader poll />
            <ManageAccess poll />
            <EventCard poll />
            {role.is_admin().then(|| view! {
                <InviteLink participant_url_id />
                <ManagePoll poll on_change />
            })}
            <MobilePoll poll role on_change />
        </div>
    }
}

/// Keeps the loaded poll in a signal and reloads it after every change, so the
/// voting form survives refreshes.
#[component]
fn LoadedPoll(initial: Poll, source: PollSource) -> impl IntoView {
    let role = source.role();
    let poll = RwSignal::new(initial);

    let on_change = Callback::new(move |_: ()| {
        let source = source.clone();
        spawn_local(async move {
            match source.fetch().await {
                Ok(fresh) => {
                    if poll.try_set(fresh).is_some() {
                        log!("poll page closed before the reload finished");
                    }
                }
                Err(e) => error!("reloading poll failed: {}", e),
            }
        });
    });

    view! { <PollPage poll role on_change /> }
}

#[component]
pub fn PollLoader(source: PollSource) -> impl IntoView {
    let fetched = Resource::new(
        {
            let source = source.clone();
            move || source.clone()
        },
        PollSource::fetch,
    );

    view! {
        <Suspense fallback=|| view! { <FullPageLoader /> }>
            {move || {
                let source = source.clone();
                fetched
                    .with(|fetched| match poll_view(fetched.as_ref()) {
                        PollView::Loading => EitherOf3::A(view! { <FullPageLoader /> }),
                        PollView::NotFound => EitherOf3::B(view! { <NotFound /> }),
                        PollView::Loaded(poll) => {
                            EitherOf3::C(view! { <LoadedPoll initial=poll.clone() source /> })
                        }
                    })
            }}
        </Suspense>
    }
}

/// `/invite/:url_id` and `/admin/:url_id`.
#[component]
pub fn PollUrlPage() -> impl IntoView {
    let params = use_params_map();
    let location = use_location();
    let user = use_user().user;

    let source = Memo::new(move |_| PollSource::Url {
        url_id: params.with(|params| params.get("url_id").unwrap_or_default()),
        admin: location.pathname.with(|path| is_admin_path(path)),
        user_id: user.with(|user| user.as_ref().map(|user| user.id.clone())),
    });

    move || {
        let source = source.get();
        log!("loading poll {:?}", source);
        view! { <PollLoader source /> }
    }
}

/// `/poll/:id`, only for the creator of the poll.
#[component]
pub fn ManagePage() -> impl IntoView {
    let params = use_params_map();
    let user = use_user().user;

    let source = Memo::new(move |_| {
        let user_id = user.with(|user| user.as_ref().map(|user| user.id.clone()))?;
        Some(PollSource::Owned {
            poll_id: params.with(|params| params.get("id").unwrap_or_default()),
            user_id,
        })
    });

    move || match source.get() {
        Some(source) => view! { <PollLoader source /> }.into_any(),
        None => view! { <FullPageLoader /> }.into_any(),
    }
}

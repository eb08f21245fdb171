use crate::components::{ConfirmDialog, Icon, OptionDate, TimeZonePicker, UserAvatar, VoteIcon, use_user};
use crate::model::*;
use crate::model::Error;
use icondata::{IoAddCircle, IoPencil, IoSave, IoTrash};
use leptos::{
    either::{Either, EitherOf3},
    ev::{MouseEvent, SubmitEvent},
    logging::*,
    prelude::*,
    task::spawn_local,
};

#[server]
pub async fn save_new_ballot(
    poll_id: String,
    form: BallotForm,
    user_id: Option<String>,
) -> Result<Participant, ServerFnError> {
    use crate::model::{self, AppState};
    let app_state = expect_context::<AppState>();
    Ok(model::add_participant(&poll_id, &form, user_id.as_deref(), &app_state.db.pool).await?)
}

#[server]
pub async fn save_ballot(
    poll_id: String,
    participant_id: String,
    form: BallotForm,
) -> Result<Participant, ServerFnError> {
    use crate::model::{self, AppState};
    let app_state = expect_context::<AppState>();
    Ok(model::update_participant(&poll_id, &participant_id, &form, &app_state.db.pool).await?)
}

#[server]
pub async fn remove_participant(
    admin_url_id: String,
    participant_id: String,
) -> Result<(), ServerFnError> {
    use crate::model::{self, AppState};
    let app_state = expect_context::<AppState>();
    model::delete_participant(&admin_url_id, &participant_id, &app_state.db.pool).await?;
    Ok(())
}

/// Ballots saved through the server functions above.
struct ServerBallots {
    user_id: Option<String>,
}

impl BallotService for ServerBallots {
    async fn create_participant(
        &self,
        poll_id: &str,
        form: BallotForm,
    ) -> Result<Participant, Error> {
        Ok(save_new_ballot(poll_id.to_string(), form, self.user_id.clone()).await?)
    }

    async fn update_participant(
        &self,
        poll_id: &str,
        participant_id: &str,
        form: BallotForm,
    ) -> Result<Participant, Error> {
        Ok(save_ballot(poll_id.to_string(), participant_id.to_string(), form).await?)
    }
}

fn votes_label(votes: usize) -> String {
    match votes {
        1 => "1 vote".to_string(),
        votes => format!("{votes} votes"),
    }
}

#[component]
fn OptionRow(
    option_id: OptionId,
    date: Result<DateOption, Error>,
    votes: usize,
    top: bool,
    voters: Vec<String>,
    extra: Option<usize>,
    editor: RwSignal<BallotEditor>,
    #[prop(into)] poll: Signal<Poll>,
) -> impl IntoView {
    let date = match date {
        Ok(date) => Either::Left(view! { <OptionDate option=date /> }),
        Err(e) => {
            error!("{}", e);
            Either::Right(view! { <div class="date-card invalid">"?"</div> })
        }
    };

    let vote_cell = move || {
        if poll.with(|poll| editor.with(|state| state.shows_form(poll))) {
            let checked_id = option_id.clone();
            let change_id = option_id.clone();
            EitherOf3::A(view! {
                <input
                    type="checkbox"
                    class="checkbox"
                    prop:checked=move || editor.with(|state| state.form().is_selected(&checked_id))
                    disabled=move || editor.with(BallotEditor::is_submitting)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        if let Some(Err(e)) = editor
                            .try_update(|state| state.set_vote(&change_id, checked))
                        {
                            warn!("vote not changed: {}", e);
                        }
                    }
                />
            })
        } else {
            match poll.with(|poll| editor.with(|state| state.indicator(poll, &option_id))) {
                Some(indicator) => EitherOf3::B(view! { <VoteIcon indicator /> }),
                None => EitherOf3::C(()),
            }
        }
    };

    view! {
        <div class="option-row">
            <div class="option-date">{date}</div>
            <div class="option-votes">
                <span class="vote-count" class:top=top>
                    {votes_label(votes)}
                </span>
                <div class="voters">
                    {voters.into_iter().map(|name| view! { <UserAvatar name /> }).collect_view()}
                    {extra.map(|extra| view! { <span class="avatar more">{format!("+{extra}")}</span> })}
                </div>
            </div>
            <div class="option-vote">{vote_cell}</div>
        </div>
    }
}

/// Voting form for small screens: browse everyone's answers or fill in a ballot.
#[component]
pub fn MobilePoll(
    #[prop(into)] poll: Signal<Poll>,
    role: Role,
    /// called after anything changed on the server
    on_change: Callback<()>,
) -> impl IntoView {
    let user = use_user();
    let editor = RwSignal::new(poll.with_untracked(BallotEditor::new));
    let (target_time_zone, set_target_time_zone) =
        signal(poll.with_untracked(|poll| poll.time_zone.clone()));
    let (error_message, set_error_message) = signal(None::<String>);
    let delete_dialog = RwSignal::new(DeleteDialog::default());

    let is_editing = move || poll.with(|poll| editor.with(|state| state.shows_form(poll)));
    let is_submitting = move || editor.with(BallotEditor::is_submitting);
    let actions = move || poll.with(|poll| editor.with(|state| state.actions(poll, role)));

    let select = move |ev: leptos::ev::Event| {
        let id = event_target_value(&ev);
        let id = (!id.is_empty()).then_some(id);
        log!("selecting participant {:?}", id);
        if let Some(Err(e)) = editor.try_update(|state| state.select(id)) {
            warn!("selection not changed: {}", e);
        }
    };

    let start_new = move |_: MouseEvent| {
        match poll.with_untracked(|poll| editor.try_update(|state| state.start_new(poll))) {
            Some(Ok(())) => {
                user.set_name(String::new());
                set_error_message.set(None);
            }
            Some(Err(e)) => warn!("cannot start a new ballot: {}", e),
            None => {}
        }
    };

    let start_edit = move |_: MouseEvent| {
        match poll.with_untracked(|poll| editor.try_update(|state| state.start_edit(poll))) {
            Some(Ok(())) => set_error_message.set(None),
            Some(Err(e)) => warn!("cannot edit ballot: {}", e),
            None => {}
        }
    };

    let cancel = move |_: MouseEvent| {
        if let Some(Err(e)) = editor.try_update(BallotEditor::cancel) {
            warn!("cannot cancel: {}", e);
        }
        set_error_message.set(None);
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let submission =
            poll.with_untracked(|poll| editor.try_update(|state| state.begin_submit(poll)));
        let submission = match submission {
            Some(Ok(submission)) => submission,
            Some(Err(e)) => {
                set_error_message.set(Some(e.to_string()));
                return;
            }
            None => return,
        };
        set_error_message.set(None);

        let name = submission.form().name.clone();
        let service = ServerBallots {
            user_id: user.user_id(),
        };
        spawn_local(async move {
            let result = submission.send(&service).await;
            if editor.try_update(|state| state.finish_submit(&result)).is_none() {
                log!("ballot saved after the form was closed, ignoring");
                return;
            }
            match result {
                Ok(participant) => {
                    log!("saved ballot of {}", participant.id);
                    user.set_name(name);
                    on_change.run(());
                }
                Err(e) => {
                    error!("saving ballot failed: {}", e);
                    set_error_message.set(Some(e.to_string()));
                }
            }
        });
    };

    let request_delete = move |_: MouseEvent| {
        match poll.with_untracked(|poll| editor.with_untracked(|state| state.request_delete(poll, role))) {
            Ok(_) => delete_dialog.update(DeleteDialog::open),
            Err(e) => warn!("cannot delete participant: {}", e),
        }
    };

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(admin_url_id) = poll.with_untracked(|poll| poll.admin_url_id.clone()) else {
            error!("deleting a participant needs the admin link");
            return;
        };
        let participant_id = match poll
            .with_untracked(|poll| editor.with_untracked(|state| state.request_delete(poll, role)))
        {
            Ok(id) => id,
            Err(e) => {
                warn!("cannot delete participant: {}", e);
                return;
            }
        };
        if !delete_dialog.try_update(DeleteDialog::confirm).unwrap_or(false) {
            return;
        }
        spawn_local(async move {
            let result = remove_participant(admin_url_id, participant_id.clone())
                .await
                .map_err(Error::from);
            if delete_dialog.try_update(|dialog| dialog.finish(&result)).is_none() {
                return;
            }
            match result {
                Ok(()) => {
                    log!("deleted participant {}", participant_id);
                    editor.update(|state| state.participant_deleted(&participant_id));
                    on_change.run(());
                }
                Err(e) => error!("deleting participant failed: {}", e),
            }
        });
    });
    let cancel_delete = Callback::new(move |_: ()| delete_dialog.update(DeleteDialog::close));

    let selected_name = move || {
        poll.with(|poll| {
            editor.with(|state| {
                state
                    .selected_participant(poll)
                    .map(|participant| participant.name.clone())
            })
        })
    };

    let toolbar = move || {
        if is_editing() {
            return Either::Right(view! {
                <input
                    type="text"
                    class="text-input name-input"
                    placeholder="Your name"
                    prop:value=move || editor.with(|state| state.form().name.clone())
                    disabled=is_submitting
                    on:input=move |ev| {
                        if let Some(Err(e)) = editor
                            .try_update(|state| state.set_name(event_target_value(&ev)))
                        {
                            warn!("name not changed: {}", e);
                        }
                    }
                />
            });
        }
        let Actions { new, edit, delete } = actions();
        Either::Left(view! {
            <div class="participant-toolbar">
                <select
                    class="participant-select"
                    prop:value=move || editor.with(|state| state.selected().unwrap_or_default().to_string())
                    on:change=select
                >
                    <option value="">
                        {move || poll.with(|poll| format!("Show all ({})", poll.participants.len()))}
                    </option>
                    {move || {
                        poll.with(|poll| {
                            poll.participants
                                .iter()
                                .map(|participant| {
                                    view! {
                                        <option value=participant.id.clone()>{participant.name.clone()}</option>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </select>
                {selected_name().map(|name| view! { <UserAvatar name /> })}
                {edit.then(|| view! {
                    <button type="button" class="button" on:click=start_edit>
                        <Icon icon=IoPencil />
                        "Edit"
                    </button>
                })}
                {delete.then(|| view! {
                    <button type="button" class="button danger" on:click=request_delete>
                        <Icon icon=IoTrash />
                    </button>
                })}
                {new.then(|| view! {
                    <button type="button" class="button primary" on:click=start_new>
                        <Icon icon=IoAddCircle />
                        "New"
                    </button>
                })}
            </div>
        })
    };

    let time_zone_picker = move || {
        poll.with(|poll| poll.time_zone.is_some()).then(|| {
            view! {
                <TimeZonePicker
                    value=target_time_zone
                    on_change=Callback::new(move |zone| set_target_time_zone.set(zone))
                />
            }
        })
    };

    let option_rows = move || {
        let target = target_time_zone.get();
        poll.with(|current| {
            let summary = VoteSummary::new(&current.options);
            let by_id = participants_by_id(&current.participants);
            current
                .options
                .iter()
                .map(|option| {
                    let votes = option.votes.len();
                    let (shown, extra) = avatar_overflow(votes);
                    let voters = option
                        .votes
                        .iter()
                        .take(shown)
                        .filter_map(|vote| by_id.get(vote.participant_id.as_str()))
                        .map(|participant| participant.name.clone())
                        .collect::<Vec<_>>();
                    let date = decode_date_option(
                        &option.value,
                        current.time_zone.as_deref(),
                        target.as_deref(),
                    );
                    view! {
                        <OptionRow
                            option_id=option.id.clone()
                            date
                            votes
                            top=summary.is_top(votes)
                            voters
                            extra
                            editor
                            poll
                        />
                    }
                })
                .collect_view()
        })
    };

    let footer = move || {
        is_editing().then(|| {
            view! {
                <div class="poll-footer">
                    <button type="button" class="button" disabled=is_submitting on:click=cancel>
                        "Cancel"
                    </button>
                    <button type="submit" class="button primary" disabled=is_submitting>
                        <Icon icon=IoSave />
                        {move || if is_submitting() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            }
        })
    };

    view! {
        <form class="mobile-poll" on:submit=on_submit>
            <div class="poll-toolbar">{toolbar} {time_zone_picker}</div>
            {move || error_message.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <div class="options">{option_rows}</div>
            {footer}
            <ConfirmDialog
                visible=Signal::derive(move || delete_dialog.with(DeleteDialog::is_open))
                pending=Signal::derive(move || delete_dialog.with(DeleteDialog::is_pending))
                title="Delete participant?"
                description="Their votes will be removed from the poll."
                on_confirm=confirm_delete
                on_cancel=cancel_delete
            />
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Submission;

    struct Rejecting;

    impl BallotService for Rejecting {
        async fn create_participant(
            &self,
            _poll_id: &str,
            _form: BallotForm,
        ) -> Result<Participant, Error> {
            Err(Error::Forbidden("poll is closed".into()))
        }

        async fn update_participant(
            &self,
            _poll_id: &str,
            participant_id: &str,
            _form: BallotForm,
        ) -> Result<Participant, Error> {
            Err(Error::NotFound(participant_id.to_string()))
        }
    }

    #[test]
    fn vote_counts_read_naturally() {
        assert_eq!(votes_label(0), "0 votes");
        assert_eq!(votes_label(1), "1 vote");
        assert_eq!(votes_label(7), "7 votes");
    }

    #[test]
    fn crate_errors_pass_through_the_ballot_service() {
        let submission = Submission::Update {
            poll_id: "poll".into(),
            participant_id: "p1".into(),
            form: BallotForm::new("Ana", vec![]),
        };
        let result = futures::executor::block_on(submission.send(&Rejecting));
        assert_eq!(result, Err(Error::NotFound("p1".into())));
    }
}

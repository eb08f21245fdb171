use crate::components::ConfirmDialog;
use crate::model::{DeleteDialog, Error, POLL_LIST_PATH};
use leptos::{logging::*, prelude::*, task::spawn_local};
use leptos_router::{NavigateOptions, hooks::use_navigate};

#[server]
pub async fn delete_poll(admin_url_id: String) -> Result<(), ServerFnError> {
    use crate::model::{self, AppState};
    let app_state = expect_context::<AppState>();
    model::delete_poll(&admin_url_id, &app_state.db.pool).await?;
    Ok(())
}

/// Button plus confirmation for deleting the whole poll. After a successful
/// delete the user lands on their poll list, a failure keeps the dialog open.
#[component]
pub fn DeletePollDialog(#[prop(into)] admin_url_id: Signal<String>) -> impl IntoView {
    let dialog = RwSignal::new(DeleteDialog::default());
    let (deleted, set_deleted) = signal(false);
    let navigate = use_navigate();
    Effect::new(move |_| {
        if deleted.get() {
            navigate(POLL_LIST_PATH, NavigateOptions::default());
        }
    });

    let confirm = Callback::new(move |_: ()| {
        if !dialog.try_update(DeleteDialog::confirm).unwrap_or(false) {
            return;
        }
        let admin_url_id = admin_url_id.get_untracked();
        spawn_local(async move {
            let result = delete_poll(admin_url_id).await.map_err(Error::from);
            if dialog.try_update(|dialog| dialog.finish(&result)).is_none() {
                return;
            }
            match result {
                Ok(()) => {
                    log!("poll deleted");
                    set_deleted.set(true);
                }
                Err(e) => error!("deleting poll failed: {}", e),
            }
        });
    });
    let cancel = Callback::new(move |_: ()| dialog.update(DeleteDialog::close));

    view! {
        <button type="button" class="button danger" on:click=move |_| dialog.update(DeleteDialog::open)>
            "Delete poll"
        </button>
        <ConfirmDialog
            visible=Signal::derive(move || dialog.with(DeleteDialog::is_open))
            pending=Signal::derive(move || dialog.with(DeleteDialog::is_pending))
            title="Delete poll?"
            description="The poll and every vote in it will be removed. This cannot be undone."
            on_confirm=confirm
            on_cancel=cancel
        />
    }
}

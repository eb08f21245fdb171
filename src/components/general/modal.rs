use leptos::prelude::*;

#[component]
pub fn Modal(#[prop(into)] visible: Signal<bool>, children: Children) -> impl IntoView {
    view! {
        <dialog class="modal" prop:open=move || visible.get()>
            <div class="modal-content">{children()}</div>
        </dialog>
    }
}

/// Modal asking to confirm a destructive action.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] visible: Signal<bool>,
    #[prop(into)] pending: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] description: String,
    #[prop(into, default = "Delete".to_string())] confirm_label: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Modal visible>
            <h2 class="modal-title">{title}</h2>
            <p class="modal-description">{description}</p>
            <div class="modal-footer">
                <button
                    type="button"
                    class="button"
                    disabled=move || pending.get()
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </button>
                <button
                    type="button"
                    class="button danger"
                    disabled=move || pending.get()
                    on:click=move |_| on_confirm.run(())
                >
                    {move || if pending.get() { "Deleting...".to_string() } else { confirm_label.clone() }}
                </button>
            </div>
        </Modal>
    }
}

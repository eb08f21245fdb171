use crate::components::Icon;
use crate::model::{Poll, manage_path};
use icondata::{IoOpenOutline, IoPersonCircle};
use leptos::{either::Either, prelude::*};
use leptos_router::components::A;

/// Where the banner links to, `None` when the viewer did not create the poll.
/// Ownership is decided by the server when the poll is fetched.
pub fn manage_link(poll: &Poll) -> Option<String> {
    poll.is_owner.then(|| manage_path(&poll.id))
}

/// Banner pointing the creator of a poll to its manage page. Renders nothing for anyone else.
#[component]
pub fn ManageAccess(#[prop(into)] poll: Signal<Poll>) -> impl IntoView {
    let link = move || poll.with(manage_link);

    move || match link() {
        Some(href) => Either::Left(view! {
            <div class="manage-access">
                <Icon icon=IoPersonCircle />
                <div class="manage-access-text">
                    <h4>"Manage Access"</h4>
                    <p>"You are the creator of this poll"</p>
                </div>
                <A href=href>
                    "Manage"
                    <Icon icon=IoOpenOutline />
                </A>
            </div>
        }),
        None => Either::Right(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::poll::fixtures::poll;

    #[test]
    fn link_only_for_the_owner() {
        let mut poll = poll(&[]);
        assert_eq!(manage_link(&poll), None);
        poll.is_owner = true;
        assert_eq!(manage_link(&poll), Some("/poll/poll".to_string()));
    }
}

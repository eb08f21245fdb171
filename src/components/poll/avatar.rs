use crate::components::Icon;
use crate::model::VoteIndicator;
use icondata::{IoCheckmarkCircle, IoCloseCircle};
use leptos::prelude::*;

/// Up to two initials of a display name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[component]
pub fn UserAvatar(#[prop(into)] name: String) -> impl IntoView {
    view! {
        <span class="avatar" title=name.clone()>
            {initials(&name)}
        </span>
    }
}

#[component]
pub fn VoteIcon(indicator: VoteIndicator) -> impl IntoView {
    let (icon, class) = match indicator {
        VoteIndicator::Yes => (IoCheckmarkCircle, "vote-yes"),
        VoteIndicator::No => (IoCloseCircle, "vote-no"),
    };
    view! { <Icon icon class /> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_of_names() {
        assert_eq!(initials("ana maria lopez"), "AM");
        assert_eq!(initials("Ben"), "B");
        assert_eq!(initials("   "), "");
    }
}

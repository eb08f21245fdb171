use leptos::prelude::*;

#[component]
pub fn Icon(icon: icondata::Icon, #[prop(optional, into)] class: String) -> impl IntoView {
    view! { <svg class=format!("icon {class}") viewBox=icon.view_box inner_html=icon.data></svg> }
}

use leptos::prelude::*;

#[component]
pub fn FullPageLoader(#[prop(optional)] children: Option<Children>) -> impl IntoView {
    view! {
        <div class="full-page-loader">
            <div class="spinner"></div>
            {match children {
                Some(children) => children().into_any(),
                None => view! { <p>"Loading..."</p> }.into_any(),
            }}
        </div>
    }
}

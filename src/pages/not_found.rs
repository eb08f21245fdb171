use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <Title text="Poll not found" />
        <div class="not-found">
            <h1>"Not found"</h1>
            <p>"This poll does not exist or the link is wrong."</p>
            <A href="/">"Create a new poll"</A>
        </div>
    }
}

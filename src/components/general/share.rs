use crate::model::invite_path;
use leptos::{logging::*, prelude::*, task::spawn_local};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

async fn save_to_clipboard(text: &str) {
    log!("copying to clipboard: {}", text);
    let window = match web_sys::window() {
        Some(window) => window,
        None => {
            warn!("failed to copy, window not available");
            return;
        }
    };
    let clip = window.navigator().clipboard();

    let promise = clip.write_text(text);
    if wasm_bindgen_futures::JsFuture::from(promise).await.is_err() {
        warn!("failed to copy to clipboard");
    }
}

fn qr_svg(link: &str) -> Option<String> {
    match QrCode::with_error_correction_level(link, EcLevel::M) {
        Ok(code) => Some(
            code.render::<svg::Color>()
                .quiet_zone(false)
                .min_dimensions(200, 200)
                .dark_color(svg::Color("#0f172a"))
                .light_color(svg::Color("#ffffff00"))
                .build(),
        ),
        Err(e) => {
            error!("could not render qr code for {}: {:?}", link, e);
            None
        }
    }
}

/// Invite link of a poll with a QR code and a copy button.
#[component]
pub fn InviteLink(#[prop(into)] participant_url_id: Signal<String>) -> impl IntoView {
    let (base_url, set_base_url) = signal(String::new());

    Effect::new(move |_| match web_sys::window().map(|window| window.location().origin()) {
        Some(Ok(origin)) => set_base_url.set(origin),
        Some(Err(e)) => error!("error getting base url: {:?}", e),
        None => error!("window not found"),
    });

    let link = Signal::derive(move || {
        participant_url_id
            .with(|id| base_url.with(|url| format!("{}{}", url, invite_path(id))))
    });
    let (copied, set_copied) = signal(false);

    view! {
        <div class="share">
            <div class="qr" inner_html=move || link.with(|link| qr_svg(link)).unwrap_or_default()></div>
            <input type="text" class="text-input" readonly prop:value=move || link.get() />
            <button
                type="button"
                class="button"
                on:click=move |_| {
                    spawn_local(async move {
                        save_to_clipboard(&link.get_untracked()).await;
                        set_copied.set(true);
                    });
                }
            >
                {move || if copied.get() { "Copied" } else { "Copy link" }}
            </button>
        </div>
    }
}

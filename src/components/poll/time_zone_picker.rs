use crate::model::time_zone_names;
use leptos::prelude::*;

#[component]
pub fn TimeZonePicker(
    #[prop(into)] value: Signal<Option<String>>,
    on_change: Callback<Option<String>>,
) -> impl IntoView {
    let selected = move || value.get().unwrap_or_default();
    view! {
        <label class="time-zone-picker">
            "Time zone"
            <select
                prop:value=selected
                on:change=move |ev| {
                    let zone = event_target_value(&ev);
                    on_change.run(if zone.is_empty() { None } else { Some(zone) });
                }
            >
                <option value="">"Ignore time zone"</option>
                {time_zone_names()
                    .map(|zone| {
                        view! {
                            <option value=zone selected=move || value.with(|v| v.as_deref() == Some(zone))>
                                {zone}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

use crate::model::DateOption;
use leptos::{either::Either, prelude::*};

#[component]
pub fn DateCard(day: u32, #[prop(into)] dow: String, #[prop(into)] month: String) -> impl IntoView {
    view! {
        <div class="date-card">
            <div class="dow">{dow}</div>
            <div class="day">{day}</div>
            <div class="month">{month}</div>
        </div>
    }
}

#[component]
pub fn TimeRange(#[prop(into)] start_time: String, #[prop(into)] end_time: String) -> impl IntoView {
    view! {
        <div class="time-range">
            <span class="start">{start_time}</span>
            <span class="separator">"-"</span>
            <span class="end">{end_time}</span>
        </div>
    }
}

/// Date card plus time range when the option is a time slot.
#[component]
pub fn OptionDate(option: DateOption) -> impl IntoView {
    let date = option.date().clone();
    view! {
        <DateCard day=date.day dow=date.dow month=date.month />
        {match option {
            DateOption::TimeSlot { start_time, end_time, .. } => {
                Either::Left(view! { <TimeRange start_time end_time /> })
            }
            DateOption::Date(_) => Either::Right(()),
        }}
    }
}

//! Person Fields Component
//!
//! Known-person select plus a free-text fallback for new names.

use leptos::prelude::*;

use crate::components::lookup_select::LookupSelect;
use crate::store::{use_page_store, PageStateStoreFields};
use crate::widgets::WidgetId;

/// Text input for a name that is not in the neighbouring select yet.
/// The server creates the entity when the field is non-empty.
pub fn free_text_input(
    name: &'static str,
    placeholder: &'static str,
    value: impl Fn() -> String + Send + Sync + 'static,
    on_input: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <input
            type="text"
            class="form-control free-text"
            name=name
            placeholder=placeholder
            prop:value=value
            on:input=move |ev| on_input(event_target_value(&ev))
        />
    }
}

#[component]
pub fn PersonFields(widget: WidgetId) -> impl IntoView {
    let store = use_page_store();

    view! {
        <div class="form-row person-fields">
            <label>"Person"</label>
            <LookupSelect widget=widget />
            {free_text_input(
                "new_person",
                "Or type a new name",
                move || store.new_person().get(),
                move |value| {
                    *store.new_person().write() = value;
                },
            )}
        </div>
    }
}

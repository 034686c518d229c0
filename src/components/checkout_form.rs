//! Checkout Form Component
//!
//! The issue page: marathon, station, person and the repeatable item table.
//! Posts as a plain form.

use leptos::prelude::*;

use crate::components::item_table::ItemTable;
use crate::components::lookup_modal::LookupModal;
use crate::components::lookup_select::LookupSelect;
use crate::components::person_fields::{free_text_input, PersonFields};
use crate::models::LookupKind;
use crate::store::{use_page_store, PageStateStoreFields};
use crate::widgets::WidgetId;

#[component]
pub fn CheckoutForm() -> impl IntoView {
    let store = use_page_store();

    view! {
        <form id="issue-form" method="post" class="checkout-form">
            <div class="form-row">
                <label>"Marathon"</label>
                <LookupSelect widget=WidgetId::MarathonSelect />
                <LookupModal kind=LookupKind::Marathon />
                {free_text_input(
                    "new_marathon",
                    "Or type a new marathon",
                    move || store.new_marathon().get(),
                    move |value| {
                        *store.new_marathon().write() = value;
                    },
                )}
            </div>
            <div class="form-row">
                <label>"Station"</label>
                <LookupSelect widget=WidgetId::StationSelect />
                <LookupModal kind=LookupKind::Station />
                {free_text_input(
                    "new_station",
                    "Or type a new station",
                    move || store.new_station().get(),
                    move |value| {
                        *store.new_station().write() = value;
                    },
                )}
            </div>
            <PersonFields widget=WidgetId::PersonSelect />
            <ItemTable />
            <button type="submit" class="btn btn-primary">"Issue equipment"</button>
        </form>
    }
}

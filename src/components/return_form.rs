//! Return Form Component
//!
//! The return page: marathon/station filters that drive the URL, the table
//! of unreturned equipment, and the submit-time station reconciliation.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::lookup_modal::LookupModal;
use crate::components::lookup_select::LookupSelect;
use crate::components::person_fields::{free_text_input, PersonFields};
use crate::context::use_page_context;
use crate::models::LookupKind;
use crate::reconcile::{reconcile, Reconciliation, ReturnLine, ReturnSubmission};
use crate::rows::{EQUIPMENT_FIELD, QUANTITY_FIELD};
use crate::store::{use_page_store, PageStateStoreFields};
use crate::widgets::WidgetId;

#[component]
pub fn ReturnForm() -> impl IntoView {
    let ctx = use_page_context();
    let store = use_page_store();
    let form_ref = NodeRef::<html::Form>::new();

    let on_filter_change = Callback::new(move |id: WidgetId| {
        store.widgets().with_untracked(|board| ctx.filter.dispatch_change(id, board));
    });

    // Never prevents the default submit; only rewrites field values first.
    let on_submit = move |_ev: web_sys::SubmitEvent| {
        let marker = ctx.no_station_marker();
        let mut board = store.widgets().get_untracked();
        let lines = store.return_lines().get_untracked();
        let outcome = reconcile(&ReturnSubmission::from_board(&board, &lines, &marker));

        web_sys::console::log_1(
            &format!(
                "[RETURN] Submitting: clear new person={}, inferred station={:?}",
                outcome.clear_new_person,
                outcome.station.as_ref().map(|o| o.label.as_str())
            )
            .into(),
        );
        if outcome.is_empty() {
            return;
        }

        let mut new_person = store.new_person().get_untracked();
        outcome.apply(&mut board, &mut new_person);
        *store.widgets().write() = board;
        *store.new_person().write() = new_person;

        // The post reads the DOM right after this handler, before any
        // reactive re-render, so the fields are written directly as well.
        if let Some(form) = form_ref.get_untracked() {
            write_form_fields(&form, &outcome);
        }
    };

    view! {
        <form id="return-form" method="post" class="return-form" node_ref=form_ref on:submit=on_submit>
            <div class="form-row filter-row">
                <label>"Marathon"</label>
                <LookupSelect widget=WidgetId::MarathonFilter on_change=on_filter_change />
                <LookupModal kind=LookupKind::Marathon />
                {free_text_input(
                    "new_marathon",
                    "Or type a new marathon",
                    move || store.new_marathon().get(),
                    move |value| {
                        *store.new_marathon().write() = value;
                    },
                )}
                <label>"Station"</label>
                <LookupSelect widget=WidgetId::StationFilter on_change=on_filter_change />
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
            <PersonFields widget=WidgetId::PersonSelectReturn />
            <ReturnTable />
            <button type="submit" class="btn btn-primary">"Record return"</button>
        </form>
    }
}

fn write_form_fields(form: &web_sys::HtmlFormElement, outcome: &Reconciliation) {
    if outcome.clear_new_person {
        if let Some(input) = form
            .query_selector("input[name=\"new_person\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            input.set_value("");
        }
    }
    if let Some(option) = &outcome.station {
        if let Some(select) = form
            .query_selector("select[name=\"station\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web_sys::HtmlSelectElement>().ok())
        {
            select.set_value(&option.value);
        }
    }
}

/// Read-only list of unreturned equipment with a quantity input per line.
/// The first column is the station name the reconciler matches against.
#[component]
fn ReturnTable() -> impl IntoView {
    let store = use_page_store();
    let is_empty = move || store.return_lines().with(|lines| lines.is_empty());

    view! {
        <table id="return-table" class="table return-table">
            <thead>
                <tr>
                    <th>"Station"</th>
                    <th>"Equipment"</th>
                    <th>"Missing"</th>
                    <th>"Returning"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each={move || {
                        let lines: Vec<(usize, ReturnLine)> = store.return_lines().get().into_iter().enumerate().collect();
                        lines
                    }}
                    key=|(idx, _)| *idx
                    children=move |(idx, line): (usize, ReturnLine)| {
                        view! {
                            <tr>
                                <td>{line.station.clone()}</td>
                                <td>
                                    {line.equipment.clone()}
                                    <input type="hidden" name=EQUIPMENT_FIELD value=line.equipment_id.to_string() />
                                </td>
                                <td>{line.missing}</td>
                                <td>
                                    <input
                                        type="number"
                                        min="0"
                                        max=line.missing.to_string()
                                        class="form-control"
                                        name=QUANTITY_FIELD
                                        prop:value=line.quantity.clone()
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            if let Some(line) = store.return_lines().write().get_mut(idx) {
                                                line.quantity = value;
                                            }
                                        }
                                    />
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
        <Show when=is_empty>
            <p class="empty-note">"Nothing outstanding for this filter."</p>
        </Show>
    }
}

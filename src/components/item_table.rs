//! Item Table Component
//!
//! Repeatable line items of the checkout form: add a row, remove any row but
//! the last, register new equipment from the same toolbar.

use leptos::prelude::*;

use crate::components::lookup_modal::LookupModal;
use crate::components::lookup_select::select_view;
use crate::models::LookupKind;
use crate::rows::{ItemRow, NEW_EQUIPMENT_FIELD, QUANTITY_FIELD};
use crate::store::{use_page_store, PageStateStoreFields};

#[component]
pub fn ItemTable() -> impl IntoView {
    let store = use_page_store();

    let add_row = move |_: web_sys::MouseEvent| {
        let added = store.rows().write().add_row();
        match added {
            Some(key) => {
                let count = store.rows().with_untracked(|r| r.len());
                web_sys::console::log_1(&format!("[ROWS] Added row {} ({} rows)", key, count).into());
            }
            None => web_sys::console::log_1(&"[ROWS] No row template, add ignored".into()),
        }
    };

    view! {
        <table id="equipment-table" class="table item-table">
            <thead>
                <tr>
                    <th>"Equipment"</th>
                    <th>"Quantity"</th>
                    <th>"New equipment"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || store.rows().with(|r| r.rows().to_vec())
                    key=|row| row.key
                    children=move |row: ItemRow| view! { <ItemRowView row_key=row.key /> }
                />
            </tbody>
        </table>
        <div class="item-table-actions">
            <button type="button" id="add-row" class="btn btn-secondary" on:click=add_row>
                "Add row"
            </button>
            <LookupModal kind=LookupKind::Equipment />
        </div>
    }
}

/// One line item. Each field is memoized on its own so typing into one row
/// does not re-render the selects of the others.
#[component]
fn ItemRowView(row_key: u32) -> impl IntoView {
    let key = row_key;
    let store = use_page_store();
    let field = move |read: fn(&ItemRow) -> String| {
        Memo::new(move |_| store.rows().with(|r| r.rows().iter().find(|row| row.key == key).map(read).unwrap_or_default()))
    };
    let quantity = field(|row| row.quantity.clone());
    let new_equipment = field(|row| row.new_equipment.clone());
    let equipment = Memo::new(move |_| {
        store.rows().with(|r| r.rows().iter().find(|row| row.key == key).map(|row| row.equipment.clone()))
    });

    let remove = move |_: web_sys::MouseEvent| {
        let removed = store.rows().write().remove_row(key);
        if removed {
            web_sys::console::log_1(&format!("[ROWS] Removed row {}", key).into());
        }
    };

    view! {
        <tr class="item-row">
            <td>
                {move || equipment.get().map(|widget| {
                    select_view(widget, move |idx| {
                        store.rows().write().select_equipment(key, idx);
                    })
                })}
            </td>
            <td>
                <input
                    type="number"
                    min="1"
                    class="form-control"
                    name=QUANTITY_FIELD
                    prop:value=move || quantity.get()
                    on:input=move |ev| {
                        store.rows().write().set_quantity(key, event_target_value(&ev));
                    }
                />
            </td>
            <td>
                <input
                    type="text"
                    class="form-control"
                    name=NEW_EQUIPMENT_FIELD
                    placeholder="Not in the list? Type it"
                    prop:value=move || new_equipment.get()
                    on:input=move |ev| {
                        store.rows().write().set_new_equipment(key, event_target_value(&ev));
                    }
                />
            </td>
            <td>
                <button type="button" class="btn btn-link remove-row" on:click=remove>
                    "×"
                </button>
            </td>
        </tr>
    }
}

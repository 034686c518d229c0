//! Lookup Select Component
//!
//! Renders one select of the widget board and keeps the board's selection
//! in step with the user's choice.

use leptos::prelude::*;

use crate::store::{use_page_store, PageStateStoreFields};
use crate::widgets::{SelectWidget, WidgetId};

/// Plain `<select>` view of a widget; `on_select` gets the chosen index
pub fn select_view(widget: SelectWidget, on_select: impl Fn(usize) + 'static) -> impl IntoView {
    let selected = widget.selected_index();
    let options = widget
        .options()
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            view! {
                <option value=opt.value.clone() selected={i == selected}>
                    {opt.label.clone()}
                </option>
            }
        })
        .collect_view();

    view! {
        <select
            class="form-select"
            id=widget.id.dom_id()
            name=widget.name
            on:change=move |ev| {
                let idx = event_target::<web_sys::HtmlSelectElement>(&ev).selected_index();
                if idx >= 0 {
                    on_select(idx as usize);
                }
            }
        >
            {options}
        </select>
    }
}

/// Select bound to a board widget. Renders nothing when the page does not
/// host that widget.
#[component]
pub fn LookupSelect(
    widget: WidgetId,
    /// Called after the board records a user selection
    #[prop(optional)]
    on_change: Option<Callback<WidgetId>>,
) -> impl IntoView {
    let store = use_page_store();
    // Only re-renders when this widget changes, not on every board write
    let current = Memo::new(move |_| store.widgets().with(|board| board.get(widget).cloned()));

    move || {
        current.get().map(|w| {
            select_view(w, move |idx| {
                if let Some(w) = store.widgets().write().get_mut(widget) {
                    w.select_index(idx);
                }
                if let Some(cb) = on_change {
                    cb.run(widget);
                }
            })
        })
    }
}

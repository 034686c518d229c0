//! Lookup Modal Component
//!
//! "+" button and dialog that registers a new marathon, station or
//! equipment and pushes it into every select of that kind.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_page_context, PageContext};
use crate::error::RegistrationError;
use crate::models::{LookupEntity, LookupKind};
use crate::registration::{complete_registration, LookupDialog};
use crate::store::{use_page_store, PageStateStoreFields, PageStore};

/// Shows a blocking notice, the page's only error surface
pub fn notify_user(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[component]
pub fn LookupModal(kind: LookupKind) -> impl IntoView {
    let ctx = use_page_context();
    let store = use_page_store();
    let dialog = RwSignal::new(LookupDialog::default());
    let (saving, set_saving) = signal(false);

    let save = move || {
        if saving.get_untracked() {
            return;
        }
        let raw = dialog.with_untracked(|d| d.name.clone());
        set_saving.set(true);
        spawn_local(async move {
            let config = ctx.config.get_value();
            let result = commands::register(&config, kind, &raw).await;
            apply_registration(store, ctx, kind, result, dialog);
            set_saving.set(false);
        });
    };

    view! {
        <button
            type="button"
            class="btn btn-outline-secondary add-lookup-btn"
            title=format!("Add {}", kind.slug())
            on:click=move |_| dialog.update(|d| d.show())
        >
            "+"
        </button>
        <Show when=move || dialog.with(|d| d.open)>
            <div class="lookup-modal-backdrop" id=format!("add{}Modal", kind.title())>
                <div class="lookup-modal">
                    <h5>{format!("New {}", kind.slug())}</h5>
                    <input
                        type="text"
                        class="form-control"
                        id=format!("new-{}-name", kind.slug())
                        placeholder=format!("{} name", kind.title())
                        prop:value=move || dialog.with(|d| d.name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            dialog.update(|d| d.name = value);
                        }
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            // Enter would otherwise submit the surrounding form
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                save();
                            }
                        }
                    />
                    <div class="lookup-modal-actions">
                        <button
                            type="button"
                            class="btn btn-secondary"
                            on:click=move |_| dialog.update(|d| d.open = false)
                        >
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class="btn btn-primary"
                            id=format!("save-{}", kind.slug())
                            disabled=move || saving.get()
                            on:click=move |_| save()
                        >
                            "Save"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Broadcasts a successful registration to the page, or reports the failure.
/// Widgets are only written back once the broadcast succeeded as a whole.
fn apply_registration(
    store: PageStore,
    ctx: PageContext,
    kind: LookupKind,
    result: Result<LookupEntity, RegistrationError>,
    dialog: RwSignal<LookupDialog>,
) {
    let mut widgets = store.widgets().get_untracked();
    let mut rows = store.rows().get_untracked();
    let mut state = dialog.get_untracked();

    match complete_registration(kind, result, &mut [&mut widgets, &mut rows], &mut state) {
        Ok(report) => {
            web_sys::console::log_1(
                &format!("[LOOKUP] {} added to {} widgets, {} change signals", kind, report.updated.len(), report.change_signals.len()).into(),
            );
            *store.widgets().write() = widgets;
            *store.rows().write() = rows;
            dialog.set(state);
            for id in report.change_signals {
                store.widgets().with_untracked(|board| ctx.filter.dispatch_change(id, board));
            }
        }
        Err(e) => {
            web_sys::console::error_1(&format!("[LOOKUP] Creating {} failed: {}", kind, e).into());
            notify_user(&e.to_string());
        }
    }
}

//! Checkout Tracker App
//!
//! Reads the host page's bootstrap data and mounts the issue or return form.

use leptos::mount::mount_to;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::components::{CheckoutForm, ReturnForm};
use crate::config::{read_json_script, HostConfig};
use crate::context::PageContext;
use crate::models::{PageData, PageKind};
use crate::store::{store_set_persons, PageState, PageStateStoreFields};

#[component]
pub fn App(config: HostConfig, data: PageData) -> impl IntoView {
    let store = Store::new(PageState::from_page_data(&data));
    provide_context(store);
    let ctx = PageContext::new(config);
    provide_context(ctx);

    // Pick up people added since the page was rendered
    Effect::new(move |_| {
        spawn_local(async move {
            let config = ctx.config.get_value();
            match commands::list_persons(&config).await {
                Ok(persons) => {
                    web_sys::console::log_1(&format!("[APP] Loaded {} persons", persons.len()).into());
                    store_set_persons(&store, &persons);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[APP] Loading persons failed: {}", e).into());
                }
            }
        });
    });

    view! {
        <div class="checkout-tracker">
            {match store.page().get_untracked() {
                PageKind::Issue => view! { <CheckoutForm /> }.into_any(),
                PageKind::Return => view! { <ReturnForm /> }.into_any(),
            }}
        </div>
    }
}

/// Mounts the app if the host page provides its data and mount point.
/// A page without them simply stays static.
pub fn start() {
    let config = HostConfig::load();

    let Some(text) = read_json_script(&config.page_data_id) else {
        web_sys::console::log_1(&format!("[APP] No #{} element, nothing to mount", config.page_data_id).into());
        return;
    };
    let data: PageData = match serde_json::from_str(&text) {
        Ok(data) => data,
        Err(e) => {
            web_sys::console::error_1(&format!("[APP] Malformed page data: {}", e).into());
            return;
        }
    };
    let Some(mount) = document()
        .get_element_by_id(&config.mount_id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        web_sys::console::log_1(&format!("[APP] No #{} element, nothing to mount", config.mount_id).into());
        return;
    };

    web_sys::console::log_1(
        &format!(
            "[APP] Mounting {:?} page: {} marathons, {} stations, {} equipment, {} unreturned",
            data.page,
            data.marathons.len(),
            data.stations.len(),
            data.equipment.len(),
            data.unreturned.len()
        )
        .into(),
    );
    mount_to(mount, move || view! { <App config=config data=data /> }).forget();
}

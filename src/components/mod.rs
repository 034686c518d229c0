//! UI Components
//!
//! Leptos components for the issue and return pages.

mod checkout_form;
mod item_table;
mod lookup_modal;
mod lookup_select;
mod person_fields;
mod return_form;

pub use checkout_form::CheckoutForm;
pub use return_form::ReturnForm;

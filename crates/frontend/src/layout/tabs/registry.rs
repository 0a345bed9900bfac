//! Tab content registry: the one place that maps a tab key to its view.

use crate::domain::a001_product::ui::list::ProductList;
use crate::layout::global_context::AppGlobalContext;
use crate::usecases::u501_bulk_import;
use leptos::logging::log;
use leptos::prelude::*;

/// Renders the content of the tab with the given key.
///
/// `tabs_store` lets pages open other tabs (the wizard links to the listing
/// once an import is complete).
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    match key {
        // a001: Product listing
        "a001_product" => view! { <ProductList /> }.into_any(),

        // u501: Bulk product upload
        "u501_bulk_import" => {
            let on_import_complete = Callback::new(move |count: usize| {
                log!("Bulk import finished with {} products", count);
                tabs_store.open_tab("a001_product", super::tab_label_for_key("a001_product"));
            });
            view! { <u501_bulk_import::view::BulkImportWidget on_import_complete=on_import_complete /> }.into_any()
        }

        _ => {
            log!("Unknown tab type: {}", key);
            view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
        }
    }
}

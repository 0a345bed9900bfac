use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::catalog::CatalogContext;
use crate::shared::config::{load_config, StorefrontConfig};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|e| {
        log::error!("Embedded configuration is invalid: {}", e);
        StorefrontConfig::default()
    });

    // Provide the AppGlobalContext store to the whole app via context.
    let tabs_store = AppGlobalContext::new();
    provide_context(tabs_store);

    // Imported catalog plus the storage slot it lives in
    provide_context(CatalogContext::new(config));

    // The storefront opens on the product listing
    tabs_store.open_tab("a001_product", crate::layout::tabs::tab_label_for_key("a001_product"));

    view! {
        <AppRoutes />
    }
}

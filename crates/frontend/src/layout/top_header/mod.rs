//! Top navigation bar: sidebar toggle, storefront title and the quick link
//! to the bulk upload page.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let open_upload = move |_| {
        ctx.open_tab("u501_bulk_import", tab_label_for_key("u501_bulk_import"));
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"MedSupply Marketplace"</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>

                <button class="top-header__icon-btn" on:click=open_upload title="Bulk Upload">
                    {icon("upload")}
                </button>
            </div>
        </div>
    }
}

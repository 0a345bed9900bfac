//! PageFrame: standard root wrapper for every page rendered inside a tab.
//!
//! Guarantees two metadata attributes on the root DOM element:
//!   - `id`: `"{entity}--{category}"`, e.g. `"a001_product--list"`
//!   - `data-page-category`: one of the PAGE_CAT_* constants
//!
//! ```text
//! <PageFrame page_id="a001_product--list" category=PAGE_CAT_LIST>
//!     <div class="page__header">...</div>
//!     <div class="page__content">...</div>
//! </PageFrame>
//! ```

use super::page_standard::*;
use leptos::prelude::*;

/// Root wrapper that sets standard metadata on every tab page.
///
/// The base class follows the category: `list` and `usecase` pages get
/// `page`, `custom` pages get `page page--custom`.
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`, e.g. `"a001_product--list"`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    /// Additional CSS classes appended after the base class.
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) || !is_known_category(category) {
        log::warn!("Non-standard page metadata: id='{}', category='{}'", page_id, category);
    }
    let full_class = page_class(category, class);

    view! {
        <div
            id=page_id
            class=full_class
            data-page-category=category
        >
            {children()}
        </div>
    }
}

fn page_class(category: &str, extra: &str) -> String {
    let base_class = match category {
        PAGE_CAT_CUSTOM => "page page--custom",
        _ => "page",
    };

    if extra.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {extra}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_class() {
        assert_eq!(page_class(PAGE_CAT_LIST, ""), "page");
        assert_eq!(page_class(PAGE_CAT_USECASE, "bulk-import"), "page bulk-import");
        assert_eq!(page_class(PAGE_CAT_CUSTOM, ""), "page page--custom");
    }
}

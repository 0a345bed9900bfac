//! Page category constants for tab pages.
//!
//! Every page rendered inside a tab declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a001_product--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the entity name searchable: copy the id from the
//! browser inspector and it leads to the `domain/a001_product/` directory.

/// List of records with filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Use-case wizard / action page (imports).
pub const PAGE_CAT_USECASE: &str = "usecase";

/// Free-form page, exempt from the `page__header` + `page__content` structure.
pub const PAGE_CAT_CUSTOM: &str = "custom";

/// All known category values.
pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_USECASE, PAGE_CAT_CUSTOM];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

/// Return true if the category value is recognised.
pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_product--list"));
        assert!(is_valid_page_id("u501_bulk_import--usecase"));
        assert!(!is_valid_page_id("a001_product"));
        assert!(!is_valid_page_id("--list"));
    }

    #[test]
    fn test_known_categories() {
        assert!(is_known_category(PAGE_CAT_USECASE));
        assert!(!is_known_category("dashboard"));
    }
}

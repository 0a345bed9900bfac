//! Search box and match highlighting shared by list pages.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Byte ranges of case-insensitive matches of `filter` in `text`.
///
/// Returns nothing when lowercasing changes byte lengths, since offsets in
/// the lowered text would no longer line up with `text`.
pub fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle = filter.trim().to_lowercase();
    let haystack = text.to_lowercase();
    if needle.is_empty() || haystack.len() != text.len() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = haystack[last_pos..].find(&needle) {
        let start = last_pos + pos;
        let end = start + needle.len();
        ranges.push((start, end));
        last_pos = end;
    }
    ranges
}

/// Wraps every case-insensitive match of `filter` in a highlight span.
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;
    for (start, end) in ranges {
        if start > last_pos {
            parts.push(view! { <span>{text[last_pos..start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search-highlight">{text[start..end].to_string()}</mark> }.into_any());
        last_pos = end;
    }
    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Search field with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current filter value
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search products...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());

    // Replacing the pending timeout drops, and so cancels, the previous one
    let debounce = StoredValue::new_local(None::<Timeout>);

    // Keep the field in sync when the filter is reset from outside
    Effect::new(move |_| {
        let external = value.get();
        if external.is_empty() {
            set_input_value.set(external);
        }
    });

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        debounce.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        debounce.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button class="search-input__clear" on:click=clear_filter title="Clear">
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_ranges_case_insensitive() {
        assert_eq!(match_ranges("Sterile Gauze Pads", "gauze"), vec![(8, 13)]);
        assert_eq!(match_ranges("aAa", "a"), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_match_ranges_blank_filter() {
        assert!(match_ranges("Gloves", "  ").is_empty());
        assert!(match_ranges("Gloves", "mask").is_empty());
    }
}

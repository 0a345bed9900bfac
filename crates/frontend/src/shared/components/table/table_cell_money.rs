//! Table cell for prices

use super::number_format::format_price;
use leptos::prelude::*;
use thaw::*;

/// Right-aligned price cell. `None` renders as a dash. When `compare_at` is
/// higher than the price it is shown struck through next to it.
#[component]
pub fn TableCellMoney(
    #[prop(into)]
    value: Signal<Option<f64>>,

    #[prop(optional, into)]
    compare_at: Signal<Option<f64>>,

    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let formatted_text = move || match value.get() {
        Some(v) => format_price(v),
        None => "—".to_string(),
    };

    let struck = move || match (value.get(), compare_at.get()) {
        (Some(v), Some(c)) if c > v => Some(format_price(c)),
        _ => None,
    };

    let cell_style = move || if bold { "font-weight: 600" } else { "" };

    view! {
        <TableCell class="text-right">
            <span style=cell_style>
                {formatted_text}
            </span>
            {move || struck().map(|c| view! {
                <span class="price--compare">{c}</span>
            })}
        </TableCell>
    }
}

pub mod state;

use self::state::{create_state, persist_state, ViewMode};
use crate::shared::catalog::use_catalog;
use crate::shared::components::table::{format_price, TableCellMoney};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::common::AggregateId;
use contracts::domain::a001_product::{
    active_catalog, category_label, demo_catalog, distinct_categories, distinct_suppliers,
    CatalogSource, Product, ProductQuery, SortOrder, StockStatus,
};
use leptos::prelude::*;
use thaw::*;

/// Parses a price filter input; blank, negative or garbage keeps `fallback`.
fn parse_price_input(raw: &str, fallback: f64) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(fallback)
}

/// Number of filters that differ from the reset state (sort excluded).
fn active_filters_count(query: &ProductQuery, reset: &ProductQuery) -> usize {
    [
        !query.search.trim().is_empty(),
        query.category.is_some(),
        query.supplier.is_some(),
        query.min_price != reset.min_price || query.max_price != reset.max_price,
        query.in_stock_only != reset.in_stock_only,
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

fn stock_badge_color(status: StockStatus) -> BadgeColor {
    match status {
        StockStatus::OutOfStock => BadgeColor::Danger,
        StockStatus::LowStock => BadgeColor::Warning,
        StockStatus::InStock => BadgeColor::Success,
    }
}

#[component]
fn ProductCard(product: Product, low_stock_threshold: u32, search: RwSignal<String>) -> impl IntoView {
    let status = product.stock_status(low_stock_threshold);
    let discount = product.discount_percent();
    let compare_at = product.compare_at_price.filter(|c| *c > product.price);
    let name = product.name.clone();
    let category = category_label(&product.category).to_string();
    let meta = format!("{} · {}", product.supplier, product.uom_display());

    view! {
        <div class="product-card" data-product-id=product.id.as_string()>
            <div class="product-card__image">
                <img src=product.image.clone() alt=product.name.clone() loading="lazy" />
                {discount.map(|d| view! { <span class="product-card__discount">{format!("-{}%", d)}</span> })}
                {product.is_best_seller.then(|| view! { <span class="product-card__bestseller">"Best Seller"</span> })}
            </div>
            <div class="product-card__body">
                <div class="product-card__category">{category}</div>
                <div class="product-card__name">{move || highlight_matches(&name, &search.get())}</div>
                <div class="product-card__meta">{meta}</div>
                <div class="product-card__price">
                    <span class="price">{format_price(product.price)}</span>
                    {compare_at.map(|c| view! { <span class="price--compare">{format_price(c)}</span> })}
                </div>
                <span class=format!("stock-badge stock-badge--{}", status.css_modifier())>
                    {status.label()}
                </span>
            </div>
        </div>
    }
}

#[component]
pub fn ProductList() -> impl IntoView {
    let catalog = use_catalog();
    catalog.reload();

    let state = create_state();
    let demo = StoredValue::new(demo_catalog());
    let low_stock_threshold = catalog.config.with_value(|c| c.catalog.low_stock_threshold);
    let reset_query = ProductQuery::with_max_price(catalog.config.with_value(|c| c.catalog.max_price_filter));
    let reset_query = StoredValue::new(reset_query);

    let source = RwSignal::new(if catalog.imported.with_untracked(|p| p.is_empty()) {
        CatalogSource::Demo
    } else {
        CatalogSource::Imported
    });
    let has_imported = Signal::derive(move || catalog.imported.with(|p| !p.is_empty()));

    // A fresh import while this tab is open switches to it
    Effect::new(move |was_present: Option<bool>| {
        let present = has_imported.get();
        if present && was_present == Some(false) {
            source.set(CatalogSource::Imported);
        }
        present
    });

    let search = RwSignal::new(String::new());
    let category = RwSignal::new(None::<String>);
    let supplier = RwSignal::new(None::<String>);
    let min_price = RwSignal::new(reset_query.with_value(|q| q.min_price));
    let max_price = RwSignal::new(reset_query.with_value(|q| q.max_price));
    let in_stock_only = RwSignal::new(reset_query.with_value(|q| q.in_stock_only));
    let (is_filter_expanded, set_is_filter_expanded) = signal(true);

    let query = Memo::new(move |_| ProductQuery {
        search: search.get(),
        category: category.get(),
        supplier: supplier.get(),
        min_price: min_price.get(),
        max_price: max_price.get(),
        in_stock_only: in_stock_only.get(),
        sort: state.with(|s| s.sort),
    });

    let products = Memo::new(move |_| {
        let source = source.get();
        catalog
            .imported
            .with(|imported| demo.with_value(|d| active_catalog(imported, d, source)))
    });
    let visible = Memo::new(move |_| products.with(|p| query.with(|q| q.apply(p))));
    let categories = Memo::new(move |_| products.with(|p| distinct_categories(p)));
    let suppliers = Memo::new(move |_| products.with(|p| distinct_suppliers(p)));
    let active_filters =
        Signal::derive(move || query.with(|q| reset_query.with_value(|r| active_filters_count(q, r))));

    let reset_filters = move || {
        let reset = reset_query.get_value();
        search.set(reset.search);
        category.set(reset.category);
        supplier.set(reset.supplier);
        min_price.set(reset.min_price);
        max_price.set(reset.max_price);
        in_stock_only.set(reset.in_stock_only);
        state.update(|s| s.sort = reset.sort);
        persist_state(state);
    };

    let toggle_source = move |_| {
        source.update(|s| *s = s.toggled());
        // Filter values may not exist in the other dataset
        category.set(None);
        supplier.set(None);
        log::debug!("Catalog source switched to {:?}", source.get_untracked());
    };

    let set_view_mode = move |mode: ViewMode| {
        state.update(|s| s.view_mode = mode);
        persist_state(state);
    };

    let source_label = move || {
        if source.get() == CatalogSource::Imported && has_imported.get() {
            CatalogSource::Imported.label()
        } else {
            CatalogSource::Demo.label()
        }
    };

    view! {
        <PageFrame page_id="a001_product--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Products"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {move || visible.with(|v| v.len()).to_string()}
                    </Badge>
                    <span class="page__subtitle">{source_label}</span>
                </div>

                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=toggle_source
                        disabled=Signal::derive(move || !has_imported.get())
                    >
                        {icon("database")}
                        {move || format!(" Show {}", source.get().toggled().label())}
                    </Button>
                    <Button
                        appearance=Signal::derive(move || {
                            if state.with(|s| s.view_mode == ViewMode::Grid) {
                                ButtonAppearance::Primary
                            } else {
                                ButtonAppearance::Secondary
                            }
                        })
                        on_click=move |_| set_view_mode(ViewMode::Grid)
                    >
                        {icon("grid")}
                    </Button>
                    <Button
                        appearance=Signal::derive(move || {
                            if state.with(|s| s.view_mode == ViewMode::List) {
                                ButtonAppearance::Primary
                            } else {
                                ButtonAppearance::Secondary
                            }
                        })
                        on_click=move |_| set_view_mode(ViewMode::List)
                    >
                        {icon("list")}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <Show when=move || !has_imported.get()>
                    <div class="warning-box">
                        <span class="warning-box__icon">{icon("alert-triangle")}</span>
                        <span class="warning-box__text">
                            "No imported catalog yet. Showing demo data until a wholesaler uploads a product file."
                        </span>
                    </div>
                </Show>

                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div
                            class="filter-panel-header__left"
                            on:click=move |_| set_is_filter_expanded.update(|e| *e = !*e)
                        >
                            <span class=move || {
                                if is_filter_expanded.get() {
                                    "filter-panel__chevron filter-panel__chevron--expanded"
                                } else {
                                    "filter-panel__chevron"
                                }
                            }>
                                {icon("chevron-right")}
                            </span>
                            <span class="filter-panel__title">"Filters"</span>
                            {move || {
                                let count = active_filters.get();
                                if count > 0 {
                                    view! { <span class="filter-panel__badge">{count}</span> }.into_any()
                                } else {
                                    view! { <></> }.into_any()
                                }
                            }}
                        </div>

                        <div class="filter-panel-header__center">
                            <SearchInput
                                value=search
                                on_change=Callback::new(move |v: String| search.set(v))
                                placeholder="Search products by name..."
                            />
                        </div>

                        <div class="filter-panel-header__right">
                            <select
                                class="filter-select"
                                prop:value=move || state.with(|s| s.sort.as_str())
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| s.sort = SortOrder::from_value(&value));
                                    persist_state(state);
                                }
                            >
                                {SortOrder::all()
                                    .into_iter()
                                    .map(|o| view! { <option value=o.as_str()>{o.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>

                    <Show when=move || is_filter_expanded.get()>
                        <div class="filter-panel-content">
                            <Flex gap=FlexGap::Small align=FlexAlign::End>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Category"</Label>
                                    <select
                                        class="filter-select"
                                        prop:value=move || category.get().unwrap_or_default()
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            category.set((!value.is_empty()).then_some(value));
                                        }
                                    >
                                        <option value="">"All Categories"</option>
                                        <For
                                            each=move || categories.get()
                                            key=|c| c.clone()
                                            children=move |c| {
                                                let label = category_label(&c).to_string();
                                                view! { <option value=c>{label}</option> }
                                            }
                                        />
                                    </select>
                                </Flex>

                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Supplier"</Label>
                                    <select
                                        class="filter-select"
                                        prop:value=move || supplier.get().unwrap_or_default()
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            supplier.set((!value.is_empty()).then_some(value));
                                        }
                                    >
                                        <option value="">"All Suppliers"</option>
                                        <For
                                            each=move || suppliers.get()
                                            key=|s| s.clone()
                                            children=move |s| {
                                                let label = s.clone();
                                                view! { <option value=s>{label}</option> }
                                            }
                                        />
                                    </select>
                                </Flex>

                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Price"</Label>
                                    <div class="price-range">
                                        <input
                                            type="number"
                                            min="0"
                                            step="0.01"
                                            class="filter-input"
                                            prop:value=move || min_price.get().to_string()
                                            on:change=move |ev| {
                                                let current = min_price.get_untracked();
                                                min_price.set(parse_price_input(&event_target_value(&ev), current));
                                            }
                                        />
                                        <span>"–"</span>
                                        <input
                                            type="number"
                                            min="0"
                                            step="0.01"
                                            class="filter-input"
                                            prop:value=move || max_price.get().to_string()
                                            on:change=move |ev| {
                                                let current = max_price.get_untracked();
                                                max_price.set(parse_price_input(&event_target_value(&ev), current));
                                            }
                                        />
                                    </div>
                                </Flex>

                                <Checkbox checked=in_stock_only label="In stock only" />

                                <Button appearance=ButtonAppearance::Subtle on_click=move |_| reset_filters()>
                                    {icon("refresh")}
                                    " Reset all filters"
                                </Button>
                            </Flex>
                        </div>
                    </Show>
                </div>

                <Show
                    when=move || !visible.with(|v| v.is_empty())
                    fallback=move || view! {
                        <div class="empty-state">
                            <p>"No products match your filters."</p>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| reset_filters()>
                                "Reset all filters"
                            </Button>
                        </div>
                    }
                >
                    {move || match state.with(|s| s.view_mode) {
                        ViewMode::Grid => view! {
                            <div class="product-grid">
                                <For
                                    each=move || visible.get()
                                    key=|p| p.id.value()
                                    children=move |product| view! {
                                        <ProductCard product=product low_stock_threshold=low_stock_threshold search=search />
                                    }
                                />
                            </div>
                        }.into_any(),
                        ViewMode::List => view! {
                            <div class="table-wrapper">
                                <Table attr:style="width: 100%;">
                                    <TableHeader>
                                        <TableRow>
                                            <TableHeaderCell>"Product"</TableHeaderCell>
                                            <TableHeaderCell>"SKU"</TableHeaderCell>
                                            <TableHeaderCell>"Category"</TableHeaderCell>
                                            <TableHeaderCell>"Supplier"</TableHeaderCell>
                                            <TableHeaderCell>"Unit"</TableHeaderCell>
                                            <TableHeaderCell>"Price"</TableHeaderCell>
                                            <TableHeaderCell>"Stock"</TableHeaderCell>
                                        </TableRow>
                                    </TableHeader>
                                    <TableBody>
                                        <For
                                            each=move || visible.get()
                                            key=|p| p.id.value()
                                            children=move |product| {
                                                let status = product.stock_status(low_stock_threshold);
                                                let price = product.price;
                                                let compare_at = product.compare_at_price;
                                                let name = product.name.clone();
                                                let sku = product.sku.clone();
                                                let category = category_label(&product.category).to_string();
                                                let supplier = product.supplier.clone();
                                                let uom = product.uom_display();
                                                let stock_text = format!("{} ({})", status.label(), product.stock);
                                                view! {
                                                    <TableRow>
                                                        <TableCell>
                                                            <TableCellLayout>
                                                                {move || highlight_matches(&name, &search.get())}
                                                            </TableCellLayout>
                                                        </TableCell>
                                                        <TableCell>
                                                            <TableCellLayout>{sku}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCell>
                                                            <TableCellLayout>
                                                                {category}
                                                            </TableCellLayout>
                                                        </TableCell>
                                                        <TableCell>
                                                            <TableCellLayout>{supplier}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCell>
                                                            <TableCellLayout>{uom}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCellMoney
                                                            value=Signal::derive(move || Some(price))
                                                            compare_at=Signal::derive(move || compare_at)
                                                        />
                                                        <TableCell>
                                                            <TableCellLayout>
                                                                <Badge appearance=BadgeAppearance::Tint color=stock_badge_color(status)>
                                                                    {stock_text}
                                                                </Badge>
                                                            </TableCellLayout>
                                                        </TableCell>
                                                    </TableRow>
                                                }
                                            }
                                        />
                                    </TableBody>
                                </Table>
                            </div>
                        }.into_any(),
                    }}
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_input() {
        assert_eq!(parse_price_input("12.5", 0.0), 12.5);
        assert_eq!(parse_price_input(" 7 ", 0.0), 7.0);
        assert_eq!(parse_price_input("", 500.0), 500.0);
        assert_eq!(parse_price_input("-3", 0.0), 0.0);
        assert_eq!(parse_price_input("abc", 42.0), 42.0);
    }

    #[test]
    fn test_active_filters_count() {
        let reset = ProductQuery::default();
        assert_eq!(active_filters_count(&reset, &reset), 0);

        let mut query = reset.clone();
        query.search = "glove".to_string();
        query.category = Some("ppe".to_string());
        query.max_price = 100.0;
        query.sort = SortOrder::Newest;
        assert_eq!(active_filters_count(&query, &reset), 3);

        query.in_stock_only = false;
        assert_eq!(active_filters_count(&query, &reset), 4);
    }
}

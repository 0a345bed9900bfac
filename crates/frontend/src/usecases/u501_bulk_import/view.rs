use crate::shared::catalog::use_catalog;
use crate::shared::components::table::{format_number_int, TableCellMoney};
use crate::shared::file_upload::{format_file_size, read_file_bytes, ACCEPTED_EXTENSIONS};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_bulk_import::{BulkImport, ImportWizard, TargetField, WizardStage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

/// What the Complete step shows.
#[derive(Debug, Clone, PartialEq)]
struct CompletedImport {
    records: usize,
    batch_id: String,
    storage_warning: Option<String>,
}

fn stage_class(step: WizardStage, current: WizardStage) -> &'static str {
    if step == current {
        "wizard-step wizard-step--active"
    } else if step.step() < current.step() {
        "wizard-step wizard-step--done"
    } else {
        "wizard-step"
    }
}

fn unmapped_message(missing: &[TargetField]) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
    Some(format!(
        "Required fields not mapped: {}. These will be imported as blank or zero.",
        labels.join(", ")
    ))
}

#[component]
fn ErrorBox(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|e| {
            view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert-triangle")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            }
        })
    }
}

#[component]
fn StageHeader(wizard: RwSignal<ImportWizard>) -> impl IntoView {
    view! {
        <div class="wizard-steps">
            {WizardStage::all()
                .into_iter()
                .map(|step| {
                    view! {
                        <div class=move || stage_class(step, wizard.with(|w| w.stage()))>
                            <span class="wizard-step__number">{step.step()}</span>
                            <span class="wizard-step__label">{step.label()}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn UploadStep(
    wizard: RwSignal<ImportWizard>,
    set_error: WriteSignal<Option<String>>,
) -> impl IntoView {
    let catalog = use_catalog();
    let (is_loading, set_is_loading) = signal(false);
    let (selected_file, set_selected_file) = signal(None::<(String, f64)>);
    // Each pick bumps the sequence so a slower earlier read cannot win
    let upload_seq = StoredValue::new(0u32);

    let handle_file_select = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Allow picking the same file again after an error
        input.set_value("");

        let seq = upload_seq.get_value().wrapping_add(1);
        upload_seq.set_value(seq);
        set_selected_file.set(Some((file.name(), file.size())));
        set_error.set(None);
        set_is_loading.set(true);

        spawn_local(async move {
            let bytes = read_file_bytes(&file).await;
            if upload_seq.try_get_value() != Some(seq) {
                log::debug!("Discarding superseded upload '{}'", file.name());
                return;
            }
            set_is_loading.set(false);

            let result = match bytes {
                Ok(bytes) => wizard.try_update(|w| w.load_file(&file.name(), &bytes).map_err(|e| e.to_string())),
                Err(e) => Some(Err(e)),
            };
            if let Some(Err(e)) = result {
                set_error.set(Some(e));
            }
        });
    };

    let clear_imported = move |_| match catalog.clear() {
        Ok(()) => log::info!("Imported catalog removed"),
        Err(e) => set_error.set(Some(format!("Could not remove imported catalog: {}", e))),
    };

    view! {
        <div class="bulk-import__upload">
            <div class="upload-dropzone">
                <div class="upload-dropzone__icon">{icon("upload")}</div>
                <h3>"Upload your product file"</h3>
                <p class="upload-dropzone__hint">
                    "CSV, TSV or Excel (.xlsx, .xls, .ods). The first row must contain column headers."
                </p>
                <label class="button button--primary" for="bulk-import-file-input">
                    {icon("file")}
                    {move || if is_loading.get() { " Reading file..." } else { " Choose File" }}
                </label>
                <input
                    id="bulk-import-file-input"
                    type="file"
                    accept=ACCEPTED_EXTENSIONS
                    on:change=handle_file_select
                    class="hidden"
                />
                {move || selected_file.get().map(|(name, size)| view! {
                    <span class="upload-dropzone__fileinfo">
                        <strong>{name}</strong>
                        {format!(" ({})", format_file_size(size))}
                    </span>
                })}
            </div>

            <Show when=move || catalog.imported.with(|p| !p.is_empty())>
                <div class="bulk-import__current">
                    {icon("database")}
                    <span>
                        {move || format!(
                            " Current imported catalog: {} products. A new import replaces it.",
                            catalog.imported.with(|p| p.len())
                        )}
                    </span>
                    <Button appearance=ButtonAppearance::Subtle on_click=clear_imported>
                        "Remove imported catalog"
                    </Button>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn MappingStep(
    wizard: RwSignal<ImportWizard>,
    set_error: WriteSignal<Option<String>>,
) -> impl IntoView {
    let summary = move || {
        wizard.with(|w| {
            format!(
                "{}: {} rows, {} columns",
                w.file_name().unwrap_or_default(),
                w.row_count(),
                w.headers().len()
            )
        })
    };

    let go_back = move |_| {
        set_error.set(None);
        wizard.update(|w| {
            if let Err(e) = w.back() {
                log::warn!("{}", e);
            }
        });
    };

    let generate_preview = move |_| {
        match wizard.try_update(|w| w.generate_preview().map(|rows| rows.len())) {
            Some(Ok(count)) => {
                set_error.set(None);
                log::debug!("Preview generated with {} rows", count);
            }
            Some(Err(e)) => set_error.set(Some(e.to_string())),
            None => {}
        }
    };

    view! {
        <div class="bulk-import__mapping">
            <p class="bulk-import__summary">{icon("file")} " " {summary}</p>
            <p class="bulk-import__hint">
                "Match each product field to a column of your file. Columns were detected automatically where possible."
            </p>

            {move || {
                let missing = wizard.with(|w| w.unmapped_required());
                unmapped_message(&missing).map(|text| view! {
                    <div class="warning-box">
                        <span class="warning-box__icon">{icon("alert-triangle")}</span>
                        <span class="warning-box__text">{text}</span>
                    </div>
                })
            }}

            <div class="mapping-grid">
                {TargetField::ALL
                    .into_iter()
                    .map(|field| {
                        let input_id = format!("bulk-import-map-{}", field.key());
                        let current = move || {
                            wizard.with(|w| w.mapping().get(field).unwrap_or_default().to_string())
                        };
                        let on_change = move |ev: web_sys::Event| {
                            let value = event_target_value(&ev);
                            let header = (!value.is_empty()).then_some(value);
                            if let Some(Err(e)) = wizard.try_update(|w| w.set_mapping(field, header.as_deref())) {
                                set_error.set(Some(e.to_string()));
                            }
                        };
                        view! {
                            <div class="mapping-row">
                                <label class="mapping-row__label" for=input_id.clone()>
                                    {field.label()}
                                    {field.is_required().then(|| view! {
                                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"Required"</Badge>
                                    })}
                                </label>
                                <select id=input_id class="mapping-row__select" prop:value=current on:change=on_change>
                                    <option value="">"-- Skip this field --"</option>
                                    {move || {
                                        let selected = current();
                                        wizard
                                            .with(|w| w.headers().to_vec())
                                            .into_iter()
                                            .map(|h| {
                                                let is_selected = h == selected;
                                                let value = h.clone();
                                                view! { <option value=value selected=is_selected>{h}</option> }
                                            })
                                            .collect_view()
                                    }}
                                </select>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <Space>
                <Button appearance=ButtonAppearance::Secondary on_click=go_back>"Back"</Button>
                <Button appearance=ButtonAppearance::Primary on_click=generate_preview>
                    "Preview Import"
                </Button>
            </Space>
        </div>
    }
}

#[component]
fn PreviewStep(
    wizard: RwSignal<ImportWizard>,
    set_error: WriteSignal<Option<String>>,
    set_completed: WriteSignal<Option<CompletedImport>>,
) -> impl IntoView {
    let catalog = use_catalog();
    let (is_importing, set_is_importing) = signal(false);

    let go_back = move |_| {
        wizard.update(|w| {
            if let Err(e) = w.back() {
                log::warn!("{}", e);
            }
        });
    };

    let run_import = move |_| {
        set_is_importing.set(true);
        match wizard.try_update(|w| catalog.commit(w)) {
            Some(Ok(outcome)) => {
                if let Some(warning) = &outcome.storage_warning {
                    log::warn!("Import {} not persisted: {}", outcome.batch_id, warning);
                }
                set_error.set(None);
                set_completed.set(Some(CompletedImport {
                    records: outcome.records,
                    batch_id: outcome.batch_id.to_string(),
                    storage_warning: outcome.storage_warning.map(|e| e.to_string()),
                }));
            }
            Some(Err(e)) => set_error.set(Some(e.to_string())),
            None => {}
        }
        set_is_importing.set(false);
    };

    let caption = move || {
        wizard.with(|w| format!("Showing {} of {} rows", w.preview().len(), w.row_count()))
    };

    view! {
        <div class="bulk-import__preview">
            <p class="bulk-import__summary">{caption}</p>

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"SKU"</TableHeaderCell>
                            <TableHeaderCell>"Price"</TableHeaderCell>
                            <TableHeaderCell>"Stock"</TableHeaderCell>
                            <TableHeaderCell>"Unit"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || wizard.with(|w| w.preview().to_vec())
                            key=|p| p.id.value()
                            children=move |product| {
                                let price = product.price;
                                let name = product.name.clone();
                                let sku = product.sku.clone();
                                let stock = format_number_int(f64::from(product.stock));
                                let uom = product.uom_display();
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{name}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{sku}</TableCellLayout></TableCell>
                                        <TableCellMoney value=Signal::derive(move || Some(price)) />
                                        <TableCell><TableCellLayout>{stock}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{uom}</TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>

            <Space>
                <Button appearance=ButtonAppearance::Secondary on_click=go_back>"Back to Mapping"</Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=run_import
                    disabled=Signal::derive(move || is_importing.get())
                >
                    {move || format!("Import {} Products", wizard.with(|w| w.row_count()))}
                </Button>
            </Space>
        </div>
    }
}

#[component]
fn CompleteStep(
    wizard: RwSignal<ImportWizard>,
    completed: ReadSignal<Option<CompletedImport>>,
    set_completed: WriteSignal<Option<CompletedImport>>,
    on_import_complete: Callback<usize>,
) -> impl IntoView {
    let import_another = move |_| {
        wizard.update(|w| w.reset());
        set_completed.set(None);
    };

    let view_products = move |_| {
        on_import_complete.run(wizard.with_untracked(|w| w.imported_count()));
    };

    view! {
        <div class="bulk-import__complete">
            <div class="bulk-import__success-icon">{icon("check-circle")}</div>
            <h3>"Import Complete!"</h3>
            <p>
                {move || format!(
                    "{} products have been imported successfully.",
                    wizard.with(|w| w.imported_count())
                )}
            </p>
            {move || completed.get().map(|c| view! {
                <p class="bulk-import__batch">{format!("Batch {} ({} records)", c.batch_id, c.records)}</p>
            })}
            {move || completed.get().and_then(|c| c.storage_warning).map(|w| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">{icon("alert-triangle")}</span>
                    <span class="warning-box__text">
                        {format!(
                            "The products could not be saved in this browser ({}). They will be lost when the page is reloaded.",
                            w
                        )}
                    </span>
                </div>
            })}
            <Space>
                <Button appearance=ButtonAppearance::Secondary on_click=import_another>
                    {icon("refresh")}
                    " Import Another File"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=view_products>
                    {icon("package")}
                    " View Products"
                </Button>
            </Space>
        </div>
    }
}

/// Wholesaler admin page hosting the import wizard.
#[component]
pub fn BulkImportWidget(#[prop(into)] on_import_complete: Callback<usize>) -> impl IntoView {
    let catalog = use_catalog();
    let settings = catalog.config.with_value(|c| c.import.clone());
    let wizard = RwSignal::new(ImportWizard::new(settings));
    let (error, set_error) = signal(None::<String>);
    let (completed, set_completed) = signal(None::<CompletedImport>);
    let stage = Memo::new(move |_| wizard.with(|w| w.stage()));

    view! {
        <PageFrame page_id="u501_bulk_import--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{BulkImport::display_name()}</h1>
                    <span class="page__subtitle">{BulkImport::description()}</span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            wizard.update(|w| w.reset());
                            set_completed.set(None);
                            set_error.set(None);
                        }
                        disabled=Signal::derive(move || stage.get() == WizardStage::Upload)
                    >
                        {icon("x")}
                        " Start Over"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <StageHeader wizard=wizard />
                <ErrorBox message=error />

                {move || match stage.get() {
                    WizardStage::Upload => view! {
                        <UploadStep wizard=wizard set_error=set_error />
                    }.into_any(),
                    WizardStage::Mapping => view! {
                        <MappingStep wizard=wizard set_error=set_error />
                    }.into_any(),
                    WizardStage::Preview => view! {
                        <PreviewStep wizard=wizard set_error=set_error set_completed=set_completed />
                    }.into_any(),
                    WizardStage::Complete => view! {
                        <CompleteStep
                            wizard=wizard
                            completed=completed
                            set_completed=set_completed
                            on_import_complete=on_import_complete
                        />
                    }.into_any(),
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_class_marks_done_and_active_steps() {
        assert_eq!(stage_class(WizardStage::Upload, WizardStage::Preview), "wizard-step wizard-step--done");
        assert_eq!(stage_class(WizardStage::Preview, WizardStage::Preview), "wizard-step wizard-step--active");
        assert_eq!(stage_class(WizardStage::Complete, WizardStage::Preview), "wizard-step");
    }

    #[test]
    fn test_unmapped_message() {
        assert_eq!(unmapped_message(&[]), None);
        let text = unmapped_message(&[TargetField::Name, TargetField::Price]).unwrap();
        assert!(text.contains("Product Name"));
        assert!(text.contains(TargetField::Price.label()));
    }
}

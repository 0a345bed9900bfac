use contracts::domain::a001_product::SortOrder;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "a001_product_list_state_v1";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PersistedState {
    pub view_mode: ViewMode,
    pub sort: SortOrder,
}

#[derive(Clone, Debug, Default)]
pub struct ProductListState {
    pub view_mode: ViewMode,
    pub sort: SortOrder,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_persisted() -> Option<PersistedState> {
    let raw = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
    serde_json::from_str::<PersistedState>(&raw).ok()
}

fn save_persisted(st: &PersistedState) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(st) else { return };
    let _ = storage.set_item(STORAGE_KEY, &raw);
}

pub fn persist_state(signal: RwSignal<ProductListState>) {
    let st = signal.get_untracked();
    save_persisted(&PersistedState {
        view_mode: st.view_mode,
        sort: st.sort,
    });
}

pub fn create_state() -> RwSignal<ProductListState> {
    let mut st = ProductListState::default();
    if let Some(p) = load_persisted() {
        st.view_mode = p.view_mode;
        st.sort = p.sort;
    }
    RwSignal::new(st)
}

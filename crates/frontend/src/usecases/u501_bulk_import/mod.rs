pub mod view;

pub use view::BulkImportWidget;

pub mod common;
pub mod u501_bulk_import;

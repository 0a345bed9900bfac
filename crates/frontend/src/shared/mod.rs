pub mod catalog;
pub mod components;
pub mod config;
pub mod file_upload;
pub mod icons;
pub mod list_utils;
pub mod page_frame;
pub mod page_standard;

pub mod api_utils;
pub mod components;
pub mod debounce;
pub mod excel_importer;
pub mod export;
pub mod format;
pub mod gateway;
pub mod staging;

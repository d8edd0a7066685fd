pub mod brewery_api;
pub mod format;

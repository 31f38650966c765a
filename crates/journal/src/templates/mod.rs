pub mod fragments;
pub mod layouts;
pub mod pages;

pub use fragments::{format_measurement, Notice};
pub use layouts::PageConfig;
pub use pages::{choose_location_page, index_page, IndexView};

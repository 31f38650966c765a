pub mod choose_location;
pub mod index;

pub use choose_location::choose_location_page;
pub use index::{index_page, IndexView};

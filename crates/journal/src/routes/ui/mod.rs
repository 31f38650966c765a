mod add;
mod delete;
mod index;

pub use add::add_handler;
pub use delete::delete_handler;
pub use index::{index_handler, IndexQuery};

pub mod health;
pub mod records;
pub mod ui;

pub use health::*;
pub use records::*;
pub use ui::*;

mod extract_day;
mod fetch_daily;
mod select_source;

pub use extract_day::*;
pub use fetch_daily::*;
pub use select_source::*;

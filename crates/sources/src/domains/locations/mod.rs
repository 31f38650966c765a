mod resolve_locations;

pub use resolve_locations::*;

pub mod record_routes;

pub use record_routes::*;

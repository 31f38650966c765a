pub mod db;
mod lookup;
mod recorder;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use db::*;
pub use lookup::*;
pub use recorder::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;

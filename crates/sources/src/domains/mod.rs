pub mod daily;
pub mod locations;

pub use daily::*;
pub use locations::*;

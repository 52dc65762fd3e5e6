pub mod config;
pub mod constants;
pub mod effect;
pub mod layers;
pub mod schedule;
pub mod transform;

pub use config::*;
pub use effect::*;
pub use layers::*;
pub use schedule::*;
pub use transform::*;

pub mod environment;
pub mod recorders;
pub mod strategies;

pub use recorders::*;

pub mod classifier;
pub mod engine;
pub mod indicators;


pub use classifier::*;
pub use engine::*;
pub use indicators::*;

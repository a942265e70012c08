pub mod filter;
pub mod processor;

pub use filter::*;
pub use processor::*;

mod filter;
mod format;
pub use filter::*;
pub use format::*;

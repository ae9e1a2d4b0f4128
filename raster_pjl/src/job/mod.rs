mod emitter;
mod metadata;
pub mod pjl;
pub use emitter::*;
pub use metadata::*;

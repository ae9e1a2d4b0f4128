mod header;
mod limits;
mod slicer;
mod stream;
pub use header::*;
pub use limits::*;
pub use slicer::*;
pub use stream::*;

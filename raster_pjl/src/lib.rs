//! A crate for turning CUPS Raster v3 (RaS3) streams into PJL print jobs.
//! # Example
//! ## Decoding
//! The whole stream has to be in memory: pages carry no length field, each payload length is
//! derived from its header. Decoding either succeeds for every page or fails as a whole.
//!
//! ```rust
//! use raster_pjl::{
//!     decode::RasterStreamDecoder,
//!     encode::encode_document,
//!     model::{cups::PageHeader, page::Page, RasterByteOrder},
//! };
//!
//! // A 2x1 grayscale page, as an upstream rasterizer would produce it.
//! let header = PageHeader {
//!     width: 2,
//!     height: 1,
//!     bits_per_pixel: 8,
//!     num_colors: 1,
//!     ..Default::default()
//! };
//! let page = Page::new(header, vec![0x00, 0xff])?;
//! let raw = encode_document(RasterByteOrder::LittleEndian, [&page])?;
//!
//! let document = RasterStreamDecoder::new().decode(raw)?;
//! assert_eq!(document.byte_order(), RasterByteOrder::LittleEndian);
//! for (index, page) in document.pages().iter().enumerate() {
//!     println!(
//!         "Page {}, {}x{}, {} bytes",
//!         index,
//!         page.header().width,
//!         page.header().height,
//!         page.payload().len()
//!     );
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Emitting a job
//! The job is written to any `AsyncWrite`. Pages are checked for a grayscale color model and
//! passed through a [`PageEncoder`](job::PageEncoder) that produces the device data.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use futures::executor::block_on;
//! use raster_pjl::{
//!     decode::decode,
//!     job::{emit_job, JobMetadata, JobSettings, RawPageEncoder},
//! };
//! use std::pin::Pin;
//!
//! # let raw = b"RaS3".to_vec();
//! let document = decode(raw)?;
//! let metadata = JobMetadata {
//!     job_id: "42".to_string(),
//!     user: "alice".to_string(),
//!     title: "report".to_string(),
//!     copies: 1,
//!     options: String::new(),
//!     file: None,
//!     timestamp: NaiveDate::from_ymd_opt(2024, 3, 5)
//!         .unwrap()
//!         .and_hms_opt(14, 7, 9)
//!         .unwrap(),
//! };
//! let settings = JobSettings::from_options("Resolution=600dpi PageSize=A4");
//! let mut output = Vec::<u8>::new();
//! block_on(emit_job(
//!     Pin::new(&mut output),
//!     RawPageEncoder,
//!     &metadata,
//!     &settings,
//!     &document,
//! ))?;
//! assert!(output.starts_with(b"\x1b%-12345X@PJL\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod job;
pub mod model;
pub mod reader;
// Re-export bytes crate, page payloads are `bytes::Bytes`.
pub use bytes;

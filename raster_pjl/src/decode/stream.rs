use super::{compute_payload_length, decode_header, decode_magic, slice_payload, Limits};
use crate::error::FormatError;
use crate::model::cups::PAGE_HEADER_SIZE;
use crate::model::page::{Page, RasterDocument};
use crate::model::RasterByteOrder;
use bytes::{Buf, Bytes};
use log::debug;
use std::iter::FusedIterator;
use std::mem;

/// Decodes a complete, in-memory RaS3 stream into its pages.
///
/// The decoder keeps no state between calls, only its [`Limits`].
#[derive(Clone, Debug, Default)]
pub struct RasterStreamDecoder {
    limits: Limits,
}

impl RasterStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        RasterStreamDecoder { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Checks the magic and returns an iterator decoding one page per step.
    pub fn pages(&self, raw: impl Into<Bytes>) -> Result<PageIter, FormatError> {
        let mut buffer = raw.into();
        if buffer.is_empty() {
            return Err(FormatError::EmptyInput);
        }
        let magic = decode_magic(&buffer)?;
        buffer.advance(4);
        debug!(
            "raster stream {:?}, {} bytes after magic",
            magic.byte_order(),
            buffer.len()
        );
        Ok(PageIter {
            buffer,
            byte_order: magic.byte_order(),
            limits: self.limits.clone(),
            page_index: 0,
            finished: false,
        })
    }

    /// Decodes every page. Any malformed page fails the whole document.
    pub fn decode(&self, raw: impl Into<Bytes>) -> Result<RasterDocument, FormatError> {
        let pages = self.pages(raw)?;
        let byte_order = pages.byte_order();
        let pages = pages.collect::<Result<Vec<_>, _>>()?;
        debug!("decoded {} pages", pages.len());
        Ok(RasterDocument::new(byte_order, pages))
    }
}

/// Decodes `raw` without limits.
pub fn decode(raw: impl Into<Bytes>) -> Result<RasterDocument, FormatError> {
    RasterStreamDecoder::new().decode(raw)
}

/// Iterator over the pages of a stream, see [`RasterStreamDecoder::pages`].
///
/// Ends when the buffer is exactly consumed. After the first error it yields nothing more.
pub struct PageIter {
    buffer: Bytes,
    byte_order: RasterByteOrder,
    limits: Limits,
    page_index: u64,
    finished: bool,
}

impl PageIter {
    pub fn byte_order(&self) -> RasterByteOrder {
        self.byte_order
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }

    fn next_page(&mut self) -> Result<Page, FormatError> {
        self.limits.check_page_index(self.page_index)?;
        let header = decode_header(&self.buffer, self.byte_order)?;
        self.buffer.advance(PAGE_HEADER_SIZE);
        let length = compute_payload_length(&header)?;
        self.limits.check_payload_length(length)?;
        let (payload, remaining) = slice_payload(mem::take(&mut self.buffer), length)?;
        self.buffer = remaining;
        debug!(
            "page {}: {}x{} at {} bpp, color space {}, {} payload bytes",
            self.page_index,
            header.width,
            header.height,
            header.bits_per_pixel,
            header.color_space,
            length
        );
        self.page_index += 1;
        Ok(Page::from_parts(header, payload))
    }
}

impl Iterator for PageIter {
    type Item = Result<Page, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.buffer.is_empty() {
            self.finished = true;
            return None;
        }
        let page = self.next_page();
        if page.is_err() {
            self.finished = true;
        }
        Some(page)
    }
}

impl FusedIterator for PageIter {}

use crate::decode::encode_header;
use crate::error::FormatError;
use crate::model::cups::{RasterMagic, PAGE_HEADER_SIZE};
use crate::model::page::Page;
use crate::model::RasterByteOrder;

/// Builds a RaS3 stream in memory, the inverse of
/// [`RasterStreamDecoder`](crate::decode::RasterStreamDecoder).
pub struct RasterStreamEncoder {
    byte_order: RasterByteOrder,
    buffer: Vec<u8>,
}

impl RasterStreamEncoder {
    /// Starts a stream, writing the magic for `byte_order`.
    pub fn new(byte_order: RasterByteOrder) -> Self {
        let buffer = RasterMagic::from_byte_order(byte_order).to_bytes().to_vec();
        RasterStreamEncoder { byte_order, buffer }
    }

    pub fn byte_order(&self) -> RasterByteOrder {
        self.byte_order
    }

    pub fn push_page(&mut self, page: &Page) -> Result<(), FormatError> {
        let mut header = [0u8; PAGE_HEADER_SIZE];
        encode_header(&mut header, page.header(), self.byte_order)?;
        self.buffer.reserve(PAGE_HEADER_SIZE + page.payload().len());
        self.buffer.extend_from_slice(&header);
        self.buffer.extend_from_slice(page.payload());
        Ok(())
    }

    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }
}

/// Encodes `pages` as one stream.
pub fn encode_document<'a>(
    byte_order: RasterByteOrder,
    pages: impl IntoIterator<Item = &'a Page>,
) -> Result<Vec<u8>, FormatError> {
    let mut encoder = RasterStreamEncoder::new(byte_order);
    for page in pages {
        encoder.push_page(page)?;
    }
    Ok(encoder.finish())
}

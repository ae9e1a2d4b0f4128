use super::cups::PageHeader;
use super::RasterByteOrder;
use crate::decode::compute_payload_length;
use crate::error::FormatError;
use bytes::Bytes;

/// One page of a raster document: its header and exactly the pixel bytes the header declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    header: PageHeader,
    payload: Bytes,
}

impl Page {
    /// Creates a page, checking that `payload` has the length derived from `header`.
    pub fn new(header: PageHeader, payload: impl Into<Bytes>) -> Result<Self, FormatError> {
        let payload = payload.into();
        let expected = compute_payload_length(&header)?;
        if payload.len() != expected {
            return Err(FormatError::PayloadMismatch {
                expected,
                actual: payload.len(),
            });
        }
        Ok(Page { header, payload })
    }

    /// Used by the decoder, which has already sliced exactly the declared length.
    pub(crate) fn from_parts(header: PageHeader, payload: Bytes) -> Self {
        Page { header, payload }
    }

    pub fn header(&self) -> &PageHeader {
        &self.header
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_parts(self) -> (PageHeader, Bytes) {
        (self.header, self.payload)
    }
}

/// All pages of one raster stream, in stream order.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterDocument {
    byte_order: RasterByteOrder,
    pages: Vec<Page>,
}

impl RasterDocument {
    pub(crate) fn new(byte_order: RasterByteOrder, pages: Vec<Page>) -> Self {
        RasterDocument { byte_order, pages }
    }

    pub fn byte_order(&self) -> RasterByteOrder {
        self.byte_order
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

impl IntoIterator for RasterDocument {
    type Item = Page;
    type IntoIter = std::vec::IntoIter<Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a RasterDocument {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: u32, height: u32, bits_per_pixel: u32) -> PageHeader {
        PageHeader {
            width,
            height,
            bits_per_pixel,
            ..Default::default()
        }
    }

    #[test]
    fn new_checks_payload_length() {
        let page = Page::new(header(4, 2, 8), vec![0u8; 8]).unwrap();
        assert_eq!(page.payload().len(), 8);

        let err = Page::new(header(4, 2, 8), vec![0u8; 7]).unwrap_err();
        assert!(matches!(
            err,
            FormatError::PayloadMismatch {
                expected: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn new_rejects_invalid_geometry() {
        let err = Page::new(header(0, 2, 8), Vec::new()).unwrap_err();
        assert!(matches!(err, FormatError::InvalidGeometry { .. }));
    }
}

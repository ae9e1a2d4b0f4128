use arbitrary::Arbitrary;
use raster_pjl::{
    decode::{Limits, RasterStreamDecoder},
    encode::encode_document,
    model::{cups::PageHeader, page::Page},
};

pub const LIMITS: Limits = Limits {
    bytes_per_page: 8000 * 8000 * 3,
    page_count: 300,
};

/// Decodes `input` and checks that encoding the result gives back exactly `input`.
///
/// Decoding errors are returned, since the input is not guaranteed to be valid.
/// Anything that decoded successfully must encode again, so failures there panic.
pub fn roundtrip_stream(input: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    let document = RasterStreamDecoder::with_limits(LIMITS).decode(input.to_vec())?;
    let output = encode_document(document.byte_order(), &document).unwrap();
    assert_eq!(output, input);
    Ok(())
}

/// Page description small enough to keep payloads cheap.
#[derive(Debug, Arbitrary)]
pub struct PageSpec {
    pub width: u8,
    pub height: u8,
    pub bits_per_pixel: u8,
    pub color_space: u32,
    pub num_colors: u32,
    pub media_type: String,
    pub vendor_u32: [u32; 16],
    pub fill: u8,
}

impl PageSpec {
    pub fn to_page(&self) -> Option<Page> {
        let media_type = self.media_type.trim_end_matches('\0').to_string();
        if media_type.len() > 63 {
            return None;
        }
        let header = PageHeader {
            media_type,
            width: self.width as u32,
            height: self.height as u32,
            bits_per_pixel: self.bits_per_pixel as u32,
            color_space: self.color_space,
            num_colors: self.num_colors,
            vendor_u32: self.vendor_u32,
            ..Default::default()
        };
        let length = self.width as usize * self.height as usize * self.bits_per_pixel as usize / 8;
        Page::new(header, vec![self.fill; length]).ok()
    }
}

use honggfuzz::fuzz;
use raster_pjl::{decode::decode, encode::encode_document, model::RasterByteOrder};
use raster_pjl_fuzz::PageSpec;

fn main() {
    loop {
        fuzz!(|input: (bool, Vec<PageSpec>)| {
            let (little_endian, specs) = input;
            let Some(pages) = specs.iter().map(PageSpec::to_page).collect::<Option<Vec<_>>>()
            else {
                return;
            };
            let byte_order = if little_endian {
                RasterByteOrder::LittleEndian
            } else {
                RasterByteOrder::BigEndian
            };
            let raw = encode_document(byte_order, &pages).unwrap();
            let document = decode(raw).unwrap();
            assert_eq!(document.byte_order(), byte_order);
            assert_eq!(document.pages(), &pages[..]);
        });
    }
}

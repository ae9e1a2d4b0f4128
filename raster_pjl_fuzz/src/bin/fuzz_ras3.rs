use futures::io::Cursor;
use honggfuzz::fuzz;
use raster_pjl::{encode::encode_document, reader::read_document};
use raster_pjl_fuzz::{roundtrip_stream, LIMITS};
use std::pin::Pin;

fn main() {
    let rt = tokio::runtime::Runtime::new().unwrap();

    loop {
        fuzz!(|input: &[u8]| {
            let from_reader = rt.block_on(async {
                let mut cursor = Cursor::new(input);
                read_document(Pin::new(&mut cursor), &LIMITS).await
            });
            // Headers may carry NaN floats, so compare the re-encoded bytes.
            let sync_result = roundtrip_stream(input);
            if let Ok(document) = from_reader {
                assert!(sync_result.is_ok());
                let output = encode_document(document.byte_order(), &document).unwrap();
                assert_eq!(output, input);
            }
        });
    }
}

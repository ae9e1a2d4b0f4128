use chrono::NaiveDate;
use futures::io::BufReader;
use image::{ImageBuffer, Luma};
use raster_pjl::{
    decode::{decode, Limits},
    encode::encode_document,
    error::{FilterError, FormatError},
    job::{emit_job, JobMetadata, JobSettings, RawPageEncoder},
    model::{
        cups::{PageHeader, PAGE_HEADER_SIZE},
        page::Page,
        RasterByteOrder,
    },
    reader::read_document,
};
use std::{array, path::Path, pin::pin, pin::Pin};
use tokio_util::compat::TokioAsyncReadCompatExt;

fn put_u32_be(buffer: &mut [u8], offset: usize, value: u32) {
    buffer[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

/// magic `RaS3` + one 2x1 8-bit page, written field by field.
fn two_pixel_stream(color_space: u32) -> Vec<u8> {
    let mut header = vec![0u8; PAGE_HEADER_SIZE];
    header[0..5].copy_from_slice(b"Plain");
    header[128..135].copy_from_slice(b"Regular");
    put_u32_be(&mut header, 276, 600);
    put_u32_be(&mut header, 280, 600);
    put_u32_be(&mut header, 372, 2);
    put_u32_be(&mut header, 376, 1);
    put_u32_be(&mut header, 384, 8);
    put_u32_be(&mut header, 388, 8);
    put_u32_be(&mut header, 392, 2);
    put_u32_be(&mut header, 400, color_space);
    put_u32_be(&mut header, 420, 1);
    header[1732..1734].copy_from_slice(b"A4");

    let mut raw = b"RaS3".to_vec();
    raw.extend_from_slice(&header);
    raw.extend_from_slice(&[0x00, 0xff]);
    raw
}

fn metadata() -> JobMetadata {
    JobMetadata {
        job_id: "1001".to_string(),
        user: "printer-test".to_string(),
        title: "integration".to_string(),
        copies: 1,
        options: String::new(),
        file: None,
        timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap(),
    }
}

fn gray_header(width: u32, height: u32) -> PageHeader {
    PageHeader {
        media_type: "Regular".to_string(),
        width,
        height,
        bits_per_color: 8,
        bits_per_pixel: 8,
        bytes_per_line: width,
        num_colors: 1,
        vendor_u32: array::from_fn(|i| i as u32 + 100),
        vendor_f32: array::from_fn(|i| i as f32 * 0.5),
        vendor_str: array::from_fn(|i| format!("vendor {}", i)),
        page_size_name: "iso_a4_210x297mm".to_string(),
        ..Default::default()
    }
}

fn gradient_page(width: u32, height: u32) -> Page {
    let payload = (0..width * height)
        .map(|i| (i % 256) as u8)
        .collect::<Vec<u8>>();
    Page::new(gray_header(width, height), payload).unwrap()
}

#[test]
fn single_grayscale_page() {
    let document = decode(two_pixel_stream(0)).unwrap();
    assert_eq!(document.byte_order(), RasterByteOrder::BigEndian);
    assert_eq!(document.len(), 1);

    let page = &document.pages()[0];
    assert_eq!(page.payload(), &[0x00, 0xff]);
    let header = page.header();
    assert_eq!(header.media_class, "Plain");
    assert_eq!(header.media_type, "Regular");
    assert_eq!(header.page_size_name, "A4");
    assert_eq!(header.resolution.cross_feed, 600);
    assert_eq!(header.width, 2);
    assert_eq!(header.height, 1);
    assert_eq!(header.bits_per_pixel, 8);
    assert_eq!(header.bits_per_color, 8);
    assert_eq!(header.bytes_per_line, 2);
    assert_eq!(header.color_space, 0);
    assert_eq!(header.num_colors, 1);
    assert_eq!(header.media_color, "");
}

#[tokio::test]
async fn color_page_decodes_but_job_is_rejected() {
    let document = decode(two_pixel_stream(1)).unwrap();
    assert_eq!(document.pages()[0].header().color_space, 1);

    let mut output = Vec::new();
    let err = emit_job(
        Pin::new(&mut output),
        RawPageEncoder,
        &metadata(),
        &JobSettings::default(),
        &document,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        FilterError::UnsupportedColorModel {
            page: 1,
            color_space: 1,
            num_colors: 1
        }
    ));
}

#[test]
fn both_orientations_decode_to_same_fields() {
    let pages = [gradient_page(7, 3), gradient_page(16, 16)];
    let big = decode(encode_document(RasterByteOrder::BigEndian, &pages).unwrap()).unwrap();
    let little = decode(encode_document(RasterByteOrder::LittleEndian, &pages).unwrap()).unwrap();
    assert_eq!(big.byte_order(), RasterByteOrder::BigEndian);
    assert_eq!(little.byte_order(), RasterByteOrder::LittleEndian);
    assert_eq!(big.pages(), little.pages());
    assert_eq!(big.pages(), &pages);
}

#[test]
fn stream_structure_is_reconstructed() {
    for byte_order in [RasterByteOrder::BigEndian, RasterByteOrder::LittleEndian] {
        let pages = [gradient_page(3, 5), gradient_page(1, 1), gradient_page(40, 2)];
        let raw = encode_document(byte_order, &pages).unwrap();
        let document = decode(raw.clone()).unwrap();
        assert_eq!(document.len(), 3);
        let rebuilt = encode_document(document.byte_order(), &document).unwrap();
        assert_eq!(rebuilt, raw);
    }
}

#[test]
fn short_buffers_never_panic() {
    for len in 0..4 {
        let raw = b"RaS3"[..len].to_vec();
        match decode(raw) {
            Err(FormatError::EmptyInput) | Err(FormatError::UnrecognizedMagic) => {}
            other => panic!("unexpected result for {} bytes: {:?}", len, other),
        }
    }
}

#[test]
fn oversized_geometry_is_overrun() {
    let mut raw = two_pixel_stream(0);
    put_u32_be(&mut raw[4..], 376, 1_000_000);
    assert!(matches!(
        decode(raw),
        Err(FormatError::PayloadOverrun {
            expected: 2_000_000,
            remaining: 2
        })
    ));
}

#[tokio::test]
async fn read_from_file() {
    let name = "gradient";
    let outputs = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_outputs");
    std::fs::create_dir_all(&outputs).unwrap();
    let path = outputs.join(format!("{}.ras", name));
    let pages = [gradient_page(64, 32), gradient_page(32, 64)];
    std::fs::write(
        &path,
        encode_document(RasterByteOrder::LittleEndian, &pages).unwrap(),
    )
    .unwrap();

    let file = tokio::fs::File::open(&path).await.unwrap();
    let pinned_file_reader = pin!(BufReader::new(file.compat()));
    let document = read_document(pinned_file_reader, Limits::NO_LIMITS)
        .await
        .unwrap();
    assert_eq!(document.pages(), &pages);

    for (page_index, page) in document.pages().iter().enumerate() {
        let img = ImageBuffer::<Luma<u8>, Vec<u8>>::from_vec(
            page.header().width,
            page.header().height,
            page.payload().to_vec(),
        )
        .unwrap();
        img.save(outputs.join(format!("{}_{}.png", name, page_index)))
            .unwrap();
    }
}

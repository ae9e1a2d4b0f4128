use crate::error::FormatError;
use crate::model::cups::{
    BoundingBox, Margins, PageHeader, PageSize, RasterMagic, Resolution, PAGE_HEADER_SIZE,
    TEXT_FIELD_SIZE, VENDOR_SLOTS,
};
use crate::model::RasterByteOrder;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::{array, str};

const VENDOR_U32_OFFSET: usize = 452;
const VENDOR_F32_OFFSET: usize = 516;
const VENDOR_STR_OFFSET: usize = 580;

/// Identifies the stream format and byte order from the first 4 bytes of `buffer`.
///
/// The caller is responsible for skipping the magic afterwards.
pub fn decode_magic(buffer: &[u8]) -> Result<RasterMagic, FormatError> {
    match buffer.get(..4) {
        Some(b"RaS3") => Ok(RasterMagic::Forward),
        Some(b"3SaR") => Ok(RasterMagic::Reversed),
        _ => Err(FormatError::UnrecognizedMagic),
    }
}

/// Decodes the page header at the front of `buffer`.
///
/// Only the first [`PAGE_HEADER_SIZE`] bytes are read, anything after them is left to the caller.
pub fn decode_header(
    buffer: &[u8],
    byte_order: RasterByteOrder,
) -> Result<PageHeader, FormatError> {
    if buffer.len() < PAGE_HEADER_SIZE {
        return Err(FormatError::TruncatedHeader {
            remaining: buffer.len(),
        });
    }
    let content = &buffer[..PAGE_HEADER_SIZE];
    match byte_order {
        RasterByteOrder::BigEndian => read_page_header::<BigEndian>(content),
        RasterByteOrder::LittleEndian => read_page_header::<LittleEndian>(content),
    }
}

/// Serializes `header` in the given byte order.
pub fn encode_header(
    target: &mut [u8; PAGE_HEADER_SIZE],
    header: &PageHeader,
    byte_order: RasterByteOrder,
) -> Result<(), FormatError> {
    match byte_order {
        RasterByteOrder::BigEndian => write_page_header::<BigEndian>(target, header),
        RasterByteOrder::LittleEndian => write_page_header::<LittleEndian>(target, header),
    }
}

// Only the trailing run of NUL bytes is padding, NULs in the middle are kept.
fn read_text(content: &[u8]) -> Result<String, FormatError> {
    let len = content.iter().rposition(|&c| c != 0).map_or(0, |last| last + 1);
    Ok(str::from_utf8(&content[..len])?.to_string())
}

fn write_text(content: &mut [u8], s: &str) -> Result<(), FormatError> {
    if s.len() > content.len() {
        return Err(FormatError::TextTooLong { len: s.len() });
    }
    content[..s.len()].copy_from_slice(s.as_bytes());
    content[s.len()..].fill(0);
    Ok(())
}

fn text_slot(index: usize) -> std::ops::Range<usize> {
    let start = VENDOR_STR_OFFSET + index * TEXT_FIELD_SIZE;
    start..start + TEXT_FIELD_SIZE
}

fn read_page_header<TOrder>(content: &[u8]) -> Result<PageHeader, FormatError>
where
    TOrder: ByteOrder,
{
    let mut vendor_str: [String; VENDOR_SLOTS] = Default::default();
    for (i, slot) in vendor_str.iter_mut().enumerate() {
        *slot = read_text(&content[text_slot(i)])?;
    }
    Ok(PageHeader {
        media_class: read_text(&content[0..64])?,
        media_color: read_text(&content[64..128])?,
        media_type: read_text(&content[128..192])?,
        output_type: read_text(&content[192..256])?,
        advance_distance: TOrder::read_u32(&content[256..260]),
        advance_media: TOrder::read_u32(&content[260..264]),
        collate: TOrder::read_u32(&content[264..268]),
        cut_media: TOrder::read_u32(&content[268..272]),
        duplex: TOrder::read_u32(&content[272..276]),
        resolution: Resolution {
            cross_feed: TOrder::read_u32(&content[276..280]),
            feed: TOrder::read_u32(&content[280..284]),
        },
        imaging_bbox: BoundingBox {
            left: TOrder::read_u32(&content[284..288]),
            bottom: TOrder::read_u32(&content[288..292]),
            right: TOrder::read_u32(&content[292..296]),
            top: TOrder::read_u32(&content[296..300]),
        },
        insert_sheet: TOrder::read_u32(&content[300..304]),
        jog: TOrder::read_u32(&content[304..308]),
        leading_edge: TOrder::read_u32(&content[308..312]),
        margins: Margins {
            left: TOrder::read_u32(&content[312..316]),
            bottom: TOrder::read_u32(&content[316..320]),
        },
        manual_feed: TOrder::read_u32(&content[320..324]),
        media_position: TOrder::read_u32(&content[324..328]),
        media_weight: TOrder::read_u32(&content[328..332]),
        mirror_print: TOrder::read_u32(&content[332..336]),
        negative_print: TOrder::read_u32(&content[336..340]),
        num_copies: TOrder::read_u32(&content[340..344]),
        orientation: TOrder::read_u32(&content[344..348]),
        output_face_up: TOrder::read_u32(&content[348..352]),
        page_size: PageSize {
            width: TOrder::read_u32(&content[352..356]),
            height: TOrder::read_u32(&content[356..360]),
        },
        separations: TOrder::read_u32(&content[360..364]),
        tray_switch: TOrder::read_u32(&content[364..368]),
        tumble: TOrder::read_u32(&content[368..372]),
        width: TOrder::read_u32(&content[372..376]),
        height: TOrder::read_u32(&content[376..380]),
        cups_media_type: TOrder::read_u32(&content[380..384]),
        bits_per_color: TOrder::read_u32(&content[384..388]),
        bits_per_pixel: TOrder::read_u32(&content[388..392]),
        bytes_per_line: TOrder::read_u32(&content[392..396]),
        color_order: TOrder::read_u32(&content[396..400]),
        color_space: TOrder::read_u32(&content[400..404]),
        compression: TOrder::read_u32(&content[404..408]),
        row_count: TOrder::read_u32(&content[408..412]),
        row_feed: TOrder::read_u32(&content[412..416]),
        row_step: TOrder::read_u32(&content[416..420]),
        num_colors: TOrder::read_u32(&content[420..424]),
        borderless_scaling_factor: TOrder::read_f32(&content[424..428]),
        page_size_f32: PageSize {
            width: TOrder::read_f32(&content[428..432]),
            height: TOrder::read_f32(&content[432..436]),
        },
        imaging_bbox_f32: BoundingBox {
            left: TOrder::read_f32(&content[436..440]),
            bottom: TOrder::read_f32(&content[440..444]),
            right: TOrder::read_f32(&content[444..448]),
            top: TOrder::read_f32(&content[448..452]),
        },
        vendor_u32: array::from_fn(|i| {
            TOrder::read_u32(&content[VENDOR_U32_OFFSET + i * 4..VENDOR_U32_OFFSET + i * 4 + 4])
        }),
        vendor_f32: array::from_fn(|i| {
            TOrder::read_f32(&content[VENDOR_F32_OFFSET + i * 4..VENDOR_F32_OFFSET + i * 4 + 4])
        }),
        vendor_str,
        marker_type: read_text(&content[1604..1668])?,
        rendering_intent: read_text(&content[1668..1732])?,
        page_size_name: read_text(&content[1732..1796])?,
    })
}

fn write_page_header<TOrder>(content: &mut [u8], header: &PageHeader) -> Result<(), FormatError>
where
    TOrder: ByteOrder,
{
    write_text(&mut content[0..64], &header.media_class)?;
    write_text(&mut content[64..128], &header.media_color)?;
    write_text(&mut content[128..192], &header.media_type)?;
    write_text(&mut content[192..256], &header.output_type)?;
    TOrder::write_u32(&mut content[256..260], header.advance_distance);
    TOrder::write_u32(&mut content[260..264], header.advance_media);
    TOrder::write_u32(&mut content[264..268], header.collate);
    TOrder::write_u32(&mut content[268..272], header.cut_media);
    TOrder::write_u32(&mut content[272..276], header.duplex);
    TOrder::write_u32(&mut content[276..280], header.resolution.cross_feed);
    TOrder::write_u32(&mut content[280..284], header.resolution.feed);
    TOrder::write_u32(&mut content[284..288], header.imaging_bbox.left);
    TOrder::write_u32(&mut content[288..292], header.imaging_bbox.bottom);
    TOrder::write_u32(&mut content[292..296], header.imaging_bbox.right);
    TOrder::write_u32(&mut content[296..300], header.imaging_bbox.top);
    TOrder::write_u32(&mut content[300..304], header.insert_sheet);
    TOrder::write_u32(&mut content[304..308], header.jog);
    TOrder::write_u32(&mut content[308..312], header.leading_edge);
    TOrder::write_u32(&mut content[312..316], header.margins.left);
    TOrder::write_u32(&mut content[316..320], header.margins.bottom);
    TOrder::write_u32(&mut content[320..324], header.manual_feed);
    TOrder::write_u32(&mut content[324..328], header.media_position);
    TOrder::write_u32(&mut content[328..332], header.media_weight);
    TOrder::write_u32(&mut content[332..336], header.mirror_print);
    TOrder::write_u32(&mut content[336..340], header.negative_print);
    TOrder::write_u32(&mut content[340..344], header.num_copies);
    TOrder::write_u32(&mut content[344..348], header.orientation);
    TOrder::write_u32(&mut content[348..352], header.output_face_up);
    TOrder::write_u32(&mut content[352..356], header.page_size.width);
    TOrder::write_u32(&mut content[356..360], header.page_size.height);
    TOrder::write_u32(&mut content[360..364], header.separations);
    TOrder::write_u32(&mut content[364..368], header.tray_switch);
    TOrder::write_u32(&mut content[368..372], header.tumble);
    TOrder::write_u32(&mut content[372..376], header.width);
    TOrder::write_u32(&mut content[376..380], header.height);
    TOrder::write_u32(&mut content[380..384], header.cups_media_type);
    TOrder::write_u32(&mut content[384..388], header.bits_per_color);
    TOrder::write_u32(&mut content[388..392], header.bits_per_pixel);
    TOrder::write_u32(&mut content[392..396], header.bytes_per_line);
    TOrder::write_u32(&mut content[396..400], header.color_order);
    TOrder::write_u32(&mut content[400..404], header.color_space);
    TOrder::write_u32(&mut content[404..408], header.compression);
    TOrder::write_u32(&mut content[408..412], header.row_count);
    TOrder::write_u32(&mut content[412..416], header.row_feed);
    TOrder::write_u32(&mut content[416..420], header.row_step);
    TOrder::write_u32(&mut content[420..424], header.num_colors);
    TOrder::write_f32(&mut content[424..428], header.borderless_scaling_factor);
    TOrder::write_f32(&mut content[428..432], header.page_size_f32.width);
    TOrder::write_f32(&mut content[432..436], header.page_size_f32.height);
    TOrder::write_f32(&mut content[436..440], header.imaging_bbox_f32.left);
    TOrder::write_f32(&mut content[440..444], header.imaging_bbox_f32.bottom);
    TOrder::write_f32(&mut content[444..448], header.imaging_bbox_f32.right);
    TOrder::write_f32(&mut content[448..452], header.imaging_bbox_f32.top);
    for (i, &v) in header.vendor_u32.iter().enumerate() {
        let start = VENDOR_U32_OFFSET + i * 4;
        TOrder::write_u32(&mut content[start..start + 4], v);
    }
    for (i, &v) in header.vendor_f32.iter().enumerate() {
        let start = VENDOR_F32_OFFSET + i * 4;
        TOrder::write_f32(&mut content[start..start + 4], v);
    }
    for (i, s) in header.vendor_str.iter().enumerate() {
        write_text(&mut content[text_slot(i)], s)?;
    }
    write_text(&mut content[1604..1668], &header.marker_type)?;
    write_text(&mut content[1668..1732], &header.rendering_intent)?;
    write_text(&mut content[1732..1796], &header.page_size_name)?;
    Ok(())
}

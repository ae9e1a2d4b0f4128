use super::RasterByteOrder;
use num_enum::TryFromPrimitive;
use std::fmt;

/// Size of one CUPS Raster v3 page header in bytes.
pub const PAGE_HEADER_SIZE: usize = 1796;
/// Width of every fixed-size text slot in the page header.
pub const TEXT_FIELD_SIZE: usize = 64;
/// Number of vendor-defined integer, real and string slots.
pub const VENDOR_SLOTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
/// The magic word at the start of a RaS3 stream. It identifies both the format and
/// the byte order of every multi-byte field that follows.
/// # Note
/// As with the sync words written by CUPS, the underlying value is in native endianness.
/// Use [`RasterMagic::to_bytes`] to get the on-wire representation.
pub enum RasterMagic {
    /// `RaS3`, fields are big-endian.
    Forward = u32::from_ne_bytes(*b"RaS3"),
    /// `3SaR`, fields are little-endian.
    Reversed = u32::from_ne_bytes(*b"3SaR"),
}

impl RasterMagic {
    pub fn from_byte_order(byte_order: RasterByteOrder) -> Self {
        match byte_order {
            RasterByteOrder::BigEndian => RasterMagic::Forward,
            RasterByteOrder::LittleEndian => RasterMagic::Reversed,
        }
    }

    pub fn byte_order(&self) -> RasterByteOrder {
        match self {
            RasterMagic::Forward => RasterByteOrder::BigEndian,
            RasterMagic::Reversed => RasterByteOrder::LittleEndian,
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        (self as u32).to_ne_bytes()
    }
}

/// Known values of `cupsColorSpace`. Only used to name a color model in diagnostics,
/// the header itself keeps the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
pub enum CupsColorSpace {
    /// Luminance (DeviceGray)
    Gray = 0,
    RGB,
    RGBA,
    /// Black (DeviceK)
    Black,
    CMY,
    YMC,
    CMYK,
    YMCK,
    KCMY,
    KCMYcm,
    GMCK,
    GMCS,
    White,
    Gold,
    Silver,
    CIEXYZ,
    CIELab,
    RGBW,
    #[allow(non_camel_case_types)]
    sGray,
    #[allow(non_camel_case_types)]
    sRGB,
    AdobeRGB,
    // ICC hinted CIE Lab, 1 to 15 colors
    Icc1 = 32,
    Icc2,
    Icc3,
    Icc4,
    Icc5,
    Icc6,
    Icc7,
    Icc8,
    Icc9,
    IccA,
    IccB,
    IccC,
    IccD,
    IccE,
    IccF,
    // Device color, 1 to 15 colorants
    Device1 = 48,
    Device2,
    Device3,
    Device4,
    Device5,
    Device6,
    Device7,
    Device8,
    Device9,
    DeviceA,
    DeviceB,
    DeviceC,
    DeviceD,
    DeviceE,
    DeviceF,
}

/// Display helper for a raw `cupsColorSpace` value.
pub struct ColorSpaceName(pub u32);

impl fmt::Display for ColorSpaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CupsColorSpace::try_from_primitive(self.0) {
            Ok(color_space) => write!(f, "{:?} ({})", color_space, self.0),
            Err(_) => write!(f, "unknown ({})", self.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub cross_feed: u32,
    pub feed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundingBox<T> {
    pub left: T,
    pub bottom: T,
    pub right: T,
    pub top: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Margins {
    pub left: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PageSize<T> {
    pub width: T,
    pub height: T,
}

/// A decoded RaS3 page header.
///
/// Integer fields keep their raw 32-bit value, the filter only interprets the geometry
/// and color fields. Field order follows the on-wire layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageHeader {
    pub media_class: String,
    pub media_color: String,
    pub media_type: String,
    pub output_type: String,
    pub advance_distance: u32,
    pub advance_media: u32,
    pub collate: u32,
    pub cut_media: u32,
    pub duplex: u32,
    /// Hardware resolution in dots per inch
    pub resolution: Resolution,
    /// Page bounding box in points
    pub imaging_bbox: BoundingBox<u32>,
    pub insert_sheet: u32,
    pub jog: u32,
    pub leading_edge: u32,
    pub margins: Margins,
    pub manual_feed: u32,
    pub media_position: u32,
    pub media_weight: u32,
    pub mirror_print: u32,
    pub negative_print: u32,
    pub num_copies: u32,
    pub orientation: u32,
    pub output_face_up: u32,
    /// Width and length in points
    pub page_size: PageSize<u32>,
    pub separations: u32,
    pub tray_switch: u32,
    pub tumble: u32,
    /// `cupsWidth`, width of the page image in pixels
    pub width: u32,
    /// `cupsHeight`, height of the page image in pixels
    pub height: u32,
    pub cups_media_type: u32,
    pub bits_per_color: u32,
    /// `cupsBitsPerPixel`
    pub bits_per_pixel: u32,
    pub bytes_per_line: u32,
    pub color_order: u32,
    /// `cupsColorSpace`, 0 is grayscale
    pub color_space: u32,
    pub compression: u32,
    pub row_count: u32,
    pub row_feed: u32,
    pub row_step: u32,
    /// `cupsNumColors`
    pub num_colors: u32,
    pub borderless_scaling_factor: f32,
    pub page_size_f32: PageSize<f32>,
    pub imaging_bbox_f32: BoundingBox<f32>,
    pub vendor_u32: [u32; VENDOR_SLOTS],
    pub vendor_f32: [f32; VENDOR_SLOTS],
    pub vendor_str: [String; VENDOR_SLOTS],
    pub marker_type: String,
    pub rendering_intent: String,
    pub page_size_name: String,
}

impl PageHeader {
    /// Whether this page is single-channel grayscale, the only model the device accepts.
    pub fn is_grayscale(&self) -> bool {
        self.color_space == CupsColorSpace::Gray as u32 && self.num_colors == 1
    }
}

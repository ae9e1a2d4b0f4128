use super::FormatError;
use crate::model::cups::ColorSpaceName;
use thiserror::Error;

fn color_space_name(value: &u32) -> ColorSpaceName {
    ColorSpaceName(*value)
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Malformed raster: {0}")]
    Format(#[from] FormatError),
    #[error(
        "Unsupported color model on page {page}: color space {}, {num_colors} colors, only grayscale is supported",
        color_space_name(.color_space)
    )]
    UnsupportedColorModel {
        page: usize,
        color_space: u32,
        num_colors: u32,
    },
}

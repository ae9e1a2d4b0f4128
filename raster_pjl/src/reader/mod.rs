use crate::decode::{Limits, RasterStreamDecoder};
use crate::error::FilterError;
use crate::model::page::RasterDocument;
use futures::{AsyncRead, AsyncReadExt};
use log::debug;
use std::ops::DerefMut;
use std::pin::Pin;

/// Reads `reader` to the end and decodes the whole stream.
///
/// The format has no length field, so nothing can be decoded before the transport is drained.
pub async fn read_document<R>(
    mut reader: Pin<R>,
    limits: &Limits,
) -> Result<RasterDocument, FilterError>
where
    R: DerefMut<Target: AsyncRead>,
{
    let mut raw = Vec::new();
    reader.as_mut().read_to_end(&mut raw).await?;
    debug!("read {} bytes of raster data", raw.len());
    Ok(RasterStreamDecoder::with_limits(limits.clone()).decode(raw)?)
}

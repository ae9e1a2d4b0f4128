use super::pjl::{write_preamble, write_trailer};
use super::{JobMetadata, JobSettings};
use crate::error::FilterError;
use crate::model::page::{Page, RasterDocument};
use futures::{AsyncWrite, AsyncWriteExt};
use log::{debug, info};
use std::ops::DerefMut;
use std::pin::Pin;

/// Turns a decoded page into the bytes the print engine expects.
pub trait PageEncoder {
    /// Appends the device representation of `page` to `out`. `index` starts at 0.
    fn encode_page(
        &mut self,
        index: usize,
        page: &Page,
        out: &mut Vec<u8>,
    ) -> Result<(), FilterError>;
}

/// Writes the payload unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawPageEncoder;

impl PageEncoder for RawPageEncoder {
    fn encode_page(
        &mut self,
        _index: usize,
        page: &Page,
        out: &mut Vec<u8>,
    ) -> Result<(), FilterError> {
        out.extend_from_slice(page.payload());
        Ok(())
    }
}

/// Rejects pages the device cannot print, anything but single-channel grayscale.
pub fn validate_page(index: usize, page: &Page) -> Result<(), FilterError> {
    let header = page.header();
    if !header.is_grayscale() {
        return Err(FilterError::UnsupportedColorModel {
            page: index + 1,
            color_space: header.color_space,
            num_colors: header.num_colors,
        });
    }
    Ok(())
}

/// Writes one print job: the PJL preamble, every page through a [`PageEncoder`], and the
/// closing UEL.
///
/// Call `finish` after the last page, otherwise the printer is left in PCL mode.
pub struct JobEnvelopeEmitter<W, E> {
    writer: Pin<W>,
    encoder: E,
    metadata: JobMetadata,
    pages_written: usize,
    buffer: Vec<u8>,
}

impl<W, E> JobEnvelopeEmitter<W, E>
where
    W: DerefMut<Target: AsyncWrite>,
    E: PageEncoder,
{
    /// Writes the preamble and returns an emitter ready for the first page.
    pub async fn new(
        mut writer: Pin<W>,
        encoder: E,
        metadata: &JobMetadata,
        settings: &JobSettings,
    ) -> Result<Self, FilterError> {
        let preamble = write_preamble(metadata, settings);
        writer.as_mut().write_all(preamble.as_bytes()).await?;
        info!(
            "job {} for {}: \"{}\", {} copies, {} dpi, paper {}",
            metadata.job_id,
            metadata.user,
            metadata.title,
            metadata.copies,
            settings.resolution,
            settings.paper
        );
        Ok(JobEnvelopeEmitter {
            writer,
            encoder,
            metadata: metadata.clone(),
            pages_written: 0,
            buffer: Vec::new(),
        })
    }

    pub fn pages_written(&self) -> usize {
        self.pages_written
    }

    pub async fn write_page(&mut self, page: &Page) -> Result<(), FilterError> {
        let index = self.pages_written;
        validate_page(index, page)?;
        self.buffer.clear();
        self.encoder.encode_page(index, page, &mut self.buffer)?;
        self.writer.as_mut().write_all(&self.buffer).await?;
        self.pages_written += 1;
        debug!(
            "page {}: {} bytes of page data written",
            index + 1,
            self.buffer.len()
        );
        Ok(())
    }

    /// Ends the job and returns the underlying writer.
    pub async fn finish(mut self) -> Result<Pin<W>, FilterError> {
        let trailer = write_trailer(&self.metadata);
        self.writer.as_mut().write_all(trailer.as_bytes()).await?;
        self.writer.as_mut().flush().await?;
        info!("job {} done, {} pages", self.metadata.job_id, self.pages_written);
        Ok(self.writer)
    }
}

/// Emits `document` as one job.
///
/// Every page is validated before anything is written, so an unsupported page produces no
/// output at all.
pub async fn emit_job<W, E>(
    writer: Pin<W>,
    encoder: E,
    metadata: &JobMetadata,
    settings: &JobSettings,
    document: &RasterDocument,
) -> Result<Pin<W>, FilterError>
where
    W: DerefMut<Target: AsyncWrite>,
    E: PageEncoder,
{
    for (index, page) in document.pages().iter().enumerate() {
        validate_page(index, page)?;
    }
    let mut emitter = JobEnvelopeEmitter::new(writer, encoder, metadata, settings).await?;
    for page in document {
        emitter.write_page(page).await?;
    }
    emitter.finish().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::encode::encode_document;
    use crate::job::pjl::UEL;
    use crate::model::cups::PageHeader;
    use crate::model::RasterByteOrder;
    use chrono::NaiveDate;

    fn metadata() -> JobMetadata {
        JobMetadata {
            job_id: "7".to_string(),
            user: "bob".to_string(),
            title: "scan".to_string(),
            copies: 2,
            options: String::new(),
            file: None,
            timestamp: NaiveDate::from_ymd_opt(2023, 12, 31)
                .unwrap()
                .and_hms_opt(23, 59, 0)
                .unwrap(),
        }
    }

    fn page(color_space: u32, num_colors: u32, payload: Vec<u8>) -> Page {
        let header = PageHeader {
            width: payload.len() as u32,
            height: 1,
            bits_per_pixel: 8,
            color_space,
            num_colors,
            ..Default::default()
        };
        Page::new(header, payload).unwrap()
    }

    fn document(pages: &[Page]) -> RasterDocument {
        decode(encode_document(RasterByteOrder::BigEndian, pages).unwrap()).unwrap()
    }

    /// Tags every page so the output shows which encoder call produced it.
    struct Tagging;

    impl PageEncoder for Tagging {
        fn encode_page(
            &mut self,
            index: usize,
            page: &Page,
            out: &mut Vec<u8>,
        ) -> Result<(), FilterError> {
            out.push(b'<');
            out.push(b'0' + index as u8);
            out.extend_from_slice(page.payload());
            out.push(b'>');
            Ok(())
        }
    }

    #[tokio::test]
    async fn grayscale_job_layout() {
        let document = document(&[page(0, 1, vec![0x00, 0xff]), page(0, 1, vec![0x11])]);
        let mut output = Vec::new();
        emit_job(
            Pin::new(&mut output),
            Tagging,
            &metadata(),
            &JobSettings::default(),
            &document,
        )
        .await
        .unwrap();

        let preamble = write_preamble(&metadata(), &JobSettings::default());
        let trailer = write_trailer(&metadata());
        let mut expected = preamble.into_bytes();
        expected.extend_from_slice(&[b'<', b'0', 0x00, 0xff, b'>', b'<', b'1', 0x11, b'>']);
        expected.extend_from_slice(trailer.as_bytes());
        assert_eq!(output, expected);
        assert!(output.starts_with(UEL.as_bytes()));
    }

    #[tokio::test]
    async fn color_page_rejects_whole_job() {
        let document = document(&[page(0, 1, vec![0x00]), page(1, 1, vec![0x00])]);
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
                page: 2,
                color_space: 1,
                num_colors: 1
            }
        ));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn write_page_checks_channel_count() {
        let mut output = Vec::new();
        let mut emitter = JobEnvelopeEmitter::new(
            Pin::new(&mut output),
            RawPageEncoder,
            &metadata(),
            &JobSettings::default(),
        )
        .await
        .unwrap();
        emitter.write_page(&page(0, 1, vec![1, 2])).await.unwrap();
        let err = emitter
            .write_page(&page(0, 3, vec![1, 2, 3]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FilterError::UnsupportedColorModel {
                page: 2,
                num_colors: 3,
                ..
            }
        ));
        assert_eq!(emitter.pages_written(), 1);
    }

    #[test]
    fn unsupported_model_message_names_color_space() {
        let err = validate_page(0, &page(19, 3, vec![0; 3])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported color model on page 1: color space sRGB (19), 3 colors, only grayscale is supported"
        );
    }
}

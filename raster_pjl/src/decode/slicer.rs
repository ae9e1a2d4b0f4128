use crate::error::FormatError;
use crate::model::cups::PageHeader;
use bytes::Bytes;

/// Computes the number of payload bytes following `header`, `width * height * bits_per_pixel / 8`.
///
/// The geometry comes straight from the stream and is untrusted: zero dimensions, arithmetic
/// overflow and bit counts that are not a whole number of bytes are rejected here. The caller
/// still has to check the result against the bytes actually available.
pub fn compute_payload_length(header: &PageHeader) -> Result<usize, FormatError> {
    let invalid = || FormatError::InvalidGeometry {
        width: header.width,
        height: header.height,
        bits_per_pixel: header.bits_per_pixel,
    };
    if header.width == 0 || header.height == 0 || header.bits_per_pixel == 0 {
        return Err(invalid());
    }
    let num_bits = (header.width as u64)
        .checked_mul(header.height as u64)
        .and_then(|n| n.checked_mul(header.bits_per_pixel as u64))
        .ok_or_else(invalid)?;
    // Every declared pixel must be backed by payload bytes.
    if num_bits % 8 != 0 {
        return Err(invalid());
    }
    usize::try_from(num_bits / 8).map_err(|_| invalid())
}

/// Splits `length` payload bytes off the front of `buffer`, returning `(payload, remaining)`.
///
/// No bytes are copied, both halves share the original allocation.
pub fn slice_payload(mut buffer: Bytes, length: usize) -> Result<(Bytes, Bytes), FormatError> {
    if length > buffer.len() {
        return Err(FormatError::PayloadOverrun {
            expected: length,
            remaining: buffer.len(),
        });
    }
    let payload = buffer.split_to(length);
    Ok((payload, buffer))
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
    fn payload_length_from_geometry() {
        assert_eq!(compute_payload_length(&header(2, 1, 8)).unwrap(), 2);
        assert_eq!(compute_payload_length(&header(4960, 7016, 8)).unwrap(), 34_799_360);
        assert_eq!(compute_payload_length(&header(16, 2, 1)).unwrap(), 4);
        assert_eq!(compute_payload_length(&header(3, 1, 24)).unwrap(), 9);
    }

    #[test]
    fn unaligned_bits_are_invalid() {
        for h in [header(3, 3, 1), header(1, 1, 1), header(5, 1, 4)] {
            assert!(matches!(
                compute_payload_length(&h),
                Err(FormatError::InvalidGeometry { .. })
            ));
        }
        assert_eq!(compute_payload_length(&header(4, 2, 1)).unwrap(), 1);
    }

    #[test]
    fn zero_dimension_is_invalid() {
        for h in [header(0, 1, 8), header(1, 0, 8), header(1, 1, 0)] {
            assert!(matches!(
                compute_payload_length(&h),
                Err(FormatError::InvalidGeometry { .. })
            ));
        }
    }

    #[test]
    fn overflow_is_invalid() {
        let h = header(u32::MAX, u32::MAX, u32::MAX);
        assert!(matches!(
            compute_payload_length(&h),
            Err(FormatError::InvalidGeometry {
                width: u32::MAX,
                ..
            })
        ));
    }

    #[test]
    fn slice_splits_front() {
        let buffer = Bytes::from_static(&[1, 2, 3, 4, 5]);
        let (payload, rest) = slice_payload(buffer, 2).unwrap();
        assert_eq!(&payload[..], &[1, 2]);
        assert_eq!(&rest[..], &[3, 4, 5]);

        let (payload, rest) = slice_payload(rest, 3).unwrap();
        assert_eq!(&payload[..], &[3, 4, 5]);
        assert!(rest.is_empty());
    }

    #[test]
    fn slice_past_end_is_overrun() {
        let buffer = Bytes::from_static(&[1, 2, 3]);
        assert!(matches!(
            slice_payload(buffer, 4),
            Err(FormatError::PayloadOverrun {
                expected: 4,
                remaining: 3
            })
        ));
    }
}

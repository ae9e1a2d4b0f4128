use crate::error::FormatError;

#[derive(Clone, Debug)]
pub struct Limits {
    // The maximum number of payload bytes per page.
    pub bytes_per_page: u64,
    // The maximum number of pages per document.
    pub page_count: u64,
}

impl Limits {
    pub const NO_LIMITS: &Self = &Self {
        bytes_per_page: u64::MAX,
        page_count: u64::MAX,
    };

    pub(crate) fn check_page_index(&self, index: u64) -> Result<(), FormatError> {
        if index >= self.page_count {
            return Err(FormatError::LimitExceeded);
        }
        Ok(())
    }

    pub(crate) fn check_payload_length(&self, length: usize) -> Result<(), FormatError> {
        if length as u64 > self.bytes_per_page {
            return Err(FormatError::LimitExceeded);
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::NO_LIMITS.clone()
    }
}

use chrono::NaiveDateTime;
use clap::Parser;
use raster_pjl::job::JobMetadata;
use std::path::PathBuf;

/// Converts a RaS3 raster stream into a PJL print job.
///
/// Called by CUPS as `rastertodpp115 job-id user title copies options [file]`, reading the
/// raster from `file` or stdin and writing the job to stdout.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    pub job_id: String,
    pub user: String,
    pub title: String,
    pub copies: u32,
    pub options: String,
    pub file: Option<PathBuf>,
}

impl Cli {
    pub fn into_metadata(self, timestamp: NaiveDateTime) -> JobMetadata {
        JobMetadata {
            job_id: self.job_id,
            user: self.user,
            title: self.title,
            copies: self.copies,
            options: self.options,
            file: self.file,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn cups_arguments() {
        let cli = Cli::try_parse_from([
            "rastertodpp115",
            "17",
            "alice",
            "Quarterly report",
            "1",
            "PageSize=A4 Resolution=600dpi",
        ])
        .unwrap();
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let metadata = cli.into_metadata(timestamp);
        assert_eq!(metadata.job_id, "17");
        assert_eq!(metadata.title, "Quarterly report");
        assert_eq!(metadata.options, "PageSize=A4 Resolution=600dpi");
        assert_eq!(metadata.file, None);
    }

    #[test]
    fn optional_file_argument() {
        let cli =
            Cli::try_parse_from(["rastertodpp115", "1", "u", "t", "2", "", "/tmp/job.ras"]).unwrap();
        assert_eq!(cli.copies, 2);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/job.ras")));
    }

    #[test]
    fn wrong_argument_count() {
        assert!(Cli::try_parse_from(["rastertodpp115", "1", "u", "t", "1"]).is_err());
        assert!(
            Cli::try_parse_from(["rastertodpp115", "1", "u", "t", "1", "", "f", "extra"]).is_err()
        );
    }
}

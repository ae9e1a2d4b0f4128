use chrono::NaiveDateTime;
use log::{debug, warn};
use std::path::PathBuf;

/// Job information handed to a CUPS filter on its command line.
///
/// The filter core never reads the environment or the clock, the binary fills this in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMetadata {
    pub job_id: String,
    pub user: String,
    pub title: String,
    pub copies: u32,
    pub options: String,
    pub file: Option<PathBuf>,
    /// Local time the job was started
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PjlOrientation {
    Portrait,
    Landscape,
}

impl PjlOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PjlOrientation::Portrait => "PORTRAIT",
            PjlOrientation::Landscape => "LANDSCAPE",
        }
    }
}

/// Values written into the PJL preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSettings {
    /// Dots per inch
    pub resolution: u32,
    pub economode: bool,
    pub media_type: String,
    pub paper: String,
    pub orientation: PjlOrientation,
}

impl Default for JobSettings {
    fn default() -> Self {
        JobSettings {
            resolution: 600,
            economode: false,
            media_type: "REGULAR".to_string(),
            paper: "A4".to_string(),
            orientation: PjlOrientation::Portrait,
        }
    }
}

impl JobSettings {
    /// Applies the `key=value` pairs of a CUPS option string on top of the defaults.
    ///
    /// Unknown options are ignored and unusable values keep their default, a filter must not
    /// fail a job because of an option it does not understand.
    pub fn from_options(options: &str) -> Self {
        let mut settings = JobSettings::default();
        for option in options.split_whitespace() {
            let Some((key, value)) = option.split_once('=') else {
                debug!("ignoring option {}", option);
                continue;
            };
            let applied = match key {
                "Resolution" => parse_resolution(value).map(|dpi| settings.resolution = dpi),
                "EconoMode" | "TonerSaveMode" => {
                    parse_bool(value).map(|on| settings.economode = on)
                }
                "MediaType" => parse_keyword(value).map(|media| settings.media_type = media),
                "PageSize" | "media" => parse_paper(value).map(|paper| settings.paper = paper),
                "orientation-requested" => {
                    parse_orientation(value).map(|o| settings.orientation = o)
                }
                _ => {
                    debug!("ignoring option {}", key);
                    continue;
                }
            };
            if applied.is_none() {
                warn!("invalid value {:?} for option {}, using default", value, key);
            }
        }
        settings
    }
}

fn parse_resolution(value: &str) -> Option<u32> {
    let value = value.strip_suffix("dpi").unwrap_or(value);
    // "600x600dpi" names cross feed and feed resolution, only square ones are meaningful here
    let cross_feed = value.split('x').next()?;
    match cross_feed.parse::<u32>() {
        Ok(dpi) if dpi > 0 => Some(dpi),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn parse_keyword(value: &str) -> Option<String> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(value.to_ascii_uppercase())
}

fn parse_paper(value: &str) -> Option<String> {
    let paper = match value {
        "iso_a4_210x297mm" => "A4",
        "iso_a5_148x210mm" => "A5",
        "iso_b5_176x250mm" | "jis_b5_182x257mm" => "B5",
        "na_letter_8.5x11in" => "LETTER",
        "na_legal_8.5x14in" => "LEGAL",
        "na_executive_7.25x10.5in" => "EXECUTIVE",
        _ => return parse_keyword(value),
    };
    Some(paper.to_string())
}

fn parse_orientation(value: &str) -> Option<PjlOrientation> {
    match value {
        "3" | "6" => Some(PjlOrientation::Portrait),
        "4" | "5" => Some(PjlOrientation::Landscape),
        _ => None,
    }
}

use super::{JobMetadata, JobSettings};

/// Universal Exit Language, switches the printer back to PJL.
pub const UEL: &str = "\x1b%-12345X";

// PJL quoted strings end at the next quote and may not contain control characters. The
// preamble declares HPROMAN8, so anything outside ASCII becomes `?`.
fn quoted(value: &str) -> String {
    value
        .chars()
        .filter(|&c| c != '"' && !c.is_control())
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

/// Renders the PJL job preamble, ending with the switch into PCL.
pub fn write_preamble(metadata: &JobMetadata, settings: &JobSettings) -> String {
    let job = quoted(&metadata.job_id);
    let user = quoted(&metadata.user);
    format!(
        "{UEL}@PJL
@PJL SET HOLD=OFF
@PJL SET JOBNAME=\"{job}\"
@PJL SET USERNAME=\"{user}\"
@PJL JOB NAME=\"{job}\"
@PJL PRINTLOG ITEM = 1,PRINTER
@PJL PRINTLOG ITEM = 2,{printlog_time}
@PJL PRINTLOG ITEM = 3,{user}
@PJL PRINTLOG ITEM = 4,Linux
@PJL SET STRINGCODESET=HPROMAN8
@PJL SET LOGINUSER=\"{user}\"
@PJL SET RESOLUTION = {resolution}
@PJL SET ECONOMODE = {economode}
@PJL SET LESSPAPERCURL=OFF
@PJL SET FIXINTENSITYUP=OFF
@PJL SET TRANSFERLEVELUP=ON
@PJL TRANSFERLEVEL=0
@PJL SET MEDIATYPE={media_type}
@PJL DEFAULT AUTOSLEEP = ON
@PJL DEFAULT TIMEOUTSLEEP = 1
@PJL SET JOBTIME=\"{job_time}\"
@PJL SET ORIENTATION = {orientation}
@PJL SET PAPER = {paper}
@PJL SET PAGEPROTECT = AUTO
@PJL ENTER LANGUAGE = PCL
",
        printlog_time = metadata.timestamp.format("%a,%d %b %Y %H:%M:%S"),
        resolution = settings.resolution,
        economode = if settings.economode { "ON" } else { "OFF" },
        media_type = settings.media_type,
        job_time = metadata.timestamp.format("%Y%m%d%H%M%S"),
        orientation = settings.orientation.as_str(),
        paper = settings.paper,
    )
}

/// Renders the end of job, returning the printer to PJL.
pub fn write_trailer(metadata: &JobMetadata) -> String {
    format!(
        "{UEL}@PJL EOJ NAME=\"{}\"\n{UEL}",
        quoted(&metadata.job_id)
    )
}

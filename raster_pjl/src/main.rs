mod cli;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use cli::Cli;
use futures::executor::block_on;
use futures::io::AllowStdIo;
use log::{error, info, Level};
use raster_pjl::decode::Limits;
use raster_pjl::job::{emit_job, JobSettings, RawPageEncoder};
use raster_pjl::reader::read_document;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::pin::Pin;
use std::process;

// CUPS picks up stderr lines by their prefix.
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let prefix = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARNING",
                Level::Info => "INFO",
                Level::Debug | Level::Trace => "DEBUG",
            };
            writeln!(buf, "{}: {}", prefix, record.args())
        })
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let metadata = cli.into_metadata(Local::now().naive_local());
    let settings = JobSettings::from_options(&metadata.options);

    let document = match &metadata.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            block_on(read_document(
                Pin::new(&mut AllowStdIo::new(file)),
                Limits::NO_LIMITS,
            ))?
        }
        None => block_on(read_document(
            Pin::new(&mut AllowStdIo::new(io::stdin().lock())),
            Limits::NO_LIMITS,
        ))?,
    };
    info!(
        "{} pages decoded, {:?} raster",
        document.len(),
        document.byte_order()
    );

    let stdout = io::stdout();
    let mut output = AllowStdIo::new(BufWriter::new(stdout.lock()));
    block_on(emit_job(
        Pin::new(&mut output),
        RawPageEncoder,
        &metadata,
        &settings,
        &document,
    ))?;
    Ok(())
}

fn main() {
    init_logger();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

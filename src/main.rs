use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bmp_filter_rs::cli::{self, Cli};
use bmp_filter_rs::image_pipeline::{
    FilterPipeline, Image, ImageReader, ImageWriter, PipelineConfig, PipelineError,
};
use bmp_filter_rs::logger;

use tracing::{error, info};

/// Saves `image`, asking on stdin for another path after every failed write.
fn save_interactively<R: ImageReader, W: ImageWriter>(
    pipeline: &FilterPipeline<R, W>,
    mut output: PathBuf,
    image: &Image,
) -> Result<()> {
    let mut lines = io::stdin().lock().lines();
    loop {
        let err = match pipeline.save(&output, image) {
            Ok(()) => {
                info!("Saved {}", output.display());
                return Ok(());
            }
            Err(e) => e,
        };

        error!("{err}");
        println!("{err}\nPlease, enter the path to output file again:");
        io::stdout().flush()?;

        let line = loop {
            match lines.next() {
                Some(Ok(line)) if line.trim().is_empty() => continue,
                other => break other,
            }
        };
        match line {
            Some(line) => output = PathBuf::from(line.context("Failed to read output path")?.trim()),
            None => return Err(err).context("No output path left to try"),
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init_with_default(if args.verbose { "debug" } else { "info" });

    info!("Starting bmp-filter...");

    let output = args.output().map_err(PipelineError::from)?.clone();

    let config = PipelineConfig::builder()
        .record_timings(args.verbose)
        .build();
    let mut pipeline = FilterPipeline::new(config);

    let mut image = pipeline.load(&args.input)?;
    info!(
        "Loaded {} ({}x{})",
        args.input.display(),
        image.width(),
        image.height()
    );

    pipeline.extend(cli::parse_filters(&args.filters)?);
    info!(
        "Filters: {}",
        pipeline.filter_names().collect::<Vec<_>>().join(" -> ")
    );

    pipeline
        .run(&mut image)
        .map_err(PipelineError::from)?;

    save_interactively(&pipeline, output, &image)
}

use anyhow::Context;
use clap::Parser;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use workflow::config::WorkflowConfig;
use workflow::runner::{FrameRecord, Runner};

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Synthetic frame driver for the FMCW presence core")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 20)]
    frames: usize,
    #[arg(long, default_value_t = 32)]
    chirps: usize,
    #[arg(long, default_value_t = 64)]
    samples: usize,
    /// Seed for the generator noise
    #[arg(long)]
    seed: Option<u64>,
    /// Write one JSON record per frame to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn write_report(path: &Path, records: &[FrameRecord]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("creating report {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record).context("serializing frame record")?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.frames, args.chirps, args.samples)
    };
    if let Some(seed) = args.seed {
        workflow_config.generator.seed = seed;
    }

    let runner = Runner::new(workflow_config);
    let result = runner.execute()?;

    for record in &result.records {
        println!(
            "frame {:>4} amplitude {:>8.3} range {:>5.1} ({:.3} m) azimuth {:>6.1} deg elevation {:>6.1} deg active {} slope {:+.3}",
            record.frame,
            record.result.amplitude,
            record.result.range,
            record.range_m,
            record.azimuth_deg,
            record.elevation_deg,
            record.presence.active,
            record.presence.trend.slope
        );
    }
    println!(
        "processed {} frames, detections {}, rejected {}, presence events {}",
        result.metrics.processed, result.metrics.detections, result.metrics.rejected, result.events
    );

    if let Some(path) = args.report {
        write_report(&path, &result.records)?;
        println!("report written to {}", path.display());
    }

    Ok(())
}

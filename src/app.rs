//! Top-level application orchestration.
//!
//! `src/main.rs` only maps the result to an exit code; this module is the
//! "real main" that:
//! - loads `.env` defaults and parses CLI arguments
//! - sets up logging
//! - runs the planner and prints reports/plots
//! - writes optional exports

use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Command, PlanArgs, ShowArgs};
use crate::domain::{PlanConfig, TagSource};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `tuner` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` is optional; it only supplies defaults for clap's `env` fallbacks.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Command::Plan(args) => handle_plan(args),
        Command::Show(args) => handle_show(args),
    }
}

/// Route `log` output to stderr so stdout stays clean for reports.
///
/// `RUST_LOG` is honoured; each `-v` raises the level one step and `-vvv`
/// adds source locations.
fn setup_logging(verbosity: u8) -> Result<(), AppError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(LevelFilter::Info),
        1 => builder.filter_level(LevelFilter::Debug),
        2 => builder.filter_level(LevelFilter::Trace),
        _ => {
            builder.filter_level(LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder
        .try_init()
        .map_err(|e| AppError::new(1, format!("Failed to initialise logging: {e}")))
}

fn handle_plan(args: PlanArgs) -> Result<(), AppError> {
    let config = plan_config_from_args(&args)?;
    let run = pipeline::run_plan(&config)?;

    println!(
        "{}",
        crate::report::format_plan_summary(config.sample_rate_hz, config.n_channels, &run.plan)
    );
    println!("{}", crate::report::format_tag_table(&run.tags, &run.plan));
    println!(
        "Channelizer: {}",
        crate::report::format_channelizer_line(&run.tags, &run.plan)
    );

    if config.plot {
        let freqs: Vec<f64> = run.tags.iter().map(|t| t.frequency_mhz).collect();
        println!();
        print!(
            "{}",
            crate::plot::render_channel_map(&run.plan, &freqs, config.plot_width)
        );
    }

    // Optional exports.
    if let Some(path) = &config.export_plan {
        let file = crate::io::build_plan_file(
            config.sample_rate_hz,
            config.n_channels,
            &run.tags,
            &run.plan,
        );
        crate::io::write_plan_json(path, &file)?;
        debug!("wrote plan JSON to '{}'", path.display());
    }
    if let Some(path) = &config.export_csv {
        crate::io::write_assignments_csv(path, &run.tags, &run.plan)?;
        debug!("wrote assignments CSV to '{}'", path.display());
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let file = crate::io::read_plan_json(&args.plan)?;
    debug!(
        "plan generated by {} at {}",
        file.tool,
        file.generated_at.to_rfc3339()
    );

    println!(
        "{}",
        crate::report::format_plan_summary(file.sample_rate_hz, file.n_channels, &file.plan)
    );
    println!("{}", crate::report::format_tag_table(&file.tags, &file.plan));
    println!(
        "Channelizer: {}",
        crate::report::format_channelizer_line(&file.tags, &file.plan)
    );

    if args.plot {
        let freqs: Vec<f64> = file.tags.iter().map(|t| t.frequency_mhz).collect();
        println!();
        print!("{}", crate::plot::render_channel_map(&file.plan, &freqs, args.width));
    }

    Ok(())
}

/// Resolve CLI flags into the pipeline's configuration.
pub fn plan_config_from_args(args: &PlanArgs) -> Result<PlanConfig, AppError> {
    let tags = match (&args.tags_file, args.tags.is_empty()) {
        (Some(path), _) => TagSource::File(path.clone()),
        (None, false) => TagSource::Inline(args.tags.clone()),
        (None, true) => {
            return Err(AppError::new(2, "Provide tag frequencies with --tag or --tags-file."));
        }
    };

    Ok(PlanConfig {
        sample_rate_hz: args.sample_rate,
        n_channels: args.channels,
        tags,
        plot: args.plot,
        plot_width: args.width,
        export_plan: args.export.clone(),
        export_csv: args.export_csv.clone(),
    })
}

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use anyhow::Result;

use normconv::cli::{self, Args, CliConfig};
use normconv::conversion::{convert_json_payload, ConversionStats};
use normconv::error::{ConversionError, ConversionResult};
use normconv::node::json;
use normconv::parser::{directory, PayloadSource};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            cli::handle_error(&e);
            std::process::exit(2);
        }
    };

    if let Err(e) = handle_conversion(&config) {
        cli::handle_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn handle_conversion(config: &CliConfig) -> ConversionResult<()> {
    let args = &config.args;

    if args.stdin {
        return convert_source(&PayloadSource::Stdin, config);
    }

    let input = args.input.as_ref().ok_or_else(|| {
        ConversionError::other(anyhow::anyhow!(
            "No input provided. Use --stdin or provide an input path"
        ))
    })?;

    // Check if input looks like JSON (starts with {, [ or is null)
    let trimmed = input.trim();
    let path = PathBuf::from(input);
    if trimmed.starts_with('{') || trimmed.starts_with('[') || trimmed == "null" {
        convert_source(&PayloadSource::String(input.clone()), config)
    } else if path.is_file() {
        convert_source(&PayloadSource::File(path), config)
    } else if path.is_dir() {
        convert_directory(&path, config)
    } else {
        Err(ConversionError::io(
            "Input path does not exist".to_string(),
            Some(path),
        ))
    }
}

fn convert_source(source: &PayloadSource, config: &CliConfig) -> ConversionResult<()> {
    tracing::debug!(source = %source.description(), "converting payload");

    let payload = source.parse()?;
    let (output, stats) = normalize_payload(&payload, config)?;

    if config.args.validate_only {
        cli::show_success("Payload normalizes", config.is_quiet());
    } else if let Some(output_path) = &config.args.output {
        write_output(output_path, &output)?;
        cli::show_success(
            &format!("Converted to: {}", output_path.display()),
            config.is_quiet(),
        );
    } else {
        println!("{}", output);
    }

    if config.args.stats {
        output_statistics(&stats, config.is_quiet());
    }

    Ok(())
}

fn normalize_payload(
    payload: &serde_json::Value,
    config: &CliConfig,
) -> ConversionResult<(String, ConversionStats)> {
    let (value, stats) = if config.args.stats {
        let node = json::decode(payload)?;
        config.normalizer.convert_with_stats(&node)?
    } else {
        (
            convert_json_payload(payload, &config.normalizer)?,
            ConversionStats::default(),
        )
    };

    Ok((config.render(&value)?, stats))
}

fn write_output(output_path: &Path, content: &str) -> ConversionResult<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConversionError::io(e.to_string(), Some(parent.to_path_buf())))?;
    }
    std::fs::write(output_path, content)
        .map_err(|e| ConversionError::io(e.to_string(), Some(output_path.to_path_buf())))
}

fn convert_directory(input_dir: &Path, config: &CliConfig) -> ConversionResult<()> {
    let args = &config.args;
    let output_dir = match (&args.output, args.validate_only) {
        (_, true) => None,
        (Some(dir), false) => Some(dir.as_path()),
        (None, false) => {
            return Err(ConversionError::other(anyhow::anyhow!(
                "Output directory required for directory conversion"
            )))
        }
    };

    let json_files = directory::find_json_files(input_dir, args.recursive)
        .map_err(|e| ConversionError::io(e.to_string(), Some(input_dir.to_path_buf())))?;

    if json_files.is_empty() {
        if !args.quiet {
            println!("No JSON files found in {}", input_dir.display());
        }
        return Ok(());
    }

    if !args.quiet {
        println!("Found {} JSON files", json_files.len());
    }

    let mut total = ConversionStats::default();
    let mut failures = 0usize;

    for json_file in &json_files {
        let relative_path = json_file.strip_prefix(input_dir).unwrap_or(json_file);

        let result = PayloadSource::File(json_file.clone())
            .parse()
            .map_err(ConversionError::from)
            .and_then(|payload| normalize_payload(&payload, config))
            .and_then(|(output, stats)| {
                if let Some(output_dir) = output_dir {
                    let output_file =
                        cli::path_mapping::map_input_to_output(input_dir, json_file, output_dir);
                    write_output(&output_file, &output)?;
                }
                Ok(stats)
            });

        match result {
            Ok(stats) => {
                total.merge(&stats);
                cli::show_success(&relative_path.display().to_string(), args.quiet);
            }
            Err(e) => {
                failures += 1;
                cli::show_error(&format!("{}: {}", relative_path.display(), e.user_message()));
                if !config.continue_on_error() {
                    return Err(ConversionError::other(anyhow::anyhow!(
                        "Aborting due to conversion error in {}",
                        relative_path.display()
                    )));
                }
            }
        }
    }

    if args.stats {
        output_statistics(&total, args.quiet);
    }

    if failures > 0 {
        return Err(ConversionError::other(anyhow::anyhow!(
            "{} of {} files failed to convert",
            failures,
            json_files.len()
        )));
    }

    Ok(())
}

fn output_statistics(stats: &ConversionStats, quiet: bool) {
    if quiet {
        return;
    }

    eprintln!("\nConversion Statistics:");
    eprintln!("{}", stats.summary());
}

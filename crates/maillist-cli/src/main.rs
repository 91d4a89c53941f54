//! Mailing list CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use maillist_cli::logging::{LogConfig, init_logging};
use maillist_cli::settings::load_settings;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{
    AppContext, run_campaign, run_catalog, run_export, run_fields, run_list, run_segment,
    run_upload,
};
use crate::summary::print_upload_outcome;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = load_settings(cli.config.as_deref());
    let ctx = match AppContext::new(settings, cli.data_file.as_deref(), cli.user.as_deref()) {
        Ok(ctx) => ctx,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let result = match &cli.command {
        Command::Catalog => run_catalog(&ctx).map(|()| 0),
        Command::Campaign(command) => run_campaign(&ctx, command).map(|()| 0),
        Command::Upload(args) => run_upload(&ctx, args).map(|outcome| match outcome {
            Some(outcome) => {
                print_upload_outcome(&outcome);
                if outcome.is_complete() { 0 } else { 1 }
            }
            None => 0,
        }),
        Command::List(command) => run_list(&ctx, command).map(|()| 0),
        Command::Segment(command) => run_segment(&ctx, command).map(|()| 0),
        Command::Export(args) => run_export(&ctx, args).map(|()| 0),
        Command::Fields { campaign } => run_fields(&ctx, campaign).map(|()| 0),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Maps CLI flags onto a [`LogConfig`].
///
/// `--log-level` beats `-v`/`-q`, and either one disables the `RUST_LOG`
/// override.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: cli.log_level.is_none() && !cli.verbosity.is_present(),
        with_ansi,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}

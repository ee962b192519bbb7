use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::cell::Cell;
use std::str::FromStr;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use cli::exec::{command_line, render, run_shell};
use config::Config;

fn setup_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::from_default_env();

    if cli.is_verbose() {
        builder.filter_level(LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        // Let everything through env_logger; the global max level does the gating
        builder.filter_level(LevelFilter::Trace);
        builder.init();
        log::set_max_level(LevelFilter::Info);
        return;
    }

    builder.init();
}

/// Apply `log-level` from the config unless `-v` or `RUST_LOG` already decided.
fn apply_config_log_level(cli: &Cli, config: &Config) {
    if cli.is_verbose() || std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Some(level) = config.log_level.as_deref() {
        match LevelFilter::from_str(level) {
            Ok(level) => log::set_max_level(level),
            Err(_) => eprintln!("{} unknown log-level '{}', ignoring", "warning:".yellow(), level),
        }
    }
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    match &cli.command {
        Commands::Retry {
            times,
            interval,
            command,
        } => handle_retry_command(*times, *interval, command, config).await,
        Commands::Forever { interval, command } => handle_forever_command(*interval, command, config).await,
        Commands::Each { items, command } => handle_each_command(items, command).await,
        Commands::Map { items, command } => handle_map_command(items, command).await,
        Commands::Filter { items, command } => handle_filter_command(items, command).await,
        Commands::Repeat { count, command } => handle_repeat_command(*count, command).await,
    }
}

async fn handle_retry_command(
    times: Option<i64>,
    interval: Option<i64>,
    command: &[String],
    config: &Config,
) -> Result<()> {
    // Reject bad input before anything runs
    let policy = config.retry_policy(times, interval)?;
    let line = command_line(command);
    info!("Retrying `{}` up to {} times, {:?} apart", line, policy.times, policy.interval);

    match policy.run(|| run_shell(&line)).await {
        Ok(retried) => {
            println!("{}", retried.value);
            println!(
                "{} after {} failed attempt(s)",
                "Succeeded".green(),
                retried.attempts
            );
            Ok(())
        }
        Err(exhausted) => {
            let attempts = exhausted.attempts();
            println!("{} after {} failed attempt(s)", "Gave up".red(), attempts);
            Err(exhausted.into_source()).context(format!("retries:{}", attempts))
        }
    }
}

async fn handle_forever_command(interval: Option<i64>, command: &[String], config: &Config) -> Result<()> {
    let interval = config.forever_interval(interval)?;
    let line = command_line(command);
    info!("Polling `{}` every {:?} until it succeeds", line, interval);

    let output = seqflow::retry_forever(interval, || run_shell(&line)).await;
    println!("{}", output);
    Ok(())
}

async fn handle_each_command(items: &[String], command: &[String]) -> Result<()> {
    let template = command_line(command);

    seqflow::each_series(items, |item| {
        let line = render(&template, item);
        async move {
            let output = run_shell(&line).await?;
            if !output.is_empty() {
                println!("{}", output);
            }
            println!("{} {}", "Done:".green(), item);
            Ok::<_, eyre::Report>(())
        }
    })
    .await
    .context("each failed")
}

async fn handle_map_command(items: &[String], command: &[String]) -> Result<()> {
    let template = command_line(command);

    let outputs = seqflow::map_series(items, |item| {
        let line = render(&template, item);
        async move { run_shell(&line).await }
    })
    .await
    .context("map failed")?;

    for (item, output) in items.iter().zip(outputs) {
        println!("{} {}", format!("{}:", item).cyan(), output);
    }
    Ok(())
}

async fn handle_filter_command(items: &[String], command: &[String]) -> Result<()> {
    let template = command_line(command);

    let kept = seqflow::filter_series(items, |item| {
        let line = render(&template, item);
        async move { Ok::<_, eyre::Report>(run_shell(&line).await.is_ok()) }
    })
    .await?;

    for item in kept {
        println!("{}", item);
    }
    Ok(())
}

async fn handle_repeat_command(count: u64, command: &[String]) -> Result<()> {
    let line = command_line(command);
    let done = Cell::new(0u64);

    seqflow::whilst(
        || done.get() < count,
        || {
            let iteration = done.get() + 1;
            let line = &line;
            let done = &done;
            async move {
                let output = run_shell(line).await?;
                if !output.is_empty() {
                    println!("{}", output);
                }
                info!("Iteration {}/{} complete", iteration, count);
                done.set(iteration);
                Ok::<_, eyre::Report>(())
            }
        },
    )
    .await
    .context(format!("repeat stopped after {} iteration(s)", done.get()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging before config so load messages are not lost
    setup_logging(&cli);

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_config_log_level(&cli, &config);

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}

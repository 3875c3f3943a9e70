mod cli;

use webmfix::{config, fix, inspect};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "webmfix=trace,webmfix_ebml=trace".to_string()
        } else {
            "webmfix=info,webmfix_ebml=info".to_string()
        }
    });

    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fix {
            input,
            duration_ms,
            output,
            mime_type,
            json,
        } => fix_file(
            &input,
            cli.config.as_deref(),
            duration_ms,
            output.as_deref(),
            mime_type.as_deref(),
            json,
        ),
        Commands::Inspect { file, json } => inspect_file(&file, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("webmfix {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn fix_file(
    input: &Path,
    config_path: Option<&Path>,
    duration_ms: f64,
    output: Option<&Path>,
    mime_type: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let report = fix::fix_file(&config, input, output, duration_ms, mime_type)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}

fn inspect_file(path: &Path, json: bool) -> Result<()> {
    let file = inspect::load(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&file.summary())?);
    } else {
        print!("{}", inspect::render_tree(&file.summary())?);
        println!("{}", inspect::duration_line(&file));
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(path)?;
    config::validate_config(&config)?;

    println!("Configuration is valid");
    println!("  Output MIME type: {}", config.output.mime_type);
    println!("  Output suffix: {}", config.output.suffix);
    println!("  Fallback copy: {}", config.fix.fallback_copy);

    Ok(())
}

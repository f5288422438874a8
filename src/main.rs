use anyhow::Context;
use codepad::logging::Logger;
use codepad::{error, CliArgs, EditorConfig, TuiApplication};
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let cli = CliArgs::parse(&args).context("invalid arguments")?;
    let config = EditorConfig::load(&cli).context("failed to load configuration")?;

    if let Some(path) = config.resolve_log_path() {
        let logger = if config.debug {
            Logger::for_development()
        } else {
            Logger::new(LevelFilter::Info)
        };
        logger.with_file_output(path).install();
    }
    log::info!("starting {} ({:?})", env!("CARGO_PKG_NAME"), config.variant);

    let mut app = TuiApplication::new(config);
    app.run().context("editor terminated with an error")?;
    Ok(())
}

fn print_usage() {
    println!("codepad {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE: codepad [--simple] [--interpreter CMD] [--debug-log PATH] [FILE]");
    println!();
    println!("  --simple            plain editor without line numbers, highlighting or run");
    println!("  --interpreter CMD   interpreter used by Run (default: python)");
    println!("  --debug-log PATH    write debug log to PATH");
}

use anyhow::Result;
use par_term_config::Config;
use par_term_typeset::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // Initialize unified logging: routes all log::info!() etc. to the debug log file.
    // When RUST_LOG is set, also mirrors to stderr for terminal debugging.
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied below).
    par_term_typeset::debug::init_log_bridge(runtime_options.log_level);

    let config = match &runtime_options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    par_term_typeset::debug::apply_config_level(config.log_level);

    log::info!(
        "Starting par-term-typeset {} ({:?} at {}px)",
        par_term_typeset::VERSION,
        config.font_family,
        config.font_size
    );

    match cli::run_layout(&runtime_options.layout, &config) {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", cli::error_line(&e));
            std::process::exit(1);
        }
    }
}

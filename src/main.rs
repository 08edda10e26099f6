use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use treeswap::config::{self, TreeswapConfig};
use treeswap::log_status;

mod commands;
mod output;
mod tty;

use commands::replace::{self, ReplaceArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "treeswap")]
#[command(version = VERSION)]
#[command(
    about = "Recursively, case-insensitively replace a word in file contents and in file/folder names, starting from a directory"
)]
struct Cli {
    #[command(flatten)]
    replace: ReplaceArgs,

    /// Print one JSON envelope instead of per-entry lines
    #[arg(long)]
    json: bool,

    /// Config file to use instead of ~/.config/treeswap/treeswap.json
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> treeswap::Result<TreeswapConfig> {
    match path {
        Some(path) => {
            let config = config::load_config_from(path)?;
            log_status!("config", "Loaded {}", path.display());
            Ok(config)
        }
        None => Ok(config::load_config()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            let code = output::print_error(&err, cli.json);
            return ExitCode::from(output::exit_code_to_u8(code));
        }
    };
    let json = cli.json || config.defaults.json;

    tty::status("treeswap is working...");

    let exit_code = match replace::run(cli.replace, &config, json) {
        Ok((data, exit_code)) => {
            if json {
                if let Err(err) = output::print_success(data) {
                    return ExitCode::from(output::exit_code_to_u8(output::print_error(
                        &err, false,
                    )));
                }
            }
            exit_code
        }
        Err(err) => output::print_error(&err, json),
    };

    ExitCode::from(output::exit_code_to_u8(exit_code))
}

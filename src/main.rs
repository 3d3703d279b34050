// rtail - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing (usage errors exit 1, help/version exit 0)
// 2. Logging initialisation (debug mode support)
// 3. Request validation
// 4. Running the tail session against stdout

use clap::{CommandFactory, Parser};
use rtail::app::cancel::CancelToken;
use rtail::app::session;
use rtail::core::model::{RawOptions, TailRequest};
use rtail::util::error::TailError;
use rtail::util::{self, constants};
use std::path::PathBuf;

/// rtail - print the last lines of a file, optionally following it.
#[derive(Parser, Debug)]
#[command(name = "rtail", version, about)]
struct Cli {
    /// File to read.
    path: Option<PathBuf>,

    /// File to read (overrides the positional argument).
    #[arg(short = 'p', long = "path", value_name = "PATH")]
    path_opt: Option<PathBuf>,

    /// Number of trailing lines to print.
    #[arg(short = 'n', long = "lines", value_name = "COUNT", default_value_t = constants::DEFAULT_LINE_COUNT)]
    lines: usize,

    /// Print a `==> path <==` banner before the content.
    #[arg(short = 'H', long = "headers")]
    headers: bool,

    /// Keep printing new content as the file grows.
    #[arg(short = 'f', long = "follow")]
    follow: bool,

    /// Delay between polls in follow mode, in milliseconds.
    #[arg(short = 's', long = "sleep-interval", value_name = "MS", default_value_t = constants::DEFAULT_POLL_INTERVAL_MS)]
    sleep_interval_ms: u64,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl From<Cli> for RawOptions {
    fn from(cli: Cli) -> Self {
        Self {
            positional: cli.path,
            path: cli.path_opt,
            lines: cli.lines,
            show_header: cli.headers,
            follow: cli.follow,
            poll_interval_ms: cli.sleep_interval_ms,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; everything else is
            // a usage error on stderr.
            let code = if e.use_stderr() {
                constants::EXIT_FAILURE
            } else {
                constants::EXIT_SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    util::logging::init(cli.debug);

    let request = match TailRequest::from_raw(cli.into()).map_err(TailError::from) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected command line");
            eprintln!("Error: {e}\n\n{}", Cli::command().render_usage());
            std::process::exit(e.exit_code());
        }
    };

    tracing::info!(
        version = constants::APP_VERSION,
        file = %request.path.display(),
        lines = request.lines,
        follow = request.follow,
        "rtail starting"
    );

    // Nothing cancels the token in the binary; the process is stopped
    // externally while following.
    let cancel = CancelToken::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = session::run_session(&request, &mut out, &cancel) {
        tracing::error!(error = %e, "Session failed");
        eprintln!("{}: {e}", constants::APP_NAME);
        std::process::exit(e.exit_code());
    }
}

#![forbid(unsafe_code)]

//! Scenario runner for the CAC TAT contact form.
//!
//! Prints one JSONL event per line to stdout; diagnostics go to stderr
//! through `tracing`. Exits non-zero when any scenario fails.
//!
//! # Running
//!
//! ```sh
//! cargo run -p cactat-harness
//! cargo run -p cactat-harness -- --list
//! ```

use std::env;
use std::process;

use cactat_harness::{HarnessConfig, RunEnv, RunLog, run_suite, scenarios};
use cactat_page::HttpFetch;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
CAC TAT scenario runner

USAGE:
    cactat-harness [OPTIONS]

OPTIONS:
    --filter=TEXT     Run only scenarios whose name contains TEXT
    --list            Print scenario names and exit
    --live            Run the HTTP availability scenario against the network
    --json            Emit diagnostics as JSON instead of plain text
    --help, -h        Show this help message
    --version, -V     Show version

ENVIRONMENT VARIABLES:
    RUST_LOG                  Diagnostic filter (default: warn)
    CACTAT_FIXTURES_DIR       Fixture directory (default: bundled fixtures)
    CACTAT_LIVE_HTTP          Same as --live
    CACTAT_RADIO_MODE         independent | exclusive
    CACTAT_REQUIRED_TRIM      Treat whitespace-only values as empty
    CACTAT_AVAILABILITY_URL   URL for the HTTP scenario
    CACTAT_HTTP_TIMEOUT_MS    Request timeout
    CACTAT_DEBUG_TRACE        Print form debug trace lines to stderr";

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Opts {
    filter: Option<String>,
    list: bool,
    live: bool,
    json: bool,
}

enum Parsed {
    Run(Opts),
    Exit(i32, String),
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Parsed {
    let mut opts = Opts::default();
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Parsed::Exit(0, HELP_TEXT.to_string()),
            "--version" | "-V" => return Parsed::Exit(0, format!("cactat-harness {VERSION}")),
            "--list" => opts.list = true,
            "--live" => opts.live = true,
            "--json" => opts.json = true,
            other => {
                if let Some(val) = other.strip_prefix("--filter=") {
                    opts.filter = Some(val.to_string());
                } else {
                    return Parsed::Exit(
                        2,
                        format!("Unknown argument: {other}\nRun with --help for usage information."),
                    );
                }
            }
        }
    }
    Parsed::Run(opts)
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[cfg(feature = "live-http")]
fn live_fetcher(config: &HarnessConfig) -> Option<Box<dyn HttpFetch>> {
    match cactat_page::ReqwestFetcher::new(config.availability.timeout_ms) {
        Ok(fetcher) => Some(Box::new(fetcher)),
        Err(err) => {
            tracing::error!(error = %err, "could not build HTTP client");
            None
        }
    }
}

#[cfg(not(feature = "live-http"))]
fn live_fetcher(_config: &HarnessConfig) -> Option<Box<dyn HttpFetch>> {
    tracing::warn!("built without the live-http feature; the HTTP scenario will be skipped");
    None
}

fn main() {
    let opts = match parse_args(env::args().skip(1)) {
        Parsed::Run(opts) => opts,
        Parsed::Exit(code, message) => {
            if code == 0 {
                println!("{message}");
            } else {
                eprintln!("{message}");
            }
            process::exit(code);
        }
    };

    if opts.list {
        for scenario in scenarios() {
            println!("{}", scenario.name);
        }
        return;
    }

    init_tracing(opts.json);

    let config = HarnessConfig::from_env();
    let config = if opts.live { config.live_http(true) } else { config };
    let fetcher = if config.live_http { live_fetcher(&config) } else { None };

    let mut log = RunLog::new(std::io::stdout());
    log.log_start("cac-tat", &RunEnv::capture(&config));
    let report = run_suite(&config, opts.filter.as_deref(), fetcher.as_deref(), &mut log);

    tracing::info!(
        passed = report.passed(),
        failed = report.failed(),
        skipped = report.skipped(),
        "suite finished"
    );
    if !report.is_success() {
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Parsed {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
        assert!(matches!(parse(&[]), Parsed::Run(o) if o == Opts::default()));
    }

    #[test]
    fn flags_and_filter() {
        let Parsed::Run(opts) = parse(&["--json", "--live", "--filter=product"]) else {
            panic!("expected run");
        };
        assert!(opts.json);
        assert!(opts.live);
        assert!(!opts.list);
        assert_eq!(opts.filter.as_deref(), Some("product"));
    }

    #[test]
    fn help_and_unknown() {
        assert!(matches!(parse(&["-h"]), Parsed::Exit(0, text) if text.contains("--filter")));
        assert!(matches!(parse(&["--bogus"]), Parsed::Exit(2, _)));
    }
}

//! svn-runner binary entry point.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;
use svn_runner::cli::{self, Args};
use svn_runner::commands::Arguments;
use svn_runner::config::Config;
use svn_runner::execution::OutputSource;
use svn_runner::{logging, ExecOutcome, LineClassifier, ParsedLine, ProcessRunner, SvnCommand};
use tracing::{error, info, warn};

/// Exit code used when the run is cancelled with Ctrl-C.
const CANCELLED_EXIT_CODE: u8 = 130;

/// One output line in `--json` mode.
#[derive(Serialize)]
struct JsonLine<'a> {
    stream: OutputSource,
    line: &'a str,
    parsed: Option<ParsedLine>,
}

/// Echoes svn output to the console.
struct ConsoleCommand {
    args: Vec<String>,
    binary: bool,
    json: bool,
    classifier: LineClassifier,
}

impl ConsoleCommand {
    fn print_json(&self, stream: OutputSource, line: &str) {
        let parsed = match stream {
            OutputSource::Stdout => self.classifier.classify(line),
            OutputSource::Stderr => None,
        };
        let record = JsonLine {
            stream,
            line,
            parsed,
        };
        match serde_json::to_string(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = %e, "failed to encode output line"),
        }
    }
}

impl SvnCommand for ConsoleCommand {
    fn arguments(&self) -> Vec<String> {
        self.args.clone()
    }

    fn has_binary_output(&self) -> bool {
        self.binary
    }

    fn output_line(&mut self, line: &str) {
        if self.json {
            self.print_json(OutputSource::Stdout, line);
        } else {
            println!("{line}");
        }
    }

    fn output_bytes(&mut self, bytes: Vec<u8>) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(&bytes).and_then(|_| stdout.flush()) {
            error!(error = %e, "failed to write output");
        }
    }

    fn error_line(&mut self, line: &str) {
        if self.json {
            self.print_json(OutputSource::Stderr, line);
        } else {
            eprintln!("{line}");
        }
    }
}

fn build_command(args: &Args, config: &Config) -> ConsoleCommand {
    let mut svn_args = args.svn_args.iter();
    let subcommand = svn_args.next().cloned().unwrap_or_default();
    let argv = Arguments::new(subcommand)
        .global(&config.to_global_options())
        .targets(svn_args.cloned())
        .build();

    ConsoleCommand {
        args: argv,
        binary: args.binary,
        json: args.json,
        classifier: LineClassifier::new(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Try 'svn-runner --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    let _ = logging::init_with_filter(config.log_filter());

    let runner = Arc::new(ProcessRunner::new(config.to_runner_config()));
    let mut command = build_command(&args, &config);

    let mut worker = {
        let runner = Arc::clone(&runner);
        tokio::task::spawn_blocking(move || runner.exec(&mut command))
    };

    let joined = tokio::select! {
        res = &mut worker => res,
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("interrupt received, cancelling svn");
            runner.interrupt();
            worker.await
        }
    };

    match joined {
        Ok(Ok(ExecOutcome::Completed { exit_code })) => {
            info!(exit_code, "svn finished");
            ExitCode::from(u8::try_from(exit_code).unwrap_or(1))
        }
        Ok(Ok(ExecOutcome::Cancelled)) => ExitCode::from(CANCELLED_EXIT_CODE),
        Ok(Err(e)) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: svn task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

//! blameline - who last touched this line, and when
//!
//! Binary entry point: blames one line and prints the rendered message.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use blameline::clipboard::copy_to_clipboard;
use blameline::config::Config;
use blameline::format::{Numeric, now_seconds};
use blameline::git::{BlameError, Severity};
use blameline::process::ProcessError;

#[derive(Parser, Debug)]
#[command(
    name = "blameline",
    version,
    about = "Show who last changed a line of a file, and when"
)]
struct Cli {
    /// File to blame (relative paths resolve against the current directory)
    file: PathBuf,

    /// 1-based line number
    line: usize,

    /// git binary to run
    #[arg(long, env = "BLAMELINE_GIT", default_value = "git")]
    git: String,

    /// Message template, e.g. "${author.name} (${time.ago})"
    #[arg(long, env = "BLAMELINE_FORMAT")]
    format: Option<String>,

    /// Render the inline annotation instead of the status message
    #[arg(long)]
    inline: bool,

    /// Relative time phrasing
    #[arg(long, value_enum, default_value_t = NumericArg::Always)]
    numeric: NumericArg,

    /// Truncate the message to this many characters
    #[arg(long)]
    max_length: Option<usize>,

    /// Also print the URL of the tracking remote
    #[arg(long)]
    remote: bool,

    /// Copy the full revision id to the clipboard
    #[arg(long)]
    copy: bool,

    /// Write a debug log to this file
    #[arg(long, env = "BLAMELINE_LOG")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NumericArg {
    /// "1 day ago"
    Always,
    /// "yesterday"
    Auto,
}

impl From<NumericArg> for Numeric {
    fn from(arg: NumericArg) -> Self {
        match arg {
            NumericArg::Always => Numeric::Always,
            NumericArg::Auto => Numeric::Auto,
        }
    }
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config {
            git_program: self.git.clone(),
            numeric: self.numeric.into(),
            log_file: self.log_file.clone(),
            ..Config::default()
        };
        if let Some(ref template) = self.format {
            if self.inline {
                config.inline_template = template.clone();
            } else {
                config.status_template = template.clone();
            }
        }
        if let Some(max) = self.max_length {
            config.max_length = Some(max);
        }
        config
    }
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = cli.config();

    if let Some(ref path) = config.log_file {
        blameline::logger::init(path)
            .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;
    }

    run(&cli, &config)
}

/// Blame the requested line and print the result
fn run(cli: &Cli, config: &Config) -> Result<ExitCode> {
    let path = std::path::absolute(&cli.file)
        .wrap_err_with(|| format!("cannot resolve {}", cli.file.display()))?;

    let mut coordinator = config.coordinator();
    let attribution = match coordinator
        .start(&path, cli.line)
        .and_then(|pending| pending.wait())
    {
        Ok(attribution) => attribution,
        Err(e) => return Ok(report(&e)),
    };

    println!(
        "{}",
        config.formatter(cli.inline).render(&attribution, now_seconds())
    );

    if cli.remote
        && let Some(dir) = path.parent()
    {
        match config.git().tracking_remote_url(dir) {
            Ok(Some(url)) => println!("{url}"),
            Ok(None) => eprintln!("no remote configured"),
            Err(e) => {
                report(&e);
            }
        }
    }

    if cli.copy {
        copy_to_clipboard(&attribution.revision_id)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Print a lookup failure according to its severity
fn report(err: &BlameError) -> ExitCode {
    match err.severity() {
        Severity::Info => {
            blameline::info!("lookup: {}", err);
            println!("{err}");
            ExitCode::SUCCESS
        }
        Severity::Warning => {
            blameline::warn!("lookup failed: {:?}", err);
            eprintln!("warning: {err}");
            if let BlameError::Process(ProcessError::NoOutput { stderr, .. }) = err
                && !stderr.is_empty()
            {
                eprintln!("{stderr}");
            }
            ExitCode::FAILURE
        }
        Severity::Error => {
            blameline::error!("lookup failed: {:?}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

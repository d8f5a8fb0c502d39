//! htmlmd - Convert HTML files to Markdown
//!
//! Usage:
//!   htmlmd input.html -o output.md
//!   htmlmd "docs/*.html" -o output_md/
//!   htmlmd index.html -o . -v
//!   cat page.html | htmlmd - > page.md
//!   htmlmd --interactive

mod batch;
mod interactive;

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as ClapParser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};

use htmlmd::{Converter, ConverterOptions, DEFAULT_MAX_DEPTH};

#[derive(ClapParser)]
#[command(
    version,
    about = "Convert HTML file(s) to Markdown",
    long_about = "Converts HTML files to Markdown.\n\n\
                  INPUT is a file path or a glob pattern (quote patterns containing\n\
                  wildcards). Use `-` to read HTML from stdin.\n\n\
                  If --output names a directory, ends with a path separator, or the\n\
                  pattern matches several files, one .md file per input is written\n\
                  there. With a single input, --output may name the output file.\n\
                  Without --output, .md files are created alongside the inputs."
)]
struct Cli {
    /// Input HTML file path, glob pattern, or `-` for stdin
    #[arg(value_name = "INPUT", required_unless_present = "interactive")]
    input: Option<String>,

    /// Output file or directory
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Additional tag whose content is dropped (repeatable)
    #[arg(long = "ignore-tag", value_name = "TAG")]
    ignore_tags: Vec<String>,

    /// Reject documents nested deeper than this
    #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Start an interactive session
    #[arg(short, long, conflicts_with_all = ["input", "output"])]
    interactive: bool,

    /// Also write log messages to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn init_logger(filter_level: LevelFilter, logfile: Option<&Path>) -> anyhow::Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        filter_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));
    if let Some(filename) = logfile {
        let file = File::create(filename)
            .with_context(|| format!("Cannot create log file {}", filename.display()))?;
        loggers.push(WriteLogger::new(filter_level, Config::default(), file));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    init_logger(args.verbose.log_level_filter(), args.log_file.as_deref())?;

    let converter = Converter::with_options(ConverterOptions {
        extra_ignored_tags: args.ignore_tags.clone(),
        max_depth: args.max_depth,
    });

    if args.interactive {
        interactive::run(&converter)?;
        return Ok(ExitCode::SUCCESS);
    }

    match args.input.as_deref() {
        Some("-") => {
            convert_stdin(&converter, args.output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Some(pattern) => {
            let summary = batch::run(&converter, pattern, args.output.as_deref())?;
            if summary.failed > 0 {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        None => unreachable!("clap requires INPUT unless --interactive"),
    }
}

fn convert_stdin(converter: &Converter, output: Option<&Path>) -> anyhow::Result<()> {
    let mut html = String::new();
    io::stdin()
        .read_to_string(&mut html)
        .context("Failed to read HTML from stdin")?;

    let markdown = converter.convert_html(&html)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &markdown)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Writing Markdown to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            writeln!(writer, "{}", markdown)?;
            writer.flush()?;
        }
    }
    Ok(())
}

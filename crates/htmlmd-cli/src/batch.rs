//! Batch conversion of files matched by a glob pattern.

use std::fs;
use std::path::{is_separator, Path, PathBuf};

use anyhow::{bail, Context};

use htmlmd::Converter;

/// Where converted files are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Next to each input, with a `.md` extension
    Alongside,
    /// Inside a directory, one `<stem>.md` per input
    Directory(PathBuf),
    /// A single named output file
    File(PathBuf),
}

/// One input file and the path its Markdown goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Expand a path or glob pattern into the files it matches
pub fn expand_inputs(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let entries: Vec<PathBuf> = glob::glob(pattern)
        .with_context(|| format!("Invalid pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    if entries.is_empty() {
        bail!("No files found matching pattern: {}", pattern);
    }
    Ok(entries)
}

/// Decide how `--output` is interpreted for the given number of inputs
pub fn resolve_target(output: Option<&Path>, input_count: usize) -> OutputTarget {
    let Some(path) = output else {
        return OutputTarget::Alongside;
    };

    let ends_with_separator = path
        .as_os_str()
        .to_string_lossy()
        .chars()
        .last()
        .is_some_and(is_separator);

    if path.is_dir() || ends_with_separator {
        OutputTarget::Directory(path.to_path_buf())
    } else if input_count > 1 {
        log::warn!(
            "Multiple input files specified; treating output '{}' as a directory.",
            path.display()
        );
        OutputTarget::Directory(path.to_path_buf())
    } else {
        OutputTarget::File(path.to_path_buf())
    }
}

/// Pair every input with its output path
pub fn plan_jobs(inputs: &[PathBuf], target: &OutputTarget) -> Vec<Job> {
    inputs
        .iter()
        .map(|input| {
            let output = match target {
                OutputTarget::Alongside => input.with_extension("md"),
                OutputTarget::Directory(dir) => dir.join(markdown_name(input)),
                OutputTarget::File(file) => file.clone(),
            };
            Job {
                input: input.clone(),
                output,
            }
        })
        .collect()
}

fn markdown_name(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".md");
    PathBuf::from(name)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Convert every file matched by `pattern`, continuing past failures
pub fn run(converter: &Converter, pattern: &str, output: Option<&Path>) -> anyhow::Result<Summary> {
    let inputs = expand_inputs(pattern)?;
    log::info!("Found {} file(s) to convert.", inputs.len());

    let target = resolve_target(output, inputs.len());
    if let OutputTarget::Directory(dir) = &target {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create output directory {}", dir.display()))?;
    }

    let mut summary = Summary::default();
    for job in plan_jobs(&inputs, &target) {
        if is_same_file(&job.input, &job.output) {
            log::error!(
                "Input and output file paths are the same: {}. Skipping.",
                job.input.display()
            );
            summary.skipped += 1;
            continue;
        }

        match convert_file(converter, &job) {
            Ok(()) => summary.succeeded += 1,
            Err(err) => {
                log::error!("Error converting file {}: {:#}", job.input.display(), err);
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "Converted {} file(s), {} failed, {} skipped.",
        summary.succeeded,
        summary.failed,
        summary.skipped
    );
    Ok(summary)
}

/// Read, convert and write a single file
pub fn convert_file(converter: &Converter, job: &Job) -> anyhow::Result<()> {
    log::info!("Processing file: {}", job.input.display());

    let html = fs::read_to_string(&job.input)
        .with_context(|| format!("Failed to read {}", job.input.display()))?;
    let markdown = converter.convert_html(&html)?;

    if let Some(parent) = job.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            log::info!("Creating output directory: {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    log::info!("Writing Markdown to: {}", job.output.display());
    fs::write(&job.output, markdown)
        .with_context(|| format!("Failed to write {}", job.output.display()))?;

    log::info!(
        "Successfully converted {} to {}",
        job.input.display(),
        job.output.display()
    );
    Ok(())
}

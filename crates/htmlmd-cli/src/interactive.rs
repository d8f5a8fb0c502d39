//! Prompt-driven conversion session.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use htmlmd::Converter;

/// Line that ends pasted HTML
const PASTE_TERMINATOR: &str = "---ENDHTML---";

/// Run a session on the process's stdin and stdout
pub fn run(converter: &Converter) -> io::Result<()> {
    let stdin = io::stdin();
    Session::new(converter, stdin.lock(), io::stdout()).run()
}

/// An interactive session over any line reader and writer
pub struct Session<'a, R, W> {
    converter: &'a Converter,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(converter: &'a Converter, input: R, output: W) -> Self {
        Self {
            converter,
            input,
            output,
        }
    }

    /// Loop until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Interactive HTML to Markdown Converter ---")?;

        loop {
            writeln!(self.output, "\nSelect input method:")?;
            writeln!(self.output, "  1. Provide HTML file path")?;
            writeln!(self.output, "  2. Paste HTML content directly")?;
            writeln!(self.output, "  q. Quit")?;
            let Some(choice) = self.prompt("Enter your choice (1, 2, or q): ")? else {
                break;
            };

            let html = match choice.to_lowercase().as_str() {
                "1" => match self.read_file()? {
                    Some(html) => html,
                    None => continue,
                },
                "2" => self.read_paste()?,
                "q" => {
                    writeln!(self.output, "Exiting converter.")?;
                    break;
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Please enter 1, 2, or q.")?;
                    continue;
                }
            };

            if html.trim().is_empty() {
                log::warn!("Received empty HTML content. Skipping conversion.");
                continue;
            }

            let markdown = match self.converter.convert_html(&html) {
                Ok(markdown) => markdown,
                Err(err) => {
                    log::error!("HTML Conversion Error: {}", err);
                    writeln!(
                        self.output,
                        "Could not convert the provided HTML. Please check the input."
                    )?;
                    continue;
                }
            };

            writeln!(self.output, "\n--- Conversion Successful ---")?;
            self.deliver(&markdown)?;
        }

        Ok(())
    }

    /// Print a prompt and read one trimmed line, `None` at end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_file(&mut self) -> io::Result<Option<String>> {
        loop {
            let Some(path) = self.prompt("Enter the path to the input HTML file: ")? else {
                return Ok(None);
            };
            if path.is_empty() {
                writeln!(self.output, "Input file path cannot be empty.")?;
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(html) => {
                    log::info!("Reading HTML from: {}", path);
                    return Ok(Some(html));
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    log::error!("Input file not found at '{}'. Please try again.", path);
                }
                Err(err) => {
                    log::error!("Error reading file '{}': {}", path, err);
                    return Ok(None);
                }
            }
        }
    }

    fn read_paste(&mut self) -> io::Result<String> {
        writeln!(self.output, "Paste your HTML content below.")?;
        writeln!(
            self.output,
            "Type '{}' on a new line and press Enter when done:",
            PASTE_TERMINATOR
        )?;

        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().eq_ignore_ascii_case(PASTE_TERMINATOR) {
                break;
            }
            lines.push(line.to_string());
        }

        log::info!("Received HTML content from paste.");
        Ok(lines.join("\n"))
    }

    /// Offer the converted Markdown for printing or saving
    fn deliver(&mut self, markdown: &str) -> io::Result<()> {
        loop {
            writeln!(self.output, "\nSelect output method:")?;
            writeln!(self.output, "  1. Print Markdown to console")?;
            writeln!(self.output, "  2. Save Markdown to file")?;
            writeln!(self.output, "  c. Cancel output (convert new input)")?;
            let Some(choice) = self.prompt("Enter your choice (1, 2, or c): ")? else {
                return Ok(());
            };

            match choice.to_lowercase().as_str() {
                "1" => {
                    writeln!(self.output, "\n--- Markdown Output ---")?;
                    writeln!(self.output, "{}", markdown)?;
                    writeln!(self.output, "--- End Markdown Output ---")?;
                    return Ok(());
                }
                "2" => {
                    if self.save(markdown)? {
                        return Ok(());
                    }
                    writeln!(self.output, "Returning to output options.")?;
                }
                "c" => {
                    writeln!(self.output, "Output cancelled.")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice. Please enter 1, 2, or c.")?,
            }
        }
    }

    /// Save to a user-chosen path; false when the user gives up
    fn save(&mut self, markdown: &str) -> io::Result<bool> {
        loop {
            let Some(path) = self.prompt("Enter the path for the output Markdown file: ")? else {
                return Ok(false);
            };
            if path.is_empty() {
                writeln!(self.output, "Output file path cannot be empty.")?;
                continue;
            }

            let path = Path::new(&path);
            if path.exists() {
                let message = format!("File '{}' already exists. Overwrite? (y/N): ", path.display());
                let confirmed = self.prompt(&message)?.is_some_and(|a| a.eq_ignore_ascii_case("y"));
                if !confirmed {
                    writeln!(
                        self.output,
                        "Operation cancelled. Please choose a different file name."
                    )?;
                    continue;
                }
            }

            match write_markdown(path, markdown) {
                Ok(()) => {
                    writeln!(self.output, "Successfully saved Markdown to {}", path.display())?;
                    return Ok(true);
                }
                Err(err) => {
                    log::error!("Error writing file '{}': {}", path.display(), err);
                    let retry = self
                        .prompt("Failed to save. Try a different path? (y/N): ")?
                        .is_some_and(|a| a.eq_ignore_ascii_case("y"));
                    if !retry {
                        return Ok(false);
                    }
                }
            }
        }
    }
}

fn write_markdown(path: &Path, markdown: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            log::info!("Creating output directory: {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }
    log::info!("Writing Markdown to: {}", path.display());
    fs::write(path, markdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session_output(script: &str) -> String {
        let converter = Converter::new();
        let mut output = Vec::new();
        Session::new(&converter, Cursor::new(script.to_string()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_paste_and_print() {
        let out = session_output("2\n<h1>Title</h1>\n<p>Body</p>\n---ENDHTML---\n1\nq\n");
        assert!(out.contains("--- Conversion Successful ---"));
        assert!(out.contains("--- Markdown Output ---\n# Title\n\nBody\n--- End Markdown Output ---"));
        assert!(out.contains("Exiting converter."));
    }

    #[test]
    fn test_paste_until_end_of_input() {
        let out = session_output("2\n<p>tail</p>");
        assert!(out.contains("--- Conversion Successful ---"));
    }

    #[test]
    fn test_invalid_choices_and_empty_paste() {
        let out = session_output("x\n2\n---ENDHTML---\nq\n");
        assert!(out.contains("Invalid choice. Please enter 1, 2, or q."));
        assert!(!out.contains("Conversion Successful"));
    }

    #[test]
    fn test_read_from_file_after_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        fs::write(&input, "<ul><li>a</li></ul>").unwrap();
        let missing = dir.path().join("missing.html");

        let script = format!(
            "1\n\n{}\n{}\nc\nq\n",
            missing.display(),
            input.display()
        );
        let out = session_output(&script);
        assert!(out.contains("Input file path cannot be empty."));
        assert!(out.contains("--- Conversion Successful ---"));
        assert!(out.contains("Output cancelled."));
    }

    #[test]
    fn test_save_with_overwrite_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out.md");

        let script = format!(
            "2\n<p>first</p>\n---ENDHTML---\n2\n{path}\nq\n",
            path = target.display()
        );
        session_output(&script);
        assert_eq!(fs::read_to_string(&target).unwrap(), "first");

        // Declining the overwrite asks again; the second answer accepts
        let script = format!(
            "2\n<p>second</p>\n---ENDHTML---\n2\n{path}\nn\n{path}\ny\nq\n",
            path = target.display()
        );
        let out = session_output(&script);
        assert!(out.contains("Operation cancelled. Please choose a different file name."));
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }
}

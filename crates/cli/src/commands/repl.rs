//! Interactive modes: the line-by-line REPL and the two-option menu.
//!
//! Both are generic over their input and output so tests can drive them
//! with in-memory buffers.

use std::io::{self, BufRead, Write};
use std::path::Path;

use robolang_core::{check_path, FileSystemProvider, Session, Verdict};

use super::render_verdict;
use crate::config::Settings;

/// Read lines until end of input, printing the verdict for everything
/// entered so far after each one. Returns the last verdict.
pub(crate) fn run_repl<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    settings: &Settings,
) -> io::Result<Verdict> {
    let mut session = Session::new(settings.options.clone());
    let mut last = Verdict::Accepted;
    for line in input.lines() {
        let line = line?;
        last = session.push_line(&line);
        writeln!(out, "{}", render_verdict(&last, settings.output))?;
        out.flush()?;
    }
    tracing::debug!(lines = session.lines().len(), "repl finished");
    Ok(last)
}

/// Prompt for manual entry (1) or a file path (2). Returns whether the
/// final verdict was `si`.
pub(crate) fn run_menu<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    settings: &Settings,
) -> io::Result<bool> {
    writeln!(out, "Choose one of the following options:")?;
    writeln!(out, "1. Enter the program manually")?;
    writeln!(out, "2. Read the program from a .txt file")?;
    write!(out, "Choose (1 or 2): ")?;
    out.flush()?;

    let mut choice = String::new();
    input.read_line(&mut choice)?;
    match choice.trim() {
        "1" => {
            writeln!(out, "Enter the program, one line at a time:")?;
            let verdict = run_repl(input, out, settings)?;
            Ok(verdict.is_accepted())
        }
        "2" => {
            write!(out, "Path to the .txt file: ")?;
            out.flush()?;
            let mut path = String::new();
            input.read_line(&mut path)?;
            let verdict = check_path(
                &FileSystemProvider,
                Path::new(path.trim()),
                &settings.options,
            );
            writeln!(out, "{}", render_verdict(&verdict, settings.output))?;
            Ok(verdict.is_accepted())
        }
        other => {
            tracing::debug!(choice = other, "invalid menu choice");
            writeln!(out, "Invalid option. Please choose 1 or 2.")?;
            Ok(false)
        }
    }
}

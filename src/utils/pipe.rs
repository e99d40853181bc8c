//! Pass-through of piped path lists
//!
//! Lets gomu sit in a shell pipeline (`git diff --name-only | gomu ...`):
//! paths arriving on stdin are collected and echoed unchanged.

use std::io::{self, BufRead, IsTerminal as _, Write};

/// Read newline-delimited paths from `reader` and echo them to `writer`
///
/// Lines are trimmed and empty ones dropped. Reading stops at end of input or
/// at the first read error; paths read before the error are still echoed.
///
/// # Errors
///
/// Returns an error if:
/// - Writing to `writer` fails
#[inline]
pub fn passthrough_paths<R: BufRead, W: Write>(reader: R, writer: &mut W) -> io::Result<Vec<String>> {
    let paths: Vec<String> = reader
        .lines()
        .map_while(Result::ok)
        .map(|line| line.trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect();

    for path in &paths {
        writeln!(writer, "{path}")?;
    }
    writer.flush()?;

    Ok(paths)
}

/// Pass piped stdin through to stdout
///
/// Returns an empty list without reading when stdin is a terminal, since
/// reading would block waiting for input that never comes.
///
/// # Errors
///
/// Returns an error if:
/// - Writing to stdout fails
#[inline]
pub fn read_piped_paths() -> io::Result<Vec<String>> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    forward_piped_paths(interactive, stdin.lock(), &mut io::stdout().lock())
}

/// Pass `reader` through to `writer` unless the input is an interactive
/// terminal, in which case nothing is read
///
/// # Errors
///
/// Returns an error if:
/// - Writing to `writer` fails
#[inline]
pub fn forward_piped_paths<R: BufRead, W: Write>(
    interactive: bool,
    reader: R,
    writer: &mut W,
) -> io::Result<Vec<String>> {
    if interactive {
        return Ok(Vec::new());
    }
    passthrough_paths(reader, writer)
}

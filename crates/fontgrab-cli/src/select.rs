//! Interactive choice of which reachable fonts to download.
//!
//! The list is printed numbered from 1 and the answer is one line:
//! `all` (or `*`), `none` (or nothing), or a mix of indices and inclusive
//! ranges separated by commas or spaces, e.g. `1, 3-5 8`.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "Download which fonts? [all | none | 1,3-5]: ";

/// A selection line that could not be understood.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{0}' is not a number or a range like 2-4")]
    Malformed(String),

    #[error("{index} is out of range (1-{count})")]
    OutOfRange { index: usize, count: usize },
}

/// Parse a selection line into sorted, unique, zero-based indices.
pub fn parse_selection(input: &str, count: usize) -> Result<Vec<usize>, SelectionError> {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "all" | "*" | "a" => return Ok((0..count).collect()),
        "" | "none" | "n" => return Ok(Vec::new()),
        _ => {}
    }

    let mut picked = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let (start, end) = match token.split_once('-') {
            Some((a, b)) => (parse_index(a, token)?, parse_index(b, token)?),
            None => {
                let n = parse_index(token, token)?;
                (n, n)
            }
        };
        if start > end {
            return Err(SelectionError::Malformed(token.to_string()));
        }
        for index in [start, end] {
            if index == 0 || index > count {
                return Err(SelectionError::OutOfRange { index, count });
            }
        }
        picked.extend((start - 1)..end);
    }

    picked.sort_unstable();
    picked.dedup();
    Ok(picked)
}

fn parse_index(raw: &str, token: &str) -> Result<usize, SelectionError> {
    raw.trim()
        .parse()
        .map_err(|_| SelectionError::Malformed(token.to_string()))
}

/// The URLs at `indices`, in list order.
pub fn apply_selection(urls: &[String], indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .filter_map(|&i| urls.get(i).cloned())
        .collect()
}

/// Show the numbered list and read a selection until one parses.
///
/// Ctrl-C and Ctrl-D select nothing. Blocks on the terminal.
pub fn prompt_selection(urls: &[String]) -> anyhow::Result<Vec<String>> {
    eprintln!();
    eprintln!("Reachable fonts:");
    let width = urls.len().to_string().len();
    for (i, url) in urls.iter().enumerate() {
        eprintln!("  {:>width$}. {url}", i + 1);
    }
    eprintln!();

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => match parse_selection(&line, urls.len()) {
                Ok(indices) => return Ok(apply_selection(urls, &indices)),
                Err(e) => eprintln!("  {e}"),
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_and_none() {
        assert_eq!(parse_selection("all", 3), Ok(vec![0, 1, 2]));
        assert_eq!(parse_selection(" * ", 2), Ok(vec![0, 1]));
        assert_eq!(parse_selection("", 3), Ok(vec![]));
        assert_eq!(parse_selection("NONE", 3), Ok(vec![]));
    }

    #[test]
    fn test_indices_and_ranges() {
        assert_eq!(parse_selection("1, 3-5 8", 8), Ok(vec![0, 2, 3, 4, 7]));
        assert_eq!(parse_selection("2,2,1-2", 4), Ok(vec![0, 1]));
        assert!(parse_selection("3 - 4", 4).is_err());
        assert_eq!(parse_selection("3-4", 4), Ok(vec![2, 3]));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_selection("0", 3),
            Err(SelectionError::OutOfRange { index: 0, count: 3 })
        );
        assert_eq!(
            parse_selection("2-9", 3),
            Err(SelectionError::OutOfRange { index: 9, count: 3 })
        );
        assert_eq!(
            parse_selection("x", 3),
            Err(SelectionError::Malformed("x".into()))
        );
        assert_eq!(
            parse_selection("3-1", 3),
            Err(SelectionError::Malformed("3-1".into()))
        );
    }

    #[test]
    fn test_apply_keeps_list_order() {
        let urls: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(apply_selection(&urls, &[1, 3]), vec!["b", "d"]);
        assert!(apply_selection(&urls, &[]).is_empty());
    }
}

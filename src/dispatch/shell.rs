use crate::archive::ArchiveClient;
use crate::cli::{self, Action, Command};
use crate::dispatch;
use crate::logging::LogContext;
use color_eyre::eyre::{eyre, Report, Result};
use indoc::indoc;
use itertools::Itertools;
use std::io::{BufRead, Write};
use strum::IntoEnumIterator;

pub const BANNER: &str = "djarchive shell";
pub const PROMPT: &str = "djarchive> ";

const SHELL_HELP: &str = indoc! {"
    help:

    show this message

    loglevel:

    show the active log level and log file

    exit, quit:

    leave the shell

    Quote arguments containing spaces: download ds rev \"my data\"
"};

/// Outcome of one line of input.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Read-eval-print loop over the dispatcher's commands.
///
/// Errors are printed and the session continues. The session ends on
/// 'exit', 'quit' or end of input.
pub async fn interact<C, R, W>(
    client: &C,
    log: &LogContext,
    input: R,
    out: &mut W,
) -> Result<(), Report>
where
    C: ArchiveClient,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{BANNER}")?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let result = match split_words(&line) {
            Ok(words) => {
                let words = words.iter().map(String::as_str).collect_vec();
                eval(client, log, &words, out).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => writeln!(out, "error: {}", e.chain().join(": "))?,
        }

        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

/// Split a line into words on whitespace.
///
/// Single or double quotes group words, and a backslash escapes the next
/// character outside single quotes.
pub fn split_words(line: &str) -> Result<Vec<String>, Report> {
    let mut words = Vec::new();
    let mut word: Option<String> = None;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => word.get_or_insert_with(String::new).push(c),
            (_, '\\') => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| eyre!("Trailing backslash in: {line}"))?;
                word.get_or_insert_with(String::new).push(escaped);
            }
            (Some(_), c) => word.get_or_insert_with(String::new).push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                word.get_or_insert_with(String::new);
            }
            (None, c) if c.is_whitespace() => words.extend(word.take()),
            (None, c) => word.get_or_insert_with(String::new).push(c),
        }
    }

    if let Some(q) = quote {
        return Err(eyre!("Unterminated {q} quote in: {line}"));
    }
    words.extend(word);

    Ok(words)
}

/// Evaluate one line of input, already split into words.
pub async fn eval<C, W>(
    client: &C,
    log: &LogContext,
    words: &[&str],
    out: &mut W,
) -> Result<Flow, Report>
where
    C: ArchiveClient,
    W: Write,
{
    let Some(first) = words.first() else {
        return Ok(Flow::Continue);
    };

    match *first {
        "exit" | "quit" => return Ok(Flow::Exit),
        "help" => {
            for action in Action::iter().filter(|action| *action != Action::Shell) {
                writeln!(out, "{}\n", action.help())?;
            }
            write!(out, "{SHELL_HELP}")?;
            return Ok(Flow::Continue);
        }
        "loglevel" => {
            writeln!(out, "{log}")?;
            return Ok(Flow::Continue);
        }
        _ => {}
    }

    let args = std::iter::once(env!("CARGO_PKG_NAME")).chain(words.iter().copied());
    let command = match cli::parse(args) {
        Ok(Some(command)) => command,
        Ok(None) => {
            writeln!(out, "Unknown command: {first}. Type 'help' for a list of commands.")?;
            return Ok(Flow::Continue);
        }
        // help requests and argument errors are both rendered by clap
        Err(e) => {
            write!(out, "{e}")?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        Command::Datasets(_) => dispatch::datasets(client, out).await?,
        Command::Revisions(args) => {
            dispatch::revisions(client, args.dataset.as_deref(), out).await?
        }
        Command::Download(args) => dispatch::download(client, &args).await?,
        Command::Shell(_) => writeln!(out, "Already in a shell.")?,
    }

    Ok(Flow::Continue)
}

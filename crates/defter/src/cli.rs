//! Command-line arguments and the fixed texts printed around them.

use clap::Parser;
use crossterm::style::{style, Color, Stylize};
use std::io::{self, Write};

/// defter - KeePass lookup from the terminal
#[derive(Parser, Debug)]
#[command(name = "defter", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Print the version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Print usage
    #[arg(short = 'h', long)]
    pub help: bool,

    /// Store database path, password and key file path
    #[arg(long)]
    pub init: bool,

    /// Path to the KeePass database file (with --init)
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Master password (with --init)
    #[arg(long)]
    pub password: Option<String>,

    /// Path to the key file (with --init)
    #[arg(long, value_name = "PATH")]
    pub key: Option<String>,

    /// Keep the text read from stdin on the clipboard (internal)
    #[arg(long, hide = true)]
    pub serve_clipboard: bool,

    /// Text to start the search with
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    pub query: Vec<String>,
}

impl Args {
    /// Free-text arguments joined into one search string.
    pub fn initial_query(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }
}

const RAINBOW: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Writes the fixed texts, with or without terminal styling.
pub struct Texts<W> {
    out: W,
    styled: bool,
}

impl<W: Write> Texts<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn header(&mut self) -> io::Result<()> {
        if !self.styled {
            return writeln!(self.out, "defter: keepass manager");
        }
        for (i, c) in "defter".chars().enumerate() {
            write!(self.out, "{}", c.with(RAINBOW[i % RAINBOW.len()]))?;
        }
        writeln!(self.out, "{}{}", ": ".white(), "keepass manager".grey())
    }

    pub fn version(&mut self) -> io::Result<()> {
        let version = env!("CARGO_PKG_VERSION");
        if self.styled {
            writeln!(self.out, "{}{}", "version: ".white(), version.grey())
        } else {
            writeln!(self.out, "version: {version}")
        }
    }

    pub fn help(&mut self) -> io::Result<()> {
        self.header()?;
        self.version()?;
        writeln!(self.out)?;
        self.line("set database and credentials: ", false)?;
        self.line("defter --init --db /db/path --key /key/path --password pass", true)?;
        writeln!(self.out)?;
        self.line("open/browse database: ", false)?;
        self.line("defter [search text]", true)?;
        self.line(" type to search or/and use arrow keys to select", true)?;
        self.line(" hit enter to print selected item", true)
    }

    pub fn setting_config(&mut self) -> io::Result<()> {
        writeln!(self.out, "Setting configuration")
    }

    /// Two-line error report.
    pub fn error(&mut self, summary: &str, cause: &str) -> io::Result<()> {
        let summary = format!("Error: {summary}");
        if self.styled {
            writeln!(self.out, "{}", summary.red())?;
            writeln!(self.out, "{} {}", "Cause:".underlined().white(), cause)
        } else {
            writeln!(self.out, "{summary}")?;
            writeln!(self.out, "Cause: {cause}")
        }
    }

    fn line(&mut self, text: &str, dim: bool) -> io::Result<()> {
        match (self.styled, dim) {
            (true, true) => writeln!(self.out, "{}", style(text).grey()),
            (true, false) => writeln!(self.out, "{}", style(text).white()),
            (false, _) => writeln!(self.out, "{text}"),
        }
    }
}

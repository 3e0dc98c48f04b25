//! Printing the selected entry and copying its password.

use anyhow::Result;
use crossterm::style::{style, Stylize};
use defter_core::ProjectedEntry;
use std::io::{self, Read, Write};

/// Hidden flag that turns the binary into a clipboard owner process.
#[cfg(target_os = "linux")]
const SERVE_CLIPBOARD_FLAG: &str = "--serve-clipboard";

/// Somewhere to put the password.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The operating system clipboard.
///
/// On Linux the clipboard is served by whichever process owns the selection,
/// so the text is handed to a detached copy of this binary that keeps serving
/// it after defter exits, until another program takes the selection over.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn copy(&mut self, text: &str) -> Result<()> {
        use anyhow::Context;
        use std::process::{Command, Stdio};

        // Fails here, with a reportable error, when there is no display.
        arboard::Clipboard::new()?;

        let mut helper = Command::new(std::env::current_exe()?)
            .arg(SERVE_CLIPBOARD_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("could not start clipboard helper")?;
        let mut stdin = helper
            .stdin
            .take()
            .context("clipboard helper has no stdin")?;
        stdin.write_all(text.as_bytes())?;
        tracing::debug!("Handed password to clipboard helper {}", helper.id());
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Body of the clipboard helper process: read the text from `input` and own
/// the clipboard until something else replaces it.
pub fn serve_clipboard(input: impl Read) -> Result<()> {
    let text = read_secret(input)?;
    let mut clipboard = arboard::Clipboard::new()?;

    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        clipboard.set().exclude_from_history().wait().text(text)?;
    }
    #[cfg(not(target_os = "linux"))]
    clipboard.set_text(text)?;

    Ok(())
}

fn read_secret(mut input: impl Read) -> io::Result<String> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    Ok(text)
}

/// Writes entries to `out` and pushes passwords to a [`Clipboard`].
pub struct Presenter<W, C> {
    out: W,
    clipboard: C,
    styled: bool,
}

impl<W: Write, C: Clipboard> Presenter<W, C> {
    pub fn new(out: W, clipboard: C, styled: bool) -> Self {
        Self {
            out,
            clipboard,
            styled,
        }
    }

    /// Print every present field as `label: value`, then copy the password.
    pub fn present(&mut self, entry: &ProjectedEntry) -> io::Result<()> {
        for field in entry.fields() {
            let Some(value) = field.present() else {
                continue;
            };
            if self.styled {
                writeln!(
                    self.out,
                    "{}: {}",
                    style(field.label.as_str()).bold().underlined(),
                    style(value).grey()
                )?;
            } else {
                writeln!(self.out, "{}: {}", field.label, value)?;
            }
        }

        if let Some(password) = entry.password.present() {
            if let Err(e) = self.clipboard.copy(password) {
                tracing::warn!("Clipboard copy failed: {e}");
                writeln!(self.out, "Warning: could not copy password to clipboard: {e}")?;
            }
        }

        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (W, C) {
        (self.out, self.clipboard)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use defter_core::LabeledValue;

    /// Records every copy instead of touching the real clipboard.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingClipboard {
        pub copies: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn copy(&mut self, text: &str) -> Result<()> {
            self.copies.push(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn copy(&mut self, _text: &str) -> Result<()> {
            anyhow::bail!("no display")
        }
    }

    pub(crate) fn entry(values: [Option<&str>; 5]) -> ProjectedEntry {
        let v = |i: usize| values[i].map(str::to_string);
        ProjectedEntry {
            title: LabeledValue::new("title", v(0)),
            password: LabeledValue::new("password", v(1)),
            notes: LabeledValue::new("notes", v(2)),
            url: LabeledValue::new("url", v(3)),
            username: LabeledValue::new("username", v(4)),
        }
    }

    fn present(entry: &ProjectedEntry) -> (String, Vec<String>) {
        let mut presenter = Presenter::new(Vec::new(), RecordingClipboard::default(), false);
        presenter.present(entry).unwrap();
        let (out, clipboard) = presenter.into_parts();
        (String::from_utf8(out).unwrap(), clipboard.copies)
    }

    #[test]
    fn absent_fields_are_skipped_and_clipboard_untouched() {
        let (out, copies) = present(&entry([None, None, Some("hi"), None, None]));
        assert_eq!(out, "notes: hi\n");
        assert!(copies.is_empty());
    }

    #[test]
    fn password_is_copied_verbatim() {
        let (out, copies) = present(&entry([Some("Bank"), Some("secret123"), None, None, None]));
        assert_eq!(out, "title: Bank\npassword: secret123\n");
        assert_eq!(copies, vec!["secret123".to_string()]);
    }

    #[test]
    fn whitespace_in_password_is_kept() {
        let (_, copies) = present(&entry([None, Some(" pad "), None, None, None]));
        assert_eq!(copies, vec![" pad ".to_string()]);
    }

    #[test]
    fn empty_values_are_treated_as_absent() {
        let (out, copies) = present(&entry([Some("Bank"), Some(""), Some(""), None, None]));
        assert_eq!(out, "title: Bank\n");
        assert!(copies.is_empty());
    }

    #[test]
    fn fields_print_in_fixed_order() {
        let (out, _) = present(&entry([
            Some("Github"),
            Some("pw"),
            Some("n"),
            Some("https://github.com"),
            Some("octocat"),
        ]));
        let labels: Vec<&str> = out
            .lines()
            .map(|l| l.split(':').next().unwrap())
            .collect();
        assert_eq!(labels, ["title", "password", "notes", "url", "username"]);
    }

    #[test]
    fn styled_output_wraps_label_and_value() {
        let mut presenter = Presenter::new(Vec::new(), RecordingClipboard::default(), true);
        presenter
            .present(&entry([None, None, Some("hi"), None, None]))
            .unwrap();
        let (out, _) = presenter.into_parts();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("\u{1b}["));
        assert!(out.contains("notes"));
        assert!(out.contains("hi"));
    }

    #[test]
    fn helper_input_is_taken_verbatim() {
        let text = read_secret(" pad \n".as_bytes()).unwrap();
        assert_eq!(text, " pad \n");
    }

    #[test]
    fn clipboard_failure_is_reported_after_the_fields() {
        let mut presenter = Presenter::new(Vec::new(), BrokenClipboard, false);
        presenter
            .present(&entry([Some("Bank"), Some("pw"), None, None, None]))
            .unwrap();
        let (out, _) = presenter.into_parts();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("title: Bank\npassword: pw\n"));
        assert!(out.contains("Warning: could not copy password to clipboard: no display"));
    }
}

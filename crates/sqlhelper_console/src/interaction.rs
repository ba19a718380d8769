//! Question and confirmation prompts.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sqlhelper_error::{ConsoleError, ConsoleErrorKind, ConsoleResult};
use sqlhelper_interface::Interaction;
use std::io::{BufRead, Write};
use tracing::debug;

/// Prompt for the natural-language question.
pub const QUESTION_PROMPT: &str = "What do you want to search for? >> ";

/// Question asked when the first page is full.
pub const SHOW_ALL_PROMPT: &str = "Do you want to see all the results?";

/// Appended to confirmations asked as a constrained choice.
pub const CHOICE_SUFFIX: &str = " [y/n] ";

/// Prompt offering to repair a failed query.
///
/// # Examples
///
/// ```
/// use sqlhelper_console::repair_prompt;
///
/// assert_eq!(
///     repair_prompt("syntax error at or near \"FORM\""),
///     "Query failed to execute with error syntax error at or near \"FORM\", do you want to let the AI try to fix it?",
/// );
/// ```
pub fn repair_prompt(error: &str) -> String {
    format!("Query failed to execute with error {error}, do you want to let the AI try to fix it?")
}

/// Whether an answer is affirmative: `y` or `yes`, any case, surrounding
/// whitespace ignored.
///
/// # Examples
///
/// ```
/// use sqlhelper_console::parse_yes_no;
///
/// assert!(parse_yes_no(" YES\n"));
/// assert!(parse_yes_no("y"));
/// assert!(!parse_yes_no("yep"));
/// assert!(!parse_yes_no(""));
/// ```
pub fn parse_yes_no(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Strict form of [`parse_yes_no`]: `None` unless the answer is one of
/// `y`, `yes`, `n` or `no`.
///
/// # Examples
///
/// ```
/// use sqlhelper_console::parse_choice;
///
/// assert_eq!(parse_choice("Yes"), Some(true));
/// assert_eq!(parse_choice(" n "), Some(false));
/// assert_eq!(parse_choice("maybe"), None);
/// ```
pub fn parse_choice(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Reads one line of user input after showing a prompt.
pub trait LineSource {
    /// Read a line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> ConsoleResult<Option<String>>;
}

impl<L: LineSource + ?Sized> LineSource for Box<L> {
    fn read_line(&mut self, prompt: &str) -> ConsoleResult<Option<String>> {
        (**self).read_line(prompt)
    }
}

/// Line editing on an interactive terminal.
pub struct RustylineSource {
    editor: DefaultEditor,
}

impl RustylineSource {
    /// Create an editor on the process terminal.
    pub fn new() -> ConsoleResult<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| ConsoleError::new(ConsoleErrorKind::Input(e.to_string())))?;
        Ok(Self { editor })
    }
}

impl LineSource for RustylineSource {
    fn read_line(&mut self, prompt: &str) -> ConsoleResult<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => Err(ConsoleError::new(ConsoleErrorKind::Cancelled)),
            Err(e) => Err(ConsoleError::new(ConsoleErrorKind::Input(e.to_string()))),
        }
    }
}

/// Prompts written to a writer, answers read from a buffered reader.
///
/// Used when input is piped and in tests.
pub struct BufferedSource<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> BufferedSource<R, W> {
    /// Wrap a reader and the writer prompts go to.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Recover the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> LineSource for BufferedSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> ConsoleResult<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| ConsoleError::new(ConsoleErrorKind::Input(e.to_string())))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Terminal implementation of the loop's user decisions.
///
/// Confirmations are free text by default: anything but `y`/`yes` means no.
/// With [`ConsoleInteraction::with_choice_prompts`] they offer `[y/n]` and
/// ask again until one of the two is given.
pub struct ConsoleInteraction<L> {
    source: L,
    question: Option<String>,
    choice_prompts: bool,
}

impl<L: LineSource> ConsoleInteraction<L> {
    /// Ask everything through `source`.
    pub fn new(source: L) -> Self {
        Self {
            source,
            question: None,
            choice_prompts: false,
        }
    }

    /// Ask confirmations as a constrained `[y/n]` choice.
    pub fn with_choice_prompts(mut self) -> Self {
        self.choice_prompts = true;
        self
    }

    /// Answer the question prompt with `question` instead of asking.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Recover the line source.
    pub fn into_source(self) -> L {
        self.source
    }

    /// Ask `question`; `free_suffix` ends the prompt in free-text mode.
    fn confirm(&mut self, question: &str, free_suffix: &str) -> ConsoleResult<bool> {
        if !self.choice_prompts {
            let answer = self.source.read_line(&format!("{question}{free_suffix}"))?;
            let accepted = answer.as_deref().is_some_and(parse_yes_no);
            debug!(answered = answer.is_some(), accepted, "Confirmation");
            return Ok(accepted);
        }

        let prompt = format!("{question}{CHOICE_SUFFIX}");
        loop {
            let Some(answer) = self.source.read_line(&prompt)? else {
                debug!(accepted = false, "Confirmation ended by end of input");
                return Ok(false);
            };
            if let Some(accepted) = parse_choice(&answer) {
                debug!(accepted, "Confirmation");
                return Ok(accepted);
            }
            debug!(answer = %answer, "Unrecognised answer, asking again");
        }
    }
}

impl<L: LineSource> Interaction for ConsoleInteraction<L> {
    fn ask_question(&mut self) -> ConsoleResult<String> {
        if let Some(question) = self.question.take() {
            return Ok(question);
        }
        self.source
            .read_line(QUESTION_PROMPT)?
            .ok_or_else(|| ConsoleError::new(ConsoleErrorKind::Cancelled))
    }

    fn confirm_show_all(&mut self) -> ConsoleResult<bool> {
        self.confirm(SHOW_ALL_PROMPT, "\n>> ")
    }

    fn confirm_repair(&mut self, error: &str) -> ConsoleResult<bool> {
        self.confirm(&repair_prompt(error), "")
    }
}

//! Console rendering of generation events.

use nu_ansi_term::Color;
use ofgen_output::paint;
use ofgen_typegen::{Event, Reporter};

/// Prints status lines to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    colors: bool,
}

impl ConsoleReporter {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    pub fn info(&self, message: &str) {
        eprintln!("{} {message}", paint(Color::Cyan, "ℹ", self.colors));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {message}", paint(Color::Green, "✓", self.colors));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {message}", paint(Color::Yellow, "⚠", self.colors));
    }

    pub fn failure(&self, message: &str) {
        eprintln!("{} {message}", paint(Color::Red, "✗", self.colors));
    }
}

/// Status line for an event, without its leading symbol.
pub fn describe(event: &Event) -> String {
    match event {
        Event::GenerationStarted { language, .. } => {
            format!("Generating a typesafe client for {language}")
        }
        Event::FlagsSkipped { target, keys } => format!(
            "Skipping {} flag(s) not supported by {target}: {}",
            keys.len(),
            keys.join(", ")
        ),
        Event::FileCreated { path } => format!("Created {}", path.display()),
        Event::FileFailed { path, error } => {
            format!("Failed to write {}: {error}", path.display())
        }
        Event::GenerationComplete { .. } => {
            "Successfully generated client. Happy coding!".to_string()
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: Event) {
        let message = describe(&event);
        match event {
            Event::GenerationStarted { .. } => self.info(&message),
            Event::FlagsSkipped { .. } => self.warning(&message),
            Event::FileCreated { .. } | Event::GenerationComplete { .. } => {
                self.success(&message)
            }
            Event::FileFailed { .. } => self.failure(&message),
        }
    }
}

//! Output formatting utilities.
//!
//! Provides consistent tree/flat/JSON/YAML output across commands via the
//! `OutputFormatter` trait.

use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

use nu_ansi_term::Color;
use serde::{Deserialize, Serialize};

/// Color output mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Auto-detect based on TTY (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Should colors be used?
    /// Respects NO_COLOR, then the mode, then whether stdout is a TTY.
    pub fn use_colors(self) -> bool {
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "invalid color mode: {other}. Valid modes are: auto, always, never"
            )),
        }
    }
}

/// Output format.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Grouped, indented text (human-friendly, with colors if available).
    #[default]
    Tree,
    /// One line per item.
    Flat,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Tree,
        OutputFormat::Flat,
        OutputFormat::Json,
        OutputFormat::Yaml,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Tree => "tree",
            OutputFormat::Flat => "flat",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Is this a machine-readable format?
    pub fn is_structured(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Yaml)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = OutputFormat::ALL.iter().map(|f| f.as_str()).collect();
                format!(
                    "invalid output format: {s}. Valid formats are: {}",
                    valid.join(", ")
                )
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to serialize output as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize output as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Trait for types that can format output in multiple formats.
///
/// JSON and YAML use serde, while text formatting is custom.
/// Schema generation uses schemars for `--output-schema` support.
pub trait OutputFormatter: Serialize + schemars::JsonSchema {
    /// Format as one line per item, no colors.
    fn format_text(&self) -> String;

    /// Format as grouped, indented text.
    /// Default implementation falls back to format_text().
    fn format_pretty(&self, _colors: bool) -> String {
        self.format_text()
    }

    /// Render in the specified format.
    fn render(&self, format: OutputFormat, colors: bool) -> Result<String, OutputError> {
        Ok(match format {
            OutputFormat::Tree => self.format_pretty(colors),
            OutputFormat::Flat => self.format_text(),
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
            OutputFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    /// Print to stdout in the specified format.
    fn print(&self, format: OutputFormat, colors: bool) -> Result<(), OutputError> {
        let rendered = self.render(format, colors)?;
        println!("{}", rendered.trim_end_matches('\n'));
        Ok(())
    }
}

/// Print JSON schema for a type implementing OutputFormatter.
/// Use this for `--output-schema` flag handling.
pub fn print_output_schema<T: OutputFormatter>() -> Result<(), OutputError> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

/// Paint `text` when colors are on, otherwise return it unchanged.
pub fn paint(color: Color, text: impl AsRef<str>, colors: bool) -> String {
    if colors {
        color.paint(text.as_ref()).to_string()
    } else {
        text.as_ref().to_string()
    }
}

/// Paint `text` bold in `color` when colors are on.
pub fn paint_bold(color: Color, text: impl AsRef<str>, colors: bool) -> String {
    if colors {
        color.bold().paint(text.as_ref()).to_string()
    } else {
        text.as_ref().to_string()
    }
}

/// Prefix every line of `text` with `indent` spaces.
pub fn indent(text: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, schemars::JsonSchema)]
    struct TestOutput {
        name: String,
        count: usize,
    }

    impl OutputFormatter for TestOutput {
        fn format_text(&self) -> String {
            format!("{}: {}", self.name, self.count)
        }

        fn format_pretty(&self, colors: bool) -> String {
            format!("{}\n  {}", paint(Color::Green, &self.name, colors), self.count)
        }
    }

    fn sample() -> TestOutput {
        TestOutput {
            name: "test".into(),
            count: 42,
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("tree".parse::<OutputFormat>(), Ok(OutputFormat::Tree));
        assert_eq!("yaml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert_eq!(
            err,
            "invalid output format: xml. Valid formats are: tree, flat, json, yaml"
        );
        assert!(OutputFormat::Json.is_structured());
        assert!(!OutputFormat::Flat.is_structured());
    }

    #[test]
    fn test_render_formats() {
        let out = sample();
        assert_eq!(out.render(OutputFormat::Flat, false).unwrap(), "test: 42");
        assert_eq!(out.render(OutputFormat::Tree, false).unwrap(), "test\n  42");
        assert_eq!(
            out.render(OutputFormat::Json, false).unwrap(),
            "{\n  \"name\": \"test\",\n  \"count\": 42\n}"
        );
        assert_eq!(
            out.render(OutputFormat::Yaml, false).unwrap(),
            "name: test\ncount: 42\n"
        );
    }

    #[test]
    fn test_paint() {
        assert_eq!(paint(Color::Red, "x", false), "x");
        assert_ne!(paint(Color::Red, "x", true), "x");
        assert!(paint_bold(Color::Red, "x", true).contains('x'));
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\nb", 2), "  a\n  b");
    }

    #[test]
    fn test_color_mode() {
        assert!(!ColorMode::Never.use_colors());
        assert_eq!("always".parse::<ColorMode>(), Ok(ColorMode::Always));
        assert!("sometimes".parse::<ColorMode>().is_err());
    }
}

//! Renders a validated [`TaskRequest`] into the extension's slash-command syntax.
//!
//! Flag order per kind:
//!
//! | kind     | order                                              |
//! |----------|----------------------------------------------------|
//! | generate | count (if > 1), styles, variations, preview        |
//! | edit     | preview                                            |
//! | icon     | sizes, type, style, background, preview            |
//! | pattern  | type, style, density, colors, preview              |
//! | story    | steps, type, style, layout, preview                |
//! | diagram  | type, style, layout, complexity, preview           |
//! | restore  | preview                                            |
//! | freeform | (none)                                             |

use std::fmt;

use serde::Serialize;

use crate::error::RenderError;
use crate::task::{TaskKind, TaskRequest};

/// Ordered command tokens: the directive first, then `--flag` tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RenderedCommand {
    tokens: Vec<String>,
}

impl RenderedCommand {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn directive(&self) -> &str {
        &self.tokens[0]
    }

    pub fn flags(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// Single-space join; this is the argument handed to the external CLI.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for RenderedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

pub fn render(request: &TaskRequest) -> Result<RenderedCommand, RenderError> {
    let kind = request.kind();
    let cmd = match request {
        TaskRequest::Generate(r) => {
            let mut cmd = CommandBuilder::quoted(kind, "prompt", r.prompt.as_str())?;
            if !r.count.is_default() {
                cmd.number("count", r.count.get());
            }
            if let Some(styles) = &r.styles {
                cmd.quoted_flag("styles", styles)?;
            }
            if let Some(variations) = &r.variations {
                cmd.quoted_flag("variations", variations)?;
            }
            cmd.preview(r.preview)
        }
        TaskRequest::Edit(r) | TaskRequest::Restore(r) => {
            let cmd = CommandBuilder::with_path(
                kind,
                "image_path",
                r.image_path.as_str(),
                "instruction",
                r.instruction.as_str(),
            )?;
            cmd.preview(r.preview)
        }
        TaskRequest::Icon(r) => {
            let mut cmd = CommandBuilder::quoted(kind, "prompt", r.prompt.as_str())?;
            cmd.quoted_flag("sizes", r.sizes.as_str())?;
            cmd.choice("type", r.kind.as_str());
            cmd.choice("style", r.style.as_str());
            cmd.choice("background", r.background.as_str());
            cmd.preview(r.preview)
        }
        TaskRequest::Pattern(r) => {
            let mut cmd = CommandBuilder::quoted(kind, "prompt", r.prompt.as_str())?;
            cmd.choice("type", r.kind.as_str());
            cmd.choice("style", r.style.as_str());
            cmd.choice("density", r.density.as_str());
            cmd.choice("colors", r.colors.as_str());
            cmd.preview(r.preview)
        }
        TaskRequest::Story(r) => {
            let mut cmd = CommandBuilder::quoted(kind, "prompt", r.prompt.as_str())?;
            cmd.number("steps", r.steps.get());
            cmd.choice("type", r.kind.as_str());
            cmd.choice("style", r.style.as_str());
            cmd.choice("layout", r.layout.as_str());
            cmd.preview(r.preview)
        }
        TaskRequest::Diagram(r) => {
            let mut cmd = CommandBuilder::quoted(kind, "prompt", r.prompt.as_str())?;
            cmd.choice("type", r.kind.as_str());
            cmd.choice("style", r.style.as_str());
            cmd.choice("layout", r.layout.as_str());
            cmd.choice("complexity", r.complexity.as_str());
            cmd.preview(r.preview)
        }
        TaskRequest::Freeform(r) => CommandBuilder::verbatim(kind, "request", r.request.as_str())?,
    };
    Ok(cmd.finish())
}

struct CommandBuilder {
    tokens: Vec<String>,
}

impl CommandBuilder {
    /// `/<directive> "<text>"`
    fn quoted(kind: TaskKind, field: &'static str, text: &str) -> Result<Self, RenderError> {
        let directive = format!("{} {}", kind.directive(), quote(field, text)?);
        Ok(Self::start(directive))
    }

    /// `/<directive> <path> "<text>"`
    fn with_path(
        kind: TaskKind,
        path_field: &'static str,
        path: &str,
        text_field: &'static str,
        text: &str,
    ) -> Result<Self, RenderError> {
        let directive = format!(
            "{} {} {}",
            kind.directive(),
            bare_path(path_field, path)?,
            quote(text_field, text)?
        );
        Ok(Self::start(directive))
    }

    /// `/<directive> <text>`; the rest of the line belongs to the request.
    fn verbatim(kind: TaskKind, field: &'static str, text: &str) -> Result<Self, RenderError> {
        reject_control(field, text)?;
        Ok(Self::start(format!("{} {}", kind.directive(), text)))
    }

    fn start(directive: String) -> Self {
        Self {
            tokens: vec![directive],
        }
    }

    fn number(&mut self, name: &str, value: u8) {
        self.tokens.push(format!("--{name}={value}"));
    }

    fn quoted_flag(&mut self, name: &'static str, value: &str) -> Result<(), RenderError> {
        let value = quote(name, value)?;
        self.tokens.push(format!("--{name}={value}"));
        Ok(())
    }

    /// Choice names are fixed identifiers, so they never need checking.
    fn choice(&mut self, name: &str, value: &'static str) {
        self.tokens.push(format!("--{name}=\"{value}\""));
    }

    fn preview(mut self, enabled: bool) -> Self {
        if enabled {
            self.tokens.push("--preview".to_string());
        }
        self
    }

    fn finish(self) -> RenderedCommand {
        RenderedCommand {
            tokens: self.tokens,
        }
    }
}

fn reject_control(field: &'static str, text: &str) -> Result<(), RenderError> {
    if text.chars().any(|c| c.is_control()) {
        return Err(RenderError::ControlCharacter { field });
    }
    Ok(())
}

fn quote(field: &'static str, text: &str) -> Result<String, RenderError> {
    reject_control(field, text)?;
    if text.contains('"') {
        return Err(RenderError::EmbeddedQuote { field });
    }
    Ok(format!("\"{text}\""))
}

fn bare_path<'a>(field: &'static str, path: &'a str) -> Result<&'a str, RenderError> {
    reject_control(field, path)?;
    if path.chars().any(|c| c.is_whitespace() || c == '"') {
        return Err(RenderError::UnsafePath { field });
    }
    Ok(path)
}

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::runner::{CommandLine, ExecutionResult};
use crate::task::TaskKind;

/// Final reply for one task: echoed command, raw output, artifact location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub task: TaskKind,
    pub command: String,
    pub output: String,
    pub output_dir: String,
}

impl Report {
    pub fn new(
        task: TaskKind,
        line: &CommandLine,
        result: &ExecutionResult,
        output_dir: &str,
    ) -> Self {
        Self {
            task,
            command: line.echo(),
            output: result.stdout.clone(),
            output_dir: display_dir(output_dir),
        }
    }

    pub fn saved_sentence(&self) -> String {
        format!("{} saved to {}", self.task.artifact_noun(), self.output_dir)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Command: {}\n\nOutput:\n{}\n\n{}",
            self.command,
            self.output,
            self.saved_sentence()
        )
    }
}

/// Renders the report text for one finished invocation.
pub fn format_report(
    task: TaskKind,
    line: &CommandLine,
    result: &ExecutionResult,
    output_dir: &str,
) -> String {
    Report::new(task, line, result, output_dir).to_string()
}

/// `nanobanana-output` -> `./nanobanana-output/`; explicit paths keep their prefix.
fn display_dir(dir: &str) -> String {
    let trimmed = dir.trim().trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        return "./".to_string();
    }
    if Path::new(trimmed).is_absolute() || trimmed.starts_with("./") || trimmed.starts_with("../")
    {
        format!("{trimmed}/")
    } else {
        format!("./{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::render::render;
    use crate::task::{FreeformRequest, IconRequest, TaskRequest};

    fn line_for(request: &TaskRequest) -> CommandLine {
        CommandLine {
            program: "gemini".into(),
            auto_approve_flag: "--yolo".into(),
            prompt_flag: "-p".into(),
            command: render(request).unwrap(),
        }
    }

    #[test]
    fn text_layout_is_fixed() {
        let request: TaskRequest = IconRequest::new("settings gear").unwrap().into();
        let result = ExecutionResult {
            stdout: "Generated 3 icons\n  - icon_64.png".into(),
            exit_code: Some(0),
            ..Default::default()
        };
        let text = format_report(
            request.kind(),
            &line_for(&request),
            &result,
            "nanobanana-output",
        );
        assert_eq!(
            text,
            "Command: gemini --yolo -p '/icon \"settings gear\" --sizes=\"64,128,256\" --type=\"app-icon\" --style=\"modern\" --background=\"transparent\"'\n\n\
             Output:\nGenerated 3 icons\n  - icon_64.png\n\n\
             Icons saved to ./nanobanana-output/"
        );
    }

    #[test]
    fn output_is_verbatim() {
        let request: TaskRequest = FreeformRequest::new("a logo").unwrap().into();
        let raw = "\u{1b}[32mok\u{1b}[0m\n\n\ttrailing  \n";
        let result = ExecutionResult {
            stdout: raw.into(),
            exit_code: Some(0),
            ..Default::default()
        };
        let report = Report::new(request.kind(), &line_for(&request), &result, "out");
        assert_eq!(report.output, raw);
        assert!(report.to_string().contains(raw));
        assert_eq!(report.saved_sentence(), "Output saved to ./out/");
    }

    #[test]
    fn output_dir_display() {
        assert_eq!(display_dir("nanobanana-output"), "./nanobanana-output/");
        assert_eq!(display_dir("nanobanana-output/"), "./nanobanana-output/");
        assert_eq!(display_dir("./renders"), "./renders/");
        assert_eq!(display_dir("../shared/art"), "../shared/art/");
        #[cfg(unix)]
        assert_eq!(display_dir("/tmp/art"), "/tmp/art/");
    }

    #[test]
    fn json_shape() {
        let request: TaskRequest = FreeformRequest::new("a logo").unwrap().into();
        let result = ExecutionResult {
            stdout: "done".into(),
            exit_code: Some(0),
            ..Default::default()
        };
        let report = Report::new(request.kind(), &line_for(&request), &result, "out");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["task"], "freeform");
        assert_eq!(json["command"], "gemini --yolo -p '/nanobanana a logo'");
        assert_eq!(json["output"], "done");
        assert_eq!(json["output_dir"], "./out/");
    }
}

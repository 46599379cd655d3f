use std::io::Read;

use nanogen_core::error::CliError;
use nanogen_core::task::{
    DiagramParams, FreeformParams, GenerateParams, IconParams, ImageEditParams, PatternParams,
    StoryParams, TaskParams,
};

use super::cli::{
    Commands, DiagramArgs, FreeformArgs, GenerateArgs, IconArgs, ImageEditArgs, PatternArgs,
    RequestArgs, StoryArgs,
};

impl From<GenerateArgs> for GenerateParams {
    fn from(a: GenerateArgs) -> Self {
        Self {
            prompt: a.prompt,
            count: a.count,
            styles: a.styles,
            variations: a.variations,
            preview: a.preview,
        }
    }
}

impl From<ImageEditArgs> for ImageEditParams {
    fn from(a: ImageEditArgs) -> Self {
        Self {
            image_path: a.image_path,
            instruction: a.instruction,
            preview: a.preview,
        }
    }
}

impl From<IconArgs> for IconParams {
    fn from(a: IconArgs) -> Self {
        Self {
            prompt: a.prompt,
            sizes: a.sizes,
            kind: a.kind,
            style: a.style,
            background: a.background,
            preview: a.preview,
        }
    }
}

impl From<PatternArgs> for PatternParams {
    fn from(a: PatternArgs) -> Self {
        Self {
            prompt: a.prompt,
            kind: a.kind,
            style: a.style,
            density: a.density,
            colors: a.colors,
            preview: a.preview,
        }
    }
}

impl From<StoryArgs> for StoryParams {
    fn from(a: StoryArgs) -> Self {
        Self {
            prompt: a.prompt,
            steps: a.steps,
            kind: a.kind,
            style: a.style,
            layout: a.layout,
            preview: a.preview,
        }
    }
}

impl From<DiagramArgs> for DiagramParams {
    fn from(a: DiagramArgs) -> Self {
        Self {
            prompt: a.prompt,
            kind: a.kind,
            style: a.style,
            layout: a.layout,
            complexity: a.complexity,
            preview: a.preview,
        }
    }
}

impl From<FreeformArgs> for FreeformParams {
    fn from(a: FreeformArgs) -> Self {
        Self {
            request: a.request.join(" "),
        }
    }
}

/// Maps a task subcommand to its parameters; `None` for non-task commands.
pub fn task_params(cmd: Commands) -> Result<Option<TaskParams>, CliError> {
    Ok(Some(match cmd {
        Commands::Generate(a) => TaskParams::Generate(a.into()),
        Commands::Edit(a) => TaskParams::Edit(a.into()),
        Commands::Icon(a) => TaskParams::Icon(a.into()),
        Commands::Pattern(a) => TaskParams::Pattern(a.into()),
        Commands::Story(a) => TaskParams::Story(a.into()),
        Commands::Diagram(a) => TaskParams::Diagram(a.into()),
        Commands::Restore(a) => TaskParams::Restore(a.into()),
        Commands::Nanobanana(a) => TaskParams::Freeform(a.into()),
        Commands::Request(a) => read_request(&a)?,
        Commands::Doctor => return Ok(None),
    }))
}

fn read_request(args: &RequestArgs) -> Result<TaskParams, CliError> {
    let raw = match args.input.as_str() {
        "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        s => match s.strip_prefix('@') {
            Some(path) => {
                let path = shellexpand::tilde(path);
                std::fs::read_to_string(path.as_ref()).map_err(|e| {
                    CliError::Input(format!("failed to read request file {}: {}", path, e))
                })?
            }
            None => s.to_string(),
        },
    };
    TaskParams::from_json(&raw).map_err(|e| CliError::Input(format!("invalid task JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use nanogen_core::render::render;
    use nanogen_core::task::TaskRequest;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::cli::Args;

    fn rendered(argv: &[&str]) -> String {
        let args = Args::try_parse_from(argv).unwrap();
        let params = task_params(args.command).unwrap().unwrap();
        let request = TaskRequest::try_from(params).unwrap();
        render(&request).unwrap().joined()
    }

    #[test]
    fn generate_flags_map_onto_params() {
        assert_eq!(
            rendered(&[
                "nanogen",
                "generate",
                "a red fox",
                "--count",
                "3",
                "--styles",
                "watercolor,sketch",
                "--preview",
            ]),
            "/generate \"a red fox\" --count=3 --styles=\"watercolor,sketch\" --preview"
        );
    }

    #[test]
    fn icon_defaults_from_cli() {
        assert_eq!(
            rendered(&["nanogen", "icon", "settings gear"]),
            "/icon \"settings gear\" --sizes=\"64,128,256\" --type=\"app-icon\" --style=\"modern\" --background=\"transparent\""
        );
    }

    #[test]
    fn type_flag_is_spelled_type() {
        assert_eq!(
            rendered(&["nanogen", "diagram", "db schema", "--type", "database", "--complexity", "simple"]),
            "/diagram \"db schema\" --type=\"database\" --style=\"professional\" --layout=\"hierarchical\" --complexity=\"simple\""
        );
    }

    #[test]
    fn restore_takes_two_positionals() {
        assert_eq!(
            rendered(&["nanogen", "restore", "old.jpg", "fix the tear"]),
            "/restore old.jpg \"fix the tear\""
        );
    }

    #[test]
    fn freeform_words_are_joined() {
        assert_eq!(
            rendered(&["nanogen", "nanobanana", "make", "a", "banana", "logo"]),
            "/nanobanana make a banana logo"
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "nanogen",
            "story",
            "bread",
            "--dry-run",
            "--env",
            "NANOBANANA_MODEL=x",
            "--timeout-secs",
            "60",
        ])
        .unwrap();
        assert!(args.dry_run);
        assert_eq!(args.env, vec!["NANOBANANA_MODEL=x".to_string()]);
        assert_eq!(args.timeout_secs, Some(60));
    }

    #[test]
    fn inline_json_request() {
        let args = Args::try_parse_from([
            "nanogen",
            "request",
            r#"{"task":"pattern","prompt":"waves","density":"dense"}"#,
        ])
        .unwrap();
        let params = task_params(args.command).unwrap().unwrap();
        let request = TaskRequest::try_from(params).unwrap();
        assert_eq!(
            render(&request).unwrap().joined(),
            "/pattern \"waves\" --type=\"seamless\" --style=\"abstract\" --density=\"dense\" --colors=\"colorful\""
        );
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let args = Args::try_parse_from(["nanogen", "request", "{not json"]).unwrap();
        assert!(matches!(task_params(args.command), Err(CliError::Input(_))));
    }

    #[test]
    fn misspelled_json_key_is_an_input_error() {
        let args = Args::try_parse_from([
            "nanogen",
            "request",
            r#"{"task":"generate","prompt":"fox","count":3,"style":"anime"}"#,
        ])
        .unwrap();
        match task_params(args.command) {
            Err(CliError::Input(msg)) => assert!(msg.contains("style"), "{msg}"),
            other => panic!("expected input error, got {other:?}"),
        }
    }

    #[test]
    fn doctor_is_not_a_task() {
        let args = Args::try_parse_from(["nanogen", "doctor"]).unwrap();
        assert!(task_params(args.command).unwrap().is_none());
    }

    #[test]
    fn out_of_range_steps_fails_validation() {
        let args = Args::try_parse_from(["nanogen", "story", "x", "--steps", "9"]).unwrap();
        let params = task_params(args.command).unwrap().unwrap();
        assert_eq!(TaskRequest::try_from(params).unwrap_err().field, "steps");
    }
}

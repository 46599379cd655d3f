use crate::error::TaskError;
use crate::render::render;
use crate::report::Report;
use crate::runner::{CommandLine, Invoker};
use crate::task::TaskRequest;

/// Render, invoke, report. One request, one external process.
#[derive(Clone)]
pub struct TaskRunner {
    invoker: Invoker,
    output_dir: String,
}

impl TaskRunner {
    pub fn new(invoker: Invoker, output_dir: impl Into<String>) -> Self {
        Self {
            invoker,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    /// The exact command line `run` would execute, without spawning anything.
    pub fn plan(&self, request: &TaskRequest) -> Result<CommandLine, TaskError> {
        let command = render(request)?;
        Ok(self.invoker.command_line(command))
    }

    pub async fn run(&self, request: &TaskRequest) -> Result<Report, TaskError> {
        let line = self.plan(request)?;
        let result = self.invoker.invoke(&line).await?;
        Ok(Report::new(request.kind(), &line, &result, &self.output_dir))
    }
}

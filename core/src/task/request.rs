use std::fmt;

use serde::Serialize;

use super::choices::*;
use super::fields::{Count, RequiredText, Steps};
use crate::error::ValidationError;

pub const DEFAULT_ICON_SIZES: &str = "64,128,256";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Generate,
    Edit,
    Icon,
    Pattern,
    Story,
    Diagram,
    Restore,
    Freeform,
}

impl TaskKind {
    pub const ALL: [TaskKind; 8] = [
        TaskKind::Generate,
        TaskKind::Edit,
        TaskKind::Icon,
        TaskKind::Pattern,
        TaskKind::Story,
        TaskKind::Diagram,
        TaskKind::Restore,
        TaskKind::Freeform,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Generate => "generate",
            TaskKind::Edit => "edit",
            TaskKind::Icon => "icon",
            TaskKind::Pattern => "pattern",
            TaskKind::Story => "story",
            TaskKind::Diagram => "diagram",
            TaskKind::Restore => "restore",
            TaskKind::Freeform => "freeform",
        }
    }

    /// Slash command understood by the extension.
    pub fn directive(self) -> &'static str {
        match self {
            TaskKind::Generate => "/generate",
            TaskKind::Edit => "/edit",
            TaskKind::Icon => "/icon",
            TaskKind::Pattern => "/pattern",
            TaskKind::Story => "/story",
            TaskKind::Diagram => "/diagram",
            TaskKind::Restore => "/restore",
            TaskKind::Freeform => "/nanobanana",
        }
    }

    /// What the closing report says was written to the output directory.
    pub fn artifact_noun(self) -> &'static str {
        match self {
            TaskKind::Generate => "Images",
            TaskKind::Edit => "Edited image",
            TaskKind::Icon => "Icons",
            TaskKind::Pattern => "Pattern",
            TaskKind::Story => "Story images",
            TaskKind::Diagram => "Diagram",
            TaskKind::Restore => "Restored image",
            TaskKind::Freeform => "Output",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: RequiredText,
    pub count: Count,
    /// Comma-separated, e.g. `watercolor,sketch`. Elements are not checked.
    pub styles: Option<String>,
    /// Comma-separated, e.g. `lighting,mood`.
    pub variations: Option<String>,
    pub preview: bool,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            prompt: RequiredText::new("prompt", prompt)?,
            count: Count::default(),
            styles: None,
            variations: None,
            preview: false,
        })
    }
}

/// Shared shape of `edit` and `restore`: a source image plus an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEditRequest {
    pub image_path: RequiredText,
    pub instruction: RequiredText,
    pub preview: bool,
}

impl ImageEditRequest {
    pub fn new(
        image_path: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            image_path: RequiredText::new("image_path", image_path)?,
            instruction: RequiredText::new("instruction", instruction)?,
            preview: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    pub prompt: RequiredText,
    /// Pixel sizes, comma-separated.
    pub sizes: RequiredText,
    pub kind: IconType,
    pub style: IconStyle,
    pub background: IconBackground,
    pub preview: bool,
}

impl IconRequest {
    pub fn new(prompt: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            prompt: RequiredText::new("prompt", prompt)?,
            sizes: RequiredText::new("sizes", DEFAULT_ICON_SIZES)?,
            kind: IconType::default(),
            style: IconStyle::default(),
            background: IconBackground::default(),
            preview: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRequest {
    pub prompt: RequiredText,
    pub kind: PatternType,
    pub style: PatternStyle,
    pub density: PatternDensity,
    pub colors: PatternColors,
    pub preview: bool,
}

impl PatternRequest {
    pub fn new(prompt: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            prompt: RequiredText::new("prompt", prompt)?,
            kind: PatternType::default(),
            style: PatternStyle::default(),
            density: PatternDensity::default(),
            colors: PatternColors::default(),
            preview: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    pub prompt: RequiredText,
    pub steps: Steps,
    pub kind: StoryType,
    pub style: StoryStyle,
    pub layout: StoryLayout,
    pub preview: bool,
}

impl StoryRequest {
    pub fn new(prompt: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            prompt: RequiredText::new("prompt", prompt)?,
            steps: Steps::default(),
            kind: StoryType::default(),
            style: StoryStyle::default(),
            layout: StoryLayout::default(),
            preview: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramRequest {
    pub prompt: RequiredText,
    pub kind: DiagramType,
    pub style: DiagramStyle,
    pub layout: DiagramLayout,
    pub complexity: DiagramComplexity,
    pub preview: bool,
}

impl DiagramRequest {
    pub fn new(prompt: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            prompt: RequiredText::new("prompt", prompt)?,
            kind: DiagramType::default(),
            style: DiagramStyle::default(),
            layout: DiagramLayout::default(),
            complexity: DiagramComplexity::default(),
            preview: false,
        })
    }
}

/// Natural-language request passed through to the extension's router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeformRequest {
    pub request: RequiredText,
}

impl FreeformRequest {
    pub fn new(request: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            request: RequiredText::new("request", request)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRequest {
    Generate(GenerateRequest),
    Edit(ImageEditRequest),
    Icon(IconRequest),
    Pattern(PatternRequest),
    Story(StoryRequest),
    Diagram(DiagramRequest),
    Restore(ImageEditRequest),
    Freeform(FreeformRequest),
}

impl TaskRequest {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskRequest::Generate(_) => TaskKind::Generate,
            TaskRequest::Edit(_) => TaskKind::Edit,
            TaskRequest::Icon(_) => TaskKind::Icon,
            TaskRequest::Pattern(_) => TaskKind::Pattern,
            TaskRequest::Story(_) => TaskKind::Story,
            TaskRequest::Diagram(_) => TaskKind::Diagram,
            TaskRequest::Restore(_) => TaskKind::Restore,
            TaskRequest::Freeform(_) => TaskKind::Freeform,
        }
    }
}

impl From<GenerateRequest> for TaskRequest {
    fn from(r: GenerateRequest) -> Self {
        TaskRequest::Generate(r)
    }
}

impl From<IconRequest> for TaskRequest {
    fn from(r: IconRequest) -> Self {
        TaskRequest::Icon(r)
    }
}

impl From<PatternRequest> for TaskRequest {
    fn from(r: PatternRequest) -> Self {
        TaskRequest::Pattern(r)
    }
}

impl From<StoryRequest> for TaskRequest {
    fn from(r: StoryRequest) -> Self {
        TaskRequest::Story(r)
    }
}

impl From<DiagramRequest> for TaskRequest {
    fn from(r: DiagramRequest) -> Self {
        TaskRequest::Diagram(r)
    }
}

impl From<FreeformRequest> for TaskRequest {
    fn from(r: FreeformRequest) -> Self {
        TaskRequest::Freeform(r)
    }
}

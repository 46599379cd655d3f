//! Loosely typed request parameters as they arrive from JSON or the command line.
//!
//! Every field is optional on the wire; defaults and bounds are applied by the
//! conversion into [`TaskRequest`], which is the only validation path.

use serde::{Deserialize, Serialize};

use super::choices::*;
use super::fields::{optional_text, Count, RequiredText, Steps};
use super::request::*;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "lowercase")]
pub enum TaskParams {
    Generate(GenerateParams),
    Edit(ImageEditParams),
    Icon(IconParams),
    Pattern(PatternParams),
    Story(StoryParams),
    Diagram(DiagramParams),
    Restore(ImageEditParams),
    #[serde(rename = "nanobanana", alias = "freeform")]
    Freeform(FreeformParams),
}

impl TaskParams {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateParams {
    pub prompt: String,
    pub count: Option<i64>,
    pub styles: Option<String>,
    pub variations: Option<String>,
    pub preview: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageEditParams {
    #[serde(alias = "imagePath")]
    pub image_path: String,
    pub instruction: String,
    pub preview: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconParams {
    pub prompt: String,
    pub sizes: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub style: Option<String>,
    pub background: Option<String>,
    pub preview: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternParams {
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub style: Option<String>,
    pub density: Option<String>,
    pub colors: Option<String>,
    pub preview: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoryParams {
    pub prompt: String,
    pub steps: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub style: Option<String>,
    pub layout: Option<String>,
    pub preview: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramParams {
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub style: Option<String>,
    pub layout: Option<String>,
    pub complexity: Option<String>,
    pub preview: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FreeformParams {
    pub request: String,
}

impl TryFrom<GenerateParams> for GenerateRequest {
    type Error = ValidationError;

    fn try_from(p: GenerateParams) -> Result<Self, Self::Error> {
        Ok(Self {
            prompt: RequiredText::new("prompt", p.prompt)?,
            count: p.count.map_or(Ok(Count::default()), Count::new)?,
            styles: optional_text(p.styles),
            variations: optional_text(p.variations),
            preview: p.preview,
        })
    }
}

impl TryFrom<ImageEditParams> for ImageEditRequest {
    type Error = ValidationError;

    fn try_from(p: ImageEditParams) -> Result<Self, Self::Error> {
        Ok(Self {
            preview: p.preview,
            ..ImageEditRequest::new(p.image_path, p.instruction)?
        })
    }
}

impl TryFrom<IconParams> for IconRequest {
    type Error = ValidationError;

    fn try_from(p: IconParams) -> Result<Self, Self::Error> {
        Ok(Self {
            prompt: RequiredText::new("prompt", p.prompt)?,
            sizes: RequiredText::new("sizes", p.sizes.as_deref().unwrap_or(DEFAULT_ICON_SIZES))?,
            kind: IconType::parse_or_default(p.kind.as_deref())?,
            style: IconStyle::parse_or_default(p.style.as_deref())?,
            background: IconBackground::parse_or_default(p.background.as_deref())?,
            preview: p.preview,
        })
    }
}

impl TryFrom<PatternParams> for PatternRequest {
    type Error = ValidationError;

    fn try_from(p: PatternParams) -> Result<Self, Self::Error> {
        Ok(Self {
            prompt: RequiredText::new("prompt", p.prompt)?,
            kind: PatternType::parse_or_default(p.kind.as_deref())?,
            style: PatternStyle::parse_or_default(p.style.as_deref())?,
            density: PatternDensity::parse_or_default(p.density.as_deref())?,
            colors: PatternColors::parse_or_default(p.colors.as_deref())?,
            preview: p.preview,
        })
    }
}

impl TryFrom<StoryParams> for StoryRequest {
    type Error = ValidationError;

    fn try_from(p: StoryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            prompt: RequiredText::new("prompt", p.prompt)?,
            steps: p.steps.map_or(Ok(Steps::default()), Steps::new)?,
            kind: StoryType::parse_or_default(p.kind.as_deref())?,
            style: StoryStyle::parse_or_default(p.style.as_deref())?,
            layout: StoryLayout::parse_or_default(p.layout.as_deref())?,
            preview: p.preview,
        })
    }
}

impl TryFrom<DiagramParams> for DiagramRequest {
    type Error = ValidationError;

    fn try_from(p: DiagramParams) -> Result<Self, Self::Error> {
        Ok(Self {
            prompt: RequiredText::new("prompt", p.prompt)?,
            kind: DiagramType::parse_or_default(p.kind.as_deref())?,
            style: DiagramStyle::parse_or_default(p.style.as_deref())?,
            layout: DiagramLayout::parse_or_default(p.layout.as_deref())?,
            complexity: DiagramComplexity::parse_or_default(p.complexity.as_deref())?,
            preview: p.preview,
        })
    }
}

impl TryFrom<FreeformParams> for FreeformRequest {
    type Error = ValidationError;

    fn try_from(p: FreeformParams) -> Result<Self, Self::Error> {
        FreeformRequest::new(p.request)
    }
}

impl TryFrom<TaskParams> for TaskRequest {
    type Error = ValidationError;

    fn try_from(params: TaskParams) -> Result<Self, Self::Error> {
        Ok(match params {
            TaskParams::Generate(p) => TaskRequest::Generate(p.try_into()?),
            TaskParams::Edit(p) => TaskRequest::Edit(p.try_into()?),
            TaskParams::Icon(p) => TaskRequest::Icon(p.try_into()?),
            TaskParams::Pattern(p) => TaskRequest::Pattern(p.try_into()?),
            TaskParams::Story(p) => TaskRequest::Story(p.try_into()?),
            TaskParams::Diagram(p) => TaskRequest::Diagram(p.try_into()?),
            TaskParams::Restore(p) => TaskRequest::Restore(p.try_into()?),
            TaskParams::Freeform(p) => TaskRequest::Freeform(p.try_into()?),
        })
    }
}

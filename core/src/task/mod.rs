mod choices;
mod fields;
mod params;
mod request;

pub use choices::{
    DiagramComplexity, DiagramLayout, DiagramStyle, DiagramType, IconBackground, IconStyle,
    IconType, PatternColors, PatternDensity, PatternStyle, PatternType, StoryLayout, StoryStyle,
    StoryType,
};
pub use fields::{Count, RequiredText, Steps};
pub use params::{
    DiagramParams, FreeformParams, GenerateParams, IconParams, ImageEditParams, PatternParams,
    StoryParams, TaskParams,
};
pub use request::{
    DiagramRequest, FreeformRequest, GenerateRequest, IconRequest, ImageEditRequest,
    PatternRequest, StoryRequest, TaskKind, TaskRequest, DEFAULT_ICON_SIZES,
};

//! Single-choice option sets, one enum per (task kind, field) pair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, default = $default:ident {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const NAMES: &'static [&'static str] = &[$($value),+];
            pub const FIELD: &'static str = $field;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// Parses an optional raw value, falling back to the default when absent.
            pub fn parse_or_default(value: Option<&str>) -> Result<Self, ValidationError> {
                value.map_or(Ok(Self::default()), str::parse)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(ValidationError::not_one_of($field, other, Self::NAMES)),
                }
            }
        }
    };
}

choice_enum! {
    IconType, field = "type", default = AppIcon {
        AppIcon => "app-icon",
        Favicon => "favicon",
        UiElement => "ui-element",
    }
}

choice_enum! {
    IconStyle, field = "style", default = Modern {
        Flat => "flat",
        Skeuomorphic => "skeuomorphic",
        Minimal => "minimal",
        Modern => "modern",
    }
}

choice_enum! {
    IconBackground, field = "background", default = Transparent {
        Transparent => "transparent",
        White => "white",
        Black => "black",
    }
}

choice_enum! {
    PatternType, field = "type", default = Seamless {
        Seamless => "seamless",
        Texture => "texture",
        Wallpaper => "wallpaper",
    }
}

choice_enum! {
    PatternStyle, field = "style", default = Abstract {
        Geometric => "geometric",
        Organic => "organic",
        Abstract => "abstract",
        Floral => "floral",
        Tech => "tech",
    }
}

choice_enum! {
    PatternDensity, field = "density", default = Medium {
        Sparse => "sparse",
        Medium => "medium",
        Dense => "dense",
    }
}

choice_enum! {
    PatternColors, field = "colors", default = Colorful {
        Mono => "mono",
        Duotone => "duotone",
        Colorful => "colorful",
    }
}

choice_enum! {
    StoryType, field = "type", default = Story {
        Story => "story",
        Process => "process",
        Tutorial => "tutorial",
        Timeline => "timeline",
    }
}

choice_enum! {
    /// Whether frames keep one look or drift across the sequence.
    StoryStyle, field = "style", default = Consistent {
        Consistent => "consistent",
        Evolving => "evolving",
    }
}

choice_enum! {
    StoryLayout, field = "layout", default = Separate {
        Separate => "separate",
        Grid => "grid",
        Comic => "comic",
    }
}

choice_enum! {
    DiagramType, field = "type", default = Flowchart {
        Flowchart => "flowchart",
        Architecture => "architecture",
        Network => "network",
        Database => "database",
        Wireframe => "wireframe",
        Mindmap => "mindmap",
        Sequence => "sequence",
    }
}

choice_enum! {
    DiagramStyle, field = "style", default = Professional {
        Professional => "professional",
        Clean => "clean",
        HandDrawn => "hand-drawn",
        Technical => "technical",
    }
}

choice_enum! {
    DiagramLayout, field = "layout", default = Hierarchical {
        Horizontal => "horizontal",
        Vertical => "vertical",
        Hierarchical => "hierarchical",
        Circular => "circular",
    }
}

choice_enum! {
    DiagramComplexity, field = "complexity", default = Detailed {
        Simple => "simple",
        Detailed => "detailed",
        Comprehensive => "comprehensive",
    }
}

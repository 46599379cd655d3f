use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "nanogen",
    version,
    about = "Generate and edit images through the gemini CLI nanobanana extension",
    after_help = "Credentials are read by gemini itself from NANOBANANA_GEMINI_API_KEY, \
                  GEMINI_API_KEY or GOOGLE_API_KEY. Set NANOBANANA_MODEL to pick another model."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.nanogen/config.toml or ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Executable name or path of the creative CLI.
    #[arg(long, global = true)]
    pub gemini_bin: Option<String>,

    /// Kill the external process after this many seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Directory named in the report as the artifact location.
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    /// Extra environment variables for the external process (KEY=VALUE).
    /// Can be specified multiple times.
    #[arg(long = "env", action = clap::ArgAction::Append, global = true)]
    pub env: Vec<String>,

    /// Print the command line that would run, without running it.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    /// Descriptive prompt for image generation.
    pub prompt: String,

    /// Number of variations (1-8).
    #[arg(long, short = 'n')]
    pub count: Option<i64>,

    /// Comma-separated styles: photorealistic, watercolor, oil-painting, sketch,
    /// pixel-art, anime, vintage, modern, abstract, minimalist.
    #[arg(long)]
    pub styles: Option<String>,

    /// Comma-separated variations: lighting, angle, color-palette, composition,
    /// mood, season, time-of-day.
    #[arg(long)]
    pub variations: Option<String>,

    /// Open generated images in the default viewer.
    #[arg(long)]
    pub preview: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ImageEditArgs {
    /// Path to the source image.
    pub image_path: String,

    /// Natural language instruction, e.g. "remove scratches and improve clarity".
    pub instruction: String,

    #[arg(long)]
    pub preview: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct IconArgs {
    pub prompt: String,

    /// Comma-separated sizes in pixels [default: 64,128,256].
    #[arg(long)]
    pub sizes: Option<String>,

    /// app-icon | favicon | ui-element [default: app-icon]
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// flat | skeuomorphic | minimal | modern [default: modern]
    #[arg(long)]
    pub style: Option<String>,

    /// transparent | white | black [default: transparent]
    #[arg(long)]
    pub background: Option<String>,

    #[arg(long)]
    pub preview: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PatternArgs {
    pub prompt: String,

    /// seamless | texture | wallpaper [default: seamless]
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// geometric | organic | abstract | floral | tech [default: abstract]
    #[arg(long)]
    pub style: Option<String>,

    /// sparse | medium | dense [default: medium]
    #[arg(long)]
    pub density: Option<String>,

    /// mono | duotone | colorful [default: colorful]
    #[arg(long)]
    pub colors: Option<String>,

    #[arg(long)]
    pub preview: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StoryArgs {
    pub prompt: String,

    /// Number of sequential images (2-8) [default: 4].
    #[arg(long)]
    pub steps: Option<i64>,

    /// story | process | tutorial | timeline [default: story]
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// consistent | evolving [default: consistent]
    #[arg(long)]
    pub style: Option<String>,

    /// separate | grid | comic [default: separate]
    #[arg(long)]
    pub layout: Option<String>,

    #[arg(long)]
    pub preview: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DiagramArgs {
    pub prompt: String,

    /// flowchart | architecture | network | database | wireframe | mindmap | sequence
    /// [default: flowchart]
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// professional | clean | hand-drawn | technical [default: professional]
    #[arg(long)]
    pub style: Option<String>,

    /// horizontal | vertical | hierarchical | circular [default: hierarchical]
    #[arg(long)]
    pub layout: Option<String>,

    /// simple | detailed | comprehensive [default: detailed]
    #[arg(long)]
    pub complexity: Option<String>,

    #[arg(long)]
    pub preview: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct FreeformArgs {
    /// Natural language request; multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub request: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RequestArgs {
    /// JSON task object, `@path` to read it from a file, or `-` for stdin.
    /// Example: {"task":"icon","prompt":"settings gear","type":"favicon"}
    pub input: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate images from a text prompt
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Edit an existing image with natural language instructions
    #[command(alias = "e")]
    Edit(ImageEditArgs),
    /// Generate app icons, favicons and UI elements in multiple sizes
    Icon(IconArgs),
    /// Generate seamless patterns and textures
    Pattern(PatternArgs),
    /// Generate a sequence of images telling a story or showing a process
    Story(StoryArgs),
    /// Generate technical diagrams, flowcharts and mockups
    Diagram(DiagramArgs),
    /// Restore and enhance old or damaged photos
    Restore(ImageEditArgs),
    /// Free-form request routed by the extension itself
    #[command(alias = "freeform")]
    Nanobanana(FreeformArgs),
    /// Run a task described as JSON
    Request(RequestArgs),
    /// Check that the creative CLI can be found and report its version
    Doctor,
}

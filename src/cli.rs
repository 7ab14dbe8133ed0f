// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "garment-previewer")]
#[command(about = "Headless 3D garment previewer", long_about = None)]
pub struct Cli {
    /// Model preset the viewer mounts with
    #[arg(long, default_value = "shirt")]
    pub model: String,

    /// Model presets to switch to, in order
    #[arg(long = "switch", value_name = "MODEL")]
    pub switches: Vec<String>,

    /// Duration of model-switch transitions in milliseconds
    #[arg(long = "duration-ms", default_value_t = 800.0)]
    pub duration_ms: f64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,

    /// Drive frames from the wall clock instead of fixed steps
    #[arg(long)]
    pub realtime: bool,

    /// JSON preset table replacing the built-in presets
    #[arg(long)]
    pub presets: Option<PathBuf>,

    /// glTF garment to load (falls back to GLTF_FILE)
    #[arg(long)]
    pub gltf: Option<PathBuf>,

    /// Shirt color as a hex code
    #[arg(long)]
    pub color: Option<String>,

    /// Logo image as a data URL
    #[arg(long)]
    pub logo: Option<String>,

    /// Fit the camera to the loaded garment after the last switch
    #[arg(long)]
    pub fit: bool,

    /// Print every frame of each transition
    #[arg(long)]
    pub trace_frames: bool,

    /// Disable console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

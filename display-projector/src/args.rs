use clap::Parser;
use projector_core::{AspectRatio, ScalePolicy};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "display-projector")]
#[command(about = "Mirror the laptop display onto a projector at the best matching resolution")]
#[command(version)]
pub struct Args {
    /// Aspect ratio to run at: "4:3", anything else means 16:9
    #[arg(value_name = "ASPECT")]
    pub aspect: Option<String>,

    /// Consider every mode regardless of aspect ratio
    #[arg(long, conflicts_with = "aspect")]
    pub any_aspect: bool,

    /// RandR name of the laptop panel (default: eDP1)
    #[arg(short, long, value_name = "NAME", env = "PROJECTOR_LAPTOP_OUTPUT")]
    pub laptop_output: Option<String>,

    /// Scale factor formula (width-only, per-axis)
    #[arg(long, value_name = "POLICY")]
    pub scale_policy: Option<ScalePolicy>,

    /// Accept ratios within this distance of 4:3 or 16:9
    #[arg(long, value_name = "EPS")]
    pub aspect_tolerance: Option<f64>,

    /// Print the xrandr command without running it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// List outputs and their modes, then exit
    #[arg(long)]
    pub list: bool,

    /// Print the --list output as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Read the display topology from a JSON file instead of the X server
    #[arg(long, value_name = "FILE")]
    pub topology: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Aspect ratio to select for; `None` means unconstrained.
    pub fn requested_aspect(&self) -> Option<AspectRatio> {
        if self.any_aspect {
            None
        } else {
            Some(AspectRatio::from_selector(self.aspect.as_deref()))
        }
    }
}

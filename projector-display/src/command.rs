//! xrandr invocation for a mirror plan.

use crate::errors::DisplayError;
use crate::resolver::MirrorPlan;
use std::fmt;
use std::process::Command;
use tracing::{debug, warn};

/// Default xrandr executable, looked up on `$PATH`.
pub const DEFAULT_XRANDR: &str = "xrandr";

/// A fully built xrandr command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrandrCommand {
    program: String,
    args: Vec<String>,
}

impl XrandrCommand {
    /// Build the command that applies `plan`:
    ///
    /// `--output <laptop> --mode <W>x<H> --output <external> --mode <W>x<H>
    ///  --scale <f>x<f> --same-as <laptop>`
    pub fn mirror(program: impl Into<String>, plan: &MirrorPlan) -> Self {
        let scale = plan.scale.to_string();
        let args = vec![
            "--output".to_string(),
            plan.laptop.clone(),
            "--mode".to_string(),
            plan.laptop_mode.to_string(),
            "--output".to_string(),
            plan.external.clone(),
            "--mode".to_string(),
            plan.external_mode.label(),
            "--scale".to_string(),
            format!("{}x{}", scale, scale),
            "--same-as".to_string(),
            plan.laptop.clone(),
        ];

        Self {
            program: program.into(),
            args,
        }
    }

    /// Executable that will be run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the executable.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the command and wait for it.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::Spawn`] if the program cannot be started and
    /// [`DisplayError::CommandFailed`] if it exits unsuccessfully.
    pub fn run(&self) -> Result<(), DisplayError> {
        debug!("Running {}", self);
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(DisplayError::Spawn)?;

        if status.success() {
            Ok(())
        } else {
            warn!("{} failed with {}", self.program, status);
            Err(DisplayError::CommandFailed {
                status: status.code(),
            })
        }
    }
}

impl fmt::Display for XrandrCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

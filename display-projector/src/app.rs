//! Top-level flow: load topology, plan, print, apply.

use crate::args::Args;
use crate::config::{Config, ConfigError};
use anyhow::{Context, Result};
use projector_core::{DecisionEngine, ResolutionTable};
use projector_display::{
    DisplayBackend, DisplayError, DisplayOutput, DisplayPairResolver, MirrorPlan, StaticBackend,
    XrandrCommand,
};
use std::io::Write;
use tracing::{debug, info};

/// Exit code for configuration and otherwise unclassified failures.
pub const EXIT_FAILURE: u8 = 1;

/// The display-projector application.
pub struct ProjectorApp {
    args: Args,
    config: Config,
}

impl ProjectorApp {
    /// Create the application, loading configuration for `args`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub fn new(args: Args) -> Result<Self, ConfigError> {
        let config = Config::from_args(&args)?;
        debug!(
            "Laptop output {}, scale policy {}, {:?} aspect matching",
            config.displays.laptop_output,
            config.selection.scale_policy,
            config.aspect_match()
        );
        Ok(Self { args, config })
    }

    /// Create the application with an already built configuration.
    pub fn with_config(args: Args, config: Config) -> Self {
        Self { args, config }
    }

    /// Effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the requested action, writing user-facing output to `out`.
    ///
    /// # Errors
    ///
    /// Returns the first failure; [`exit_code`] maps it to a process status.
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        let backend = self.backend()?;

        if self.args.list {
            return self.list(backend.as_ref(), out);
        }

        let plan = self.plan(backend.as_ref())?;
        let command = XrandrCommand::mirror(self.config.xrandr.program.as_str(), &plan);
        writeln!(out, "{}", command)?;

        if self.args.dry_run {
            info!("Dry run, not applying {}", plan);
            return Ok(());
        }

        command.run()?;
        info!("Applied {}", plan);
        Ok(())
    }

    /// Plan the mirror configuration against `backend`.
    ///
    /// # Errors
    ///
    /// Returns a [`DisplayError`] if the topology or the mode table does not
    /// allow mirroring.
    pub fn plan(&self, backend: &dyn DisplayBackend) -> Result<MirrorPlan, DisplayError> {
        let table: &ResolutionTable = &self.config.profiles;
        let engine = DecisionEngine::new(table)
            .with_matcher(self.config.aspect_match())
            .with_scale_policy(self.config.selection.scale_policy);
        let resolver = DisplayPairResolver::new(self.config.displays.laptop_output.as_str(), engine);

        resolver.resolve_from(backend, self.args.requested_aspect())
    }

    fn backend(&self) -> Result<Box<dyn DisplayBackend>, DisplayError> {
        if let Some(path) = &self.args.topology {
            debug!("Reading topology from {}", path.display());
            return Ok(Box::new(StaticBackend::from_file(path)?));
        }
        self.live_backend()
    }

    #[cfg(feature = "randr")]
    fn live_backend(&self) -> Result<Box<dyn DisplayBackend>, DisplayError> {
        let backend =
            projector_display::RandrBackend::connect(self.config.displays.x_display.as_deref())?;
        Ok(Box::new(backend))
    }

    #[cfg(not(feature = "randr"))]
    fn live_backend(&self) -> Result<Box<dyn DisplayBackend>, DisplayError> {
        Err(DisplayError::Connect(
            "built without RandR support, use --topology".to_string(),
        ))
    }

    fn list(&self, backend: &dyn DisplayBackend, out: &mut impl Write) -> Result<()> {
        let outputs = backend.outputs()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&outputs).context("serializing topology")?;
            writeln!(out, "{}", json)?;
            return Ok(());
        }

        let matcher = self.config.aspect_match();
        for output in &outputs {
            writeln!(out, "{}", describe_output(output, &self.config))?;
            for mode in &output.modes {
                writeln!(
                    out,
                    "  {:>11}  {:<5}  {}",
                    mode.label(),
                    matcher.classify(mode.width, mode.height),
                    mode.id
                )?;
            }
        }
        Ok(())
    }
}

fn describe_output(output: &DisplayOutput, config: &Config) -> String {
    if output.name == config.displays.laptop_output {
        format!("{} [laptop]", output)
    } else {
        output.to_string()
    }
}

/// Process exit code for a failure returned by [`ProjectorApp::run`].
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<DisplayError>() {
        Some(display) => display.exit_code(),
        None => EXIT_FAILURE,
    }
}

//! X11 RandR backend.
//!
//! Queries the screen resources of the root window, then the output info of
//! every output, and resolves each output's mode ids against the screen's
//! mode table.

use crate::backend::{unique_modes, DisplayBackend, DisplayOutput};
use crate::errors::DisplayError;
use projector_common::{Mode, ModeId};
use tracing::{debug, trace};
use x11rb::connection::Connection as _;
use x11rb::errors::{ConnectionError, ReplyError};
use x11rb::protocol::randr::{self, ConnectionExt as _};
use x11rb::protocol::xproto::Window;
use x11rb::rust_connection::RustConnection;

impl From<ConnectionError> for DisplayError {
    fn from(err: ConnectionError) -> Self {
        Self::Query(err.to_string())
    }
}

impl From<ReplyError> for DisplayError {
    fn from(err: ReplyError) -> Self {
        Self::Query(err.to_string())
    }
}

/// Display backend talking to an X server through RandR.
pub struct RandrBackend {
    conn: RustConnection,
    root: Window,
}

impl RandrBackend {
    /// Connect to the X server named by `display`, or `$DISPLAY` if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::Connect`] if the server is unreachable or
    /// reports no screen for the requested display.
    pub fn connect(display: Option<&str>) -> Result<Self, DisplayError> {
        let (conn, screen_num) =
            x11rb::connect(display).map_err(|e| DisplayError::Connect(e.to_string()))?;

        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| DisplayError::Connect(format!("no screen {}", screen_num)))?;

        debug!("Connected to X server, screen {} root {:#x}", screen_num, root);
        Ok(Self { conn, root })
    }
}

impl DisplayBackend for RandrBackend {
    fn outputs(&self) -> Result<Vec<DisplayOutput>, DisplayError> {
        let resources = self.conn.randr_get_screen_resources(self.root)?.reply()?;
        trace!(
            "Screen resources: {} outputs, {} modes",
            resources.outputs.len(),
            resources.modes.len()
        );

        let mut outputs = Vec::with_capacity(resources.outputs.len());
        for &output in &resources.outputs {
            let info = self
                .conn
                .randr_get_output_info(output, resources.config_timestamp)?
                .reply()?;

            let name = String::from_utf8_lossy(&info.name).into_owned();
            let connected = info.connection == randr::Connection::CONNECTED;

            let modes = info.modes.iter().filter_map(|id| {
                resources
                    .modes
                    .iter()
                    .find(|m| m.id == *id)
                    .map(|m| Mode::new(ModeId(m.id), u32::from(m.width), u32::from(m.height)))
            });
            let modes = unique_modes(modes);

            trace!("Output {}: connected={} modes={}", name, connected, modes.len());
            outputs.push(DisplayOutput {
                name,
                connected,
                modes,
            });
        }

        Ok(outputs)
    }

    fn backend_name(&self) -> &'static str {
        "randr"
    }
}

// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules; routes translated input into the stroke session and renders its history.
use anyhow::Result;
use log::{debug, error, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::{
        SeatState,
        pointer::{CursorIcon, ThemedPointer},
    },
    shell::wlr_layer::LayerShell,
    shm::Shm,
};
use std::time::Instant;
use wayland_client::{Connection, QueueHandle};

use trailpen::{
    config::Config,
    draw::{CairoCanvas, Coordinate, Palette},
    error::{InvariantViolation, ResourceError},
    input::{CursorPresenter, InputEvent, StrokeSession},
};

use super::surface::OverlaySurface;

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    pub(super) surface: OverlaySurface,

    // Configuration
    pub(super) config: Config,
    palette: Palette,

    // Drawing session
    pub(super) session: StrokeSession,
    pub(super) pointer_position: Coordinate,

    // Cursor
    pub(super) themed_pointer: Option<ThemedPointer>,
    pub(super) pointer_focus: bool,
    cursor_error_reported: bool,

    /// First invariant violation raised inside a protocol callback.
    pub(super) fatal: Option<InvariantViolation>,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        surface: OverlaySurface,
        config: Config,
        session: StrokeSession,
    ) -> Self {
        let palette = config.palette();
        Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface,
            config,
            palette,
            session,
            pointer_position: Coordinate::default(),
            themed_pointer: None,
            pointer_focus: false,
            cursor_error_reported: false,
            fatal: None,
        }
    }

    /// Feeds one translated event into the session.
    ///
    /// Protocol callbacks cannot return errors, so an invariant violation is
    /// parked in `fatal` for the event loop to act on. Events after the first
    /// violation are dropped.
    pub(super) fn dispatch_input(&mut self, event: InputEvent) {
        if self.fatal.is_some() {
            return;
        }
        if let Err(err) = self.session.handle_event(event) {
            error!("Stroke session failed on {:?}: {}", event, err);
            self.fatal = Some(err);
        }
    }

    /// Runs the animator tick against the last known pointer position.
    pub(super) fn tick(&mut self, now: Instant) {
        if self.fatal.is_some() {
            return;
        }
        match self.session.on_tick(now, &self.pointer_position) {
            Ok(true) => debug!("Trail extended to {}", self.pointer_position),
            Ok(false) => {}
            Err(err) => {
                error!("Trail tick failed: {}", err);
                self.fatal = Some(err);
            }
        }
    }

    /// Re-queues the strategy cursor after the pointer enters the surface.
    pub(super) fn refresh_cursor(&mut self) {
        if let Err(err) = self.session.refresh_cursor() {
            error!("Cursor refresh failed: {}", err);
            self.fatal.get_or_insert(err);
        }
    }

    /// Shows the queued cursor icon once the pointer is over the surface.
    pub(super) fn apply_cursor(&mut self, conn: &Connection) {
        if !self.pointer_focus {
            return;
        }
        let Some(pointer) = self.themed_pointer.as_ref() else {
            return;
        };

        let mut presenter = ThemedCursor { pointer, conn };
        match self.session.apply_pending_cursor(&mut presenter) {
            Ok(true) => {
                debug!("Cursor updated");
                self.cursor_error_reported = false;
            }
            Ok(false) => {}
            // Stays queued and is retried every iteration; report it once.
            Err(err) if self.cursor_error_reported => debug!("{}", err),
            Err(err) => {
                warn!("{}", err);
                self.cursor_error_reported = true;
            }
        }
    }

    /// Paints the session history into a fresh buffer and commits it.
    pub(super) fn render(&mut self, qh: &QueueHandle<Self>) -> Result<()> {
        let buffer_count = self.config.performance.buffer_count as usize;
        let vsync = self.config.performance.enable_vsync;
        let palette = self.palette;
        let session = &mut self.session;

        self.surface
            .paint(&self.shm, buffer_count, vsync, qh, |ctx| {
                let mut canvas = CairoCanvas::new(ctx, palette);
                session.redraw(&mut canvas)?;
                Ok(())
            })?;
        debug!("Rendered {} segments", self.session.history().len());
        Ok(())
    }
}

/// Shows theme cursors on the seat's pointer.
struct ThemedCursor<'a> {
    pointer: &'a ThemedPointer,
    conn: &'a Connection,
}

impl CursorPresenter for ThemedCursor<'_> {
    fn set_cursor_icon(&mut self, theme_icon: &str) -> Result<(), ResourceError> {
        let icon: CursorIcon = theme_icon
            .parse()
            .map_err(|_| ResourceError::Cursor(format!("unknown cursor icon '{theme_icon}'")))?;
        self.pointer
            .set_cursor(self.conn, icon)
            .map_err(|err| ResourceError::Cursor(err.to_string()))
    }
}

// Coordinates backend startup/shutdown and drives the event loop while delegating
// rendering & protocol state to `WaylandState` and its handler modules.
use anyhow::{Context, Result, anyhow};
use calloop::EventLoop;
use log::{debug, error, info, warn};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    reexports::calloop_wayland_source::WaylandSource,
    registry::RegistryState,
    seat::{SeatState, pointer::CursorIcon},
    shell::wlr_layer::LayerShell,
    shm::Shm,
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};
use wayland_client::{Connection, QueueHandle, globals::registry_queue_init};

use trailpen::{
    config::Config,
    error::{ResourceError, SessionError},
    input::{InputEvent, StrategyKind, StrokeSession},
    util,
};

use super::{state::WaylandState, surface::OverlaySurface};

/// Consecutive render failures tolerated before the overlay gives up.
const MAX_RENDER_FAILURES: u32 = 10;

/// Upper bound on how long the loop blocks while no stroke is animating, so
/// termination signals are noticed promptly.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Wayland backend state
pub struct WaylandBackend {
    initial_strategy: Option<StrategyKind>,
}

impl WaylandBackend {
    pub fn new(initial_strategy: Option<StrategyKind>) -> Self {
        Self { initial_strategy }
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting Wayland backend");

        // Connect to Wayland compositor
        let conn =
            Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
        debug!("Connected to Wayland display");

        // Initialize registry and event queue
        let (globals, event_queue) =
            registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
        let qh = event_queue.handle();

        // Bind global interfaces
        let compositor_state =
            CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
        debug!("Bound compositor");

        let layer_shell =
            LayerShell::bind(&globals, &qh).context("zwlr_layer_shell_v1 not available")?;
        debug!("Bound layer shell");

        let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
        debug!("Bound shared memory");

        let output_state = OutputState::new(&globals, &qh);
        let seat_state = SeatState::new(&globals, &qh);
        let registry_state = RegistryState::new(&globals);

        // Load configuration
        let config = Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config: {:#}. Using defaults.", e);
            Config::default()
        });
        info!("Configuration loaded");
        debug!("  Strategies: {:?}", config.strategies.order);
        debug!("  Line width: {:.1}px", config.drawing.line_width);
        debug!("  Buffer count: {}", config.performance.buffer_count);
        debug!("  VSync: {}", config.performance.enable_vsync);
        warn_unknown_cursor_icons(&config);

        let settings = config.session_settings(self.initial_strategy)?;
        info!(
            "Trail tick every {}ms (~{:.0} segments/s while drawing)",
            settings.tick_interval.as_millis(),
            util::ticks_per_second(settings.tick_interval)
        );
        let session = StrokeSession::new(settings, Instant::now())
            .context("Invalid drawing session configuration")?;
        info!("Line drawing strategy: {}", session.active_strategy().name());

        let surface = OverlaySurface::create(&compositor_state, &layer_shell, &qh);
        let mut state = WaylandState::new(
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface,
            config,
            session,
        );

        // SIGINT/SIGTERM end the session like Escape does
        let quit_signal = Arc::new(AtomicBool::new(false));
        for signal in [SIGINT, SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&quit_signal))
                .context("Failed to register signal handler")?;
        }

        let mut event_loop: EventLoop<WaylandState> =
            EventLoop::try_new().context("Failed to create event loop")?;
        WaylandSource::new(conn.clone(), event_queue)
            .insert(event_loop.handle())
            .map_err(|e| anyhow!("Failed to register Wayland event source: {}", e.error))?;

        let result = drive(&mut event_loop, &mut state, &conn, &qh, &quit_signal);

        info!("Wayland backend exiting");
        teardown(&mut state, &conn);
        result
    }
}

/// Runs the main loop until exit is requested or something fatal happens.
///
/// Each iteration dispatches pending Wayland events (blocking at most until
/// the next trail tick is due), runs one animator tick, applies cursor changes
/// and renders if the history changed.
fn drive(
    event_loop: &mut EventLoop<'_, WaylandState>,
    state: &mut WaylandState,
    conn: &Connection,
    qh: &QueueHandle<WaylandState>,
    quit_signal: &AtomicBool,
) -> Result<()> {
    let mut consecutive_render_failures = 0u32;

    loop {
        if state.session.should_exit {
            info!("Exit requested, breaking event loop");
            return Ok(());
        }

        let timeout = state
            .session
            .time_until_next_tick(Instant::now())
            .unwrap_or(IDLE_POLL_INTERVAL);
        event_loop
            .dispatch(Some(timeout), state)
            .context("Wayland event loop error")?;

        if quit_signal.load(Ordering::Relaxed) {
            info!("Termination signal received");
            state.dispatch_input(InputEvent::Quit);
        }

        state.tick(Instant::now());

        if let Some(violation) = state.fatal.take() {
            error!("Stroke engine invariant violated, shutting down: {}", violation);
            return Err(SessionError::from(violation).into());
        }

        if state.session.should_exit {
            continue;
        }

        state.apply_cursor(conn);

        // With vsync this throttles painting to the display refresh rate
        let vsync = state.config.performance.enable_vsync;
        if state.session.needs_redraw && state.surface.can_paint(vsync) {
            match state.render(qh) {
                Ok(()) => consecutive_render_failures = 0,
                Err(e) => {
                    consecutive_render_failures += 1;
                    warn!(
                        "Rendering error (attempt {}/{}): {:#}",
                        consecutive_render_failures, MAX_RENDER_FAILURES, e
                    );

                    if consecutive_render_failures >= MAX_RENDER_FAILURES {
                        return Err(anyhow!(
                            "Too many consecutive render failures ({}), exiting: {:#}",
                            consecutive_render_failures,
                            e
                        ));
                    }

                    // Clear redraw flag to avoid infinite error loop
                    state.session.needs_redraw = false;
                }
            }
        } else if state.session.needs_redraw && state.surface.frame_pending() {
            debug!("Skipping render - frame callback already pending");
        }
    }
}

/// Releases the overlay's protocol objects. Every step runs even if an
/// earlier one failed; failures are only logged.
fn teardown(state: &mut WaylandState, conn: &Connection) {
    state.session.discard_open_stroke();

    state.pointer_focus = false;
    if state.themed_pointer.take().is_some() {
        debug!("Themed pointer released");
    }
    state.surface.tear_down();
    if let Err(e) = conn.flush() {
        warn!(
            "{}",
            ResourceError::Teardown {
                step: "flush",
                reason: e.to_string(),
            }
        );
    }
    info!("Overlay torn down");
}

/// Cursor names that the pointer theme will never know are reported up front;
/// the session will keep retrying them otherwise.
fn warn_unknown_cursor_icons(config: &Config) {
    for (name, icon) in &config.cursors.0 {
        if icon.parse::<CursorIcon>().is_err() {
            warn!("Cursor '{}' maps to unknown theme icon '{}'", name, icon);
        }
    }
}

//! The overlay's full-screen layer surface and the shm buffers the stroke
//! history is painted into.
//!
//! The surface goes through three stages: created and waiting for the
//! compositor's first configure, ready to paint, and torn down. Only a ready
//! surface is painted.

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    shell::{
        WaylandSurface,
        wlr_layer::{Anchor, KeyboardInteractivity, Layer, LayerShell, LayerSurface},
    },
    shm::{Shm, slot::SlotPool},
};
use wayland_client::{QueueHandle, protocol::wl_shm};

use super::state::WaylandState;

const NAMESPACE: &str = "trailpen";
const BYTES_PER_PIXEL: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    AwaitingConfigure,
    Ready,
    TornDown,
}

/// Size, stage and frame pacing of the overlay, without the protocol objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Lifecycle {
    width: u32,
    height: u32,
    stage: Stage,
    frame_pending: bool,
}

/// What a configure changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Configured {
    resized: bool,
    paintable: bool,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            stage: Stage::AwaitingConfigure,
            frame_pending: false,
        }
    }

    /// A zero dimension keeps the previous one.
    fn configure(&mut self, width: u32, height: u32) -> Configured {
        if self.stage == Stage::TornDown {
            return Configured {
                resized: false,
                paintable: false,
            };
        }

        let width = if width == 0 { self.width } else { width };
        let height = if height == 0 { self.height } else { height };
        let resized = (width, height) != (self.width, self.height);
        self.width = width;
        self.height = height;

        let paintable = width > 0 && height > 0;
        if paintable {
            self.stage = Stage::Ready;
        }
        Configured { resized, paintable }
    }

    fn can_paint(&self, vsync: bool) -> bool {
        self.stage == Stage::Ready && !(vsync && self.frame_pending)
    }

    /// Returns `false` if the overlay was already torn down.
    fn tear_down(&mut self) -> bool {
        let first = self.stage != Stage::TornDown;
        self.stage = Stage::TornDown;
        self.frame_pending = false;
        first
    }
}

pub(super) struct OverlaySurface {
    layer: Option<LayerSurface>,
    pool: Option<SlotPool>,
    lifecycle: Lifecycle,
}

impl OverlaySurface {
    /// Creates the overlay layer surface: every edge anchored, exclusive
    /// keyboard focus, no exclusive zone. The compositor answers with a
    /// configure carrying the output size.
    pub(super) fn create(
        compositor: &CompositorState,
        shell: &LayerShell,
        qh: &QueueHandle<WaylandState>,
    ) -> Self {
        let wl_surface = compositor.create_surface(qh);
        let layer =
            shell.create_layer_surface(qh, wl_surface, Layer::Overlay, Some(NAMESPACE), None);
        layer.set_anchor(Anchor::all());
        layer.set_keyboard_interactivity(KeyboardInteractivity::Exclusive);
        // 0x0 lets the compositor pick the output size.
        layer.set_size(0, 0);
        layer.set_exclusive_zone(-1);
        layer.commit();
        info!("Overlay layer surface created");

        Self {
            layer: Some(layer),
            pool: None,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Applies a compositor configure. Returns whether the surface can now
    /// be painted.
    pub(super) fn configure(&mut self, width: u32, height: u32) -> bool {
        let was_ready = self.lifecycle.stage == Stage::Ready;
        let outcome = self.lifecycle.configure(width, height);
        if outcome.resized && self.pool.take().is_some() {
            debug!("Overlay resized, dropping buffer pool");
        }
        if !outcome.paintable {
            warn!("Compositor configured the overlay without a size");
        } else if !was_ready {
            info!(
                "Overlay ready at {}x{}",
                self.lifecycle.width, self.lifecycle.height
            );
        }
        outcome.paintable
    }

    /// Whether a paint may happen now. With vsync, one frame callback must
    /// arrive before the next paint.
    pub(super) fn can_paint(&self, vsync: bool) -> bool {
        self.lifecycle.can_paint(vsync)
    }

    pub(super) fn frame_pending(&self) -> bool {
        self.lifecycle.frame_pending
    }

    pub(super) fn frame_done(&mut self) {
        self.lifecycle.frame_pending = false;
    }

    /// Paints one frame: takes a buffer from the pool, lets `draw` fill it
    /// through Cairo, then attaches, damages and commits it.
    pub(super) fn paint<F>(
        &mut self,
        shm: &Shm,
        buffer_count: usize,
        vsync: bool,
        qh: &QueueHandle<WaylandState>,
        draw: F,
    ) -> Result<()>
    where
        F: FnOnce(&cairo::Context) -> Result<()>,
    {
        if self.lifecycle.stage != Stage::Ready {
            bail!("Overlay surface is not ready to paint");
        }
        let (width, height) = (self.lifecycle.width, self.lifecycle.height);
        let stride = width * BYTES_PER_PIXEL;

        if self.pool.is_none() {
            let size = stride as usize * height as usize * buffer_count;
            debug!("Allocating {} byte buffer pool ({} buffers)", size, buffer_count);
            self.pool = Some(SlotPool::new(size, shm).context("Failed to create buffer pool")?);
        }
        let (buffer, pixels) = self
            .pool
            .as_mut()
            .context("Buffer pool missing after allocation")?
            .create_buffer(
                width as i32,
                height as i32,
                stride as i32,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?;

        {
            // SAFETY: `pixels` is this buffer's pool slice, `stride * height`
            // bytes, and ARgb32 matches Argb8888. The Cairo surface and context
            // die at the end of this block, before the buffer is attached.
            let target = unsafe {
                cairo::ImageSurface::create_for_data_unsafe(
                    pixels.as_mut_ptr(),
                    cairo::Format::ARgb32,
                    width as i32,
                    height as i32,
                    stride as i32,
                )
                .context("Failed to create Cairo surface")?
            };
            let ctx = cairo::Context::new(&target).context("Failed to create Cairo context")?;
            draw(&ctx)?;
        }

        let wl_surface = self
            .layer
            .as_ref()
            .context("Overlay layer surface already destroyed")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(0, 0, width as i32, height as i32);
        if vsync {
            wl_surface.frame(qh, wl_surface.clone());
            self.lifecycle.frame_pending = true;
        }
        wl_surface.commit();
        Ok(())
    }

    /// Destroys the layer surface and frees the buffer pool. Safe to call
    /// more than once; later calls do nothing.
    pub(super) fn tear_down(&mut self) {
        if !self.lifecycle.tear_down() {
            return;
        }
        if self.layer.take().is_some() {
            debug!("Layer surface destroyed");
        }
        if self.pool.take().is_some() {
            debug!("Buffer pool released");
        }
    }
}

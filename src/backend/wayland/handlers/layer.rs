// Layer-shell lifecycle: the first configure makes the overlay paintable, later
// ones resize it, and a close from the compositor ends the drawing session.
use log::{debug, info};
use smithay_client_toolkit::shell::wlr_layer::{
    LayerShellHandler, LayerSurface, LayerSurfaceConfigure,
};
use wayland_client::{Connection, QueueHandle};

use trailpen::input::InputEvent;

use super::super::state::WaylandState;

impl LayerShellHandler for WaylandState {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _layer: &LayerSurface) {
        info!("Compositor closed the overlay, ending session");
        self.dispatch_input(InputEvent::Quit);
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _layer: &LayerSurface,
        configure: LayerSurfaceConfigure,
        serial: u32,
    ) {
        let (width, height) = configure.new_size;
        debug!("Layer configure #{serial}: {width}x{height}");

        // Any configure invalidates what is on screen; repaint the history.
        if self.surface.configure(width, height) {
            self.session.needs_redraw = true;
        }
    }
}

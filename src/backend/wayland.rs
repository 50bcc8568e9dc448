// Wayland backend: a wlr-layer-shell overlay surface that feeds pointer and
// keyboard events into the stroke session and renders its history with Cairo.
mod backend;
mod handlers;
mod state;
mod surface;

pub use backend::WaylandBackend;

mod markers;
mod renderer;

pub use markers::MarkerSync;
pub use renderer::RouteRenderer;

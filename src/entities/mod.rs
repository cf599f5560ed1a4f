mod route;
mod stop;

pub use route::{Route, RouteMetrics, AVERAGE_SPEED_KMPH, DEGREES_TO_KM};
pub use stop::{Coordinates, Stop};

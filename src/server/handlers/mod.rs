pub mod map;
pub mod route;
pub mod search;
pub mod stops;

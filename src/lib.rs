pub mod api;
pub mod engine;
pub mod entities;
pub mod error;
pub mod export;
pub mod external;
pub mod map;
pub mod server;
pub mod store;
pub mod view;

pub mod api;
pub mod app;
pub mod playback;
pub mod transport;
pub mod ui;

pub mod audio;
pub mod config;
pub mod content;
pub mod event;
pub mod preview;
pub mod sidebar;
pub mod store;
pub mod ui;
pub mod util;

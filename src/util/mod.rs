pub mod clock;
pub mod hook;
pub mod log;

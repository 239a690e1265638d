pub mod bus;
pub mod events;

pub use bus::{EventBus, Subscription};

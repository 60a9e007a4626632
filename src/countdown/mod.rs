pub mod machine;
pub mod ticker;

pub use machine::{CountdownMachine, CountdownState, DEFAULT_START};
pub use ticker::{ManualTicker, TickSource};

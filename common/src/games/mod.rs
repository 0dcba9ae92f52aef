mod deferred_task;
mod session_rng;

pub mod tictactoe;

pub use deferred_task::DeferredTask;
pub use session_rng::SessionRng;

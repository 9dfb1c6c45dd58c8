//! Application state module

mod app_state;
mod bindings;
mod bubble;
mod forms;
mod notifications;
mod recommendation;
mod wizard;

pub use app_state::*;
pub use bindings::*;
pub use bubble::*;
pub use forms::*;
pub use notifications::*;
pub use recommendation::*;
pub use wizard::*;

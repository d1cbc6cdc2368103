//! Application state module

mod app_state;
mod examples;
mod forms;
mod generation;
mod notifications;
mod results;

pub use app_state::*;
pub use examples::*;
pub use forms::*;
pub use generation::*;
pub use notifications::*;
pub use results::*;

//! Controller layer: UI events, dialog state machine, and command
//! orchestration between the UI and the backend worker.

pub mod dialog;
pub mod events;
pub mod orchestration;

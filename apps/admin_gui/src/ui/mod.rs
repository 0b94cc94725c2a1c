//! UI layer: the application shell and its dialogs.

pub mod app;

pub use app::AdminGuiApp;

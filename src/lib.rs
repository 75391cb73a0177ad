#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod placement;
pub mod print;
pub mod settings;
pub mod state;
pub mod stroke;
pub mod surface;
pub mod texture_manager;
pub mod workspace;

pub use app::PrinterApp;
pub use canvas::CanvasRaster;
pub use command::Command;
pub use dispatch::{DispatchHandle, Dispatcher};
pub use error::{CanvasError, PrintError};
pub use input::{InputEvent, InputHandler};
pub use placement::{Nudge, Placement};
pub use print::{PageImage, PageSetup, PrintDocument, PrintSurface};
pub use settings::Settings;
pub use state::StrokeState;
pub use stroke::{Pen, StrokeBuffer};
pub use surface::DrawingSurface;
pub use workspace::Workspace;

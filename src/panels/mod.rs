pub mod canvas;
pub mod edit_panel;

pub use canvas::CanvasPanel;
pub use edit_panel::EditPanel;

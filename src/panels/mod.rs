//! The egui panels around the canvas. They read the editor through its
//! query API and change it only through commands and property updates.

mod central_panel;
mod dialogs;
mod properties_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use dialogs::dialogs;
pub use properties_panel::properties_panel;
pub use tools_panel::tools_panel;

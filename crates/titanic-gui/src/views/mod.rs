//! View components
//!
//! The sidebar holds every input; the central panel shows results.

mod main_panel;
mod sidebar;

pub use main_panel::MainPanelView;
pub use sidebar::SidebarView;

//! ==============================================================================
//! components/mod.rs - UI Components
//! ==============================================================================

mod error_banner;
mod header;
mod tabs;
mod todo_panel;
mod todo_row;

pub use error_banner::ErrorBanner;
pub use header::Header;
pub use tabs::CategoryTabs;
pub use todo_panel::TodoPanel;
pub use todo_row::TodoRow;

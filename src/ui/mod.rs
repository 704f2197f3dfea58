pub mod error_modal;
pub mod layout;
pub mod results;
pub mod search;
pub mod search_theme;
pub mod status;
pub mod theme;
pub mod tooltip;

pub use error_modal::render_error_modal;
pub use layout::{MainLayout, centered_rect, create_main_layout};
pub use results::{ResultsRenderContext, render_results};
pub use search::render_search_bar;
pub use search_theme::SearchBarTheme;
pub use status::{HintMode, render_keyboard_hints};
pub use theme::{BuiltInTheme, Theme};

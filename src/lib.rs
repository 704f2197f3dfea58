//! Searchbar - expandable, themed search field for ratatui terminal UIs
//!
//! The widget lives in [`search_bar`] and is drawn by [`ui::render_search_bar`].
//! [`app`] wires it into a filterable results list.

pub mod app;
pub mod logging;
pub mod models;
pub mod search_bar;
pub mod storage;
pub mod ui;

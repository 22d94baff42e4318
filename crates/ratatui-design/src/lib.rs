//! `ratatui-design` is a small design-system widget set for ratatui.
//!
//! Widgets:
//! - [`modal::Modal`]: dialog with focus trap, Escape/overlay dismissal and a shared scroll lock.
//! - [`thinking_text::ThinkingText`]: typewriter text with an idle "thinking" indicator.
//! - [`sidenav::Sidenav`]: icon rail that expands on hover and collapses after a short delay.
//! - [`help::HelpBar`]: key hints.
//!
//! The interaction state behind them lives in `ratatui-design-core` and is re-exported here.
pub use ratatui_design_core::error;
pub use ratatui_design_core::focus;
pub use ratatui_design_core::hover;
pub use ratatui_design_core::input;
pub use ratatui_design_core::keymap;
pub use ratatui_design_core::modal as modal_controller;
pub use ratatui_design_core::reveal;
pub use ratatui_design_core::scroll_lock;
pub use ratatui_design_core::theme;
pub use ratatui_design_core::timer;
pub use ratatui_design_core::Error;
pub use ratatui_design_core::Result;

#[cfg(feature = "crossterm")]
pub use ratatui_design_core::crossterm_input;

pub mod render;

pub mod help;
pub mod modal;
pub mod sidenav;
pub mod thinking_text;

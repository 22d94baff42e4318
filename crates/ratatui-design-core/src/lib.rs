//! `ratatui-design-core` provides the interaction primitives behind the `ratatui-design` widgets.
//!
//! This crate is designed for **widget library authors** and apps that want fine-grained control.
//! Rendering lives in the facade crate; everything here is plain state you own and drive.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input, time, and rendering from your app.
//! - No async runtime and no background threads: time is passed in as `now`.
//! - At most one pending timer per controller; every controller can be torn down with
//!   `unmount()` (or simply dropped) without leaving timers or locks behind.
//!
//! ## Controllers
//!
//! - [`modal::ModalController`]: open/close side effects, Escape and overlay dismissal, focus
//!   trap, shared [`scroll_lock::ScrollLock`].
//! - [`reveal::TextReveal`]: typewriter reveal with speed presets and optional looping.
//! - [`hover::HoverIntent`]: expand on enter, debounced collapse on leave.
//!
//! ## Driving time
//!
//! Pass `clock.now()` from a [`timer::Clock`] into `tick`/`set_text`/`pointer_leave`, and use the
//! controllers' `deadline()` values (see [`timer::next_deadline`]) as the poll timeout of your
//! event loop. Tests use [`timer::ManualClock`].
pub mod error;
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod focus;
pub mod hover;
pub mod input;
pub mod keymap;
pub mod modal;
pub mod reveal;
pub mod scroll_lock;
pub mod timer;

pub use error::Error;
pub use error::Result;

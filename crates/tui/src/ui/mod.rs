//! UI rendering module for the shell.
//!
//! Panels live in `components`, their placement in `layout`, and the event
//! loop in `runtime`.

pub mod components;
pub mod layout;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;

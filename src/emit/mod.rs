//! Projections of a loaded theme: CSS custom properties and Tailwind
//! configuration fragments. Everything here reads the manager's stores and
//! outlines; nothing mutates.

pub mod css;
pub mod tailwind;

pub use tailwind::PluginApi;

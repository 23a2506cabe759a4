//! Thriftboard: interactive dashboard over second-hand clothing purchase
//! data (one observation per country × year, 2000–2026).
//!
//! The data layer (load → filter → aggregate → export) is pure and UI-free;
//! the `ui` and `app` modules render it with egui.

pub mod app;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;

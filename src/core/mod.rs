//! # Core Register Logic
//!
//! This module contains the register's business logic.
//! It knows nothing about any specific UI technology or platform facility.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (session state)  │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • compose() (report)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Platform  │
//!     │  Adapter   │ ───── Effect ──────────→ │  (print,   │
//!     │ (ratatui)  │                          │  images,   │
//!     └────────────┘                          │  prefs)    │
//!                                             └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`]: `AssetRecord` and its value types
//! - [`store`], [`selection`], [`paginator`]: the three pieces of session state
//! - [`export`]: report composition and HTML rendering
//! - [`form`]: typed draft editing for create/edit
//! - [`state`]: the `App` struct that keeps store, selection and page in step
//! - [`action`]: the `Action` enum and `update()`
//!
//! `config` and `seed` read files; everything else is pure.

pub mod action;
pub mod config;
pub mod export;
pub mod form;
pub mod paginator;
pub mod record;
pub mod seed;
pub mod selection;
pub mod state;
pub mod store;
pub mod theme;

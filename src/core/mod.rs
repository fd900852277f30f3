//! # Core Client Logic
//!
//! The client's state and the rules for changing it.
//! It knows nothing about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (session state)  │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │    API     │
//!           │  Adapter   │──── spawn ──►│  (reqwest) │
//!           │ (ratatui)  │◄── Action ───│            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all client state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`form`]: The per-form lifecycle state machine
//! - [`history`]: The capped, newest-first result list
//! - [`schema`]: Schema file selection and media-type checks
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod form;
pub mod history;
pub mod schema;
pub mod state;

//! Component trait system for TUI architecture
//!
//! This module defines the contracts that UI panels implement.
//! Instead of App knowing how to scroll and select for every panel,
//! components declare their own capabilities through traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │      (orchestrator: owns the editor, routes key events)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌──────────────┬────┴─────────┬──────────────┐
//!          ▼              ▼              ▼              ▼
//!    ┌───────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐
//!    │Populations│  │ Polygon  │  │  Piston  │  │   Logs   │
//!    │   Panel   │  │  Panel   │  │  Panel   │  │  Panel   │
//!    └───────────┘  └──────────┘  └──────────┘  └──────────┘
//!          │              │              │              │
//!          └──────────────┴──────┬───────┴──────────────┘
//!                                │
//!                       Implements traits:
//!                    Component, Interactive,
//!                    Scrollable, Selectable
//! ```
//!
//! - [`Component`] - Base trait: identity
//! - [`Interactive`] - Components that handle keyboard input
//! - [`Scrollable`] - Components with scrollable content
//! - [`Selectable`] - Scrollable components with item selection

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId};
pub use interactive::{Handled, Interactive};
pub use scrollable::{Scrollable, Selectable};

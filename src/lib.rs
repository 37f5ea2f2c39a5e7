//! # Listling - Reactive List Core
//!
//! An observable model/collection pair and a renderer-agnostic controller
//! layer, distilled from the classic client-side list examples: render a
//! list, add items from a counter, swap a row's words, delete a row, all
//! driven by change notifications rather than direct view calls.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   UiAction    ┌──────────────┐    mutate     ┌────────────┐
//! │  Renderer   │──────────────▶│ Controllers  │──────────────▶│   Models   │
//! │             │               │              │               │            │
//! │ - Display   │               │ - Action     │               │ - Item     │
//! │   surface   │◀──────────────│   routing    │◀──────────────│ - ItemList │
//! │ - User      │  directives   │ - Bindings   │ notifications │            │
//! │   input     │               │              │               │            │
//! └─────────────┘               └──────────────┘               └────────────┘
//! ```
//!
//! The display surface never appears in the core: controllers emit
//! `render_root` / `render_item` / `unrender_item` directives through an
//! injected [`Renderer`] handle and receive [`UiAction`] values back. The
//! whole loop is synchronous and single-threaded.

pub mod cmd_args;
pub mod config;
pub mod reactive;

// Re-export main types for easy access
pub use reactive::*;

//! # Reactive List Core - MVC Architecture
//!
//! This module implements the observable model/collection pattern with a
//! renderer-agnostic controller layer:
//!
//! - **Model**: [`Item`], an observable record of named attributes
//! - **Collection**: [`ItemList`], an ordered, de-duplicated, observable
//!   set of items
//! - **Controller**: [`ListController`] / [`ItemController`], which translate
//!   model and collection notifications into render directives, and route
//!   external UI actions back into mutations
//!
//! ```text
//! ┌─────────────────┐  UiAction   ┌─────────────────┐   mutate    ┌──────────────┐
//! │    Renderer     │────────────▶│   Controllers   │────────────▶│ Item/ItemList│
//! │  (injected)     │             │                 │             │              │
//! │ • render_root   │◀────────────│ • ListController│◀────────────│ • change     │
//! │ • render_item   │  directives │ • ItemController│   notify    │ • add/remove │
//! │ • unrender_item │             └─────────────────┘             └──────────────┘
//! └─────────────────┘
//! ```
//!
//! Everything is synchronous and single-threaded: notification fan-out runs
//! inline within the mutating call, and nested mutations triggered by a
//! handler complete before the outer call returns.

pub mod collection;
pub mod controller;
pub mod error;
pub mod events;
pub mod model;
pub mod store;
pub mod view;

#[cfg(test)]
pub mod testing;

// Re-export main types for convenience
pub use collection::ItemList;
pub use controller::{ItemController, ListController};
pub use error::CoreError;
pub use events::{HandlerId, UiAction};
pub use model::{Attributes, Item, ItemId};
pub use store::{NullStore, SharedStore, Store};
pub use view::{ConsoleRenderer, ItemHandle, Renderer, SharedRenderer};

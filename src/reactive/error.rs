//! Error types for the reactive core.
//!
//! Both variants are contract violations surfaced immediately to the caller.
//! There is no transient-failure category: every operation in the core is
//! synchronous and in-memory, and the persistence stub cannot fail.

use thiserror::Error;

use super::model::ItemId;

/// Contract violations raised by models and collections
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// An item was read, mutated, or inserted after `destroy`
    #[error("item {0} used after destroy")]
    UseAfterDestroy(ItemId),

    /// An item reference was inserted into a list that already holds it
    #[error("item {0} is already in the list")]
    DuplicateModel(ItemId),
}

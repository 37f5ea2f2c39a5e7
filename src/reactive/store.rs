//! Persistence stub.
//!
//! The list examples have no real storage: the sync layer is overridden to
//! report success without doing anything. [`NullStore`] keeps that seam
//! (`delete` consults the store before destroying an item) while defining
//! failure away.

use std::rc::Rc;

use anyhow::Result;
use tracing::trace;

use super::model::ItemId;

/// Persisted-state collaborator consulted by destructive operations
pub trait Store {
    /// Record the deletion of `item_id`
    fn delete(&self, item_id: ItemId) -> Result<()>;
}

/// Shared store handle injected into controllers
pub type SharedStore = Rc<dyn Store>;

/// Store that acknowledges every operation synchronously, storing nothing
pub struct NullStore;

impl Store for NullStore {
    fn delete(&self, item_id: ItemId) -> Result<()> {
        trace!(item = %item_id, "null store acknowledged delete");
        Ok(())
    }
}

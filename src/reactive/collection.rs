//! # Observable Collection
//!
//! [`ItemList`] is an ordered, insertion-ordered set of [`Item`] handles,
//! unique by identity, observable for membership changes. It owns no
//! rendering logic.
//!
//! The list subscribes itself to each member's `remove` event, so destroying
//! an item prunes it from every list that holds it without the caller doing
//! anything. Like `Item`, an `ItemList` handle is a cheap clone of shared
//! state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use super::error::CoreError;
use super::events::{HandlerId, HandlerSet, ListAddHandler, ListRemoveHandler};
use super::model::{Item, ItemId};

struct ListInner {
    items: RefCell<Vec<Item>>,
    /// Self-prune subscriptions, keyed by member id, so `remove` can
    /// unsubscribe the hook it registered in `add`.
    prune_hooks: RefCell<HashMap<ItemId, HandlerId>>,
    add_handlers: RefCell<HandlerSet<ListAddHandler>>,
    remove_handlers: RefCell<HandlerSet<ListRemoveHandler>>,
}

/// An ordered, de-duplicated set of items, observable for add/remove.
pub struct ItemList {
    inner: Rc<ListInner>,
}

impl Clone for ItemList {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Default for ItemList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ItemList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemList")
            .field("len", &self.len())
            .field("add_handlers", &self.inner.add_handlers.borrow().len())
            .field("remove_handlers", &self.inner.remove_handlers.borrow().len())
            .finish()
    }
}

impl ItemList {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ListInner {
                items: RefCell::new(Vec::new()),
                prune_hooks: RefCell::new(HashMap::new()),
                add_handlers: RefCell::new(HandlerSet::new()),
                remove_handlers: RefCell::new(HandlerSet::new()),
            }),
        }
    }

    /// Create a list from an initial sequence, preserving its order.
    ///
    /// Fails with `DuplicateModel` if the sequence repeats an item.
    pub fn from_items<I>(items: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = Item>,
    {
        let list = Self::new();
        for item in items {
            list.add(&item)?;
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }

    /// Whether the list holds this item (by identity, not attribute value)
    pub fn contains(&self, item: &Item) -> bool {
        self.position(item.id()).is_some()
    }

    /// Item at `index` in insertion order
    pub fn get(&self, index: usize) -> Option<Item> {
        self.inner.items.borrow().get(index).cloned()
    }

    /// Snapshot of the current sequence, in insertion order
    pub fn items(&self) -> Vec<Item> {
        self.inner.items.borrow().clone()
    }

    /// Visit every item in insertion order.
    ///
    /// The traversal runs over a snapshot taken at call start: mutations
    /// performed by `f` (or by handlers it triggers) affect the list but not
    /// the ongoing traversal.
    pub fn each(&self, mut f: impl FnMut(&Item)) {
        for item in self.items() {
            f(&item);
        }
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.inner.items.borrow().iter().position(|item| item.id() == id)
    }

    /// Append `item` and fire `add` with its index after insertion.
    ///
    /// Fails with `DuplicateModel` if the item is already present (order is
    /// left unchanged) and with `UseAfterDestroy` if it was already
    /// destroyed; a dead item could never self-prune.
    pub fn add(&self, item: &Item) -> Result<(), CoreError> {
        if item.is_destroyed() {
            return Err(CoreError::UseAfterDestroy(item.id()));
        }
        if self.contains(item) {
            return Err(CoreError::DuplicateModel(item.id()));
        }

        let index = {
            let mut items = self.inner.items.borrow_mut();
            items.push(item.clone());
            items.len() - 1
        };

        // Self-prune: when the member is destroyed, drop it from this list.
        // The hook holds only a weak reference, so a list is not kept alive
        // by the items it once contained.
        let weak = Rc::downgrade(&self.inner);
        let hook = item.on_remove(move |destroyed| {
            if let Some(inner) = weak.upgrade() {
                ItemList { inner }.remove(destroyed);
            }
        });
        self.inner.prune_hooks.borrow_mut().insert(item.id(), hook);

        debug!(item = %item.id(), index, "item added to list");
        let handlers = self.inner.add_handlers.borrow().snapshot();
        for handler in handlers {
            handler(item, index);
        }
        Ok(())
    }

    /// Excise `item` and fire `remove` with its previous index.
    ///
    /// A silent no-op (no notification) when the item is not present.
    pub fn remove(&self, item: &Item) {
        let Some(index) = self.position(item.id()) else {
            trace!(item = %item.id(), "remove ignored: item not in list");
            return;
        };

        self.inner.items.borrow_mut().remove(index);
        let hook = self.inner.prune_hooks.borrow_mut().remove(&item.id());
        if let Some(hook) = hook {
            item.off_remove(hook);
        }

        debug!(item = %item.id(), index, "item removed from list");
        let handlers = self.inner.remove_handlers.borrow().snapshot();
        for handler in handlers {
            handler(item, index);
        }
    }

    /// Subscribe to `add`; the handler receives the item and its new index
    pub fn on_add(&self, handler: impl Fn(&Item, usize) + 'static) -> HandlerId {
        self.inner
            .add_handlers
            .borrow_mut()
            .subscribe(Rc::new(handler))
    }

    /// Drop an `add` subscription; returns false for an unknown token
    pub fn off_add(&self, id: HandlerId) -> bool {
        self.inner.add_handlers.borrow_mut().unsubscribe(id)
    }

    /// Subscribe to `remove`; the handler receives the item and its old index
    pub fn on_remove(&self, handler: impl Fn(&Item, usize) + 'static) -> HandlerId {
        self.inner
            .remove_handlers
            .borrow_mut()
            .subscribe(Rc::new(handler))
    }

    /// Drop a `remove` subscription; returns false for an unknown token
    pub fn off_remove(&self, id: HandlerId) -> bool {
        self.inner.remove_handlers.borrow_mut().unsubscribe(id)
    }
}

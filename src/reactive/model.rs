//! # Observable Model
//!
//! [`Item`] is a mutable key/value record that notifies subscribers when its
//! attributes change and when it is destroyed. Handles are cheap clones of
//! shared state: every clone sees the same attributes and the same
//! subscribers.
//!
//! Attribute identity is stable for the item's lifetime; only values change.
//! Values are `serde_json::Value`, which covers the string/number/null range
//! the list examples use and supplies value equality for change detection.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tracing::{debug, trace};

use super::error::CoreError;
use super::events::{HandlerId, HandlerSet, ItemChangeHandler, ItemRemoveHandler};

/// Attribute map for one item. `BTreeMap` keeps changed-key reporting in a
/// deterministic order.
pub type Attributes = BTreeMap<String, Value>;

/// Process-unique identity of an [`Item`].
///
/// Assigned from a monotonically increasing counter at construction; this is
/// what lists de-duplicate on and what renderers receive in directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Rebuild an id from its raw value (e.g. parsed from renderer input)
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of an item.
///
/// `Destroying` exists so that the `remove` fan-out runs exactly once even if
/// a handler calls `destroy` again re-entrantly; the item only rejects
/// `get`/`set` once it reaches `Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Alive,
    Destroying,
    Dead,
}

struct ItemInner {
    id: ItemId,
    attributes: RefCell<Attributes>,
    lifecycle: Cell<Lifecycle>,
    change_handlers: RefCell<HandlerSet<ItemChangeHandler>>,
    remove_handlers: RefCell<HandlerSet<ItemRemoveHandler>>,
}

/// A single observable record of named attributes.
///
/// Cloning an `Item` creates another handle to the **same** record: both
/// handles see the same attributes and share subscribers.
pub struct Item {
    inner: Rc<ItemInner>,
}

impl Clone for Item {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.inner.id)
            .field("lifecycle", &self.inner.lifecycle.get())
            .field("attributes", &self.inner.attributes.borrow())
            .field("change_handlers", &self.inner.change_handlers.borrow().len())
            .field("remove_handlers", &self.inner.remove_handlers.borrow().len())
            .finish()
    }
}

impl Item {
    /// Create an item carrying the given default attributes
    pub fn new(defaults: Attributes) -> Self {
        let id = ItemId::next();
        trace!(item = %id, "item created");
        Self {
            inner: Rc::new(ItemInner {
                id,
                attributes: RefCell::new(defaults),
                lifecycle: Cell::new(Lifecycle::Alive),
                change_handlers: RefCell::new(HandlerSet::new()),
                remove_handlers: RefCell::new(HandlerSet::new()),
            }),
        }
    }

    /// Create an item from defaults with initial overrides merged on top
    pub fn with_overrides(defaults: Attributes, overrides: Attributes) -> Self {
        let mut attributes = defaults;
        attributes.extend(overrides);
        Self::new(attributes)
    }

    pub fn id(&self) -> ItemId {
        self.inner.id
    }

    /// Whether `destroy` has completed; a dead item rejects `get` and `set`
    pub fn is_destroyed(&self) -> bool {
        self.inner.lifecycle.get() == Lifecycle::Dead
    }

    fn guard(&self) -> Result<(), CoreError> {
        if self.is_destroyed() {
            return Err(CoreError::UseAfterDestroy(self.inner.id));
        }
        Ok(())
    }

    /// Current value for `key`, or `Value::Null` when unset
    pub fn get(&self, key: &str) -> Result<Value, CoreError> {
        self.guard()?;
        Ok(self
            .inner
            .attributes
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or(Value::Null))
    }

    /// Snapshot of all attributes
    pub fn attributes(&self) -> Result<Attributes, CoreError> {
        self.guard()?;
        Ok(self.inner.attributes.borrow().clone())
    }

    /// Merge `partial` into the attributes and fire one `change` notification
    /// carrying every key whose value actually changed.
    ///
    /// Keys whose new value equals the old one (an unset key counts as null)
    /// are not reported; when nothing changed, no notification fires at all.
    /// Returns the changed keys.
    pub fn set(&self, partial: Attributes) -> Result<Vec<String>, CoreError> {
        self.guard()?;

        let changed: Vec<String> = {
            let mut attributes = self.inner.attributes.borrow_mut();
            let mut changed = Vec::new();
            for (key, value) in partial {
                let old = attributes.get(&key).cloned().unwrap_or(Value::Null);
                if old != value {
                    attributes.insert(key.clone(), value);
                    changed.push(key);
                }
            }
            changed
        };

        if !changed.is_empty() {
            debug!(item = %self.inner.id, keys = ?changed, "item changed");
            let handlers = self.inner.change_handlers.borrow().snapshot();
            for handler in handlers {
                handler(self, &changed);
            }
        }
        Ok(changed)
    }

    /// Subscribe to `change`; the handler receives the item and changed keys
    pub fn on_change(&self, handler: impl Fn(&Item, &[String]) + 'static) -> HandlerId {
        self.inner
            .change_handlers
            .borrow_mut()
            .subscribe(Rc::new(handler))
    }

    /// Drop a `change` subscription; returns false for an unknown token
    pub fn off_change(&self, id: HandlerId) -> bool {
        self.inner.change_handlers.borrow_mut().unsubscribe(id)
    }

    /// Subscribe to `remove` (fired once, when the item is destroyed)
    pub fn on_remove(&self, handler: impl Fn(&Item) + 'static) -> HandlerId {
        self.inner
            .remove_handlers
            .borrow_mut()
            .subscribe(Rc::new(handler))
    }

    /// Drop a `remove` subscription; returns false for an unknown token
    pub fn off_remove(&self, id: HandlerId) -> bool {
        self.inner.remove_handlers.borrow_mut().unsubscribe(id)
    }

    /// Fire every `remove` subscriber once, then mark the item dead.
    ///
    /// Subscribers run while the item is still readable; afterwards every
    /// `get`/`set` fails with `UseAfterDestroy`. Calling `destroy` again,
    /// including re-entrantly from a `remove` handler, is a no-op.
    pub fn destroy(&self) {
        if self.inner.lifecycle.get() != Lifecycle::Alive {
            trace!(item = %self.inner.id, "destroy ignored: already destroyed");
            return;
        }
        self.inner.lifecycle.set(Lifecycle::Destroying);
        debug!(item = %self.inner.id, "item destroyed");

        let handlers = self.inner.remove_handlers.borrow().snapshot();
        for handler in handlers {
            handler(self);
        }
        self.inner.lifecycle.set(Lifecycle::Dead);
    }
}

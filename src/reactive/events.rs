//! # Event Infrastructure
//!
//! Subscription plumbing shared by models and collections, plus the action
//! type that carries externally-signaled UI events back into the core.
//!
//! Handlers are single-threaded (`Rc<dyn Fn>`): every notification fan-out
//! in this crate happens inline, on the thread that performed the mutation.
//! Handlers for one event kind fire in subscription order, and the fan-out
//! iterates a snapshot taken at fire time, so a handler may subscribe or
//! unsubscribe (including itself) without disturbing the ongoing delivery.

use std::rc::Rc;

use super::model::{Item, ItemId};

/// Handler for model attribute changes; receives the item and the changed keys
pub type ItemChangeHandler = Rc<dyn Fn(&Item, &[String])>;

/// Handler for model destruction
pub type ItemRemoveHandler = Rc<dyn Fn(&Item)>;

/// Handler for list insertion; receives the item and its index after insertion
pub type ListAddHandler = Rc<dyn Fn(&Item, usize)>;

/// Handler for list excision; receives the item and its index before excision
pub type ListRemoveHandler = Rc<dyn Fn(&Item, usize)>;

/// Subscription token returned by `on_*` methods and accepted by `off_*`.
///
/// Closures have no identity in Rust, so unsubscription goes through this
/// token instead of the framework-style handler-reference comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Ordered subscriber registry for one event kind.
///
/// Keeps subscription order for delivery and supports token-based removal.
pub(crate) struct HandlerSet<H> {
    entries: Vec<(HandlerId, H)>,
    next_id: u64,
}

impl<H: Clone> HandlerSet<H> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn subscribe(&mut self, handler: H) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, handler));
        id
    }

    /// Remove a subscription; returns false if the token is unknown
    pub(crate) fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Clone the current handlers, in subscription order, for a fan-out.
    ///
    /// The snapshot decouples delivery from the registry so handlers can
    /// mutate subscriptions mid-fan-out.
    pub(crate) fn snapshot(&self) -> Vec<H> {
        self.entries.iter().map(|(_, h)| h.clone()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Externally-signaled UI action routed into the core.
///
/// The renderer reports user interactions in an `{actionName, itemId?}`
/// shape; this enum is the typed equivalent, dispatched through a `match`
/// rather than a selector-string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Append a fresh item to the list
    AddItem,
    /// Exchange the two word attributes of one item
    Swap { item_id: ItemId },
    /// Destroy one item and detach its visual node
    Delete { item_id: ItemId },
}

impl UiAction {
    /// Map the external `{actionName, itemId?}` shape onto a typed action.
    ///
    /// Returns `None` for unknown names or for item actions missing an id.
    pub fn from_parts(action_name: &str, item_id: Option<ItemId>) -> Option<Self> {
        match (action_name, item_id) {
            ("add", _) => Some(Self::AddItem),
            ("swap", Some(item_id)) => Some(Self::Swap { item_id }),
            ("delete", Some(item_id)) => Some(Self::Delete { item_id }),
            _ => None,
        }
    }
}

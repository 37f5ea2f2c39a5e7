//! # Controllers - Binding Data to the Renderer
//!
//! The controller layer closes the feedback loop: external UI actions mutate
//! the models, model/collection notifications drive render directives.
//!
//! ```text
//! UiAction ──▶ ListController ──▶ Item / ItemList mutation
//!                                        │ notifications
//!                                        ▼
//!                 ItemController ──▶ Renderer directives
//! ```
//!
//! [`ListController`] owns the list-level wiring: it spawns one
//! [`ItemController`] per item entering the collection and disposes it when
//! the item leaves. [`ItemController`] is a two-state machine per item,
//! `Bound` (rendered, reacting to changes) and `Removed` (terminal), so a
//! notification arriving after detachment can never produce a duplicate
//! directive.
//!
//! Actions referring to unknown or already-removed items are ignored with a
//! log line rather than an error: a renderer may deliver stale clicks.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

use super::collection::ItemList;
use super::events::{HandlerId, UiAction};
use super::model::{Attributes, Item, ItemId};
use super::store::{NullStore, SharedStore};
use super::view::{self, ItemHandle, SharedRenderer};
use crate::config;

/// Per-item binding state: rendered and live, or detached for good
#[derive(Clone, Copy)]
enum BindingState {
    Bound(ItemHandle),
    Removed,
}

struct ItemBinding {
    item: Item,
    renderer: SharedRenderer,
    store: SharedStore,
    state: BindingState,
    change_hook: Option<HandlerId>,
    remove_hook: Option<HandlerId>,
}

/// Binds one item to the renderer: renders on construction, re-renders on
/// `change`, unrenders once on `remove`, then goes inert.
pub struct ItemController {
    inner: Rc<RefCell<ItemBinding>>,
}

impl Clone for ItemController {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl ItemController {
    /// Render `item` once and subscribe to its lifecycle.
    ///
    /// Notification-driven re-renders cannot surface errors to a caller, so
    /// renderer failures inside handlers are logged and swallowed; the
    /// initial render here still fails loudly.
    pub fn bind(item: Item, renderer: SharedRenderer, store: SharedStore) -> Result<Self> {
        let markup = view::item_markup(&item)?;
        let handle = renderer.borrow_mut().render_item(item.id(), &markup)?;

        let inner = Rc::new(RefCell::new(ItemBinding {
            item: item.clone(),
            renderer,
            store,
            state: BindingState::Bound(handle),
            change_hook: None,
            remove_hook: None,
        }));

        let weak = Rc::downgrade(&inner);
        let change_hook = item.on_change(move |changed_item, _keys| {
            if let Some(binding) = weak.upgrade() {
                if let Err(error) = Self::refresh(&binding, changed_item) {
                    warn!(item = %changed_item.id(), %error, "item re-render failed");
                }
            }
        });

        let weak = Rc::downgrade(&inner);
        let remove_hook = item.on_remove(move |removed_item| {
            if let Some(binding) = weak.upgrade() {
                if let Err(error) = Self::unbind(&binding) {
                    warn!(item = %removed_item.id(), %error, "item unrender failed");
                }
            }
        });

        {
            let mut binding = inner.borrow_mut();
            binding.change_hook = Some(change_hook);
            binding.remove_hook = Some(remove_hook);
        }
        Ok(Self { inner })
    }

    /// Handle of the bound item
    pub fn item(&self) -> Item {
        self.inner.borrow().item.clone()
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.inner.borrow().state, BindingState::Bound(_))
    }

    /// Re-render after a model change; keeps the latest renderer handle
    fn refresh(binding: &Rc<RefCell<ItemBinding>>, item: &Item) -> Result<()> {
        let mut state = binding.borrow_mut();
        if !matches!(state.state, BindingState::Bound(_)) {
            return Ok(());
        }
        let markup = view::item_markup(item)?;
        let handle = state.renderer.borrow_mut().render_item(item.id(), &markup)?;
        state.state = BindingState::Bound(handle);
        Ok(())
    }

    /// Detach the visual node and go terminal.
    ///
    /// Reached from the model's `remove` event and from list-level disposal;
    /// whichever arrives first wins and the other becomes a no-op.
    fn unbind(binding: &Rc<RefCell<ItemBinding>>) -> Result<()> {
        let (item, renderer, handle, hooks) = {
            let mut state = binding.borrow_mut();
            let BindingState::Bound(handle) = state.state else {
                return Ok(());
            };
            state.state = BindingState::Removed;
            (
                state.item.clone(),
                state.renderer.clone(),
                handle,
                (state.change_hook.take(), state.remove_hook.take()),
            )
        };

        if let Some(hook) = hooks.0 {
            item.off_change(hook);
        }
        if let Some(hook) = hooks.1 {
            item.off_remove(hook);
        }
        renderer.borrow_mut().unrender_item(handle)?;
        debug!(item = %item.id(), "item unbound");
        Ok(())
    }

    /// Exchange the two word attributes.
    ///
    /// The resulting `change` notification performs the re-render; there is
    /// no separate render path. A no-op once the binding is `Removed`.
    pub fn swap(&self) -> Result<()> {
        let item = {
            let binding = self.inner.borrow();
            if !matches!(binding.state, BindingState::Bound(_)) {
                debug!(item = %binding.item.id(), "swap ignored: binding removed");
                return Ok(());
            }
            binding.item.clone()
        };

        let part1 = item.get(config::PART_ONE_KEY)?;
        let part2 = item.get(config::PART_TWO_KEY)?;
        let mut swapped = Attributes::new();
        swapped.insert(config::PART_ONE_KEY.to_string(), part2);
        swapped.insert(config::PART_TWO_KEY.to_string(), part1);
        item.set(swapped)?;
        Ok(())
    }

    /// Record the deletion with the store, then destroy the item.
    ///
    /// The destroy cascade prunes the item from its list and unrenders this
    /// binding. A no-op once the binding is `Removed`.
    pub fn delete(&self) -> Result<()> {
        let (item, store) = {
            let binding = self.inner.borrow();
            if !matches!(binding.state, BindingState::Bound(_)) {
                debug!(item = %binding.item.id(), "delete ignored: binding removed");
                return Ok(());
            }
            (binding.item.clone(), binding.store.clone())
        };

        store.delete(item.id())?;
        item.destroy();
        Ok(())
    }

    /// List-level disposal (item left the collection without being destroyed)
    fn dispose(&self) -> Result<()> {
        Self::unbind(&self.inner)
    }
}

struct ListState {
    counter: u64,
    defaults: Attributes,
    store: SharedStore,
    bindings: HashMap<ItemId, ItemController>,
}

/// Binds one [`ItemList`] to the renderer and routes UI actions into
/// mutations.
pub struct ListController {
    collection: ItemList,
    renderer: SharedRenderer,
    inner: Rc<RefCell<ListState>>,
}

impl ListController {
    /// Controller over a fresh, empty list
    pub fn new(renderer: SharedRenderer, defaults: Attributes) -> Result<Self> {
        Self::with_store(renderer, defaults, ItemList::new(), Rc::new(NullStore))
    }

    /// Controller adopting an existing list; pre-existing items are replayed
    /// through the same binding path new items take
    pub fn with_items(
        renderer: SharedRenderer,
        defaults: Attributes,
        collection: ItemList,
    ) -> Result<Self> {
        Self::with_store(renderer, defaults, collection, Rc::new(NullStore))
    }

    /// Fully-injected constructor
    pub fn with_store(
        renderer: SharedRenderer,
        defaults: Attributes,
        collection: ItemList,
        store: SharedStore,
    ) -> Result<Self> {
        let inner = Rc::new(RefCell::new(ListState {
            counter: 0,
            defaults,
            store,
            bindings: HashMap::new(),
        }));

        // Spawn a binding for every item entering the list. The hook holds
        // only a weak reference so dropping the controller detaches it.
        {
            let weak = Rc::downgrade(&inner);
            let renderer = renderer.clone();
            collection.on_add(move |item, index| {
                let Some(state) = weak.upgrade() else { return };
                match Self::spawn_binding(&state, &renderer, item) {
                    Ok(()) => debug!(item = %item.id(), index, "item bound to list view"),
                    Err(error) => warn!(item = %item.id(), %error, "failed to bind item"),
                }
            });
        }

        // Dispose the binding when an item leaves the list, whether through
        // the destroy cascade or a direct removal.
        {
            let weak = Rc::downgrade(&inner);
            collection.on_remove(move |item, index| {
                let Some(state) = weak.upgrade() else { return };
                let binding = state.borrow_mut().bindings.remove(&item.id());
                if let Some(binding) = binding {
                    debug!(item = %item.id(), index, "item left list view");
                    if let Err(error) = binding.dispose() {
                        warn!(item = %item.id(), %error, "failed to dispose binding");
                    }
                }
            });
        }

        renderer.borrow_mut().render_root(&view::root_markup())?;
        for item in collection.items() {
            Self::spawn_binding(&inner, &renderer, &item)?;
        }

        Ok(Self {
            collection,
            renderer,
            inner,
        })
    }

    fn spawn_binding(
        state: &Rc<RefCell<ListState>>,
        renderer: &SharedRenderer,
        item: &Item,
    ) -> Result<()> {
        let store = state.borrow().store.clone();
        let binding = ItemController::bind(item.clone(), renderer.clone(), store)?;
        state.borrow_mut().bindings.insert(item.id(), binding);
        Ok(())
    }

    /// The bound collection
    pub fn collection(&self) -> &ItemList {
        &self.collection
    }

    /// The injected renderer handle
    pub fn renderer(&self) -> &SharedRenderer {
        &self.renderer
    }

    /// Dispatch one externally-signaled UI action
    pub fn handle_action(&self, action: UiAction) -> Result<()> {
        match action {
            UiAction::AddItem => self.add_item().map(|_| ()),
            UiAction::Swap { item_id } => match self.binding(item_id) {
                Some(binding) => binding.swap(),
                None => {
                    debug!(item = %item_id, "swap ignored: unknown item");
                    Ok(())
                }
            },
            UiAction::Delete { item_id } => match self.binding(item_id) {
                Some(binding) => binding.delete(),
                None => {
                    debug!(item = %item_id, "delete ignored: unknown item");
                    Ok(())
                }
            },
        }
    }

    /// Build a fresh item and add it to the list.
    ///
    /// The counter pre-increments (first emitted value is 1) and suffixes the
    /// second word's default, so consecutive adds read `world1`, `world2`, …
    /// Rendering rides the collection's `add` notification.
    pub fn add_item(&self) -> Result<Item> {
        let (counter, defaults) = {
            let mut state = self.inner.borrow_mut();
            state.counter += 1;
            (state.counter, state.defaults.clone())
        };

        let base = defaults
            .get(config::PART_TWO_KEY)
            .cloned()
            .unwrap_or(Value::Null);
        let label = format!("{}{}", view::display_text(&base), counter);

        let mut overrides = Attributes::new();
        overrides.insert(config::PART_TWO_KEY.to_string(), Value::String(label));
        let item = Item::with_overrides(defaults, overrides);

        self.collection.add(&item)?;
        Ok(item)
    }

    fn binding(&self, item_id: ItemId) -> Option<ItemController> {
        self.inner.borrow().bindings.get(&item_id).cloned()
    }
}

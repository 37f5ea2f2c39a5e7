//! Shared helpers for the integration suite.
//!
//! The recording renderer stands in for the external display surface: every
//! directive the controllers emit is logged in arrival order, so scenarios
//! assert on the exact render traffic instead of on a screen.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use listling::reactive::{ItemHandle, ItemId, Renderer};

/// One recorded render directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Root(String),
    Item {
        id: ItemId,
        markup: String,
        handle: ItemHandle,
    },
    Unrender(ItemHandle),
}

/// Renderer double that logs directives and mints sequential handles
pub struct RecordingRenderer {
    pub directives: Vec<Directive>,
    next_handle: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
            next_handle: 0,
        }
    }

    /// Markup of every `render_item` directive for `id`, in order
    pub fn markups_for(&self, id: ItemId) -> Vec<String> {
        self.directives
            .iter()
            .filter_map(|directive| match directive {
                Directive::Item {
                    id: directive_id,
                    markup,
                    ..
                } if *directive_id == id => Some(markup.clone()),
                _ => None,
            })
            .collect()
    }

    /// Ids in first-render order, skipping re-renders of the same item
    pub fn rendered_ids(&self) -> Vec<ItemId> {
        let mut ids = Vec::new();
        for directive in &self.directives {
            if let Directive::Item { id, .. } = directive {
                if !ids.contains(id) {
                    ids.push(*id);
                }
            }
        }
        ids
    }

    pub fn unrender_count(&self) -> usize {
        self.directives
            .iter()
            .filter(|directive| matches!(directive, Directive::Unrender(_)))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn render_root(&mut self, markup: &str) -> Result<()> {
        self.directives.push(Directive::Root(markup.to_string()));
        Ok(())
    }

    fn render_item(&mut self, item_id: ItemId, markup: &str) -> Result<ItemHandle> {
        let handle = ItemHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        self.directives.push(Directive::Item {
            id: item_id,
            markup: markup.to_string(),
            handle,
        });
        Ok(handle)
    }

    fn unrender_item(&mut self, handle: ItemHandle) -> Result<()> {
        self.directives.push(Directive::Unrender(handle));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Fresh shared recording renderer for a scenario
pub fn recording() -> Rc<RefCell<RecordingRenderer>> {
    Rc::new(RefCell::new(RecordingRenderer::new()))
}

//! # View Layer - Injected Renderer Seam
//!
//! The core never touches a display surface. Controllers emit three
//! directives through the [`Renderer`] trait (replace the root content,
//! produce/update one item's visual node, detach one item's visual node)
//! and the implementor turns them into visible output.
//!
//! This module also builds the markup fragments the directives carry
//! (string-concatenated, as in the original list examples) and ships
//! [`ConsoleRenderer`], a `Write`-backed implementation used by the demo
//! binary and capturable in tests.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use anyhow::Result;
use serde_json::Value;
use tracing::trace;

use super::error::CoreError;
use super::model::{Item, ItemId};
use crate::config;

/// Opaque token for one rendered item node, minted by the renderer.
///
/// Controllers hold the handle returned by the latest `render_item` call and
/// pass it back to `unrender_item`; they never interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle(u64);

impl ItemHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// External collaborator that turns render directives into visible output.
pub trait Renderer {
    /// Replace or append the root content (list chrome: add button, container)
    fn render_root(&mut self, markup: &str) -> Result<()>;

    /// Produce or update the visual node for one item, returning its handle
    fn render_item(&mut self, item_id: ItemId, markup: &str) -> Result<ItemHandle>;

    /// Detach the visual node behind `handle`
    fn unrender_item(&mut self, handle: ItemHandle) -> Result<()>;

    /// Name of this renderer for debugging
    fn name(&self) -> &'static str;
}

/// Shared renderer handle injected into controllers
pub type SharedRenderer = Rc<RefCell<dyn Renderer>>;

/// Root fragment: the add button plus the empty list container
pub fn root_markup() -> String {
    "<button id='add'>Add list item</button><ul></ul>".to_string()
}

/// Item fragment: both word attributes plus the swap/delete affordances
pub fn item_markup(item: &Item) -> Result<String, CoreError> {
    let part1 = display_text(&item.get(config::PART_ONE_KEY)?);
    let part2 = display_text(&item.get(config::PART_TWO_KEY)?);
    Ok(format!(
        "<li><span>{part1} {part2}</span> <span class='swap'>[swap]</span> <span class='delete'>[delete]</span></li>"
    ))
}

/// Plain-text rendering of an attribute value (strings unquoted, null empty)
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// One line of [`ConsoleRenderer`] state
struct ConsoleEntry {
    handle: ItemHandle,
    item_id: ItemId,
    markup: String,
}

/// Renderer that maintains the list as lines of text over any `Write` sink.
///
/// Directives update internal state; [`ConsoleRenderer::draw`] repaints the
/// whole list, which is how the demo binary refreshes after each action.
/// Tests hand it a `Vec<u8>` to capture output.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    root: Option<String>,
    entries: Vec<ConsoleEntry>,
    next_handle: u64,
}

impl ConsoleRenderer<io::Stdout> {
    /// Console renderer over stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            root: None,
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Repaint the current list state to the sink
    pub fn draw(&mut self) -> Result<()> {
        if let Some(root) = &self.root {
            writeln!(self.out, "{root}")?;
        }
        for entry in &self.entries {
            writeln!(self.out, "  [{}] {}", entry.item_id, entry.markup)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// Access the underlying sink (used by tests to inspect captured output)
    pub fn sink(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render_root(&mut self, markup: &str) -> Result<()> {
        trace!(renderer = self.name(), "render_root");
        self.root = Some(markup.to_string());
        self.entries.clear();
        Ok(())
    }

    fn render_item(&mut self, item_id: ItemId, markup: &str) -> Result<ItemHandle> {
        trace!(renderer = self.name(), item = %item_id, "render_item");
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item_id == item_id) {
            entry.markup = markup.to_string();
            return Ok(entry.handle);
        }
        let handle = ItemHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        self.entries.push(ConsoleEntry {
            handle,
            item_id,
            markup: markup.to_string(),
        });
        Ok(handle)
    }

    fn unrender_item(&mut self, handle: ItemHandle) -> Result<()> {
        trace!(renderer = self.name(), handle = handle.raw(), "unrender_item");
        self.entries.retain(|entry| entry.handle != handle);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

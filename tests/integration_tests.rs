//! End-to-end scenarios for the reactive list loop.
//!
//! Each test drives a [`listling::ListController`] through UI actions the
//! way a display surface would, and asserts on the stream of directives the
//! recording renderer captured. No real rendering is involved, which keeps
//! the suite deterministic and CI-friendly.

mod common;

use common::{recording, Directive};
use listling::config;
use listling::reactive::{Attributes, CoreError, Item, ItemId, ItemList, ListController, UiAction};
use serde_json::json;

fn defaults() -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(config::PART_ONE_KEY.to_string(), json!("hello"));
    attributes.insert(config::PART_TWO_KEY.to_string(), json!("world"));
    attributes
}

#[test]
fn three_adds_render_incrementing_suffixes_in_order() {
    let renderer = recording();
    let controller = ListController::new(renderer.clone(), defaults()).unwrap();

    for _ in 0..3 {
        controller.handle_action(UiAction::AddItem).unwrap();
    }

    let items = controller.collection().items();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].get(config::PART_TWO_KEY).unwrap(), json!("world1"));
    assert_eq!(items[1].get(config::PART_TWO_KEY).unwrap(), json!("world2"));
    assert_eq!(items[2].get(config::PART_TWO_KEY).unwrap(), json!("world3"));

    let renderer = renderer.borrow();
    let rendered: Vec<ItemId> = renderer.rendered_ids();
    let expected: Vec<ItemId> = items.iter().map(Item::id).collect();
    assert_eq!(rendered, expected);

    assert!(renderer.markups_for(items[0].id())[0].contains("hello world1"));
    assert!(renderer.markups_for(items[1].id())[0].contains("hello world2"));
    assert!(renderer.markups_for(items[2].id())[0].contains("hello world3"));
}

#[test]
fn deleting_the_middle_item_preserves_its_neighbors() {
    let renderer = recording();
    let controller = ListController::new(renderer.clone(), defaults()).unwrap();
    for _ in 0..3 {
        controller.handle_action(UiAction::AddItem).unwrap();
    }
    let items = controller.collection().items();
    let middle = items[1].clone();

    controller
        .handle_action(UiAction::Delete {
            item_id: middle.id(),
        })
        .unwrap();

    let remaining = controller.collection().items();
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0].id(), items[0].id());
    assert_eq!(remaining[1].id(), items[2].id());
    assert_eq!(
        remaining[0].get(config::PART_TWO_KEY).unwrap(),
        json!("world1")
    );
    assert_eq!(
        remaining[1].get(config::PART_TWO_KEY).unwrap(),
        json!("world3")
    );

    assert!(middle.is_destroyed());
    assert_eq!(renderer.borrow().unrender_count(), 1);

    // A second delete for the same item is a no-op: no duplicate unrender
    controller
        .handle_action(UiAction::Delete {
            item_id: middle.id(),
        })
        .unwrap();
    assert_eq!(renderer.borrow().unrender_count(), 1);
}

#[test]
fn swap_is_an_involution() {
    let renderer = recording();
    let controller = ListController::new(renderer.clone(), defaults()).unwrap();
    controller.handle_action(UiAction::AddItem).unwrap();
    let item = controller.collection().get(0).unwrap();

    controller
        .handle_action(UiAction::Swap { item_id: item.id() })
        .unwrap();
    assert_eq!(item.get(config::PART_ONE_KEY).unwrap(), json!("world1"));
    assert_eq!(item.get(config::PART_TWO_KEY).unwrap(), json!("hello"));

    controller
        .handle_action(UiAction::Swap { item_id: item.id() })
        .unwrap();
    assert_eq!(item.get(config::PART_ONE_KEY).unwrap(), json!("hello"));
    assert_eq!(item.get(config::PART_TWO_KEY).unwrap(), json!("world1"));

    // initial render + one re-render per swap
    let markups = renderer.borrow().markups_for(item.id());
    assert_eq!(markups.len(), 3);
    assert!(markups[0].contains("hello world1"));
    assert!(markups[1].contains("world1 hello"));
    assert!(markups[2].contains("hello world1"));
}

#[test]
fn destroyed_items_reject_every_later_access() {
    let renderer = recording();
    let controller = ListController::new(renderer.clone(), defaults()).unwrap();
    controller.handle_action(UiAction::AddItem).unwrap();
    let item = controller.collection().get(0).unwrap();
    let id = item.id();

    controller.handle_action(UiAction::Delete { item_id: id }).unwrap();

    assert_eq!(item.get(config::PART_ONE_KEY), Err(CoreError::UseAfterDestroy(id)));
    let mut update = Attributes::new();
    update.insert(config::PART_ONE_KEY.to_string(), json!("late"));
    assert_eq!(item.set(update), Err(CoreError::UseAfterDestroy(id)));

    // Repeated destroy stays idempotent: the list saw exactly one removal
    item.destroy();
    item.destroy();
    assert_eq!(renderer.borrow().unrender_count(), 1);
}

#[test]
fn controller_replays_a_prepopulated_collection() {
    let list = ItemList::new();
    let first = Item::new(defaults());
    let second = Item::new(defaults());
    list.add(&first).unwrap();
    list.add(&second).unwrap();

    let renderer = recording();
    let controller = ListController::with_items(renderer.clone(), defaults(), list).unwrap();

    {
        let renderer = renderer.borrow();
        assert!(matches!(renderer.directives[0], Directive::Root(_)));
        assert_eq!(renderer.rendered_ids(), vec![first.id(), second.id()]);
    }

    // Adopted items answer actions like any other
    controller
        .handle_action(UiAction::Delete {
            item_id: first.id(),
        })
        .unwrap();
    assert_eq!(controller.collection().len(), 1);
    assert_eq!(renderer.borrow().unrender_count(), 1);
}

#[test]
fn direct_collection_removal_unrenders_but_spares_the_item() {
    let renderer = recording();
    let controller = ListController::new(renderer.clone(), defaults()).unwrap();
    controller.handle_action(UiAction::AddItem).unwrap();
    let item = controller.collection().get(0).unwrap();

    controller.collection().remove(&item);

    assert_eq!(renderer.borrow().unrender_count(), 1);
    assert!(controller.collection().is_empty());

    // The model outlives its list membership until someone destroys it
    assert_eq!(item.get(config::PART_TWO_KEY).unwrap(), json!("world1"));
    item.destroy();
    assert_eq!(renderer.borrow().unrender_count(), 1);
}

#[test]
fn stale_actions_produce_no_directives() {
    let renderer = recording();
    let controller = ListController::new(renderer.clone(), defaults()).unwrap();

    controller
        .handle_action(UiAction::Swap {
            item_id: ItemId::from_raw(u64::MAX),
        })
        .unwrap();
    controller
        .handle_action(UiAction::Delete {
            item_id: ItemId::from_raw(u64::MAX),
        })
        .unwrap();

    // Root render only; nothing else reached the renderer
    assert_eq!(renderer.borrow().directives.len(), 1);
}

//! Screens wire an edit session to a store holding the whole collection.
//!
//! The store keeps only a weak handle to each session, and every screen
//! saves with its own [`SaverToken`](crate::SaverToken) so it never receives
//! its own commit back. Call `close` to unregister.

mod detail;
mod list;

pub use detail::DetailScreen;
pub use list::ListScreen;

use crate::Named;

/// Replaces the item with the same id, or appends it.
pub fn upsert<T: Named>(items: &mut Vec<T>, item: T) {
    match items.iter().position(|existing| existing.id() == item.id()) {
        Some(position) => items[position] = item,
        None => items.push(item),
    }
}

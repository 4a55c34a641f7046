//! Drag-and-drop reorder engine.
//!
//! During a drag the UI renders cards as vertical slots; this module
//! turns a pointer position over those slots into the rendered order the
//! target column should take. The store then mirrors that order into the
//! column's `card_ids` via [`EntityStore::apply_drop`].
//!
//! The placement rule is the midpoint rule: the dragged card is inserted
//! before the first slot whose vertical midpoint lies below the pointer.
//! A pointer below every midpoint appends to the end, so same-column and
//! cross-column moves behave identically.
//!
//! [`EntityStore::apply_drop`]: crate::store::EntityStore::apply_drop

/// A card as currently rendered in a column's list, measured in the
/// column's own coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSlot {
    pub card_id: String,
    /// Top edge of the rendered card, in pixels from the list's top.
    pub top: f64,
    /// Rendered height of the card, in pixels.
    pub height: f64,
}

impl CardSlot {
    pub fn new(card_id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            card_id: card_id.into(),
            top,
            height,
        }
    }

    fn midpoint_offset(&self, pointer_y: f64) -> f64 {
        pointer_y - self.top - self.height / 2.0
    }
}

/// Where a drag gesture was released.
#[derive(Debug, Clone, PartialEq)]
pub enum DropZone {
    /// Over a column's card list, at the given pointer height.
    CardList { column_id: String, pointer_y: f64 },
    /// Over a column's header; rejected so a sloppy release near the
    /// title never reorders anything.
    ColumnHeader { column_id: String },
    /// Outside any column.
    Outside,
}

/// The resolved result of a drop: which column changes and the full
/// rendered order its `card_ids` must take.
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    pub target_column_id: String,
    pub rendered_order: Vec<String>,
}

/// Index at which a card dropped at `pointer_y` lands among `slots`.
///
/// Returns the index of the first slot whose midpoint is strictly below
/// the pointer, or `slots.len()` when the pointer is below every
/// midpoint. A pointer exactly on a midpoint lands after that slot.
///
/// The caller must have already excluded the dragged card from `slots`;
/// during a drag the dragged card has left its old position, so it never
/// competes for one.
pub fn insertion_index(slots: &[CardSlot], pointer_y: f64) -> usize {
    let mut closest: Option<(f64, usize)> = None;
    for (index, slot) in slots.iter().enumerate() {
        let offset = slot.midpoint_offset(pointer_y);
        if offset < 0.0 {
            match closest {
                Some((best, _)) if offset <= best => {}
                _ => closest = Some((offset, index)),
            }
        }
    }
    closest.map_or(slots.len(), |(_, index)| index)
}

/// Resolve a drop gesture into the order the target column should take.
///
/// `rendered` is the target column's slot list as currently drawn, which
/// may still include the dragged card on a same-column move; it is
/// filtered out before placement. Header and outside drops resolve to
/// None and leave the board untouched.
pub fn resolve_drop(dragged_id: &str, zone: &DropZone, rendered: &[CardSlot]) -> Option<DropOutcome> {
    let DropZone::CardList {
        column_id,
        pointer_y,
    } = zone
    else {
        return None;
    };

    let slots: Vec<&CardSlot> = rendered.iter().filter(|s| s.card_id != dragged_id).collect();
    let owned: Vec<CardSlot> = slots.iter().map(|s| (*s).clone()).collect();
    let index = insertion_index(&owned, *pointer_y);

    let mut rendered_order: Vec<String> = slots.iter().map(|s| s.card_id.clone()).collect();
    rendered_order.insert(index, dragged_id.to_string());

    Some(DropOutcome {
        target_column_id: column_id.clone(),
        rendered_order,
    })
}

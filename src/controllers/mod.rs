//! Modal and panel controllers.
//!
//! Each controller mediates one piece of card-editing UI between the
//! entity store and the view synchronizer. They share two rules:
//!
//! - Text fields commit on blur, not per keystroke; a blur with an empty
//!   value keeps the stored value so the input can be restored.
//! - A controller may outlive its card (the card is deleted while a
//!   modal is open); every commit against a vanished card is a silent
//!   no-op.

pub mod card_modal;
pub mod date_panel;
pub mod label_panel;
pub mod priority;
pub mod subtask_panel;

pub use card_modal::CardModal;
pub use date_panel::DatePanel;
pub use label_panel::{LabelPanel, PanelView};
pub use priority::PriorityMenu;
pub use subtask_panel::SubtaskPanel;

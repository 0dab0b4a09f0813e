pub mod event;
pub mod model;

pub use event::{Outcome, SelectionEvent};
pub use model::{Confirmation, ItemId, SelectionError, SelectionModel, Snapshot};

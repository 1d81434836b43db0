//! Mutable view state: controlled/uncontrolled cells, the per-view
//! controller, and the selection model.

pub mod cell;
pub mod selection;
pub mod view;

pub use cell::StateCell;
pub use selection::{SelectAllState, SelectionStore};
pub use view::ViewState;

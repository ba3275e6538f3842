//! Selectable dropdown state.
//!
//! `DropdownState` glues one `PagedLoader` to a navigation cursor and the
//! sentinel trigger; `SelectionValue` normalizes the id shapes hosts pass in.

mod state;
mod value;

pub use state::DropdownState;
pub use value::SelectionValue;

//! The population editor core: master table, selection routing, delegates.

pub mod delegates;
mod editor;
mod router;
mod table;

pub use delegates::CommitError;
pub use editor::PopulationEditor;
pub use router::{DetailView, SelectionRouter};
pub use table::{Column, PopulationTable};

pub mod entities;
pub mod values;

pub use entities::{Frame, RowRef};

//! Filter, aggregate and chart pipeline shared by every report page.

pub mod aggregate;
pub mod charts;
pub mod derive;
pub mod filter;
pub mod labels;

pub use filter::{
    CascadeOutcome, DateEmptyPolicy, DateFilterSpec, FilterSpec, LabelSet, OptionSource,
    apply_cascade,
};

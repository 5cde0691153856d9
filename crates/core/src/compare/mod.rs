pub mod list;
pub mod states;

pub use list::{CompareList, ComparisonRow};
pub use states::{CompareChange, CompareOutcome, CompareState};

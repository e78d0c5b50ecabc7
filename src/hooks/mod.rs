//! Stateful mediators consumed by the presentation layer.

pub mod tasks;
pub mod theme;

pub use tasks::{TaskList, TaskListState};
pub use theme::ThemeState;

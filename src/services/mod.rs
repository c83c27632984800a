pub mod auth;
pub mod hours;
pub mod payroll;
pub mod schedule;
pub mod warnings;
pub mod week_window;

pub use auth::{Claims, Role};

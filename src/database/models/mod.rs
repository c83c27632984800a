pub mod business;
pub mod hours;
pub mod macros;
pub mod payment;
pub mod rate;
pub mod shift;

// Re-export all models for easy importing
pub use business::*;
pub use hours::*;
pub use payment::*;
pub use rate::*;
pub use shift::*;

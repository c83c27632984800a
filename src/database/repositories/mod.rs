pub mod business;
pub mod hours;
pub mod payment;
pub mod rate;
pub mod shift;

// Re-export all repositories for easy importing
pub use business::BusinessRepository;
pub use hours::ConfirmedHoursRepository;
pub use payment::{CalculatedFields, PaymentRepository};
pub use rate::RateRepository;
pub use shift::ShiftRepository;

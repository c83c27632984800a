pub mod hours;
pub mod payments;
pub mod rates;
pub mod reports;
pub mod shared;
pub mod shifts;

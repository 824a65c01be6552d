pub mod assumptions;
pub mod error;
pub mod rental;
pub mod types;

pub use error::RentalInvestError;
pub use types::*;

/// Standard result type for all rental-invest operations
pub type RentalInvestResult<T> = Result<T, RentalInvestError>;

pub mod amortization;
pub mod calendar;
pub mod effective_rate;
pub mod error;
pub mod series;
pub mod types;

#[cfg(feature = "scanner")]
pub mod scanner;

#[cfg(feature = "simulation")]
pub mod simulation;

#[cfg(feature = "analysis")]
pub mod analysis;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::LoanDcaError;
pub use types::*;

/// Standard result type for all loan-dca operations
pub type LoanDcaResult<T> = Result<T, LoanDcaError>;

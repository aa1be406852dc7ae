//! Pipeline module - cleaning and summarizing steps, applied in order
//!
//! impute -> remove outliers -> (weighted means, margins of error)

pub mod describe;
pub mod error;
pub mod impute;
pub mod loader;
pub mod margin;
pub mod missing;
pub mod numeric;
pub mod outliers;
pub mod weights;

pub use describe::*;
pub use error::*;
pub use impute::*;
pub use loader::*;
pub use margin::*;
pub use missing::*;
pub use outliers::*;
pub use weights::*;

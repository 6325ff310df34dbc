pub mod backend;
pub mod error;
pub mod kb;
pub mod protocol;
pub mod session;
pub mod work_order;

// Re-export common error type
pub use error::{ForemanError, Result};

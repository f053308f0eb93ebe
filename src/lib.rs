pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod report;
pub mod results;

pub use compare::{compare, Comparison, Delta, Outcome};
pub use error::CompareError;
pub use results::{ResultRecord, ResultSet};

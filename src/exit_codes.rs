//! Process exit codes. CI jobs key off these, so they are part of the contract.

pub const SUCCESS: u8 = 0;
pub const REGRESSION: u8 = 1; // Pass count went down
pub const ERROR: u8 = 2; // Unreadable, malformed or mis-shaped input, bad config

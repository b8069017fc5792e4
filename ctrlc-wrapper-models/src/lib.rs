pub mod errors;
pub mod exit;

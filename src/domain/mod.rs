pub mod car;
pub mod errors;
pub mod features;

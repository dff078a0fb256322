pub mod config;
pub mod digest;
pub mod error;
pub mod handler;
pub mod model;
pub mod secrets;
pub mod sns;
pub mod sportsdata;

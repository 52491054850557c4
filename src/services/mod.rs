pub mod reset;
pub mod scheduler;
pub mod server;

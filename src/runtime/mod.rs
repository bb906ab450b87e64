pub mod lifetime;
pub mod server;

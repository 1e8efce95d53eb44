mod gateway;
mod handler;

#[cfg(test)]
mod tests;

pub use gateway::InfoGateway;
pub use handler::{InfoEndpoint, InfoHandler, RelayInfo};

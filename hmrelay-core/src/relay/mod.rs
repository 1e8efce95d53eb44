mod decode;
mod forwarder;
mod sender;
mod stats;
mod units;

#[cfg(test)]
mod tests;

pub use decode::*;
pub use forwarder::*;
pub use sender::*;
pub use stats::*;
pub use units::*;

mod agent;
pub mod relay;
pub mod tracing;

pub use agent::MetronAgent;
pub use relay::TestRelay;
pub use self::tracing::{CapturedEvent, LogCapture};

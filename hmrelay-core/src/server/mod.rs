mod relay;
pub mod setup;

pub use relay::{RelayHandle, start_relay, start_relay_with_sender};
pub use setup::{build_info_server, run};

pub mod events;
mod metron;


pub use metron::{FORWARDER_ORIGIN, MetronSender};

pub mod cli;
pub mod conf;
pub mod emit;
pub mod info;
pub mod ingest;
pub mod logging;
pub mod relay;
pub mod server;

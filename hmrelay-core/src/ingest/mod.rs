mod tcp;

#[cfg(test)]
mod tests;

pub use tcp::{bind_listener, forward_lines, run_accept_loop};

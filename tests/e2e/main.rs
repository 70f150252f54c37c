//! Black-box tests for the `sheihu` binary.
//!
//! Each test spawns the compiled binary with `--config` pointing at a
//! throwaway file whose schedules tick every millisecond, then checks what
//! lands on stdout and stderr and the exit status: console lines for
//! `launch`, percentages for `download`, catalog and server tables, and the
//! messages users see when a command is refused.
//!
//! `cargo test --test e2e`

mod harness;

mod cli;
mod download;
mod errors;
mod launch;
mod servers;

/// Ledger state: balance plus the append-only history it is derived from.
/// State is modified using events, which are created by handling commands
pub mod account;

/// Request validation. Produces commands that are later executed by [`account`].
pub mod command;

/// Transaction processor interface, plus "in memory" implementation.
/// Coordinates command parsing and processing, and owns the only lock
/// around the ledger state.
pub mod processor;

/// Process configuration loaded from `LEDGER_*` environment variables.
pub mod config;

/// HTTP routes, error mapping and graceful shutdown.
pub mod server;

/// `tracing` subscriber setup, text or JSON output.
pub mod telemetry;

//! Stable event names used as `tracing` targets.
//!
//! Targets are part of the JSONL log contract: agents filter on them, so
//! renames require a schema version bump.

/// Standard event names used in logging.
pub mod event_names {
    // CLI lifecycle
    pub const CLI_STARTED: &str = "cli.started";
    pub const CLI_FINISHED: &str = "cli.finished";

    // Evaluation
    pub const EVALUATE_STARTED: &str = "evaluate.started";
    pub const EVALUATE_SHORT_CIRCUIT: &str = "evaluate.short_circuit";
    pub const EVALUATE_COMPLETED: &str = "evaluate.completed";
    pub const EVALUATE_REJECTED: &str = "evaluate.rejected";

    // Output
    pub const OUTPUT_WRITE_FAILED: &str = "output.write_failed";

    /// Every event name, for tests and documentation.
    pub const ALL: &[&str] = &[
        CLI_STARTED,
        CLI_FINISHED,
        EVALUATE_STARTED,
        EVALUATE_SHORT_CIRCUIT,
        EVALUATE_COMPLETED,
        EVALUATE_REJECTED,
        OUTPUT_WRITE_FAILED,
    ];
}

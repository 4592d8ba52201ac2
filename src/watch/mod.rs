//! Poll-based input directory watching.
//!
//! The watch pipeline:
//!
//! 1. **Snapshot**: list the plain files in the input directory
//! 2. **Diff**: names present now that were absent last poll
//! 3. **Runner**: transcribe → normalize → write each addition in order
//!
//! ```text
//! input/ ── scan ──▶ Snapshot ── diff ──▶ additions ──▶ output/*.txt
//!              ▲                              │
//!              └───── sleep(POLL_INTERVAL) ◀──┘
//! ```

pub mod runner;
pub mod snapshot;

pub use runner::{FileOutcome, ProcessError, Watcher, POLL_INTERVAL};
pub use snapshot::{diff, Snapshot};

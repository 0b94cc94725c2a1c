//! Backend commands queued from the UI to the backend worker.

use shared::domain::{CmdId, JobCommandEdits, NewJobCommand, UpdateJobCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Reload,
    Create {
        command: NewJobCommand,
    },
    Update {
        command: UpdateJobCommand,
    },
    /// One backend request per identifier; the grid has already removed the
    /// rows optimistically by the time this is queued.
    Delete {
        cmd_ids: Vec<CmdId>,
    },
    BulkEdit {
        cmd_ids: Vec<CmdId>,
        edits: JobCommandEdits,
    },
}

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);
    };
}

id_newtype!(CmdId);

/// A job command as the application reasons about it: flags are proper
/// booleans. Yes/no strings exist only in the wire layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCommand {
    pub cmd_id: CmdId,
    pub cmd_type: String,
    pub name: String,
    pub sub_name: String,
    pub short_desc: String,
    pub long_desc: String,
    pub path: String,
    pub args: String,
    pub is_default: bool,
    pub needs_file: bool,
    pub cpu_intense: bool,
    pub disk_intense: bool,
    pub sequence: bool,
}

/// Payload for the create flow. The backend assigns the `CmdId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJobCommand {
    pub cmd_type: String,
    pub name: String,
    pub sub_name: String,
    pub short_desc: String,
    pub long_desc: String,
    pub path: String,
    pub args: String,
    pub is_default: bool,
    pub needs_file: bool,
    pub cpu_intense: bool,
    pub disk_intense: bool,
}

/// Payload for the single-edit flow, keyed by the row's identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateJobCommand {
    pub cmd_id: CmdId,
    pub cmd_type: String,
    pub name: String,
    pub sub_name: String,
    pub short_desc: String,
    pub long_desc: String,
    pub path: String,
    pub args: String,
    pub is_default: bool,
    pub needs_file: bool,
    pub cpu_intense: bool,
    pub disk_intense: bool,
}

/// Field-by-field edits meant to apply uniformly across many rows.
/// `None` leaves the field untouched on every targeted row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobCommandEdits {
    pub path: Option<String>,
    pub args: Option<String>,
    pub is_default: Option<bool>,
    pub needs_file: Option<bool>,
    pub cpu_intense: Option<bool>,
    pub disk_intense: Option<bool>,
}

impl JobCommandEdits {
    pub fn is_empty(&self) -> bool {
        self.path.is_none()
            && self.args.is_none()
            && self.is_default.is_none()
            && self.needs_file.is_none()
            && self.cpu_intense.is_none()
            && self.disk_intense.is_none()
    }
}

/// One page worth of paging metadata as reported by the list endpoint.
/// The grid caches the full record set and pages locally; these values are
/// carried through for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_available: u32,
}

//! Mapping between selected grid rows and dialog form state, and back out to
//! request payloads.

use shared::domain::{CmdId, JobCommand, JobCommandEdits, NewJobCommand, UpdateJobCommand};

/// Detail form for the single-edit dialog. Identifiers and descriptions are
/// display-only; path, args, and the four flags are editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDetailForm {
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

impl CommandDetailForm {
    /// Seed the form from the one selected row. Checkbox state comes from
    /// the decoded flags; the strict yes/no contract lives in the wire layer.
    pub fn from_record(record: &JobCommand) -> Self {
        Self {
            cmd_id: record.cmd_id,
            cmd_type: record.cmd_type.clone(),
            name: record.name.clone(),
            sub_name: record.sub_name.clone(),
            short_desc: record.short_desc.clone(),
            long_desc: record.long_desc.clone(),
            path: record.path.clone(),
            args: record.args.clone(),
            is_default: record.is_default,
            needs_file: record.needs_file,
            cpu_intense: record.cpu_intense,
            disk_intense: record.disk_intense,
        }
    }

    /// Inverse mapping on save: current inputs become the update payload,
    /// display-only fields pass through unchanged.
    pub fn to_update(&self) -> UpdateJobCommand {
        UpdateJobCommand {
            cmd_id: self.cmd_id,
            cmd_type: self.cmd_type.clone(),
            name: self.name.clone(),
            sub_name: self.sub_name.clone(),
            short_desc: self.short_desc.clone(),
            long_desc: self.long_desc.clone(),
            path: self.path.clone(),
            args: self.args.clone(),
            is_default: self.is_default,
            needs_file: self.needs_file,
            cpu_intense: self.cpu_intense,
            disk_intense: self.disk_intense,
        }
    }
}

/// Blank form for the create dialog. Save reads raw field values; there is
/// no client-side validation beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandCreateForm {
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

impl CommandCreateForm {
    pub fn to_create(&self) -> NewJobCommand {
        NewJobCommand {
            cmd_type: self.cmd_type.clone(),
            name: self.name.clone(),
            sub_name: self.sub_name.clone(),
            short_desc: self.short_desc.clone(),
            long_desc: self.long_desc.clone(),
            path: self.path.clone(),
            args: self.args.clone(),
            is_default: self.is_default,
            needs_file: self.needs_file,
            cpu_intense: self.cpu_intense,
            disk_intense: self.disk_intense,
        }
    }
}

/// Multi-edit form. Deliberately not seeded from any one row: each field has
/// an apply toggle, and only toggled fields are written across the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiEditForm {
    pub apply_path: bool,
    pub path: String,
    pub apply_args: bool,
    pub args: String,
    pub apply_default: bool,
    pub is_default: bool,
    pub apply_needs_file: bool,
    pub needs_file: bool,
    pub apply_cpu_intense: bool,
    pub cpu_intense: bool,
    pub apply_disk_intense: bool,
    pub disk_intense: bool,
}

impl MultiEditForm {
    pub fn to_edits(&self) -> JobCommandEdits {
        JobCommandEdits {
            path: self.apply_path.then(|| self.path.clone()),
            args: self.apply_args.then(|| self.args.clone()),
            is_default: self.apply_default.then_some(self.is_default),
            needs_file: self.apply_needs_file.then_some(self.needs_file),
            cpu_intense: self.apply_cpu_intense.then_some(self.cpu_intense),
            disk_intense: self.apply_disk_intense.then_some(self.disk_intense),
        }
    }
}

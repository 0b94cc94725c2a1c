//! Dialog lifecycle for the create, edit-single, edit-multi, and
//! delete-confirm flows. One dialog at a time; triggers are disabled while a
//! dialog is open or a mutation is in flight, so overlapping flows cannot
//! start.

use shared::domain::{CmdId, JobCommand, JobCommandEdits};

use crate::forms::{CommandCreateForm, CommandDetailForm, MultiEditForm};

pub const MULTI_EDIT_CONFIRMATION: &str = "Editing multiple job commands at once \
should be taken with great care. Do you want to continue? This cannot be undone.";

/// Confirmation wording varies by selection count.
pub fn delete_confirmation_message(count: usize) -> &'static str {
    if count == 1 {
        "Are you sure you want to delete this command? This cannot be undone."
    } else {
        "Are you sure you want to delete these commands? This cannot be undone."
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveDialog {
    Create(CommandCreateForm),
    EditSingle(CommandDetailForm),
    EditMulti {
        cmd_ids: Vec<CmdId>,
        form: MultiEditForm,
        confirming: bool,
    },
    ConfirmDelete {
        cmd_ids: Vec<CmdId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingMutation {
    Create,
    Update,
    Delete,
    BulkEdit,
}

pub struct DialogController {
    dialog: Option<ActiveDialog>,
    pending: Option<PendingMutation>,
}

impl DialogController {
    pub fn new() -> Self {
        Self {
            dialog: None,
            pending: None,
        }
    }

    pub fn dialog(&self) -> Option<&ActiveDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut ActiveDialog> {
        self.dialog.as_mut()
    }

    pub fn pending(&self) -> Option<PendingMutation> {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.dialog.is_some() || self.pending.is_some()
    }

    pub fn triggers_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn open_create(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.dialog = Some(ActiveDialog::Create(CommandCreateForm::default()));
        true
    }

    /// Empty selection is a no-op: no dialog opens. One row opens the detail
    /// dialog seeded by the mapper; several rows open the (unseeded)
    /// multi-edit dialog.
    pub fn open_edit(&mut self, selected: &[&JobCommand]) -> bool {
        if self.is_busy() || selected.is_empty() {
            return false;
        }
        self.dialog = Some(if selected.len() == 1 {
            ActiveDialog::EditSingle(CommandDetailForm::from_record(selected[0]))
        } else {
            ActiveDialog::EditMulti {
                cmd_ids: selected.iter().map(|row| row.cmd_id).collect(),
                form: MultiEditForm::default(),
                confirming: false,
            }
        });
        true
    }

    /// Empty selection is a no-op: no confirmation prompt, no request.
    pub fn request_delete(&mut self, cmd_ids: Vec<CmdId>) -> bool {
        if self.is_busy() || cmd_ids.is_empty() {
            return false;
        }
        self.dialog = Some(ActiveDialog::ConfirmDelete { cmd_ids });
        true
    }

    /// Save on the multi-edit dialog first demands confirmation; the
    /// destructive apply happens only after [`Self::confirm_multi_edit`].
    pub fn request_multi_edit_confirmation(&mut self) {
        if let Some(ActiveDialog::EditMulti { confirming, .. }) = &mut self.dialog {
            *confirming = true;
        }
    }

    pub fn dismiss_multi_edit_confirmation(&mut self) {
        if let Some(ActiveDialog::EditMulti { confirming, .. }) = &mut self.dialog {
            *confirming = false;
        }
    }

    pub fn confirm_multi_edit(&mut self) -> Option<(Vec<CmdId>, JobCommandEdits)> {
        match &mut self.dialog {
            Some(ActiveDialog::EditMulti {
                cmd_ids,
                form,
                confirming,
            }) if *confirming => {
                *confirming = false;
                self.pending = Some(PendingMutation::BulkEdit);
                Some((cmd_ids.clone(), form.to_edits()))
            }
            _ => None,
        }
    }

    /// Yes on the delete prompt: the dialog closes immediately and the
    /// caller proceeds with optimistic removal plus per-row requests.
    pub fn confirm_delete(&mut self) -> Option<Vec<CmdId>> {
        match self.dialog.take() {
            Some(ActiveDialog::ConfirmDelete { cmd_ids }) => {
                self.pending = Some(PendingMutation::Delete);
                Some(cmd_ids)
            }
            other => {
                self.dialog = other;
                None
            }
        }
    }

    /// Mark the in-flight mutation once its command is queued.
    pub fn begin_mutation(&mut self, mutation: PendingMutation) {
        self.pending = Some(mutation);
    }

    /// Cancel transitions straight to closed with no backend call.
    pub fn cancel(&mut self) {
        self.dialog = None;
    }

    /// A finished create/update/bulk-edit closes its dialog on success and
    /// leaves it open (values intact) for retry on failure.
    pub fn mutation_finished(&mut self, mutation: PendingMutation, succeeded: bool) {
        if self.pending == Some(mutation) {
            self.pending = None;
        }
        match mutation {
            PendingMutation::Create | PendingMutation::Update | PendingMutation::BulkEdit => {
                if succeeded {
                    self.dialog = None;
                }
            }
            // The delete dialog already closed at confirmation time.
            PendingMutation::Delete => {}
        }
    }

    /// Delete has no single finished event; the trailing reload closes out
    /// its pending state.
    pub fn reload_finished(&mut self) {
        if self.pending == Some(PendingMutation::Delete) {
            self.pending = None;
        }
    }
}

impl Default for DialogController {
    fn default() -> Self {
        Self::new()
    }
}

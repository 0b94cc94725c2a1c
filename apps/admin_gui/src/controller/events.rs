//! Events flowing from the backend worker into the UI, and the status
//! banner surface they feed.

use client_core::JobCommandPage;
use shared::domain::CmdId;

pub const CREATE_SUCCEEDED: &str = "Command addition successful!";
pub const CREATE_FAILED: &str = "Command addition failed!";
pub const UPDATE_SUCCEEDED: &str = "Command update successful!";
pub const UPDATE_FAILED: &str = "Command update failed!";
pub const DELETE_SUCCEEDED: &str = "Command deleted successfully!";
pub const DELETE_FAILED: &str = "Command delete failed!";

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    CommandsLoaded(JobCommandPage),
    LoadFailed(String),
    CreateFinished { outcome: Result<(), String> },
    UpdateFinished { outcome: Result<(), String> },
    DeleteFinished {
        cmd_id: CmdId,
        outcome: Result<(), String>,
    },
    BulkEditFinished { outcome: Result<(), String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSeverity {
    Status,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    pub severity: BannerSeverity,
    pub message: String,
}

impl StatusBanner {
    pub fn status(message: impl Into<String>) -> Self {
        Self {
            severity: BannerSeverity::Status,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: BannerSeverity::Error,
            message: message.into(),
        }
    }
}

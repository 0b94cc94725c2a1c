use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use shared::{
    domain::{CmdId, JobCommand, JobCommandEdits, NewJobCommand, PageInfo, UpdateJobCommand},
    protocol::{
        CreateJobCommandParams, DeleteJobCommandParams, JobCommandListEnvelope, MutationResponse,
        UpdateJobCommandParams,
    },
};
use tracing::{debug, warn};

pub mod error;

pub use error::ClientError;

/// Record set plus the paging metadata the list endpoint reported.
#[derive(Debug, Clone, Default)]
pub struct JobCommandPage {
    pub commands: Vec<JobCommand>,
    pub page_info: PageInfo,
}

/// Seam between the admin UI and the job-queue backend. The production
/// implementation is [`JobQueueClient`]; tests substitute recording fakes.
#[async_trait]
pub trait JobQueueApi: Send + Sync {
    async fn list_job_commands(&self) -> Result<JobCommandPage, ClientError>;
    async fn create_job_command(&self, command: NewJobCommand) -> Result<(), ClientError>;
    async fn update_job_command(&self, command: UpdateJobCommand) -> Result<(), ClientError>;
    async fn delete_job_command(&self, cmd_id: CmdId) -> Result<(), ClientError>;

    /// Uniform edit across many rows. Declared for the multi-edit dialog;
    /// no backend endpoint exists for it yet.
    async fn apply_bulk_edits(
        &self,
        cmd_ids: &[CmdId],
        edits: JobCommandEdits,
    ) -> Result<(), ClientError>;

    // Host-to-command association extension points. Declared so callers and
    // tests can distinguish "not yet built" from "intentionally does nothing".
    async fn list_job_hosts(&self, cmd_id: CmdId) -> Result<Vec<String>, ClientError>;
    async fn add_job_host(&self, cmd_id: CmdId, host_name: &str) -> Result<(), ClientError>;
    async fn save_job_host(&self, cmd_id: CmdId, host_name: &str) -> Result<(), ClientError>;
    async fn delete_job_host(&self, cmd_id: CmdId, host_name: &str) -> Result<(), ClientError>;
}

/// HTTP client for the `/JobQueue` service. One round trip per operation;
/// no retry, backoff, or cancellation.
pub struct JobQueueClient {
    http: Client,
    server_url: String,
}

impl JobQueueClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        let mut server_url = server_url.into();
        while server_url.ends_with('/') {
            server_url.pop();
        }
        Self {
            http: Client::new(),
            server_url,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn post_mutation<P: Serialize + Sync>(
        &self,
        operation: &'static str,
        path: &str,
        params: &P,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}{path}", self.server_url))
            .form(params)
            .send()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        let body: MutationResponse =
            response
                .json()
                .await
                .map_err(|err| ClientError::InvalidResponse {
                    operation,
                    detail: err.to_string(),
                })?;

        if body.succeeded() {
            debug!(operation, "backend accepted mutation");
            Ok(())
        } else {
            warn!(operation, outcome = %body.outcome, "backend refused mutation");
            Err(ClientError::Rejected { operation })
        }
    }
}

#[async_trait]
impl JobQueueApi for JobQueueClient {
    async fn list_job_commands(&self) -> Result<JobCommandPage, ClientError> {
        const OPERATION: &str = "command list";

        let response = self
            .http
            .get(format!("{}/JobQueue/GetJobCommandList", self.server_url))
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                operation: OPERATION,
                source,
            })?;

        let envelope: JobCommandListEnvelope =
            response
                .json()
                .await
                .map_err(|err| ClientError::InvalidResponse {
                    operation: OPERATION,
                    detail: err.to_string(),
                })?;

        let list = envelope.job_command_list;
        let page_info = list.page_info();
        let commands = list
            .job_commands
            .into_iter()
            .map(JobCommand::from)
            .collect::<Vec<_>>();
        debug!(
            count = commands.len(),
            total = page_info.total_available,
            "fetched job command list"
        );
        Ok(JobCommandPage {
            commands,
            page_info,
        })
    }

    async fn create_job_command(&self, command: NewJobCommand) -> Result<(), ClientError> {
        let params = CreateJobCommandParams::from(command);
        self.post_mutation("command addition", "/JobQueue/CreateJobCommand", &params)
            .await
    }

    async fn update_job_command(&self, command: UpdateJobCommand) -> Result<(), ClientError> {
        let params = UpdateJobCommandParams::from(command);
        self.post_mutation("command update", "/JobQueue/UpdateJobCommand", &params)
            .await
    }

    async fn delete_job_command(&self, cmd_id: CmdId) -> Result<(), ClientError> {
        let params = DeleteJobCommandParams { cmd_id };
        self.post_mutation("command delete", "/JobQueue/DeleteJobCommand", &params)
            .await
    }

    async fn apply_bulk_edits(
        &self,
        _cmd_ids: &[CmdId],
        _edits: JobCommandEdits,
    ) -> Result<(), ClientError> {
        Err(ClientError::Unsupported {
            operation: "bulk command edit",
        })
    }

    async fn list_job_hosts(&self, _cmd_id: CmdId) -> Result<Vec<String>, ClientError> {
        Err(ClientError::Unsupported {
            operation: "job host list",
        })
    }

    async fn add_job_host(&self, _cmd_id: CmdId, _host_name: &str) -> Result<(), ClientError> {
        Err(ClientError::Unsupported {
            operation: "job host addition",
        })
    }

    async fn save_job_host(&self, _cmd_id: CmdId, _host_name: &str) -> Result<(), ClientError> {
        Err(ClientError::Unsupported {
            operation: "job host update",
        })
    }

    async fn delete_job_host(&self, _cmd_id: CmdId, _host_name: &str) -> Result<(), ClientError> {
        Err(ClientError::Unsupported {
            operation: "job host delete",
        })
    }
}

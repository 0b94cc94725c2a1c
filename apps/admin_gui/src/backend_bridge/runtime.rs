//! Backend worker: owns the tokio runtime and the HTTP client, processes
//! queued commands one at a time, and reports back through `UiEvent`s.

use std::{sync::Arc, thread};

use client_core::JobQueueApi;
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    api: Arc<dyn JobQueueApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::LoadFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(api.as_ref(), cmd, &ui_tx).await;
            }
        });
    });
}

async fn reload(api: &dyn JobQueueApi, ui_tx: &Sender<UiEvent>) {
    match api.list_job_commands().await {
        Ok(page) => {
            let _ = ui_tx.try_send(UiEvent::CommandsLoaded(page));
        }
        Err(err) => {
            error!("backend: command list failed: {err}");
            let _ = ui_tx.try_send(UiEvent::LoadFailed(err.to_string()));
        }
    }
}

/// One queued command, one pass. Mutations reload the list after the request
/// completes, regardless of its outcome; the delete path issues one request
/// per identifier and exactly one trailing reload.
pub async fn handle_command(
    api: &dyn JobQueueApi,
    cmd: BackendCommand,
    ui_tx: &Sender<UiEvent>,
) {
    match cmd {
        BackendCommand::Reload => {
            info!("backend: reload");
            reload(api, ui_tx).await;
        }
        BackendCommand::Create { command } => {
            info!(name = %command.name, "backend: create command");
            let outcome = api
                .create_job_command(command)
                .await
                .map_err(|err| err.to_string());
            if let Err(detail) = &outcome {
                warn!("backend: create command failed: {detail}");
            }
            let _ = ui_tx.try_send(UiEvent::CreateFinished { outcome });
            reload(api, ui_tx).await;
        }
        BackendCommand::Update { command } => {
            info!(cmd_id = command.cmd_id.0, "backend: update command");
            let outcome = api
                .update_job_command(command)
                .await
                .map_err(|err| err.to_string());
            if let Err(detail) = &outcome {
                warn!("backend: update command failed: {detail}");
            }
            let _ = ui_tx.try_send(UiEvent::UpdateFinished { outcome });
            reload(api, ui_tx).await;
        }
        BackendCommand::Delete { cmd_ids } => {
            info!(count = cmd_ids.len(), "backend: delete commands");
            for cmd_id in cmd_ids {
                let outcome = api
                    .delete_job_command(cmd_id)
                    .await
                    .map_err(|err| err.to_string());
                if let Err(detail) = &outcome {
                    warn!(cmd_id = cmd_id.0, "backend: delete command failed: {detail}");
                }
                let _ = ui_tx.try_send(UiEvent::DeleteFinished { cmd_id, outcome });
            }
            reload(api, ui_tx).await;
        }
        BackendCommand::BulkEdit { cmd_ids, edits } => {
            info!(count = cmd_ids.len(), "backend: bulk edit");
            let outcome = api
                .apply_bulk_edits(&cmd_ids, edits)
                .await
                .map_err(|err| err.to_string());
            if let Err(detail) = &outcome {
                warn!("backend: bulk edit failed: {detail}");
            }
            let _ = ui_tx.try_send(UiEvent::BulkEditFinished { outcome });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use client_core::{ClientError, JobCommandPage};
    use crossbeam_channel::bounded;
    use shared::domain::{CmdId, JobCommandEdits, NewJobCommand, UpdateJobCommand};
    use tokio::sync::Mutex;

    struct RecordingApi {
        calls: Mutex<Vec<String>>,
        refuse_mutations: bool,
    }

    impl RecordingApi {
        fn accepting() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                refuse_mutations: false,
            }
        }

        fn refusing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                refuse_mutations: true,
            }
        }

        async fn record(&self, call: String) {
            self.calls.lock().await.push(call);
        }

        fn mutation_result(&self, operation: &'static str) -> Result<(), ClientError> {
            if self.refuse_mutations {
                Err(ClientError::Rejected { operation })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl JobQueueApi for RecordingApi {
        async fn list_job_commands(&self) -> Result<JobCommandPage, ClientError> {
            self.record("list".into()).await;
            Ok(JobCommandPage::default())
        }

        async fn create_job_command(&self, _command: NewJobCommand) -> Result<(), ClientError> {
            self.record("create".into()).await;
            self.mutation_result("command addition")
        }

        async fn update_job_command(&self, _command: UpdateJobCommand) -> Result<(), ClientError> {
            self.record("update".into()).await;
            self.mutation_result("command update")
        }

        async fn delete_job_command(&self, cmd_id: CmdId) -> Result<(), ClientError> {
            self.record(format!("delete {}", cmd_id.0)).await;
            self.mutation_result("command delete")
        }

        async fn apply_bulk_edits(
            &self,
            _cmd_ids: &[CmdId],
            _edits: JobCommandEdits,
        ) -> Result<(), ClientError> {
            self.record("bulk_edit".into()).await;
            Err(ClientError::Unsupported {
                operation: "bulk command edit",
            })
        }

        async fn list_job_hosts(&self, _cmd_id: CmdId) -> Result<Vec<String>, ClientError> {
            Err(ClientError::Unsupported {
                operation: "job host list",
            })
        }

        async fn add_job_host(&self, _cmd_id: CmdId, _host: &str) -> Result<(), ClientError> {
            Err(ClientError::Unsupported {
                operation: "job host addition",
            })
        }

        async fn save_job_host(&self, _cmd_id: CmdId, _host: &str) -> Result<(), ClientError> {
            Err(ClientError::Unsupported {
                operation: "job host update",
            })
        }

        async fn delete_job_host(&self, _cmd_id: CmdId, _host: &str) -> Result<(), ClientError> {
            Err(ClientError::Unsupported {
                operation: "job host delete",
            })
        }
    }

    fn new_command() -> NewJobCommand {
        NewJobCommand {
            cmd_type: "Transcode".into(),
            name: "Lossless".into(),
            sub_name: String::new(),
            short_desc: String::new(),
            long_desc: String::new(),
            path: String::new(),
            args: String::new(),
            is_default: false,
            needs_file: false,
            cpu_intense: false,
            disk_intense: false,
        }
    }

    fn drain(ui_rx: &crossbeam_channel::Receiver<UiEvent>) -> Vec<UiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = ui_rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn create_reloads_even_when_the_backend_refuses() {
        let api = RecordingApi::refusing();
        let (ui_tx, ui_rx) = bounded(16);

        handle_command(
            &api,
            BackendCommand::Create {
                command: new_command(),
            },
            &ui_tx,
        )
        .await;

        assert_eq!(*api.calls.lock().await, ["create", "list"]);
        let events = drain(&ui_rx);
        assert!(matches!(
            events[0],
            UiEvent::CreateFinished { outcome: Err(_) }
        ));
        assert!(matches!(events[1], UiEvent::CommandsLoaded(_)));
    }

    #[tokio::test]
    async fn successful_update_reports_and_reloads() {
        let api = RecordingApi::accepting();
        let (ui_tx, ui_rx) = bounded(16);

        handle_command(
            &api,
            BackendCommand::Update {
                command: UpdateJobCommand {
                    cmd_id: CmdId(7),
                    cmd_type: "Metadata".into(),
                    name: "Lookup".into(),
                    sub_name: String::new(),
                    short_desc: String::new(),
                    long_desc: String::new(),
                    path: String::new(),
                    args: String::new(),
                    is_default: false,
                    needs_file: false,
                    cpu_intense: false,
                    disk_intense: false,
                },
            },
            &ui_tx,
        )
        .await;

        assert_eq!(*api.calls.lock().await, ["update", "list"]);
        let events = drain(&ui_rx);
        assert!(matches!(
            events[0],
            UiEvent::UpdateFinished { outcome: Ok(()) }
        ));
        assert!(matches!(events[1], UiEvent::CommandsLoaded(_)));
    }

    #[tokio::test]
    async fn delete_issues_one_request_per_row_and_a_single_trailing_reload() {
        let api = RecordingApi::accepting();
        let (ui_tx, ui_rx) = bounded(16);

        handle_command(
            &api,
            BackendCommand::Delete {
                cmd_ids: vec![CmdId(101), CmdId(102)],
            },
            &ui_tx,
        )
        .await;

        assert_eq!(*api.calls.lock().await, ["delete 101", "delete 102", "list"]);
        let events = drain(&ui_rx);
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            UiEvent::DeleteFinished {
                cmd_id: CmdId(101),
                outcome: Ok(())
            }
        ));
        assert!(matches!(
            events[1],
            UiEvent::DeleteFinished {
                cmd_id: CmdId(102),
                outcome: Ok(())
            }
        ));
        assert!(matches!(events[2], UiEvent::CommandsLoaded(_)));
    }

    #[tokio::test]
    async fn failed_per_row_deletes_still_reload_exactly_once() {
        let api = RecordingApi::refusing();
        let (ui_tx, ui_rx) = bounded(16);

        handle_command(
            &api,
            BackendCommand::Delete {
                cmd_ids: vec![CmdId(1), CmdId(2)],
            },
            &ui_tx,
        )
        .await;

        assert_eq!(*api.calls.lock().await, ["delete 1", "delete 2", "list"]);
        let events = drain(&ui_rx);
        assert!(matches!(
            events[0],
            UiEvent::DeleteFinished { outcome: Err(_), .. }
        ));
        assert!(matches!(
            events[1],
            UiEvent::DeleteFinished { outcome: Err(_), .. }
        ));
        assert!(matches!(events[2], UiEvent::CommandsLoaded(_)));
    }

    #[tokio::test]
    async fn bulk_edit_surfaces_unsupported_without_reloading() {
        let api = RecordingApi::accepting();
        let (ui_tx, ui_rx) = bounded(16);

        handle_command(
            &api,
            BackendCommand::BulkEdit {
                cmd_ids: vec![CmdId(1), CmdId(2)],
                edits: JobCommandEdits::default(),
            },
            &ui_tx,
        )
        .await;

        assert_eq!(*api.calls.lock().await, ["bulk_edit"]);
        let events = drain(&ui_rx);
        assert_eq!(events.len(), 1);
        match &events[0] {
            UiEvent::BulkEditFinished {
                outcome: Err(detail),
            } => {
                assert!(detail.contains("not supported"), "detail: {detail}");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}

//! Application shell: grid, toolbar, dialogs, and the event pump draining
//! the backend worker's channel once per frame.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::dialog::{
    delete_confirmation_message, ActiveDialog, DialogController, PendingMutation,
    MULTI_EDIT_CONFIRMATION,
};
use crate::controller::events::{
    BannerSeverity, StatusBanner, UiEvent, CREATE_FAILED, CREATE_SUCCEEDED, DELETE_FAILED,
    DELETE_SUCCEEDED, UPDATE_FAILED, UPDATE_SUCCEEDED,
};
use crate::controller::orchestration::dispatch_backend_command;
use crate::grid::{GridState, SortOrder, COLUMNS, PAGE_SIZE_CHOICES};
use shared::domain::CmdId;

struct RowView {
    cmd_id: CmdId,
    cmd_type: String,
    name: String,
    sub_name: String,
    selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogAction {
    None,
    SaveCreate,
    SaveEdit,
    RequestMultiConfirm,
    DismissMultiConfirm,
    ConfirmMulti,
    ConfirmDelete,
    Cancel,
}

pub struct AdminGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    grid: GridState,
    dialogs: DialogController,
    banner: Option<StatusBanner>,
    status: String,
    loading: bool,
    identity_order_applied: bool,
}

impl AdminGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            grid: GridState::new(),
            dialogs: DialogController::new(),
            banner: None,
            status: String::new(),
            loading: false,
            identity_order_applied: false,
        };
        app.reload();
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn reload(&mut self) {
        self.loading = true;
        self.dispatch(BackendCommand::Reload);
    }

    fn edit_selection(&mut self) {
        let selected = self.grid.selected_commands();
        self.dialogs.open_edit(&selected);
    }

    fn request_delete_selection(&mut self) {
        let cmd_ids = self.grid.selection();
        self.dialogs.request_delete(cmd_ids);
    }

    /// The rows leave the local grid before any backend request is issued;
    /// the trailing reload is what reconciles a failed delete.
    fn confirm_pending_delete(&mut self) {
        if let Some(cmd_ids) = self.dialogs.confirm_delete() {
            self.grid.remove_rows(&cmd_ids);
            self.dispatch(BackendCommand::Delete { cmd_ids });
        }
    }

    fn save_create(&mut self) {
        let command = match self.dialogs.dialog() {
            Some(ActiveDialog::Create(form)) => form.to_create(),
            _ => return,
        };
        self.dialogs.begin_mutation(PendingMutation::Create);
        self.dispatch(BackendCommand::Create { command });
    }

    fn save_update(&mut self) {
        let command = match self.dialogs.dialog() {
            Some(ActiveDialog::EditSingle(form)) => form.to_update(),
            _ => return,
        };
        self.dialogs.begin_mutation(PendingMutation::Update);
        self.dispatch(BackendCommand::Update { command });
    }

    fn confirm_multi_edit(&mut self) {
        if let Some((cmd_ids, edits)) = self.dialogs.confirm_multi_edit() {
            self.dispatch(BackendCommand::BulkEdit { cmd_ids, edits });
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::CommandsLoaded(page) => {
                    self.loading = false;
                    self.grid.set_rows(page);
                    if !self.identity_order_applied {
                        // Load policy: broad relevance first, then settle on
                        // identity order.
                        self.grid.stabilize_identity_order();
                        self.identity_order_applied = true;
                    }
                    self.dialogs.reload_finished();
                }
                UiEvent::LoadFailed(detail) => {
                    self.loading = false;
                    self.banner = Some(StatusBanner::error(format!(
                        "Failed to load job commands: {detail}"
                    )));
                    self.dialogs.reload_finished();
                }
                UiEvent::CreateFinished { outcome } => {
                    let succeeded = outcome.is_ok();
                    if let Err(detail) = outcome {
                        tracing::warn!("create failed: {detail}");
                    }
                    self.banner = Some(if succeeded {
                        StatusBanner::status(CREATE_SUCCEEDED)
                    } else {
                        StatusBanner::error(CREATE_FAILED)
                    });
                    self.dialogs
                        .mutation_finished(PendingMutation::Create, succeeded);
                }
                UiEvent::UpdateFinished { outcome } => {
                    let succeeded = outcome.is_ok();
                    if let Err(detail) = outcome {
                        tracing::warn!("update failed: {detail}");
                    }
                    self.banner = Some(if succeeded {
                        StatusBanner::status(UPDATE_SUCCEEDED)
                    } else {
                        StatusBanner::error(UPDATE_FAILED)
                    });
                    self.dialogs
                        .mutation_finished(PendingMutation::Update, succeeded);
                }
                UiEvent::DeleteFinished { cmd_id, outcome } => match outcome {
                    Ok(()) => self.banner = Some(StatusBanner::status(DELETE_SUCCEEDED)),
                    Err(detail) => {
                        tracing::warn!(cmd_id = cmd_id.0, "delete failed: {detail}");
                        self.banner = Some(StatusBanner::error(DELETE_FAILED));
                    }
                },
                UiEvent::BulkEditFinished { outcome } => {
                    let succeeded = outcome.is_ok();
                    self.banner = Some(match outcome {
                        Ok(()) => StatusBanner::status("Commands updated successfully!"),
                        Err(detail) => StatusBanner::error(detail),
                    });
                    self.dialogs
                        .mutation_finished(PendingMutation::BulkEdit, succeeded);
                }
            }
        }
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.banner.clone() {
            let (fill, stroke) = match banner.severity {
                BannerSeverity::Status => (
                    egui::Color32::from_rgb(47, 92, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(96, 160, 102)),
                ),
                BannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(10, 6))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let enabled = self.dialogs.triggers_enabled();
            let has_selection = self.grid.selected_count() > 0;

            if ui
                .add_enabled(enabled, egui::Button::new("New Command"))
                .clicked()
            {
                self.dialogs.open_create();
            }
            if ui
                .add_enabled(enabled && has_selection, egui::Button::new("Edit"))
                .clicked()
            {
                self.edit_selection();
            }
            if ui
                .add_enabled(enabled && has_selection, egui::Button::new("Delete"))
                .clicked()
            {
                self.request_delete_selection();
            }
            if ui
                .add_enabled(enabled, egui::Button::new("Refresh"))
                .clicked()
            {
                self.reload();
            }
            if self.loading {
                ui.spinner();
            }
            if !self.status.is_empty() {
                ui.small(egui::RichText::new(&self.status).weak());
            }
        });
    }

    fn show_grid(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("jobcommand_grid")
            .num_columns(3)
            .min_col_width(140.0)
            .striped(true)
            .show(ui, |ui| {
                // Header: sortable columns get a toggle button with a
                // direction marker, the rest a plain label.
                for spec in COLUMNS.iter().filter(|spec| !spec.hidden) {
                    match spec.sort {
                        Some(column) => {
                            let (current, order) = self.grid.sort_key();
                            let marker = if current == column {
                                match order {
                                    SortOrder::Ascending => " ^",
                                    SortOrder::Descending => " v",
                                }
                            } else {
                                ""
                            };
                            if ui.button(format!("{}{marker}", spec.title)).clicked() {
                                self.grid.toggle_sort(column);
                            }
                        }
                        None => {
                            ui.label(egui::RichText::new(spec.title).strong());
                        }
                    }
                }
                ui.end_row();

                // Filter toolbar row.
                let mut filters_changed = false;
                filters_changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut self.grid.filters.cmd_type)
                            .id_salt("filter_type")
                            .hint_text("filter"),
                    )
                    .changed();
                filters_changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut self.grid.filters.name)
                            .id_salt("filter_name")
                            .hint_text("filter"),
                    )
                    .changed();
                filters_changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut self.grid.filters.sub_name)
                            .id_salt("filter_subname")
                            .hint_text("filter"),
                    )
                    .changed();
                if filters_changed {
                    self.grid.set_page(0);
                }
                ui.end_row();

                let rows: Vec<RowView> = self
                    .grid
                    .visible_rows()
                    .into_iter()
                    .map(|row| RowView {
                        cmd_id: row.cmd_id,
                        cmd_type: row.cmd_type.clone(),
                        name: row.name.clone(),
                        sub_name: row.sub_name.clone(),
                        selected: self.grid.is_selected(row.cmd_id),
                    })
                    .collect();

                for row in rows {
                    let r1 = ui.selectable_label(row.selected, &row.cmd_type);
                    let r2 = ui.selectable_label(row.selected, &row.name);
                    let r3 = ui.selectable_label(row.selected, &row.sub_name);
                    let response = r1.union(r2).union(r3);

                    if response.clicked() {
                        self.grid.toggle_selected(row.cmd_id);
                    }
                    // Menu actions must act on the row under the cursor, so
                    // an unselected row joins the selection on right-click
                    // before the menu shows.
                    if response.secondary_clicked() {
                        self.grid.ensure_row_selected(row.cmd_id);
                    }
                    response.context_menu(|ui| {
                        let enabled = self.dialogs.triggers_enabled();
                        if ui.add_enabled(enabled, egui::Button::new("Edit")).clicked() {
                            self.edit_selection();
                            ui.close();
                        }
                        if ui
                            .add_enabled(enabled, egui::Button::new("Delete"))
                            .clicked()
                        {
                            self.request_delete_selection();
                            ui.close();
                        }
                    });
                    ui.end_row();
                }
            });
    }

    fn show_pager(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Rows:");
            egui::ComboBox::from_id_salt("page_size")
                .selected_text(self.grid.page_size().to_string())
                .show_ui(ui, |ui| {
                    for choice in PAGE_SIZE_CHOICES {
                        if ui
                            .selectable_label(self.grid.page_size() == choice, choice.to_string())
                            .clicked()
                        {
                            self.grid.set_page_size(choice);
                        }
                    }
                });

            let page = self.grid.page();
            let total_pages = self.grid.total_pages();
            if ui
                .add_enabled(page > 0, egui::Button::new("<"))
                .clicked()
            {
                self.grid.set_page(page - 1);
            }
            ui.label(format!("Page {} of {total_pages}", page + 1));
            if ui
                .add_enabled(page + 1 < total_pages, egui::Button::new(">"))
                .clicked()
            {
                self.grid.set_page(page + 1);
            }

            ui.label(format!(
                "{} of {} commands",
                self.grid.total_filtered(),
                self.grid.page_info.total_available
            ));
        });
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        let saving = self.dialogs.pending().is_some();
        let mut action = DialogAction::None;

        match self.dialogs.dialog_mut() {
            None => return,
            Some(ActiveDialog::Create(form)) => {
                egui::Window::new("Create new command")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        egui::Grid::new("create_form").num_columns(2).show(ui, |ui| {
                            ui.label("Type");
                            ui.text_edit_singleline(&mut form.cmd_type);
                            ui.end_row();
                            ui.label("Name");
                            ui.text_edit_singleline(&mut form.name);
                            ui.end_row();
                            ui.label("SubName");
                            ui.text_edit_singleline(&mut form.sub_name);
                            ui.end_row();
                            ui.label("Short Description");
                            ui.text_edit_singleline(&mut form.short_desc);
                            ui.end_row();
                            ui.label("Long Description");
                            ui.text_edit_singleline(&mut form.long_desc);
                            ui.end_row();
                            ui.label("Path");
                            ui.text_edit_singleline(&mut form.path);
                            ui.end_row();
                            ui.label("Arguments");
                            ui.text_edit_singleline(&mut form.args);
                            ui.end_row();
                        });
                        ui.checkbox(&mut form.is_default, "Default for this type");
                        ui.checkbox(&mut form.needs_file, "Needs file access");
                        ui.checkbox(&mut form.cpu_intense, "CPU intense");
                        ui.checkbox(&mut form.disk_intense, "Disk intense");
                        ui.separator();
                        ui.horizontal(|ui| {
                            if ui
                                .add_enabled(!saving, egui::Button::new("Save"))
                                .clicked()
                            {
                                action = DialogAction::SaveCreate;
                            }
                            if ui.button("Cancel").clicked() {
                                action = DialogAction::Cancel;
                            }
                            if saving {
                                ui.spinner();
                            }
                        });
                    });
            }
            Some(ActiveDialog::EditSingle(form)) => {
                egui::Window::new("Edit Command")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        egui::Grid::new("detail_info").num_columns(2).show(ui, |ui| {
                            ui.label("Command ID");
                            ui.label(form.cmd_id.0.to_string());
                            ui.end_row();
                            ui.label("Type");
                            ui.label(&form.cmd_type);
                            ui.end_row();
                            ui.label("Name");
                            ui.label(&form.name);
                            ui.end_row();
                            ui.label("SubName");
                            ui.label(&form.sub_name);
                            ui.end_row();
                            ui.label("Short Description");
                            ui.label(&form.short_desc);
                            ui.end_row();
                            ui.label("Long Description");
                            ui.label(&form.long_desc);
                            ui.end_row();
                            ui.label("Path");
                            ui.text_edit_singleline(&mut form.path);
                            ui.end_row();
                            ui.label("Arguments");
                            ui.text_edit_singleline(&mut form.args);
                            ui.end_row();
                        });
                        ui.checkbox(&mut form.is_default, "Default for this type");
                        ui.checkbox(&mut form.needs_file, "Needs file access");
                        ui.checkbox(&mut form.cpu_intense, "CPU intense");
                        ui.checkbox(&mut form.disk_intense, "Disk intense");
                        ui.separator();
                        ui.horizontal(|ui| {
                            if ui
                                .add_enabled(!saving, egui::Button::new("Save"))
                                .clicked()
                            {
                                action = DialogAction::SaveEdit;
                            }
                            if ui.button("Cancel").clicked() {
                                action = DialogAction::Cancel;
                            }
                            if saving {
                                ui.spinner();
                            }
                        });
                    });
            }
            Some(ActiveDialog::EditMulti {
                cmd_ids,
                form,
                confirming,
            }) => {
                egui::Window::new("Edit Multiple Commands")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.label(format!(
                            "Changes apply uniformly to all {} selected commands.",
                            cmd_ids.len()
                        ));
                        egui::Grid::new("multi_form").num_columns(2).show(ui, |ui| {
                            ui.checkbox(&mut form.apply_path, "Path");
                            ui.add_enabled(
                                form.apply_path,
                                egui::TextEdit::singleline(&mut form.path),
                            );
                            ui.end_row();
                            ui.checkbox(&mut form.apply_args, "Arguments");
                            ui.add_enabled(
                                form.apply_args,
                                egui::TextEdit::singleline(&mut form.args),
                            );
                            ui.end_row();
                            ui.checkbox(&mut form.apply_default, "Default for this type");
                            ui.add_enabled(
                                form.apply_default,
                                egui::Checkbox::without_text(&mut form.is_default),
                            );
                            ui.end_row();
                            ui.checkbox(&mut form.apply_needs_file, "Needs file access");
                            ui.add_enabled(
                                form.apply_needs_file,
                                egui::Checkbox::without_text(&mut form.needs_file),
                            );
                            ui.end_row();
                            ui.checkbox(&mut form.apply_cpu_intense, "CPU intense");
                            ui.add_enabled(
                                form.apply_cpu_intense,
                                egui::Checkbox::without_text(&mut form.cpu_intense),
                            );
                            ui.end_row();
                            ui.checkbox(&mut form.apply_disk_intense, "Disk intense");
                            ui.add_enabled(
                                form.apply_disk_intense,
                                egui::Checkbox::without_text(&mut form.disk_intense),
                            );
                            ui.end_row();
                        });
                        ui.separator();
                        ui.horizontal(|ui| {
                            if ui
                                .add_enabled(!saving, egui::Button::new("Save"))
                                .clicked()
                            {
                                action = DialogAction::RequestMultiConfirm;
                            }
                            if ui.button("Cancel").clicked() {
                                action = DialogAction::Cancel;
                            }
                            if saving {
                                ui.spinner();
                            }
                        });
                    });

                if *confirming {
                    egui::Window::new("Confirm bulk edit")
                        .collapsible(false)
                        .resizable(false)
                        .show(ctx, |ui| {
                            ui.label(MULTI_EDIT_CONFIRMATION);
                            ui.horizontal(|ui| {
                                if ui.button("Continue").clicked() {
                                    action = DialogAction::ConfirmMulti;
                                }
                                if ui.button("Cancel").clicked() {
                                    action = DialogAction::DismissMultiConfirm;
                                }
                            });
                        });
                }
            }
            Some(ActiveDialog::ConfirmDelete { cmd_ids }) => {
                egui::Window::new("Delete commands")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.label(delete_confirmation_message(cmd_ids.len()));
                        ui.horizontal(|ui| {
                            if ui.button("Yes").clicked() {
                                action = DialogAction::ConfirmDelete;
                            }
                            if ui.button("Cancel").clicked() {
                                action = DialogAction::Cancel;
                            }
                        });
                    });
            }
        }

        match action {
            DialogAction::None => {}
            DialogAction::SaveCreate => self.save_create(),
            DialogAction::SaveEdit => self.save_update(),
            DialogAction::RequestMultiConfirm => self.dialogs.request_multi_edit_confirmation(),
            DialogAction::DismissMultiConfirm => self.dialogs.dismiss_multi_edit_confirmation(),
            DialogAction::ConfirmMulti => self.confirm_multi_edit(),
            DialogAction::ConfirmDelete => self.confirm_pending_delete(),
            DialogAction::Cancel => self.dialogs.cancel(),
        }
    }
}

impl eframe::App for AdminGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.show_banner(ui);
            self.show_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // Grid takes the window width minus fixed chrome, recomputed
            // every frame so resizes track.
            let grid_width = GridState::width_for_window(ctx.screen_rect().width());
            ui.set_max_width(grid_width);
            egui::ScrollArea::vertical()
                .id_salt("grid_scroll")
                .show(ui, |ui| {
                    self.show_grid(ui);
                });
            ui.separator();
            self.show_pager(ui);
        });

        self.show_dialogs(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

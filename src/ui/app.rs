use chrono::{Local, NaiveDate};
use eframe::egui;
use egui::{Color32, RichText};

use crate::config::Config;
use crate::orders::{
    seed, validate_order_form, FormErrors, OrderStore, WorkCenter, WorkOrder, WorkOrderStatus,
};
use crate::timeline::calendar::{add_days, format_iso, parse_iso};
use crate::timeline::{DateBounds, TimeScale, TimelineWindow};

use super::views;

pub struct PlanBoardApp {
    config: Config,
    store: OrderStore,
    work_centers: Vec<WorkCenter>,
    window: TimelineWindow,
    // One-shot scroll request consumed by the board view
    center_on: Option<NaiveDate>,

    // Dialog for add/edit
    show_dialog: bool,
    dialog_mode: DialogMode,
    dialog_name: String,
    dialog_status: WorkOrderStatus,
    dialog_start: String,
    dialog_end: String,
    dialog_center_id: String,
    dialog_order_id: String,
    form_errors: FormErrors,

    // Delete confirmation
    pending_delete: Option<WorkOrder>,
    show_delete_confirm: bool,

    // Status
    status_message: Option<(String, bool)>, // (message, is_error)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DialogMode {
    Add,
    Edit,
}

impl PlanBoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = Config::load().unwrap_or_default();
        super::setup_fonts(&cc.egui_ctx);
        super::theme::setup_theme(&cc.egui_ctx);

        let today = Local::now().date_naive();
        let window = TimelineWindow::new(today, config.timescale, DateBounds::around(today));

        Self {
            config,
            store: OrderStore::load(),
            work_centers: seed::work_centers(),
            window,
            center_on: Some(today),
            show_dialog: false,
            dialog_mode: DialogMode::Add,
            dialog_name: String::new(),
            dialog_status: WorkOrderStatus::Open,
            dialog_start: String::new(),
            dialog_end: String::new(),
            dialog_center_id: String::new(),
            dialog_order_id: String::new(),
            form_errors: FormErrors::default(),
            pending_delete: None,
            show_delete_confirm: false,
            status_message: None,
        }
    }

    fn select_timescale(&mut self, scale: TimeScale) {
        if scale == self.config.timescale {
            return;
        }
        self.config.timescale = scale;
        if let Err(e) = self.config.save() {
            self.status_message = Some((format!("Failed to save settings: {}", e), true));
        }

        let today = Local::now().date_naive();
        self.window = TimelineWindow::new(today, scale, DateBounds::around(today));
        self.center_on = Some(today);
    }

    fn jump_to_today(&mut self) {
        // Re-anchor the window on today; a far-shifted window may no longer
        // contain it.
        let today = Local::now().date_naive();
        self.window =
            TimelineWindow::new(today, self.config.timescale, DateBounds::around(today));
        self.center_on = Some(today);
    }

    /// Page the window by one step via the header arrows. The month window
    /// never auto-shifts, so its page is the full window (one calendar year).
    fn page_window(&mut self, direction: i64) {
        let step = match self.window.shift_step() {
            0 => self.window.column_count(),
            step => step,
        };
        self.window.shift(direction * step as i64);
    }

    fn open_add_dialog(&mut self, center_id: String, start: NaiveDate) {
        self.dialog_mode = DialogMode::Add;
        self.dialog_name = String::new();
        self.dialog_status = WorkOrderStatus::Open;
        self.dialog_start = format_iso(start);
        self.dialog_end = format_iso(add_days(start, 7));
        self.dialog_center_id = center_id;
        self.dialog_order_id = String::new();
        self.form_errors = FormErrors::default();
        self.show_dialog = true;
    }

    fn open_edit_dialog(&mut self, order: &WorkOrder) {
        self.dialog_mode = DialogMode::Edit;
        self.dialog_name = order.name.clone();
        self.dialog_status = order.status;
        self.dialog_start = format_iso(order.start_date);
        self.dialog_end = format_iso(order.end_date);
        self.dialog_center_id = order.work_center_id.clone();
        self.dialog_order_id = order.id.clone();
        self.form_errors = FormErrors::default();
        self.show_dialog = true;
    }

    fn save_dialog(&mut self) {
        let start = parse_iso(&self.dialog_start);
        let end = parse_iso(&self.dialog_end);
        let exclude = match self.dialog_mode {
            DialogMode::Edit => Some(self.dialog_order_id.as_str()),
            DialogMode::Add => None,
        };

        self.form_errors = validate_order_form(
            &self.dialog_name,
            start,
            end,
            &self.dialog_center_id,
            self.store.orders(),
            exclude,
        );
        if self.form_errors.any() {
            return;
        }
        let (Some(start_date), Some(end_date)) = (start, end) else {
            return;
        };

        let order = WorkOrder {
            id: match self.dialog_mode {
                DialogMode::Edit => self.dialog_order_id.clone(),
                DialogMode::Add => WorkOrder::new_id(),
            },
            name: self.dialog_name.trim().to_string(),
            work_center_id: self.dialog_center_id.clone(),
            status: self.dialog_status,
            start_date,
            end_date,
        };

        match self.dialog_mode {
            DialogMode::Add => self.store.add(order),
            DialogMode::Edit => self.store.update(order),
        }
        self.show_dialog = false;
        self.status_message = None;
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (button_bg, button_text) = super::theme::button_colors();

            ui.label(
                RichText::new("Work order schedule")
                    .size(16.0)
                    .color(Color32::WHITE),
            );
            ui.add_space(16.0);

            // Timescale select
            let mut selected = self.config.timescale;
            egui::ComboBox::from_id_salt("timescale_select")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for scale in TimeScale::ALL {
                        ui.selectable_value(&mut selected, scale, scale.label());
                    }
                });
            if selected != self.config.timescale {
                self.select_timescale(selected);
            }

            ui.add_space(8.0);

            // Today button - pill style
            let today_text = format!("{} Today", egui_phosphor::regular::CALENDAR);
            if ui
                .add(
                    egui::Button::new(RichText::new(today_text).size(14.0).color(button_text))
                        .fill(button_bg)
                        .rounding(egui::Rounding::same(12.0)),
                )
                .clicked()
            {
                self.jump_to_today();
            }

            ui.add_space(8.0);

            // Window paging styled like a button but pill-shaped
            let mut page: Option<i64> = None;
            egui::Frame::none()
                .fill(button_bg)
                .rounding(egui::Rounding::same(12.0))
                .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let left_arrow = ui.add(
                            egui::Label::new(
                                RichText::new(egui_phosphor::regular::CARET_LEFT)
                                    .size(14.0)
                                    .color(button_text),
                            )
                            .sense(egui::Sense::click()),
                        );
                        if left_arrow.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if left_arrow.clicked() {
                            page = Some(-1);
                        }

                        ui.add_space(4.0);

                        if let Some(last) = self.window.columns().last() {
                            let range_text = format!(
                                "{} - {}",
                                self.window.start().format("%b %d, %Y"),
                                add_days(last.end, -1).format("%b %d, %Y")
                            );
                            ui.label(RichText::new(range_text).size(14.0).color(button_text));
                        }

                        ui.add_space(4.0);

                        let right_arrow = ui.add(
                            egui::Label::new(
                                RichText::new(egui_phosphor::regular::CARET_RIGHT)
                                    .size(14.0)
                                    .color(button_text),
                            )
                            .sense(egui::Sense::click()),
                        );
                        if right_arrow.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if right_arrow.clicked() {
                            page = Some(1);
                        }
                    });
                });
            if let Some(direction) = page {
                self.page_window(direction);
            }
        });
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let title = match self.dialog_mode {
            DialogMode::Add => "New work order",
            DialogMode::Edit => "Edit work order",
        };

        let mut save_requested = false;
        let mut close_requested = false;

        let (content_bg, frame_color, _) = super::theme::dialog_colors();
        let dialog_frame = egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0));

        let error_color = Color32::from_rgb(0xff, 0x44, 0x44);
        let error_frame = |has_error: bool| {
            if has_error {
                egui::Frame::none()
                    .stroke(egui::Stroke::new(2.0, error_color))
                    .rounding(4.0)
                    .inner_margin(2.0)
            } else {
                egui::Frame::none()
            }
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(dialog_frame)
            .show(ctx, |ui| {
                egui::Grid::new("order_form_grid")
                    .num_columns(2)
                    .spacing([12.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("Name");
                        error_frame(self.form_errors.missing_name).show(ui, |ui| {
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut self.dialog_name)
                                    .hint_text("Order name")
                                    .desired_width(260.0),
                            );
                            if response.changed() {
                                self.form_errors.missing_name = false;
                            }
                        });
                        ui.end_row();

                        ui.label("Work center");
                        error_frame(self.form_errors.missing_center).show(ui, |ui| {
                            let selected_name = self
                                .work_centers
                                .iter()
                                .find(|c| c.id == self.dialog_center_id)
                                .map(|c| c.name.clone())
                                .unwrap_or_else(|| "Select...".to_string());
                            egui::ComboBox::from_id_salt("order_center_select")
                                .selected_text(selected_name)
                                .width(260.0)
                                .show_ui(ui, |ui| {
                                    for center in &self.work_centers {
                                        if ui
                                            .selectable_label(
                                                self.dialog_center_id == center.id,
                                                &center.name,
                                            )
                                            .clicked()
                                        {
                                            self.dialog_center_id = center.id.clone();
                                            self.form_errors.missing_center = false;
                                        }
                                    }
                                });
                        });
                        ui.end_row();

                        ui.label("Status");
                        egui::ComboBox::from_id_salt("order_status_select")
                            .selected_text(self.dialog_status.label())
                            .width(260.0)
                            .show_ui(ui, |ui| {
                                for status in WorkOrderStatus::ALL {
                                    ui.selectable_value(
                                        &mut self.dialog_status,
                                        status,
                                        status.label(),
                                    );
                                }
                            });
                        ui.end_row();

                        let date_error = self.form_errors.missing_dates
                            || self.form_errors.end_before_start
                            || self.form_errors.overlap;

                        ui.label("Start date");
                        error_frame(date_error).show(ui, |ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut self.dialog_start)
                                    .hint_text("YYYY-MM-DD")
                                    .desired_width(260.0),
                            );
                        });
                        ui.end_row();

                        ui.label("End date");
                        error_frame(date_error).show(ui, |ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut self.dialog_end)
                                    .hint_text("YYYY-MM-DD")
                                    .desired_width(260.0),
                            );
                        });
                        ui.end_row();
                    });

                // Field-keyed validation feedback
                let messages = [
                    (self.form_errors.missing_name, "Name is required"),
                    (self.form_errors.missing_center, "Pick a work center"),
                    (
                        self.form_errors.missing_dates,
                        "Both dates are required as YYYY-MM-DD",
                    ),
                    (
                        self.form_errors.end_before_start,
                        "End date is before the start date",
                    ),
                    (
                        self.form_errors.overlap,
                        "Overlaps another order on this work center",
                    ),
                ];
                for (flag, message) in messages {
                    if flag {
                        ui.label(RichText::new(message).size(13.0).color(error_color));
                    }
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        save_requested = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close_requested = true;
                    }
                });
            });

        if save_requested {
            self.save_dialog();
        }
        if close_requested {
            self.show_dialog = false;
        }
    }

    fn render_delete_confirm(&mut self, ctx: &egui::Context) {
        let mut do_delete = false;
        let mut cancel_delete = false;

        let (content_bg, frame_color, _) = super::theme::dialog_colors();
        let dialog_frame = egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0));

        egui::Window::new("Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .default_width(400.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(dialog_frame)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                if let Some(order) = &self.pending_delete {
                    ui.label(RichText::new("Delete this work order?").size(14.0));
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&order.name).strong());
                        ui.label(format!(
                            "{} - {}",
                            order.start_date.format("%b %d"),
                            order.end_date.format("%b %d, %Y")
                        ));
                    });
                }

                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    let btn_bg = Color32::from_rgb(0x28, 0x28, 0x26);
                    let btn_hover = Color32::from_rgb(0x50, 0x50, 0x4a);
                    let text_color = Color32::from_rgb(180, 180, 190);
                    let delete_color = Color32::from_rgb(224, 108, 117);
                    let font_id = egui::FontId::proportional(17.0);
                    let padding = egui::vec2(18.0, 10.0);
                    let rounding = egui::Rounding::same(6.0);

                    // Delete button - red text for emphasis
                    let delete_text = "Delete";
                    let delete_size = ui.fonts(|f| {
                        f.layout_no_wrap(delete_text.to_string(), font_id.clone(), delete_color)
                            .size()
                    });
                    let (delete_rect, delete_response) =
                        ui.allocate_exact_size(delete_size + padding * 2.0, egui::Sense::click());
                    let delete_bg = if delete_response.hovered() {
                        btn_hover
                    } else {
                        btn_bg
                    };
                    ui.painter().rect_filled(delete_rect, rounding, delete_bg);
                    ui.painter().text(
                        delete_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        delete_text,
                        font_id.clone(),
                        delete_color,
                    );
                    if delete_response.clicked() {
                        do_delete = true;
                    }

                    // Cancel button
                    let cancel_text = "Cancel";
                    let cancel_size = ui.fonts(|f| {
                        f.layout_no_wrap(cancel_text.to_string(), font_id.clone(), text_color)
                            .size()
                    });
                    let (cancel_rect, cancel_response) =
                        ui.allocate_exact_size(cancel_size + padding * 2.0, egui::Sense::click());
                    let cancel_bg = if cancel_response.hovered() {
                        btn_hover
                    } else {
                        btn_bg
                    };
                    ui.painter().rect_filled(cancel_rect, rounding, cancel_bg);
                    ui.painter().text(
                        cancel_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        cancel_text,
                        font_id,
                        text_color,
                    );
                    if cancel_response.clicked() {
                        cancel_delete = true;
                    }
                });
            });

        if do_delete {
            if let Some(order) = self.pending_delete.take() {
                self.store.remove(&order.id);
                self.status_message = Some((format!("Deleted {}", order.name), false));
            }
            self.show_delete_confirm = false;
        }
        if cancel_delete {
            self.pending_delete = None;
            self.show_delete_confirm = false;
        }
    }
}

impl eframe::App for PlanBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle pinch-to-zoom (trackpad pinch or Ctrl+scroll)
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.config.font_scale = (self.config.font_scale * zoom_delta).clamp(0.75, 2.5);
            if (zoom_delta - 1.0).abs() > 0.01 {
                let _ = self.config.save();
            }
        }
        ctx.set_pixels_per_point(self.config.font_scale);

        if self.show_dialog {
            self.render_dialog(ctx);
        }
        if self.show_delete_confirm {
            self.render_delete_confirm(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 8.0)))
            .show(ctx, |ui| {
                // Status message line with a close button
                let mut dismiss_message = false;
                if let Some((msg, is_error)) = &self.status_message {
                    let color = if *is_error {
                        Color32::from_rgb(224, 108, 117)
                    } else {
                        Color32::from_rgb(152, 195, 121)
                    };
                    ui.horizontal(|ui| {
                        ui.add(egui::Label::new(RichText::new(msg).color(color)));
                        ui.add_space(8.0);
                        let close_btn = ui.add(
                            egui::Label::new(
                                RichText::new(egui_phosphor::regular::X)
                                    .size(14.0)
                                    .color(Color32::from_rgb(120, 120, 130)),
                            )
                            .sense(egui::Sense::click()),
                        );
                        if close_btn.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if close_btn.clicked() {
                            dismiss_message = true;
                        }
                    });
                    ui.add_space(8.0);
                }
                if dismiss_message {
                    self.status_message = None;
                }

                self.render_top_bar(ui);
                ui.add_space(8.0);

                let result = views::render_board(
                    ui,
                    &mut self.window,
                    &self.work_centers,
                    &self.store,
                    self.config.column_width,
                    &mut self.center_on,
                );

                if let Some(order) = result.edit_order {
                    self.open_edit_dialog(&order);
                }
                if let Some(order) = result.delete_order {
                    self.pending_delete = Some(order);
                    self.show_delete_confirm = true;
                }
                if let Some((center_id, start)) = result.create_at {
                    self.open_add_dialog(center_id, start);
                }
            });
    }
}

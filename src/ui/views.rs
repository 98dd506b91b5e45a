use chrono::{Local, NaiveDate};
use egui::{Color32, RichText, Ui};

use crate::orders::{OrderStore, WorkCenter, WorkOrder};
use crate::timeline::{bar_placement, date_to_x, edge_shift_request, x_to_date, TimelineWindow};

use super::theme::{grid_colors, phosphor_fill_family, status_color, status_icon};

/// Result from board interactions
#[derive(Default)]
pub struct BoardResult {
    pub edit_order: Option<WorkOrder>,
    pub delete_order: Option<WorkOrder>,
    // Click on an empty cell - (work center id, start date for the new order)
    pub create_at: Option<(String, NaiveDate)>,
}

const GUTTER_WIDTH: f32 = 170.0;
const HEADER_HEIGHT: f32 = 36.0;
const ROW_HEIGHT: f32 = 52.0;
const BAR_MARGIN: f32 = 7.0;

/// Render the scheduling board: a fixed work-center gutter on the left and
/// the horizontally scrollable column window on the right. The window shifts
/// itself when the scroll position nears an edge; the scroll offset is
/// compensated in the same frame so the content does not visibly jump.
pub fn render_board(
    ui: &mut Ui,
    window: &mut TimelineWindow,
    centers: &[WorkCenter],
    store: &OrderStore,
    col_width: f32,
    center_on: &mut Option<NaiveDate>,
) -> BoardResult {
    let mut result = BoardResult::default();

    let today = Local::now().date_naive();
    let rows_height = centers.len() as f32 * ROW_HEIGHT;
    let total_height = HEADER_HEIGHT + rows_height;
    let (grid_line, boundary_line, _) = grid_colors();

    ui.horizontal_top(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;

        // Fixed gutter: work center names, one per row
        let (gutter_rect, _) = ui.allocate_exact_size(
            egui::vec2(GUTTER_WIDTH, total_height),
            egui::Sense::hover(),
        );
        let painter = ui.painter();
        for (i, center) in centers.iter().enumerate() {
            let row_top = gutter_rect.min.y + HEADER_HEIGHT + i as f32 * ROW_HEIGHT;
            painter.text(
                egui::pos2(gutter_rect.min.x + 8.0, row_top + ROW_HEIGHT / 2.0),
                egui::Align2::LEFT_CENTER,
                &center.name,
                egui::FontId::proportional(14.0),
                Color32::from_rgb(200, 200, 192),
            );
            painter.line_segment(
                [
                    egui::pos2(gutter_rect.min.x, row_top),
                    egui::pos2(gutter_rect.max.x, row_top),
                ],
                egui::Stroke::new(1.0, grid_line),
            );
        }
        // Gutter/board divider
        painter.line_segment(
            [
                egui::pos2(gutter_rect.max.x, gutter_rect.min.y),
                egui::pos2(gutter_rect.max.x, gutter_rect.max.y),
            ],
            egui::Stroke::new(1.0, boundary_line),
        );

        let output = egui::ScrollArea::horizontal()
            .id_salt("board_scroll")
            .auto_shrink([false, false])
            .max_height(total_height)
            .show(ui, |ui| {
                render_grid(ui, window, centers, store, col_width, today, &mut result)
            });

        // Scroll bookkeeping happens after painting: either jump to a
        // requested date, or shift the window when the user scrolled near an
        // edge and compensate the offset by the applied delta.
        let offset_x = output.state.offset.x;
        let viewport_w = output.inner_rect.width();
        let content_w = window.column_count() as f32 * col_width;

        if let Some(date) = center_on.take() {
            let target = date_to_x(date, window.columns(), col_width) - viewport_w / 2.0;
            let mut state = output.state;
            state.offset.x = target.clamp(0.0, (content_w - viewport_w).max(0.0));
            state.store(ui.ctx(), output.id);
            ui.ctx().request_repaint();
        } else if let Some(delta) =
            edge_shift_request(offset_x, viewport_w, content_w, window.shift_step())
        {
            let applied = window.shift(delta);
            if applied != 0 {
                let mut state = output.state;
                state.offset.x = (offset_x - applied as f32 * col_width).max(0.0);
                state.store(ui.ctx(), output.id);
                ui.ctx().request_repaint();
            }
        }
    });

    result
}

fn render_grid(
    ui: &mut Ui,
    window: &TimelineWindow,
    centers: &[WorkCenter],
    store: &OrderStore,
    col_width: f32,
    today: NaiveDate,
    result: &mut BoardResult,
) {
    let columns = window.columns();
    let content_width = columns.len() as f32 * col_width;
    let rows_height = centers.len() as f32 * ROW_HEIGHT;
    let total_height = HEADER_HEIGHT + rows_height;
    let (grid_line, boundary_line, header_text) = grid_colors();
    let accent = Color32::from_rgb(0x13, 0x98, 0xf4);

    let (grid_rect, grid_response) = ui.allocate_exact_size(
        egui::vec2(content_width, total_height),
        egui::Sense::click(),
    );

    let painter = ui.painter();
    let marker = window.current_period(today);

    // Current-period column gets a dim background across all rows
    if let Some(marker) = marker {
        let x = grid_rect.min.x + marker.index as f32 * col_width;
        let col_rect = egui::Rect::from_min_size(
            egui::pos2(x, grid_rect.min.y),
            egui::vec2(col_width, total_height),
        );
        painter.rect_filled(col_rect, 0.0, Color32::from_rgb(0x11, 0x11, 0x10));
    }

    // Header labels and vertical column lines
    for (i, col) in columns.iter().enumerate() {
        let x = grid_rect.min.x + i as f32 * col_width;
        let col_rect = egui::Rect::from_min_size(
            egui::pos2(x, grid_rect.min.y),
            egui::vec2(col_width, total_height),
        );
        if !ui.is_rect_visible(col_rect) {
            continue;
        }

        let is_marker = marker.map(|m| m.index == i).unwrap_or(false);

        painter.text(
            egui::pos2(x + 6.0, grid_rect.min.y + 12.0),
            egui::Align2::LEFT_CENTER,
            &col.label,
            egui::FontId::proportional(12.0),
            if is_marker { Color32::WHITE } else { header_text },
        );
        if let Some(marker) = marker.filter(|m| m.index == i) {
            painter.text(
                egui::pos2(x + 6.0, grid_rect.min.y + 27.0),
                egui::Align2::LEFT_CENTER,
                marker.label,
                egui::FontId::proportional(10.0),
                accent,
            );
        }

        painter.line_segment(
            [
                egui::pos2(x, grid_rect.min.y),
                egui::pos2(x, grid_rect.max.y),
            ],
            egui::Stroke::new(1.0, grid_line),
        );
    }

    // Header/body boundary and horizontal row lines
    for i in 0..=centers.len() {
        let y = grid_rect.min.y + HEADER_HEIGHT + i as f32 * ROW_HEIGHT;
        painter.line_segment(
            [
                egui::pos2(grid_rect.min.x, y),
                egui::pos2(grid_rect.max.x, y),
            ],
            egui::Stroke::new(1.0, if i == 0 { boundary_line } else { grid_line }),
        );
    }

    // Work-order bars, row by row
    let mut bar_rects: Vec<egui::Rect> = Vec::new();
    let (Some(first_col), Some(last_col)) = (columns.first(), columns.last()) else {
        return;
    };

    for (row_idx, center) in centers.iter().enumerate() {
        let row_top = grid_rect.min.y + HEADER_HEIGHT + row_idx as f32 * ROW_HEIGHT;

        for order in store.orders_for_center(&center.id) {
            // Skip orders entirely outside the materialized window
            if order.end_date < first_col.start || order.start_date >= last_col.end {
                continue;
            }

            let (left, width) = bar_placement(order.start_date, order.end_date, columns, col_width);
            let bar_rect = egui::Rect::from_min_size(
                egui::pos2(grid_rect.min.x + left, row_top + BAR_MARGIN),
                egui::vec2(width, ROW_HEIGHT - BAR_MARGIN * 2.0),
            );
            bar_rects.push(bar_rect);

            if ui.is_rect_visible(bar_rect) {
                paint_order_bar(ui, bar_rect, order);
            }

            let bar_id = ui.make_persistent_id(("order_bar", &order.id));
            let response = ui.interact(bar_rect, bar_id, egui::Sense::click());
            if response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }

            let menu_id = ui.make_persistent_id(("order_menu", &order.id));
            if response.clicked() || response.secondary_clicked() {
                ui.memory_mut(|mem| mem.toggle_popup(menu_id));
            }

            egui::popup::popup_below_widget(
                ui,
                menu_id,
                &response,
                egui::PopupCloseBehavior::CloseOnClick,
                |ui| {
                    ui.set_min_width(140.0);
                    ui.style_mut().spacing.button_padding = egui::vec2(12.0, 8.0);

                    if ui
                        .add(
                            egui::Button::new(
                                RichText::new(format!(
                                    "{}  Edit order",
                                    egui_phosphor::regular::PENCIL_SIMPLE
                                ))
                                .size(14.0),
                            )
                            .frame(false),
                        )
                        .clicked()
                    {
                        result.edit_order = Some(order.clone());
                    }

                    if ui
                        .add(
                            egui::Button::new(
                                RichText::new(format!(
                                    "{}  Delete order",
                                    egui_phosphor::regular::TRASH
                                ))
                                .size(14.0),
                            )
                            .frame(false),
                        )
                        .clicked()
                    {
                        result.delete_order = Some(order.clone());
                    }
                },
            );
        }
    }

    // Ghost preview + click-to-create on empty cells
    let pointer_pos = ui.ctx().pointer_hover_pos();
    let over_bar = pointer_pos
        .map(|pos| bar_rects.iter().any(|r| r.contains(pos)))
        .unwrap_or(false);

    if let Some(pos) = pointer_pos.filter(|_| !over_bar) {
        let body_top = grid_rect.min.y + HEADER_HEIGHT;
        if grid_rect.contains(pos) && pos.y >= body_top {
            // Pixel -> date through the coordinate mapper, then snap to the
            // containing column for the ghost cell
            let hover_date = x_to_date(pos.x - grid_rect.min.x, columns, col_width);
            let col_idx = columns
                .iter()
                .position(|c| c.start <= hover_date && hover_date < c.end);
            let row_idx = ((pos.y - body_top) / ROW_HEIGHT) as usize;

            if let (Some(col_idx), Some(center)) = (col_idx, centers.get(row_idx)) {
                let col = &columns[col_idx];
                let ghost_rect = egui::Rect::from_min_size(
                    egui::pos2(
                        grid_rect.min.x + col_idx as f32 * col_width + 2.0,
                        body_top + row_idx as f32 * ROW_HEIGHT + BAR_MARGIN,
                    ),
                    egui::vec2(col_width - 4.0, ROW_HEIGHT - BAR_MARGIN * 2.0),
                );

                let ghost_color = Color32::from_rgba_unmultiplied(0x61, 0xAF, 0xEF, 60);
                let ghost_border = Color32::from_rgba_unmultiplied(0x61, 0xAF, 0xEF, 120);
                ui.painter()
                    .rect(ghost_rect, 4.0, ghost_color, egui::Stroke::new(1.0, ghost_border));

                let ghost_label =
                    format!("{} {}", egui_phosphor::regular::PLUS, col.start.format("%b %d"));
                ui.painter().text(
                    ghost_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    ghost_label,
                    egui::FontId::proportional(13.0),
                    Color32::from_rgba_unmultiplied(255, 255, 255, 150),
                );

                if grid_response.clicked() {
                    result.create_at = Some((center.id.clone(), col.start));
                }
            }
        }
    }
}

/// Paint a single work-order bar (no interaction - that's handled by caller)
fn paint_order_bar(ui: &Ui, rect: egui::Rect, order: &WorkOrder) {
    let painter = ui.painter();
    let accent_color = status_color(order.status);

    let block_bg = Color32::from_rgb(0x1c, 0x1c, 0x1a);
    let corner_radius = 4.0;

    painter.rect(
        rect,
        corner_radius,
        block_bg,
        egui::Stroke::new(1.0, accent_color),
    );

    // Left accent stripe
    let accent_width = 3.0;
    let accent_rect = egui::Rect::from_min_size(rect.min, egui::vec2(accent_width, rect.height()));
    painter.rect(
        accent_rect,
        egui::Rounding {
            nw: corner_radius,
            sw: corner_radius,
            ne: 0.0,
            se: 0.0,
        },
        accent_color,
        egui::Stroke::NONE,
    );

    let text_left = rect.min.x + accent_width + 4.0;
    let font_size = 13.0;

    if rect.height() > 20.0 {
        let line_y = rect.center().y;
        let mut x = text_left;

        // Status icon on a colored square
        let square_size = font_size + 2.0;
        let square_rect = egui::Rect::from_center_size(
            egui::pos2(x + square_size / 2.0, line_y),
            egui::vec2(square_size, square_size),
        );
        painter.rect_filled(square_rect, 2.0, accent_color);
        painter.text(
            square_rect.center(),
            egui::Align2::CENTER_CENTER,
            status_icon(order.status),
            egui::FontId::new(font_size - 2.0, phosphor_fill_family()),
            Color32::WHITE,
        );
        x += square_size + 4.0;

        // Order name, then the date span if there is room
        let name_font = egui::FontId::proportional(font_size);
        let name_galley = painter.layout_no_wrap(
            order.name.clone(),
            name_font.clone(),
            Color32::from_rgb(200, 200, 192),
        );
        let name_width = name_galley.size().x;
        if x + name_width < rect.max.x - 4.0 {
            painter.galley(
                egui::pos2(x, line_y - name_galley.size().y / 2.0),
                name_galley,
                Color32::WHITE,
            );
            x += name_width + 8.0;
        }

        let span_text = format!(
            "{} - {}",
            order.start_date.format("%b %d"),
            order.end_date.format("%b %d")
        );
        let span_galley = painter.layout_no_wrap(
            span_text,
            egui::FontId::proportional(11.0),
            Color32::from_rgb(0x90, 0x90, 0x88),
        );
        if x + span_galley.size().x < rect.max.x - 4.0 {
            painter.galley(
                egui::pos2(x, line_y - span_galley.size().y / 2.0),
                span_galley,
                Color32::WHITE,
            );
        }
    }
}

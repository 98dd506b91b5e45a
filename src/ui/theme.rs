use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use crate::orders::WorkOrderStatus;

/// Font family for filled Phosphor icons
pub fn phosphor_fill_family() -> FontFamily {
    FontFamily::Name("phosphor-fill".into())
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    // Dark visuals with blue accents
    let mut visuals = Visuals::dark();

    // Background colors - pure black
    let bg = Color32::BLACK;
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.faint_bg_color = Color32::from_rgb(20, 20, 18);
    visuals.extreme_bg_color = bg;

    // Widget colors - warm grays (R=G > B for warmth)
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(40, 40, 38);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(176, 176, 168));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(56, 56, 52);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(200, 200, 192));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(80, 80, 74);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::from_rgb(255, 255, 255));

    // Accent color for active/pressed buttons
    let accent = Color32::from_rgb(19, 152, 244);
    visuals.widgets.active.bg_fill = accent;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    // Selection color (accent background, white text)
    visuals.selection.bg_fill = accent;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.hyperlink_color = accent;

    // Rounded corners
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(8.0);

    style.visuals = visuals;

    // Font sizes - standardized at 14pt
    style.text_styles = [
        (TextStyle::Small, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(12.0, 10.0);
    style.spacing.button_padding = egui::vec2(18.0, 10.0);
    style.spacing.window_margin = egui::Margin::same(24.0);

    ctx.set_style(style);
}

/// Accent color for a work-order status, used for bar borders and stripes
pub fn status_color(status: WorkOrderStatus) -> Color32 {
    match status {
        WorkOrderStatus::Open => Color32::from_rgb(0x13, 0x98, 0xf4),       // Blue
        WorkOrderStatus::InProgress => Color32::from_rgb(0xec, 0x71, 0x1b), // Orange
        WorkOrderStatus::Complete => Color32::from_rgb(0x65, 0xba, 0x43),   // Green
        WorkOrderStatus::Blocked => Color32::from_rgb(0xe5, 0x4d, 0x42),    // Red
    }
}

/// Filled Phosphor icon for a work-order status
pub fn status_icon(status: WorkOrderStatus) -> &'static str {
    match status {
        WorkOrderStatus::Open => egui_phosphor::fill::CIRCLE,
        WorkOrderStatus::InProgress => egui_phosphor::fill::PLAY,
        WorkOrderStatus::Complete => egui_phosphor::fill::CHECK_FAT,
        WorkOrderStatus::Blocked => egui_phosphor::fill::PROHIBIT,
    }
}

/// Returns (grid_line, boundary_line, header_text) colors for the board grid
pub fn grid_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x28, 0x28, 0x26),
        Color32::from_rgb(0x40, 0x40, 0x3c),
        Color32::from_rgb(0xb0, 0xb0, 0xa8),
    )
}

/// Returns (bg_color, text_color) for button-like elements to ensure consistency
pub fn button_colors() -> (Color32, Color32) {
    (
        Color32::from_rgb(56, 56, 52),       // bg - warm gray
        Color32::from_rgb(200, 200, 192),    // text - warm gray
    )
}

/// Returns (content_bg, frame_color, frame_text) for dialogs
pub fn dialog_colors() -> (Color32, Color32, Color32) {
    (
        Color32::BLACK,                      // content bg
        Color32::from_rgb(40, 40, 38),       // frame/border - warm gray
        Color32::from_rgb(176, 176, 168),    // frame text - warm gray
    )
}

//! Reusable UI components

use crate::theme;
use crate::types::Protocol;
use eframe::egui;

/// Format a last-sync timestamp (Unix millis) for table display
pub fn format_last_sync(timestamp: Option<i64>) -> String {
    match timestamp.and_then(chrono::DateTime::from_timestamp_millis) {
        Some(dt) => dt
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "Never".to_string(),
    }
}

/// Small rounded badge used for tags and format labels
pub fn badge(ui: &mut egui::Ui, text: &str, fg: egui::Color32, bg: egui::Color32) {
    let galley = ui.fonts(|f| {
        f.layout_no_wrap(text.to_string(), egui::FontId::proportional(theme::FONT_SMALL), fg)
    });
    let size = galley.rect.size() + egui::vec2(12.0, 6.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, bg);
        ui.painter().galley(
            rect.center() - galley.rect.size() / 2.0,
            galley,
            fg,
        );
    }
}

pub fn tag_badge(ui: &mut egui::Ui, tag: &str) {
    badge(ui, tag, theme::TEXT_MUTED, theme::BG_SURFACE);
}

/// Protocol column cell: colored glyph + label
pub fn protocol_label(protocol: Protocol) -> egui::RichText {
    let (icon, color) = match protocol {
        Protocol::Https => (egui_phosphor::regular::GLOBE, theme::ACCENT),
        Protocol::Http => (egui_phosphor::regular::GLOBE_SIMPLE, theme::ACCENT_LIGHT),
        Protocol::Local => (egui_phosphor::regular::FOLDER, theme::TEXT_MUTED),
    };
    egui::RichText::new(format!("{}  {}", icon, protocol.label()))
        .size(theme::FONT_LABEL)
        .color(color)
}

/// Icon-only action button used in table rows
pub fn icon_button(ui: &mut egui::Ui, icon: &str, tooltip: &str) -> egui::Response {
    let resp = ui
        .add(
            egui::Button::new(egui::RichText::new(icon).size(15.0).color(theme::TEXT_MUTED))
                .frame(false),
        )
        .on_hover_text(tooltip);
    if resp.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsynced_sources_display_never() {
        assert_eq!(format_last_sync(None), "Never");
    }

    #[test]
    fn timestamps_format_as_local_datetime() {
        let formatted = format_last_sync(Some(1_700_000_000_000));
        assert_eq!(formatted.len(), 16);
        assert!(formatted.starts_with("2023-11-1"));
    }
}

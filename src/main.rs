#![windows_subsystem = "windows"]
//! Prompt Sync - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod cache;
mod constants;
mod error;
mod parser;
mod settings;
mod store;
mod theme;
mod types;
mod ui;
mod utils;

use app::{App, ToastKind};
use constants::*;
use eframe::egui;
use tracing::info;
use types::*;
use ui::components;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "prompt-sync.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,prompt_sync=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Prompt Sync starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(980.0, 640.0)))
        .with_min_inner_size([760.0, 480.0])
        .with_title(APP_NAME);

    // Window/taskbar icon rasterized from the logo SVG
    {
        let (rgba, w, h) = utils::rasterize_logo_square(64);
        let icon = egui::IconData { rgba, width: w, height: h };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

/// Row action picked up inside the table closures, applied afterwards
enum RowAction {
    Sync(usize),
    Edit(usize),
    Delete(usize),
    OpenTarget(usize),
    ShowCache(usize),
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Apply completed sync chains before rendering this frame's rows
        self.apply_sync_events();

        self.render_form_modal(ctx);

        // Top bar - logo, title, search, add button
        egui::TopBottomPanel::top("top_bar")
            .exact_height(theme::TOP_BAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let texture = self.logo_texture.get_or_insert_with(|| {
                        let (pixels, w, h) = utils::rasterize_logo_square(64);
                        ctx.load_texture(
                            "logo",
                            egui::ColorImage::from_rgba_unmultiplied(
                                [w as usize, h as usize],
                                &pixels,
                            ),
                            egui::TextureOptions::LINEAR,
                        )
                    });
                    ui.image(egui::load::SizedTexture::new(
                        texture.id(),
                        egui::vec2(26.0, 26.0),
                    ));
                    ui.add_space(theme::SPACING_SM);
                    ui.label(
                        egui::RichText::new(APP_NAME)
                            .size(theme::FONT_TITLE)
                            .strong(),
                    );
                    ui.label(
                        egui::RichText::new(format!("v{}", APP_VERSION))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let add_btn = ui.add(theme::button_accent(format!(
                            "{}  Add source",
                            egui_phosphor::regular::PLUS
                        )));
                        if add_btn.clicked() {
                            self.open_new_form();
                        }

                        ui.add_space(theme::SPACING_MD);
                        let search = ui.add(
                            egui::TextEdit::singleline(&mut self.search_query)
                                .hint_text(format!(
                                    "{}  Search sources...",
                                    egui_phosphor::regular::MAGNIFYING_GLASS
                                ))
                                .desired_width(220.0),
                        );
                        if search.changed() {
                            self.page = 0;
                            self.apply_filters();
                        }
                    });
                });
            });

        // Footer - pagination and column toggles
        egui::TopBottomPanel::bottom("footer")
            .exact_height(theme::FOOTER_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 0)),
            )
            .show(ctx, |ui| {
                self.render_footer(ui);
            });

        // Central panel - source table
        let panel_response = egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                if self.filtered_indices.is_empty() {
                    ui.centered_and_justified(|ui| {
                        let text = if self.sources.is_empty() {
                            "No sync sources yet. Add one to get started."
                        } else {
                            "No sources match the search."
                        };
                        ui.label(
                            egui::RichText::new(text)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_DIM),
                        );
                    });
                } else {
                    self.render_source_table(ui, ctx);
                }
            });
        self.central_panel_rect = Some(panel_response.response.rect);

        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Shutting down, saving settings");
        self.save_settings();
    }
}

// ============================================================================
// RENDERING
// ============================================================================

impl App {
    fn render_source_table(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        use egui_extras::{Column, TableBuilder};

        let rows: Vec<usize> = self.page_rows().to_vec();
        let mut clicked_sort: Option<SortColumn> = None;
        let mut action: Option<RowAction> = None;

        let header_height = 34.0;
        let full_rect = ui.available_rect_before_wrap();
        ui.painter().rect_filled(
            egui::Rect::from_min_size(
                full_rect.min,
                egui::vec2(full_rect.width(), header_height),
            ),
            theme::RADIUS_DEFAULT,
            theme::BG_ELEVATED,
        );

        let mut table = TableBuilder::new(ui)
            .striped(false)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .sense(egui::Sense::click())
            .min_scrolled_height(0.0);

        table = table.column(Column::remainder().clip(true)); // Name
        table = table.column(Column::exact(84.0)); // Protocol
        if self.show_path {
            table = table.column(Column::remainder().clip(true));
        }
        if self.show_format {
            table = table.column(Column::exact(62.0));
        }
        if self.show_tags {
            table = table.column(Column::exact(150.0).clip(true));
        }
        table = table.column(Column::exact(126.0)); // Last sync
        table = table.column(Column::exact(96.0)); // Actions

        table
            .header(header_height, |mut header| {
                let sort_header =
                    |ui: &mut egui::Ui, label: &str, column: SortColumn| -> Option<SortColumn> {
                        let is_sorted = self.sort_column == Some(column);
                        let icon = if is_sorted {
                            match self.sort_direction {
                                SortDirection::Ascending => egui_phosphor::regular::CARET_UP,
                                SortDirection::Descending => egui_phosphor::regular::CARET_DOWN,
                            }
                        } else {
                            egui_phosphor::regular::CARET_UP_DOWN
                        };
                        let color = if is_sorted {
                            theme::TEXT_PRIMARY
                        } else {
                            theme::TEXT_MUTED
                        };
                        let resp = ui.add(
                            egui::Label::new(
                                egui::RichText::new(format!("{} {}", label, icon))
                                    .size(theme::FONT_LABEL)
                                    .strong()
                                    .color(color),
                            )
                            .selectable(false)
                            .sense(egui::Sense::click()),
                        );
                        resp.clicked().then_some(column)
                    };
                let plain_header = |ui: &mut egui::Ui, label: &str| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(label)
                                .size(theme::FONT_LABEL)
                                .strong()
                                .color(theme::TEXT_MUTED),
                        )
                        .selectable(false),
                    );
                };

                header.col(|ui| {
                    if let Some(col) = sort_header(ui, "NAME", SortColumn::Name) {
                        clicked_sort = Some(col);
                    }
                });
                header.col(|ui| plain_header(ui, "PROTOCOL"));
                if self.show_path {
                    header.col(|ui| plain_header(ui, "PATH"));
                }
                if self.show_format {
                    header.col(|ui| plain_header(ui, "FORMAT"));
                }
                if self.show_tags {
                    header.col(|ui| plain_header(ui, "TAGS"));
                }
                header.col(|ui| {
                    if let Some(col) = sort_header(ui, "LAST SYNC", SortColumn::LastSync) {
                        clicked_sort = Some(col);
                    }
                });
                header.col(|ui| plain_header(ui, ""));
            })
            .body(|mut body| {
                for &idx in &rows {
                    let source = &self.sources[idx];
                    let syncing = self.is_syncing(&source.id);
                    let text_color = if source.enabled {
                        theme::TEXT_SECONDARY
                    } else {
                        theme::TEXT_DIM
                    };

                    body.row(theme::ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(
                                egui::RichText::new(&source.name)
                                    .size(theme::FONT_BODY)
                                    .color(text_color),
                            );
                            if !source.enabled {
                                ui.label(
                                    egui::RichText::new("off")
                                        .size(theme::FONT_SMALL)
                                        .color(theme::TEXT_DIM),
                                );
                            }
                        });
                        row.col(|ui| {
                            ui.label(components::protocol_label(source.protocol));
                        });
                        if self.show_path {
                            row.col(|ui| {
                                ui.label(
                                    egui::RichText::new(&source.path)
                                        .size(theme::FONT_LABEL)
                                        .color(theme::TEXT_MUTED),
                                )
                                .on_hover_text(&source.path);
                            });
                        }
                        if self.show_format {
                            row.col(|ui| {
                                components::badge(
                                    ui,
                                    source.format.label(),
                                    theme::ACCENT_LIGHT,
                                    theme::BG_SURFACE,
                                );
                            });
                        }
                        if self.show_tags {
                            row.col(|ui| {
                                ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                                for tag in &source.tags {
                                    components::tag_badge(ui, tag);
                                }
                            });
                        }
                        row.col(|ui| {
                            ui.label(
                                egui::RichText::new(components::format_last_sync(
                                    source.last_updated,
                                ))
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_MUTED),
                            );
                        });
                        row.col(|ui| {
                            ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                            if syncing {
                                ui.add(egui::Spinner::new().size(14.0).color(theme::ACCENT));
                            } else if components::icon_button(
                                ui,
                                egui_phosphor::regular::ARROWS_CLOCKWISE,
                                "Sync now",
                            )
                            .clicked()
                            {
                                action = Some(RowAction::Sync(idx));
                            }
                            if components::icon_button(
                                ui,
                                egui_phosphor::regular::PENCIL_SIMPLE,
                                "Edit",
                            )
                            .clicked()
                            {
                                action = Some(RowAction::Edit(idx));
                            }
                            if components::icon_button(ui, egui_phosphor::regular::TRASH, "Delete")
                                .clicked()
                            {
                                action = Some(RowAction::Delete(idx));
                            }
                        });

                        row.response().context_menu(|ui| {
                            ui.spacing_mut().item_spacing.y = 2.0;
                            theme::set_menu_width(ui, &["Show cached file", "Open target"]);
                            if theme::menu_item(
                                ui,
                                egui_phosphor::regular::ARROW_SQUARE_OUT,
                                "Open target",
                            ) {
                                action = Some(RowAction::OpenTarget(idx));
                                ui.close_menu();
                            }
                            if theme::menu_item(
                                ui,
                                egui_phosphor::regular::FILE_TEXT,
                                "Show cached file",
                            ) {
                                action = Some(RowAction::ShowCache(idx));
                                ui.close_menu();
                            }
                        });
                    });
                }
            });

        if let Some(column) = clicked_sort {
            self.toggle_sort(column);
        }
        match action {
            Some(RowAction::Sync(idx)) => self.start_sync(idx, ctx),
            Some(RowAction::Edit(idx)) => self.open_edit_form(idx),
            Some(RowAction::Delete(idx)) => self.delete_source(idx),
            Some(RowAction::OpenTarget(idx)) => self.open_target(idx),
            Some(RowAction::ShowCache(idx)) => self.show_cache_file(idx),
            None => {}
        }
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            let total = self.filtered_indices.len();
            let label = if total == 1 {
                "1 source".to_string()
            } else {
                format!("{} sources", total)
            };
            ui.label(
                egui::RichText::new(label)
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Column visibility menu
                ui.menu_button(
                    egui::RichText::new(egui_phosphor::regular::COLUMNS).size(14.0),
                    |ui| {
                        ui.set_min_width(120.0);
                        let mut changed = false;
                        if theme::settings_checkbox(ui, self.show_path, "Path", true) {
                            self.show_path = !self.show_path;
                            changed = true;
                        }
                        if theme::settings_checkbox(ui, self.show_format, "Format", true) {
                            self.show_format = !self.show_format;
                            changed = true;
                        }
                        if theme::settings_checkbox(ui, self.show_tags, "Tags", true) {
                            self.show_tags = !self.show_tags;
                            changed = true;
                        }
                        if changed {
                            self.save_settings();
                        }
                    },
                )
                .response
                .on_hover_text("Columns");

                ui.add_space(theme::SPACING_LG);

                // Pagination controls
                let pages = self.page_count();
                let at_start = self.page == 0;
                let at_end = self.page + 1 >= pages;

                let page_btn = |ui: &mut egui::Ui, icon: &str, enabled: bool| -> bool {
                    ui.add_enabled(
                        enabled,
                        egui::Button::new(egui::RichText::new(icon).size(13.0)).frame(false),
                    )
                    .clicked()
                };

                if page_btn(ui, egui_phosphor::regular::CARET_DOUBLE_RIGHT, !at_end) {
                    self.page = pages - 1;
                }
                if page_btn(ui, egui_phosphor::regular::CARET_RIGHT, !at_end) {
                    self.page += 1;
                }
                ui.label(
                    egui::RichText::new(format!("Page {} of {}", self.page + 1, pages))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                );
                if page_btn(ui, egui_phosphor::regular::CARET_LEFT, !at_start) {
                    self.page -= 1;
                }
                if page_btn(ui, egui_phosphor::regular::CARET_DOUBLE_LEFT, !at_start) {
                    self.page = 0;
                }
            });
        });
    }

    // ========================================================================
    // FORM MODAL
    // ========================================================================

    fn render_form_modal(&mut self, ctx: &egui::Context) {
        enum FormAction {
            None,
            Cancel,
            Confirm,
        }

        let Some(mut form) = self.form.take() else {
            return;
        };
        let mut form_action = FormAction::None;

        let modal_area = egui::Modal::default_area(egui::Id::new("source_form_modal"))
            .default_width(380.0 + theme::SPACING_XL * 2.0);
        let modal = egui::Modal::new(egui::Id::new("source_form_modal"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_min_width(380.0);
            ui.set_max_width(380.0);

            ui.label(
                egui::RichText::new(form.title())
                    .size(theme::FONT_TITLE)
                    .strong(),
            );
            ui.add_space(theme::SPACING_LG);

            Self::field_label(ui, "Name");
            ui.add(
                egui::TextEdit::singleline(&mut form.name)
                    .hint_text("My prompt source")
                    .desired_width(f32::INFINITY),
            );
            Self::field_error(ui, form.errors.name);

            ui.add_space(theme::SPACING_MD);
            Self::field_label(ui, "Protocol");
            egui::ComboBox::from_id_salt("form_protocol")
                .selected_text(form.protocol.label())
                .width(120.0)
                .show_ui(ui, |ui| {
                    for protocol in Protocol::ALL {
                        ui.selectable_value(&mut form.protocol, protocol, protocol.label());
                    }
                });

            ui.add_space(theme::SPACING_MD);
            Self::field_label(ui, "Path");
            ui.horizontal(|ui| {
                let hint = if form.protocol.is_remote() {
                    "host/path/to/prompts.json (no scheme)"
                } else {
                    "path/to/prompts.csv"
                };
                let width = if form.protocol.is_remote() {
                    ui.available_width()
                } else {
                    ui.available_width() - 82.0
                };
                ui.add(
                    egui::TextEdit::singleline(&mut form.path)
                        .hint_text(hint)
                        .desired_width(width),
                );
                if !form.protocol.is_remote() {
                    let browse = ui.add(theme::button(format!(
                        "{} Browse",
                        egui_phosphor::regular::FOLDER_OPEN
                    )));
                    if browse.clicked() {
                        if let Some(picked) = rfd::FileDialog::new()
                            .add_filter("Prompt files", &["json", "csv"])
                            .pick_file()
                        {
                            form.path = picked.to_string_lossy().into_owned();
                            if let Some(ext) = picked.extension().and_then(|e| e.to_str()) {
                                if ext.eq_ignore_ascii_case("csv") {
                                    form.format = PayloadFormat::Csv;
                                } else if ext.eq_ignore_ascii_case("json") {
                                    form.format = PayloadFormat::Json;
                                }
                            }
                        }
                    }
                }
            });
            Self::field_error(ui, form.errors.path);

            ui.add_space(theme::SPACING_MD);
            Self::field_label(ui, "Format");
            egui::ComboBox::from_id_salt("form_format")
                .selected_text(form.format.label())
                .width(120.0)
                .show_ui(ui, |ui| {
                    for format in PayloadFormat::ALL {
                        ui.selectable_value(&mut form.format, format, format.label());
                    }
                });

            ui.add_space(theme::SPACING_MD);
            Self::field_label(ui, "Tags");
            ui.add(
                egui::TextEdit::singleline(&mut form.tags)
                    .hint_text("comma, separated, tags")
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(theme::SPACING_MD);
            if theme::settings_checkbox(ui, form.enabled, "Enabled", true) {
                form.enabled = !form.enabled;
            }

            ui.add_space(theme::SPACING_XL);
            ui.horizontal(|ui| {
                ui.set_min_height(28.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let save = ui.add(theme::button_accent(format!(
                        "{}  Save",
                        egui_phosphor::regular::CHECK
                    )));
                    if save.clicked() {
                        form_action = FormAction::Confirm;
                    }
                    ui.add_space(theme::SPACING_SM);
                    let cancel =
                        ui.add(theme::button(format!("{}  Cancel", egui_phosphor::regular::X)));
                    if cancel.clicked() {
                        form_action = FormAction::Cancel;
                    }
                });
            });
        });

        match form_action {
            FormAction::Confirm => {
                self.form = Some(form);
                self.confirm_form();
            }
            FormAction::Cancel => {}
            FormAction::None => {
                // Escape closes; a backdrop click keeps the modal open
                let backdrop_clicked = modal_response.backdrop_response.clicked();
                if !(modal_response.should_close() && !backdrop_clicked) {
                    self.form = Some(form);
                }
            }
        }
    }

    fn field_label(ui: &mut egui::Ui, text: &str) {
        ui.label(
            egui::RichText::new(text)
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        );
    }

    fn field_error(ui: &mut egui::Ui, error: Option<&'static str>) {
        if let Some(message) = error {
            ui.label(
                egui::RichText::new(message)
                    .size(theme::FONT_SMALL)
                    .color(theme::STATUS_ERROR),
            );
        }
    }

    // ========================================================================
    // ROW CONTEXT ACTIONS
    // ========================================================================

    fn open_target(&mut self, idx: usize) {
        let Some(source) = self.sources.get(idx) else {
            return;
        };
        let target = match utils::resolve_target(source, &self.data_dir) {
            utils::Target::Url(url) => url,
            utils::Target::File(path) => path.to_string_lossy().into_owned(),
        };
        if let Err(e) = open::that_detached(&target) {
            tracing::warn!(error = %e, target = %target, "Failed to open target");
        }
    }

    fn show_cache_file(&mut self, idx: usize) {
        let Some(source) = self.sources.get(idx) else {
            return;
        };
        let path = cache::entry_file(&self.data_dir, &source.id);
        if !path.exists() {
            self.show_toast("This source has not been synced yet", ToastKind::Error);
            return;
        }
        if let Err(e) = open::that_detached(&path) {
            tracing::warn!(error = %e, path = %path.display(), "Failed to open cache file");
        }
    }

    // ========================================================================
    // TOAST
    // ========================================================================

    /// Bottom-right of the central panel, 3s visible then fade, pause on hover
    fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(toast), Some(panel_rect)) = (&self.toast, self.central_panel_rect) else {
            return;
        };
        let visible_duration = 3.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 12.0;

        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);
        let elapsed = toast.start.elapsed().as_secs_f32();
        let alpha = if elapsed > visible_duration {
            (total_duration - elapsed) / fade_duration
        } else {
            1.0
        };
        let border = match toast.kind {
            ToastKind::Success => theme::STATUS_SUCCESS,
            ToastKind::Error => theme::STATUS_ERROR,
        };
        let message = toast.message.clone();

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(
                        0x1a,
                        0x1a,
                        0x1e,
                        (230.0 * alpha) as u8,
                    ))
                    .stroke(egui::Stroke::new(
                        1.0,
                        egui::Color32::from_rgba_unmultiplied(
                            border.r(),
                            border.g(),
                            border.b(),
                            (100.0 * alpha) as u8,
                        ),
                    ))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(message).color(
                            egui::Color32::from_rgba_unmultiplied(
                                255,
                                255,
                                255,
                                (255.0 * alpha) as u8,
                            ),
                        ));
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            if let Some(toast) = &mut self.toast {
                toast.start = std::time::Instant::now();
            }
        }

        let elapsed = self
            .toast
            .as_ref()
            .map(|t| t.start.elapsed().as_secs_f32())
            .unwrap_or(0.0);
        if elapsed >= total_duration {
            self.toast = None;
        } else {
            ctx.request_repaint();
        }
    }
}

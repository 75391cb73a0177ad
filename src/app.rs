use egui::Sense;

use crate::command::Command;
use crate::input::InputHandler;
use crate::placement::Nudge;
use crate::settings::Settings;
use crate::texture_manager::{TextureManager, TextureSlot};
use crate::workspace::Workspace;

pub const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

pub struct PrinterApp {
    workspace: Workspace,
    input: InputHandler,
    textures: TextureManager,
}

impl PrinterApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::load(cc.storage);
        log::info!("Starting with settings: {:?}", settings);

        let mut workspace = Workspace::new(settings);
        workspace
            .dispatcher_mut()
            .set_repaint_context(cc.egui_ctx.clone());

        Self {
            workspace,
            input: InputHandler::new(),
            textures: TextureManager::new(),
        }
    }

    fn controls(&mut self, ctx: &egui::Context) -> Vec<Command> {
        let mut commands = Vec::new();
        let modal = self.workspace.preview().is_open();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_enabled_ui(!modal, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Print Preview").clicked() {
                        commands.push(Command::OpenPrintPreview);
                    }
                    if ui.button("Clear Drawing").clicked() {
                        commands.push(Command::ClearDrawing);
                    }
                    ui.separator();
                    for nudge in Nudge::ALL {
                        if ui.button(nudge.label()).clicked() {
                            commands.push(Command::Nudge(nudge));
                        }
                    }
                });
            });

            ui.horizontal(|ui| {
                let offset = self.workspace.placement().offset();
                ui.label(format!("Print offset: ({}, {})", offset.x, offset.y));
                ui.label(format!("({})", self.workspace.surface().state().name()));
                if let Some(status) = self.workspace.status() {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        commands
    }

    fn drawing_area(&mut self, ctx: &egui::Context) {
        let modal = self.workspace.preview().is_open();

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
            let rect = response.rect;
            self.workspace
                .set_surface_size([rect.width() as u32, rect.height() as u32]);

            if !modal {
                let events = self.input.process_input(ctx, rect);
                if self.workspace.handle_input(&events) {
                    ctx.request_repaint();
                }
            }

            let texture = self.workspace.surface().raster().map(|raster| {
                self.textures
                    .get_or_update(ctx, TextureSlot::Canvas, raster.version(), || {
                        raster.to_color_image()
                    })
            });
            self.workspace.surface().paint(&painter.with_clip_rect(rect), rect, texture);
        });
    }
}

impl eframe::App for PrinterApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.workspace.settings().save(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.workspace.process_pending() {
            ctx.request_repaint();
        }

        for command in self.controls(ctx) {
            if self.workspace.execute(command) {
                ctx.request_repaint();
            }
        }

        self.drawing_area(ctx);

        if let Some(command) = self.workspace.show_preview(ctx, &mut self.textures) {
            self.workspace.execute(command);
            ctx.request_repaint();
        }
    }
}

use crate::command::Command;
use crate::dispatch::Dispatcher;
use crate::input::InputEvent;
use crate::placement::Placement;
use crate::print::{PreviewAction, PrintDocument, PrintJob, PrintPreview, save_png};
use crate::settings::Settings;
use crate::surface::DrawingSurface;
use crate::texture_manager::TextureManager;

/// All mutable state of the window, owned by the UI thread.
#[derive(Debug)]
pub struct Workspace {
    settings: Settings,
    surface: DrawingSurface,
    placement: Placement,
    preview: PrintPreview,
    dispatcher: Dispatcher<Command>,
    surface_size: [u32; 2],
    status: Option<String>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Workspace {
    pub fn new(settings: Settings) -> Self {
        Self {
            surface: DrawingSurface::new(settings.pen),
            placement: Placement::new(settings.initial_offset, settings.nudge_step),
            preview: PrintPreview::default(),
            dispatcher: Dispatcher::new(),
            surface_size: [0, 0],
            status: None,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn preview(&self) -> &PrintPreview {
        &self.preview
    }

    /// Draw the preview window (if open) for the current document.
    pub fn show_preview(
        &mut self,
        ctx: &egui::Context,
        textures: &mut TextureManager,
    ) -> Option<Command> {
        let document = PrintDocument::new(self.surface.raster(), self.placement.offset());
        let action = self.preview.show(ctx, &document, self.settings.page, textures)?;
        Some(match action {
            PreviewAction::Print => Command::Print,
            PreviewAction::SavePng => Command::SavePng,
            PreviewAction::Close => Command::ClosePrintPreview,
        })
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<Command> {
        &mut self.dispatcher
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn document(&self) -> PrintDocument<'_> {
        PrintDocument::new(self.surface.raster(), self.placement.offset())
    }

    /// Record the panel size; allocates the first canvas if needed.
    pub fn set_surface_size(&mut self, size: [u32; 2]) {
        self.surface_size = size;
        if size[0] > 0 && size[1] > 0 {
            if let Err(err) = self.surface.ensure_raster(size) {
                log::error!("Failed to allocate canvas: {}", err);
            }
        }
    }

    /// Feed pointer events to the surface. Returns true if a repaint is needed.
    pub fn handle_input(&mut self, events: &[InputEvent]) -> bool {
        let mut repaint = false;
        for event in events {
            match *event {
                InputEvent::PointerDown { position, button } => {
                    self.surface.pointer_down(position, button);
                }
                InputEvent::PointerMove { position } => {
                    repaint |= self.surface.pointer_move(position);
                }
                InputEvent::PointerUp { position, .. } => {
                    repaint |= self.surface.pointer_up(position);
                }
            }
        }
        repaint
    }

    /// Run everything posted to the dispatcher since the last frame.
    pub fn process_pending(&mut self) -> bool {
        let mut repaint = false;
        for command in self.dispatcher.drain() {
            repaint |= self.execute(command);
        }
        repaint
    }

    /// Execute a command. Returns true if a repaint is needed.
    pub fn execute(&mut self, command: Command) -> bool {
        log::debug!("Executing {}", command.name());
        match command {
            Command::OpenPrintPreview => {
                self.dispatcher.post(Command::ShowPrintPreview);
                false
            }
            Command::ShowPrintPreview => {
                self.preview.open();
                true
            }
            Command::ClosePrintPreview => {
                self.preview.close();
                true
            }
            Command::ClearDrawing => {
                match self.surface.clear(self.surface_size) {
                    Ok(()) => {
                        if self.settings.preview_on_clear {
                            self.dispatcher.post(Command::ShowPrintPreview);
                        }
                    }
                    Err(err) => log::warn!("Ignoring clear: {}", err),
                }
                true
            }
            Command::Nudge(nudge) => {
                self.placement.nudge(nudge);
                true
            }
            Command::Print => {
                let page = self.document().render(self.settings.page);
                let job = PrintJob::new(self.settings.print_command.clone(), page.into_pixels());
                let handle = self.dispatcher.handle();
                self.status = Some(format!("Sending job {} to the printer…", job.id()));
                job.spawn(move |result| handle.post(Command::PrintFinished(result)));
                true
            }
            Command::SavePng => {
                let page = self.document().render(self.settings.page);
                let path = self.settings.export_path.clone();
                self.status = Some(match save_png(page.pixels(), &path) {
                    Ok(()) => format!("Saved page to {}", path.display()),
                    Err(err) => {
                        log::error!("Failed to save page: {}", err);
                        format!("Save failed: {}", err)
                    }
                });
                true
            }
            Command::PrintFinished(result) => {
                self.status = Some(match result {
                    Ok(receipt) => {
                        log::info!("Print job {} accepted", receipt.id);
                        if receipt.message.is_empty() {
                            format!("Job {} sent to printer", receipt.id)
                        } else {
                            receipt.message
                        }
                    }
                    Err(err) => {
                        log::error!("Print failed: {}", err);
                        format!("Print failed: {}", err)
                    }
                });
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrintError;

    #[test]
    fn test_open_preview_is_marshalled_to_next_drain() {
        let mut workspace = Workspace::default();
        workspace.execute(Command::OpenPrintPreview);
        assert!(!workspace.preview().is_open());

        workspace.process_pending();
        assert!(workspace.preview().is_open());
    }

    #[test]
    fn test_zero_size_clear_is_ignored() {
        let mut workspace = Workspace::default();
        workspace.execute(Command::ClearDrawing);
        workspace.process_pending();
        assert!(workspace.surface().raster().is_none());
        assert!(!workspace.preview().is_open());
    }

    #[test]
    fn test_print_failure_is_reported_in_status() {
        let mut workspace = Workspace::default();
        workspace.execute(Command::PrintFinished(Err(PrintError::EmptyPage)));
        assert!(workspace.status().unwrap().starts_with("Print failed"));
    }
}

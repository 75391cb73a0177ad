use egui::{Align2, Context, Pos2, Vec2};

use super::{PageImage, PageSetup, PrintDocument};
use crate::texture_manager::{TextureManager, TextureSlot};

/// Buttons in the preview window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAction {
    Print,
    SavePng,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PreviewKey {
    raster_version: Option<u64>,
    offset: Pos2,
    page: PageSetup,
}

/// Modal print preview window
#[derive(Debug, Default)]
pub struct PrintPreview {
    open: bool,
    cached: Option<(PreviewKey, PageImage)>,
    /// Texture version for the cached page
    renders: u64,
}

impl PrintPreview {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        log::info!("Opening print preview");
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// The page as it will be printed, re-rendered only when the document
    /// or page changed.
    pub fn page(&mut self, document: &PrintDocument<'_>, setup: PageSetup) -> &PageImage {
        let key = PreviewKey {
            raster_version: document.raster().map(|r| r.version()),
            offset: document.offset(),
            page: setup,
        };

        if !matches!(&self.cached, Some((cached, _)) if *cached == key) {
            self.renders += 1;
            self.cached = None;
        }

        let (_, page) = self
            .cached
            .get_or_insert_with(|| (key, document.render(setup)));
        page
    }

    #[cfg(test)]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Show the window if open. Returns the button the user pressed.
    pub fn show(
        &mut self,
        ctx: &Context,
        document: &PrintDocument<'_>,
        setup: PageSetup,
        textures: &mut TextureManager,
    ) -> Option<PreviewAction> {
        if !self.open {
            return None;
        }

        self.page(document, setup);
        let texture = match &self.cached {
            Some((_, page)) => {
                textures.get_or_update(ctx, TextureSlot::PreviewPage, self.renders, || {
                    page.to_color_image()
                })
            }
            None => return None,
        };

        let mut action = None;
        let mut window_open = true;
        egui::Window::new("Print Preview")
            .open(&mut window_open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                let page_size = setup.size();
                let available = ctx.screen_rect().size() * 0.75;
                let scale = (available.x / page_size.x).min(available.y / page_size.y).min(1.0);

                ui.add(
                    egui::Image::new(egui::load::SizedTexture::new(texture, page_size * scale))
                        .bg_fill(egui::Color32::WHITE),
                );
                ui.label(format!(
                    "Offset ({}, {}) on a {}×{} page",
                    document.offset().x,
                    document.offset().y,
                    setup.width,
                    setup.height
                ));

                ui.horizontal(|ui| {
                    if ui.button("Print").clicked() {
                        action = Some(PreviewAction::Print);
                    }
                    if ui.button("Save PNG").clicked() {
                        action = Some(PreviewAction::SavePng);
                    }
                    if ui.button("Close").clicked() {
                        action = Some(PreviewAction::Close);
                    }
                });
            });

        if !window_open {
            action = Some(PreviewAction::Close);
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasRaster;

    #[test]
    fn test_page_is_cached_until_document_changes() {
        let mut preview = PrintPreview::default();
        let raster = CanvasRaster::blank(10, 10).unwrap();
        let setup = PageSetup { width: 40, height: 40 };

        let document = PrintDocument::new(Some(&raster), Pos2::new(5.0, 5.0));
        preview.page(&document, setup);
        preview.page(&document, setup);
        assert_eq!(preview.render_count(), 1);

        let moved = PrintDocument::new(Some(&raster), Pos2::new(15.0, 5.0));
        preview.page(&moved, setup);
        assert_eq!(preview.render_count(), 2);
    }

    #[test]
    fn test_open_close() {
        let mut preview = PrintPreview::default();
        assert!(!preview.is_open());
        preview.open();
        assert!(preview.is_open());
        preview.close();
        assert!(!preview.is_open());
    }
}

use std::collections::HashMap;
use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

/// GPU textures owned by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// The drawing surface raster
    Canvas,
    /// The rendered print page shown in the preview
    PreviewPage,
}

impl TextureSlot {
    fn name(self) -> &'static str {
        match self {
            Self::Canvas => "canvas",
            Self::PreviewPage => "preview_page",
        }
    }
}

/// Caches one texture per slot and re-uploads only when its version changes
#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<TextureSlot, (u64, TextureHandle)>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the texture for `slot`, regenerating it if `version` is newer
    /// than what was uploaded last.
    pub fn get_or_update<F>(
        &mut self,
        ctx: &Context,
        slot: TextureSlot,
        version: u64,
        generator: F,
    ) -> TextureId
    where
        F: FnOnce() -> ColorImage,
    {
        if let Some((cached_version, handle)) = self.textures.get_mut(&slot) {
            if *cached_version != version {
                handle.set(generator(), TextureOptions::NEAREST);
                *cached_version = version;
            }
            return handle.id();
        }

        let handle = ctx.load_texture(slot.name(), generator(), TextureOptions::NEAREST);
        let id = handle.id();
        self.textures.insert(slot, (version, handle));
        id
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.textures.len()
    }
}

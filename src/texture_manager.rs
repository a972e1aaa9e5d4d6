use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::element::Bitmap;

/// Uploads bitmaps to the GPU once and reuses the handle while the bitmap is drawn.
///
/// Entries are keyed by [`Bitmap::key`], so clones of one upload share a texture.
pub struct TextureManager {
    texture_cache: HashMap<usize, TextureHandle>,
    /// Frame in which each texture was last drawn
    last_used: HashMap<usize, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("textures", &self.texture_cache.len())
            .field("current_frame", &self.current_frame)
            .finish()
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new(64)
    }
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Should be called once at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Texture for `bitmap`, uploading it on first use
    pub fn texture_for(&mut self, bitmap: &Bitmap, ctx: &Context) -> TextureId {
        let key = bitmap.key();
        self.last_used.insert(key, self.current_frame);
        if let Some(handle) = self.texture_cache.get(&key) {
            return handle.id();
        }

        self.prune_cache_if_needed();

        let pixels = bitmap.pixels();
        let image = ColorImage::from_rgba_unmultiplied(
            [pixels.width() as usize, pixels.height() as usize],
            pixels.as_raw(),
        );
        let handle = ctx.load_texture(format!("bitmap_{key:x}"), image, TextureOptions::LINEAR);
        let id = handle.id();
        self.texture_cache.insert(key, handle);
        id
    }

    /// Drops the least recently drawn textures once the cache is full
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(usize, u64)> = self
            .texture_cache
            .keys()
            .map(|key| (*key, self.last_used.get(key).copied().unwrap_or(0)))
            .collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = self.texture_cache.len() + 1 - self.max_cache_size.max(1);
        for (key, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    /// Release every texture, e.g. after the scene was cleared
    pub fn clear_cache(&mut self) {
        self.texture_cache.clear();
        self.last_used.clear();
    }

    #[cfg(test)]
    fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn contains(&self, bitmap: &Bitmap) -> bool {
        self.texture_cache.contains_key(&bitmap.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn bitmap() -> Bitmap {
        Bitmap::new(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn clones_share_one_texture() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let original = bitmap();
        let first = manager.texture_for(&original, &ctx);
        let second = manager.texture_for(&original.clone(), &ctx);
        assert_eq!(first, second);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn least_recently_drawn_is_evicted() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let (a, b, c) = (bitmap(), bitmap(), bitmap());

        manager.texture_for(&a, &ctx);
        manager.begin_frame();
        manager.texture_for(&b, &ctx);
        manager.begin_frame();
        manager.texture_for(&c, &ctx);

        assert_eq!(manager.cache_size(), 2);
        assert!(!manager.contains(&a));
        assert!(manager.contains(&b));
        assert!(manager.contains(&c));
    }

    #[test]
    fn clearing_empties_the_cache() {
        let ctx = Context::default();
        let mut manager = TextureManager::default();
        manager.texture_for(&bitmap(), &ctx);
        manager.clear_cache();
        assert_eq!(manager.cache_size(), 0);
    }
}

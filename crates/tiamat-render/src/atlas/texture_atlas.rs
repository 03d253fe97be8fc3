use std::collections::HashMap;

use crate::coords::Rect;
use crate::device::{TextureId, TextureRegistry};

/// Pixel-space corners of a sprite inside its sheet, min edges inclusive,
/// max edges exclusive.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PixelRegion {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl PixelRegion {
    #[inline]
    pub const fn new(x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }
}

/// Name-addressed UV regions over one backing texture.
///
/// Index 0 always holds a zero-size fallback region; failed lookups return
/// it with a logged warning, so a misspelled sprite name renders nothing
/// instead of failing the frame.
pub struct TextureAtlas {
    texture: TextureId,
    regions: Vec<Rect>,
    names: HashMap<String, usize>,
}

impl TextureAtlas {
    /// Normalizes `regions` by the backing texture's dimensions, keeping
    /// input order (the first named region lands at index 1).
    ///
    /// When `texture` is not in the registry there is nothing to normalize
    /// by; the atlas degrades to the fallback region only, with an error
    /// logged here rather than on every lookup.
    pub fn create(
        textures: &TextureRegistry,
        texture: TextureId,
        regions: &[(&str, PixelRegion)],
    ) -> Self {
        let mut atlas =
            Self { texture, regions: vec![Rect::default()], names: HashMap::new() };

        let Some((width, height)) = textures.dimensions(texture) else {
            log::error!(
                "TextureAtlas: backing texture not in the registry; every lookup will return the fallback region"
            );
            return atlas;
        };
        let (width, height) = (width as f32, height as f32);

        for (name, region) in regions {
            let rect = Rect::new(
                region.x_min as f32 / width,
                region.y_min as f32 / height,
                (region.x_max as f32 - region.x_min as f32) / width,
                (region.y_max as f32 - region.y_min as f32) / height,
            );
            atlas.names.insert((*name).to_string(), atlas.regions.len());
            atlas.regions.push(rect);
        }
        atlas
    }

    /// UV region for `name`, or the fallback (with a warning) when the
    /// name is unknown.
    #[must_use]
    pub fn get_sub_texture(&self, name: &str) -> Rect {
        match self.names.get(name) {
            Some(&index) => self.regions[index],
            None => {
                log::warn!(
                    "TextureAtlas: unknown sub-texture {name:?}; returning the fallback region"
                );
                self.regions[0]
            }
        }
    }

    /// UV region by index. Index 0 is the fallback itself; anything past
    /// the end warns and falls back.
    #[must_use]
    pub fn get_sub_texture_by_index(&self, index: u32) -> Rect {
        match self.regions.get(index as usize) {
            Some(&rect) => rect,
            None => {
                log::warn!(
                    "TextureAtlas: sub-texture index {index} out of range; returning the fallback region"
                );
                self.regions[0]
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Number of regions, the fallback at index 0 included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when no named regions were registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.len() <= 1
    }
}

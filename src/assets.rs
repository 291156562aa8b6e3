//! Owned asset bundle
//!
//! Built once at startup from the configured paths and handed to the
//! rendering and audio collaborators by reference. Missing files are logged
//! and left out; nothing here can stop the game from running.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;

/// Sprite slots the renderer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Player,
    AsteroidBrown,
    AsteroidGrey,
    Ufo,
}

/// File locations for every asset, as configured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub player_texture: PathBuf,
    pub asteroid_brown_texture: PathBuf,
    pub asteroid_grey_texture: PathBuf,
    pub ufo_texture: PathBuf,
    pub shoot_sound: PathBuf,
    pub explosion_sound: PathBuf,
    pub background_music: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            player_texture: "assets/playerShip3_green.png".into(),
            asteroid_brown_texture: "assets/meteorBrown_big4.png".into(),
            asteroid_grey_texture: "assets/meteorGrey_big4.png".into(),
            ufo_texture: "assets/ufoYellow.png".into(),
            shoot_sound: "assets/shoot.mp3".into(),
            explosion_sound: "assets/explosion.mp3".into(),
            background_music: "assets/music.mp3".into(),
        }
    }
}

/// Assets that were found on disk
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    textures: HashMap<TextureId, PathBuf>,
    sounds: HashMap<SoundEffect, PathBuf>,
    music: Option<PathBuf>,
}

impl AssetBundle {
    /// Probe every configured path and keep the ones that exist
    pub fn load(paths: &AssetPaths) -> Self {
        let mut bundle = Self::default();

        let textures = [
            (TextureId::Player, &paths.player_texture),
            (TextureId::AsteroidBrown, &paths.asteroid_brown_texture),
            (TextureId::AsteroidGrey, &paths.asteroid_grey_texture),
            (TextureId::Ufo, &paths.ufo_texture),
        ];
        for (id, path) in textures {
            if let Some(path) = probe("texture", path) {
                bundle.textures.insert(id, path);
            }
        }

        let sounds = [
            (SoundEffect::Shoot, &paths.shoot_sound),
            (SoundEffect::Explosion, &paths.explosion_sound),
        ];
        for (effect, path) in sounds {
            if let Some(path) = probe("sound", path) {
                bundle.sounds.insert(effect, path);
            }
        }

        bundle.music = probe("music", &paths.background_music);

        log::info!(
            "Assets ready: {} textures, {} sounds, music {}",
            bundle.textures.len(),
            bundle.sounds.len(),
            if bundle.music.is_some() { "on" } else { "off" }
        );
        bundle
    }

    pub fn texture(&self, id: TextureId) -> Option<&Path> {
        self.textures.get(&id).map(PathBuf::as_path)
    }

    pub fn sound(&self, effect: SoundEffect) -> Option<&Path> {
        self.sounds.get(&effect).map(PathBuf::as_path)
    }

    pub fn music(&self) -> Option<&Path> {
        self.music.as_deref()
    }

    /// Texture for an asteroid sprite variant, falling back to whichever
    /// rock texture is available
    pub fn asteroid_texture(&self, variant: u8) -> Option<TextureId> {
        let preferred = if variant % 2 == 0 {
            [TextureId::AsteroidBrown, TextureId::AsteroidGrey]
        } else {
            [TextureId::AsteroidGrey, TextureId::AsteroidBrown]
        };
        preferred.into_iter().find(|id| self.textures.contains_key(id))
    }
}

fn probe(kind: &str, path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        log::info!("Loaded {kind}: {}", path.display());
        Some(path.to_path_buf())
    } else {
        log::warn!("{kind} not found: {}", path.display());
        None
    }
}

//! Asset resolution.
//!
//! Images and sounds are opaque handles looked up by string key. The
//! catalog only answers "loaded or missing"; whether a missing asset is
//! fatal or replaced by a placeholder is decided per asset class by
//! [`GameAssets::load`] and the HUD.

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::error::AssetError;
use crate::host::Audio;

pub const PLACEHOLDER_KEY: &str = "placeholder";

#[derive(Clone, Debug, PartialEq)]
pub struct ImageHandle {
    pub key: String,
    pub width: f32,
    pub height: f32,
}

impl ImageHandle {
    pub fn placeholder(width: f32, height: f32) -> Self {
        ImageHandle {
            key: PLACEHOLDER_KEY.to_string(),
            width,
            height,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.key == PLACEHOLDER_KEY
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundHandle {
    pub key: String,
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    images: HashMap<String, (f32, f32)>,
    sounds: HashSet<String>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every asset the game ships with.
    pub fn builtin() -> Self {
        let mut catalog = AssetCatalog::new();
        catalog
            .register_image("player", 40.0, 60.0)
            .register_image("enemy", 40.0, 40.0)
            .register_image("boss_enemy", 80.0, 80.0)
            .register_image("sword", 30.0, 10.0)
            .register_image("health_collectible", 24.0, 24.0)
            .register_image("life_collectible", 24.0, 24.0)
            .register_image("icons/left_arrow", 24.0, 24.0)
            .register_image("icons/right_arrow", 24.0, 24.0)
            .register_image("icons/up_arrow", 24.0, 24.0)
            .register_image("icons/space_bar", 24.0, 24.0);
        for sound in [
            "jump",
            "shoot",
            "player_hurt",
            "enemy_hit",
            "game_over",
            "background_music",
        ] {
            catalog.register_sound(sound);
        }
        catalog
    }

    pub fn register_image(&mut self, key: &str, width: f32, height: f32) -> &mut Self {
        self.images.insert(key.to_string(), (width, height));
        self
    }

    pub fn register_sound(&mut self, key: &str) -> &mut Self {
        self.sounds.insert(key.to_string());
        self
    }

    pub fn image(&self, key: &str) -> Result<ImageHandle, AssetError> {
        self.images
            .get(key)
            .map(|&(width, height)| ImageHandle {
                key: key.to_string(),
                width,
                height,
            })
            .ok_or_else(|| AssetError::MissingImage(key.to_string()))
    }

    pub fn sound(&self, key: &str) -> Result<SoundHandle, AssetError> {
        if self.sounds.contains(key) {
            Ok(SoundHandle {
                key: key.to_string(),
            })
        } else {
            Err(AssetError::MissingSound(key.to_string()))
        }
    }

    /// Resolves a decorative image, substituting a placeholder of the given
    /// size when it is missing.
    pub fn image_or_placeholder(&self, key: &str, width: f32, height: f32) -> ImageHandle {
        self.image(key).unwrap_or_else(|err| {
            warn!("{}, using placeholder", err);
            ImageHandle::placeholder(width, height)
        })
    }

    /// Resolves a sound, degrading to silence when it is missing.
    pub fn sound_or_silence(&self, key: &str) -> Option<SoundHandle> {
        match self.sound(key) {
            Ok(sound) => Some(sound),
            Err(err) => {
                warn!("{}, playing nothing instead", err);
                None
            }
        }
    }
}

// ── Resolved game assets ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Sounds {
    pub jump: Option<SoundHandle>,
    pub shoot: Option<SoundHandle>,
    pub player_hurt: Option<SoundHandle>,
    pub enemy_hit: Option<SoundHandle>,
    pub game_over: Option<SoundHandle>,
    pub music: Option<SoundHandle>,
}

/// Every handle the simulation needs, resolved once at startup.
#[derive(Clone, Debug)]
pub struct GameAssets {
    pub player: ImageHandle,
    pub enemy: ImageHandle,
    pub boss: ImageHandle,
    pub projectile: ImageHandle,
    pub health_collectible: ImageHandle,
    pub life_collectible: ImageHandle,
    pub sounds: Sounds,
}

impl GameAssets {
    /// Core sprites (player, enemy, boss) are required; everything else
    /// falls back to a placeholder or silence.
    pub fn load(catalog: &AssetCatalog) -> Result<Self, AssetError> {
        Ok(GameAssets {
            player: catalog.image("player")?,
            enemy: catalog.image("enemy")?,
            boss: catalog.image("boss_enemy")?,
            projectile: catalog.image_or_placeholder("sword", 30.0, 10.0),
            health_collectible: catalog.image_or_placeholder("health_collectible", 24.0, 24.0),
            life_collectible: catalog.image_or_placeholder("life_collectible", 24.0, 24.0),
            sounds: Sounds {
                jump: catalog.sound_or_silence("jump"),
                shoot: catalog.sound_or_silence("shoot"),
                player_hurt: catalog.sound_or_silence("player_hurt"),
                enemy_hit: catalog.sound_or_silence("enemy_hit"),
                game_over: catalog.sound_or_silence("game_over"),
                music: catalog.sound_or_silence("background_music"),
            },
        })
    }
}

/// Plays `sound` if it resolved.
pub fn play(audio: &mut dyn Audio, sound: &Option<SoundHandle>) {
    if let Some(sound) = sound {
        audio.play_sound(sound);
    }
}

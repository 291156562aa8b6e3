//! Audio triggers
//!
//! The game doesn't decode or mix audio itself. [`AudioManager`] turns
//! simulation events into play requests for an [`AudioBackend`], and quietly
//! skips anything whose asset is missing.

use std::path::Path;

use crate::assets::AssetBundle;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Asteroid or enemy destroyed
    Explosion,
}

/// Whatever actually makes noise
pub trait AudioBackend {
    fn play_sound(&mut self, path: &Path, volume: f32);
    fn start_music(&mut self, path: &Path, volume: f32);
    /// Feed the music stream; called once per frame
    fn update_music(&mut self) {}
}

/// Backend that discards everything (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play_sound(&mut self, path: &Path, volume: f32) {
        log::trace!("(muted) sound {} at {volume:.2}", path.display());
    }

    fn start_music(&mut self, path: &Path, volume: f32) {
        log::trace!("(muted) music {} at {volume:.2}", path.display());
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    assets: AssetBundle,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_started: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, assets: AssetBundle, settings: &Settings) -> Self {
        Self {
            backend,
            assets,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            music_started: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn assets(&self) -> &AssetBundle {
        &self.assets
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        let Some(path) = self.assets.sound(effect) else {
            return;
        };
        self.backend.play_sound(path, vol);
    }

    /// Start the background loop once; later calls just feed the stream
    pub fn update_music(&mut self) {
        if !self.music_started {
            self.music_started = true;
            let vol = self.effective_volume(self.music_volume);
            if let Some(path) = self.assets.music() {
                self.backend.start_music(path, vol);
            }
            return;
        }
        self.backend.update_music();
    }

    /// React to the events of the last tick
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ShotFired => self.play(SoundEffect::Shoot),
                GameEvent::AsteroidDestroyed { .. } | GameEvent::EnemyDestroyed => {
                    self.play(SoundEffect::Explosion)
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetPaths;
    use crate::sim::AsteroidSize;
    use std::fs;
    use std::path::PathBuf;

    #[derive(Default)]
    struct Recorder {
        sounds: Vec<(PathBuf, f32)>,
        music: Vec<PathBuf>,
        music_updates: u32,
    }

    impl AudioBackend for Recorder {
        fn play_sound(&mut self, path: &Path, volume: f32) {
            self.sounds.push((path.to_path_buf(), volume));
        }

        fn start_music(&mut self, path: &Path, _volume: f32) {
            self.music.push(path.to_path_buf());
        }

        fn update_music(&mut self) {
            self.music_updates += 1;
        }
    }

    fn bundle_with_shoot(dir: &Path) -> (AssetBundle, PathBuf) {
        let paths = AssetPaths {
            shoot_sound: dir.join("shoot.mp3"),
            background_music: dir.join("music.mp3"),
            ..AssetPaths::default()
        };
        fs::write(&paths.shoot_sound, b"mp3").unwrap();
        fs::write(&paths.background_music, b"mp3").unwrap();
        (AssetBundle::load(&paths), paths.shoot_sound)
    }

    #[test]
    fn test_shot_plays_sound() {
        let dir = tempfile::tempdir().unwrap();
        let (bundle, shoot) = bundle_with_shoot(dir.path());
        let mut audio = AudioManager::new(Recorder::default(), bundle, &Settings::default());

        audio.handle_events(&[GameEvent::ShotFired, GameEvent::SessionStarted]);

        assert_eq!(audio.backend().sounds.len(), 1);
        assert_eq!(audio.backend().sounds[0].0, shoot);
    }

    #[test]
    fn test_missing_sound_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let (bundle, _) = bundle_with_shoot(dir.path());
        let mut audio = AudioManager::new(Recorder::default(), bundle, &Settings::default());

        audio.handle_events(&[GameEvent::AsteroidDestroyed {
            size: AsteroidSize::Large,
        }]);

        assert!(audio.backend().sounds.is_empty());
    }

    #[test]
    fn test_muted_plays_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (bundle, _) = bundle_with_shoot(dir.path());
        let mut audio = AudioManager::new(Recorder::default(), bundle, &Settings::default());
        audio.set_muted(true);
        audio.handle_events(&[GameEvent::ShotFired]);
        assert!(audio.backend().sounds.is_empty());
    }

    #[test]
    fn test_music_starts_once_then_streams() {
        let dir = tempfile::tempdir().unwrap();
        let (bundle, _) = bundle_with_shoot(dir.path());
        let mut audio = AudioManager::new(Recorder::default(), bundle, &Settings::default());
        for _ in 0..3 {
            audio.update_music();
        }
        assert_eq!(audio.backend().music.len(), 1);
        assert_eq!(audio.backend().music_updates, 2);
    }
}

//! Asset manifest
//!
//! Maps logical image keys to file paths. Character sets follow
//! `{base}/{base}_{action}_{frame}.png` with keys `{base}-{action}-{frame}`.
//! The loader itself lives outside the simulation; it only needs this list.

use serde::Serialize;

use crate::sprite::{frame_key, monster_frame_prefix};
use crate::tuning::{MONSTERS, MOB_BULLET, MonsterDef, PLAYER_BULLET, ProjectileDef};

/// One animation of a character sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Action name (idle, attack, hurt)
    pub action: &'static str,
    pub frame_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetEntry {
    pub key: String,
    pub path: String,
}

/// Ordered, de-duplicated key → path list
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetManifest {
    entries: Vec<AssetEntry>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the simulation's built-in definitions reference
    pub fn builtin() -> Self {
        let mut manifest = Self::new();
        manifest.add_projectile_frames(&PLAYER_BULLET, "player", "player_bullet");
        manifest.add_projectile_frames(&MOB_BULLET, "monster", "mob_bullet");
        for def in &MONSTERS {
            manifest.add_monster_frames(def);
        }
        manifest
    }

    /// Add a single entry; an already-registered key is left untouched
    pub fn add(&mut self, key: String, path: String) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.entries.push(AssetEntry { key, path });
        true
    }

    /// Character sheet frames: `{base}-{action}-{i}` → `{base}/{base}_{action}_{i}.png`
    pub fn add_animation_set(&mut self, base: &str, animations: &[AnimationConfig]) {
        for anim in animations {
            for i in 0..anim.frame_count {
                self.add(
                    format!("{base}-{}-{i}", anim.action),
                    format!("{base}/{base}_{}_{i}.png", anim.action),
                );
            }
        }
    }

    /// Projectile frames: `{key}-{i}` → `{dir}/{file_prefix}_{i}.png`
    pub fn add_projectile_frames(&mut self, def: &ProjectileDef, dir: &str, file_prefix: &str) {
        for i in 0..def.frame_count {
            self.add(
                frame_key(def.key, i),
                format!("{dir}/{file_prefix}_{i}.png"),
            );
        }
    }

    /// Monster frames: `mob-{kind}-{i}` → `monster/mob_{kind}_{i}.png`
    pub fn add_monster_frames(&mut self, def: &MonsterDef) {
        let prefix = monster_frame_prefix(def);
        for i in 0..def.frame_count {
            self.add(
                frame_key(&prefix, i),
                format!("monster/mob_{}_{i}.png", def.kind),
            );
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn path_of(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.path.as_str())
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/*
 *  widget/icon.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  Icon cache: reload only when the source identifier changes
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("cannot expand icon path {0:?}: home directory unavailable")]
    HomeUnavailable(String),
    #[error("failed to load icon: {0}")]
    Load(#[from] image::ImageError),
}

/// Two states, one transition: reload on identifier change.
enum IconState {
    NoIcon,
    Loaded { source: String, raster: DynamicImage },
}

/// Cache for the widget's optional icon raster.
///
/// The failure policy is deliberately asymmetric. [`IconCache::load_initial`]
/// runs once during widget construction: any failure propagates, the widget
/// is never created, and the identifier is not advanced. At runtime,
/// [`IconCache::ensure_loaded`] tolerates a bad source by substituting a
/// blank placeholder and advancing the identifier anyway, so a broken path
/// is not re-read from disk on every tick.
pub struct IconCache {
    side: u32,
    base_dir: PathBuf,
    state: IconState,
    loads: usize,
}

impl IconCache {
    /// `side` sizes the blank placeholder; `base_dir` anchors relative paths.
    pub fn new(side: u32, base_dir: PathBuf) -> Self {
        Self { side, base_dir, state: IconState::NoIcon, loads: 0 }
    }

    /// Construction-time load. Propagates failure; see type docs.
    pub fn load_initial(&mut self, source: &str) -> Result<(), IconError> {
        let raster = self.load_raster(source)?;
        self.state = IconState::Loaded { source: source.to_string(), raster };
        Ok(())
    }

    /// Runtime load: no I/O while `source` is unchanged, placeholder on
    /// failure. Callers gate on a non-empty source (empty means the icon
    /// feature is disabled).
    pub fn ensure_loaded(&mut self, source: &str) -> &DynamicImage {
        let stale = match &self.state {
            IconState::Loaded { source: last, .. } => last != source,
            IconState::NoIcon => true,
        };
        if stale {
            let raster = match self.load_raster(source) {
                Ok(raster) => {
                    info!("setting icon source to {:?}", source);
                    raster
                }
                Err(e) => {
                    warn!("icon load failed for {:?} ({}), using blank placeholder", source, e);
                    DynamicImage::new_rgba8(self.side, self.side)
                }
            };
            // identifier advances on both outcomes: a bad source is not
            // retried until the store hands out a different one
            self.state = IconState::Loaded { source: source.to_string(), raster };
        }
        match &self.state {
            IconState::Loaded { raster, .. } => raster,
            IconState::NoIcon => unreachable!("state was set above"),
        }
    }

    /// Number of load attempts performed (placeholders excluded).
    pub fn load_count(&self) -> usize {
        self.loads
    }

    fn load_raster(&mut self, source: &str) -> Result<DynamicImage, IconError> {
        self.loads += 1;
        let path = expand_path(&self.base_dir, source)?;
        Ok(image::open(path)?)
    }
}

/// Expand `~` and resolve relative paths against the base directory.
fn expand_path(base: &Path, raw: &str) -> Result<PathBuf, IconError> {
    if raw == "~" || raw.starts_with("~/") {
        let home =
            dirs_next::home_dir().ok_or_else(|| IconError::HomeUnavailable(raw.to_string()))?;
        return Ok(home.join(raw.trim_start_matches("~/")));
    }
    let path = Path::new(raw);
    if path.is_relative() {
        Ok(base.join(path))
    } else {
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Write a small PNG into a unique temp directory and return (dir, name).
    fn temp_icon(color: [u8; 4]) -> (PathBuf, String) {
        let dir = std::env::temp_dir().join(format!(
            "kvdeck-icon-test-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&dir).unwrap();
        let name = "icon.png".to_string();
        image::RgbaImage::from_pixel(4, 4, image::Rgba(color))
            .save(dir.join(&name))
            .unwrap();
        (dir, name)
    }

    #[test]
    fn test_unchanged_source_loads_at_most_once() {
        let (dir, name) = temp_icon([255, 0, 0, 255]);
        let mut cache = IconCache::new(16, dir);
        cache.ensure_loaded(&name);
        cache.ensure_loaded(&name);
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn test_changed_source_reloads_once() {
        let (dir, name) = temp_icon([255, 0, 0, 255]);
        image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]))
            .save(dir.join("other.png"))
            .unwrap();
        let mut cache = IconCache::new(16, dir);
        cache.ensure_loaded(&name);
        cache.ensure_loaded("other.png");
        cache.ensure_loaded("other.png");
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn test_runtime_failure_yields_canvas_sized_placeholder() {
        let (dir, _) = temp_icon([0; 4]);
        let mut cache = IconCache::new(24, dir);
        let raster = cache.ensure_loaded("no-such-file.png");
        assert_eq!(raster.width(), 24);
        assert_eq!(raster.height(), 24);
    }

    #[test]
    fn test_runtime_failure_advances_identifier() {
        let (dir, _) = temp_icon([0; 4]);
        let mut cache = IconCache::new(24, dir);
        cache.ensure_loaded("no-such-file.png");
        cache.ensure_loaded("no-such-file.png");
        // the bad source is remembered, not retried every tick
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn test_initial_load_failure_propagates_and_keeps_state() {
        let (dir, name) = temp_icon([255, 0, 0, 255]);
        let mut cache = IconCache::new(16, dir);
        assert!(cache.load_initial("no-such-file.png").is_err());
        // identifier was not advanced: the next good source still loads
        cache.ensure_loaded(&name);
        assert_eq!(cache.load_count(), 2);
        assert_eq!(cache.ensure_loaded(&name).width(), 4);
    }

    #[test]
    fn test_expand_path_resolves_relative_against_base() {
        let base = Path::new("/var/lib/deck");
        assert_eq!(
            expand_path(base, "icons/a.png").unwrap(),
            PathBuf::from("/var/lib/deck/icons/a.png")
        );
        assert_eq!(expand_path(base, "/abs/a.png").unwrap(), PathBuf::from("/abs/a.png"));
    }
}

//! Content directory scanning.
//!
//! Walks a content root and produces a [`Manifest`]: the hero slides, the
//! gallery categories and the gallery images in catalog order, plus the
//! resolved site configuration.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                     # Site configuration (optional)
//! ├── hero/                           # Hero slider, one slide per image
//! │   ├── 001-First-Light.jpg
//! │   ├── 001-First-Light.txt         # Slide caption (optional)
//! │   └── 002-Golden-Hour.jpg
//! └── gallery/
//!     ├── 010-Wedding/                # Category "wedding"
//!     │   ├── 001-First-Dance.jpg     # Label "First Dance"
//!     │   └── 002-Vows.jpg
//!     ├── 020-Portrait/
//!     │   └── 001-Bride.jpg
//!     └── 030-Engagement-Sessions/    # Category "engagement-sessions"
//!         └── 001-Park.jpg
//! ```
//!
//! ## Ordering
//!
//! Categories are ordered by their number prefix, images by theirs within a
//! category; unnumbered entries sort last, by name. The resulting image order
//! is the catalog order the gallery filter preserves.
//!
//! ## Validation
//!
//! - Images directly under `gallery/` (outside any category) are an error
//! - Two images in one category may not share a number
//! - Two category directories may not map to the same key
//! - A category may not map to `all` (the show-everything filter) or to an
//!   empty key
//!
//! Missing `hero/` or `gallery/` directories are not errors; the page simply
//! has no slides or no gallery.

use crate::config::{self, SiteConfig};
use crate::filter::ALL;
use crate::naming::{category_key, label_for_stem, parse_entry_name};
use crate::types::{ImageDescriptor, SlideDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Image outside any category directory: {0}")]
    Uncategorized(PathBuf),
    #[error("Duplicate image number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("Category key '{0}' is used by more than one directory")]
    DuplicateCategory(String),
    #[error("Category directory {0} maps to a reserved or empty filter key")]
    ReservedCategory(PathBuf),
}

/// Everything the renderer needs, as written to `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub slides: Vec<SlideDescriptor>,
    pub categories: Vec<Category>,
    /// Gallery images in catalog order
    pub images: Vec<ImageDescriptor>,
    pub config: SiteConfig,
}

/// A gallery category as shown on its filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Filter key (`engagement-sessions`)
    pub key: String,
    /// Control label (`Engagement Sessions`)
    pub label: String,
    /// Content directory, relative to the root
    pub path: String,
    pub count: usize,
}

pub const HERO_DIR: &str = "hero";
pub const GALLERY_DIR: &str = "gallery";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let slides = scan_hero(root)?;
    let (categories, images) = scan_gallery(root)?;
    let config = config::load_config(root)?;

    log::debug!(
        "scanned {}: {} slides, {} categories, {} images",
        root.display(),
        slides.len(),
        categories.len(),
        images.len()
    );

    Ok(Manifest {
        slides,
        categories,
        images,
        config,
    })
}

fn scan_hero(root: &Path) -> Result<Vec<SlideDescriptor>, ScanError> {
    let hero = root.join(HERO_DIR);
    if !hero.is_dir() {
        log::debug!("no {HERO_DIR}/ directory, page has no slides");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(&hero)? {
        let path = entry?.path();
        if is_image(&path) && !is_hidden(&path) {
            files.push(path);
        }
    }
    files.sort_by_key(|p| ordering_key(p));

    files
        .iter()
        .map(|path| -> Result<SlideDescriptor, ScanError> {
            let caption_path = path.with_extension("txt");
            let caption = if caption_path.is_file() {
                Some(fs::read_to_string(&caption_path)?.trim().to_string()).filter(|c| !c.is_empty())
            } else {
                None
            };
            Ok(SlideDescriptor {
                location: location(path, root),
                caption,
            })
        })
        .collect()
}

fn scan_gallery(root: &Path) -> Result<(Vec<Category>, Vec<ImageDescriptor>), ScanError> {
    let gallery = root.join(GALLERY_DIR);
    if !gallery.is_dir() {
        log::debug!("no {GALLERY_DIR}/ directory, gallery is empty");
        return Ok((Vec::new(), Vec::new()));
    }

    // category dir -> its image files
    let mut dirs: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    let walker = WalkDir::new(&gallery)
        .min_depth(1)
        .max_depth(2)
        .into_iter()
        .filter_entry(|e| !is_hidden(e.path()));
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        match entry.depth() {
            1 if entry.file_type().is_dir() => {
                dirs.entry(path.to_path_buf()).or_default();
            }
            1 if is_image(path) => return Err(ScanError::Uncategorized(path.to_path_buf())),
            2 if is_image(path) => {
                if let Some(parent) = path.parent() {
                    dirs.entry(parent.to_path_buf())
                        .or_default()
                        .push(path.to_path_buf());
                }
            }
            _ => {}
        }
    }

    let mut ordered: Vec<(PathBuf, Vec<PathBuf>)> = dirs.into_iter().collect();
    ordered.sort_by_key(|(dir, _)| ordering_key(dir));

    let mut categories: Vec<Category> = Vec::new();
    let mut images = Vec::new();
    for (dir, mut files) in ordered {
        let dir_name = file_name(&dir);
        let key = category_key(&dir_name);
        if key.is_empty() || key == ALL {
            return Err(ScanError::ReservedCategory(dir));
        }
        if categories.iter().any(|c| c.key == key) {
            return Err(ScanError::DuplicateCategory(key));
        }

        check_duplicate_numbers(&dir, &files)?;
        files.sort_by_key(|p| ordering_key(p));

        categories.push(Category {
            key: key.clone(),
            label: label_for_stem(&dir_name),
            path: location(&dir, root),
            count: files.len(),
        });

        for file in &files {
            images.push(ImageDescriptor::new(
                location(file, root),
                label_for_stem(&stem(file)),
                key.clone(),
            ));
        }
    }

    Ok((categories, images))
}

fn check_duplicate_numbers(dir: &Path, files: &[PathBuf]) -> Result<(), ScanError> {
    let mut seen = BTreeSet::new();
    for file in files {
        if let Some(number) = parse_entry_name(&stem(file)).number
            && !seen.insert(number)
        {
            return Err(ScanError::DuplicateNumber(number, dir.to_path_buf()));
        }
    }
    Ok(())
}

/// Numbered entries first by number, then unnumbered; ties broken by name.
fn ordering_key(path: &Path) -> (u32, String) {
    let name = stem(path);
    (parse_entry_name(&name).sort_key(), file_name(path))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn is_hidden(path: &Path) -> bool {
    file_name(path).starts_with('.')
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Site-relative URL of a content file, always `/`-separated.
fn location(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::setup_fixtures;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"fake image").unwrap();
    }

    #[test]
    fn fixture_categories_in_number_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let keys: Vec<&str> = manifest.categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["wedding", "portrait", "engagement-sessions"]);
        assert_eq!(manifest.categories[2].label, "Engagement Sessions");
    }

    #[test]
    fn fixture_images_in_catalog_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let first = &manifest.images[0];
        assert_eq!(first.location, "gallery/010-Wedding/001-First-Dance.jpg");
        assert_eq!(first.label, "First Dance");
        assert_eq!(first.category, "wedding");

        let counts: Vec<usize> = manifest.categories.iter().map(|c| c.count).collect();
        assert_eq!(counts.iter().sum::<usize>(), manifest.images.len());
    }

    #[test]
    fn fixture_hero_slides_with_captions() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.slides.len(), 3);
        assert_eq!(manifest.slides[0].location, "hero/001-First-Light.jpg");
        assert_eq!(manifest.slides[0].caption.as_deref(), Some("Every love story is beautiful"));
        assert_eq!(manifest.slides[1].caption, None);
    }

    #[test]
    fn fixture_config_loaded() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.title, "Janet Wedding Photography");
    }

    #[test]
    fn images_sorted_by_number_not_name() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "gallery/010-Wedding/010-Cake.jpg");
        touch(tmp.path(), "gallery/010-Wedding/002-Vows.jpg");
        touch(tmp.path(), "gallery/010-Wedding/Candid.jpg");
        let manifest = scan(tmp.path()).unwrap();
        let labels: Vec<&str> = manifest.images.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Vows", "Cake", "Candid"]);
    }

    #[test]
    fn number_only_image_is_labelled_by_stem() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "gallery/010-Wedding/003.jpg");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.images[0].label, "003");
    }

    #[test]
    fn empty_root_scans_to_empty_manifest() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.slides.is_empty());
        assert!(manifest.images.is_empty());
        assert!(manifest.categories.is_empty());
    }

    #[test]
    fn empty_category_is_kept_with_zero_count() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("gallery/040-Newborn")).unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.categories.len(), 1);
        assert_eq!(manifest.categories[0].count, 0);
    }

    #[test]
    fn non_images_and_hidden_files_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "gallery/010-Wedding/001-Vows.jpg");
        fs::write(tmp.path().join("gallery/010-Wedding/notes.md"), "x").unwrap();
        touch(tmp.path(), "gallery/010-Wedding/.002-Hidden.jpg");
        touch(tmp.path(), "gallery/.drafts/001-Wip.jpg");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.images.len(), 1);
        assert_eq!(manifest.categories.len(), 1);
    }

    #[test]
    fn image_outside_category_is_error() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "gallery/001-Loose.jpg");
        assert!(matches!(scan(tmp.path()), Err(ScanError::Uncategorized(_))));
    }

    #[test]
    fn duplicate_number_is_error() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "gallery/010-Wedding/001-Vows.jpg");
        touch(tmp.path(), "gallery/010-Wedding/001-Rings.jpg");
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::DuplicateNumber(1, _))
        ));
    }

    #[test]
    fn colliding_category_keys_are_error() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "gallery/010-Wedding/001-Vows.jpg");
        touch(tmp.path(), "gallery/020-wedding/001-Rings.jpg");
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::DuplicateCategory(k)) if k == "wedding"
        ));
    }

    #[test]
    fn category_named_all_is_reserved() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "gallery/010-All/001-Everything.jpg");
        touch(tmp.path(), "gallery/020-Portrait/001-Bride.jpg");
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::ReservedCategory(ref p) if p.ends_with("010-All")));
    }

    #[test]
    fn category_with_blank_name_is_reserved() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "gallery/010- /001-Vows.jpg");
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::ReservedCategory(_))
        ));
    }

    #[test]
    fn locations_are_slash_separated_and_relative() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "hero/001-Dawn.jpg");
        touch(tmp.path(), "gallery/010-Wedding/001-Vows.jpg");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.slides[0].location, "hero/001-Dawn.jpg");
        assert_eq!(manifest.categories[0].path, "gallery/010-Wedding");
        assert!(!manifest.images[0].location.contains('\\'));
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.images, manifest.images);
        assert_eq!(back.slides, manifest.slides);
    }
}

//! Shared test utilities.
//!
//! Catalog builders for engine tests, a site starter wired to the in-memory
//! surface, and fixture setup for scan/render tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut site = start_site(catalog_of(&["wedding", "portrait", "wedding"]), 3);
//! site.apply_filter("wedding");
//! assert_eq!(site.view().members(), &[0, 2]);
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::form::{ContactFields, SimulatedSubmitter};
use crate::site::Site;
use crate::surface::MemorySurface;
use crate::types::ImageDescriptor;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Catalog builders
// =========================================================================

/// One image per entry of `categories`, located at `gallery/{i}.jpg`.
pub fn catalog_of(categories: &[&str]) -> Catalog {
    Catalog::new(
        categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                ImageDescriptor::new(format!("gallery/{i}.jpg"), format!("Photo {i}"), *category)
            })
            .collect(),
    )
}

/// Six images across wedding, portrait and engagement, interleaved.
///
/// ```text
/// 0 wedding  1 portrait  2 wedding  3 engagement  4 portrait  5 wedding
/// ```
pub fn wedding_catalog() -> Catalog {
    catalog_of(&[
        "wedding",
        "portrait",
        "wedding",
        "engagement",
        "portrait",
        "wedding",
    ])
}

/// All locations in catalog order.
pub fn locations(catalog: &Catalog) -> Vec<String> {
    catalog.iter().map(|i| i.location.clone()).collect()
}

// =========================================================================
// Site
// =========================================================================

/// A site over `catalog` with `slides` hero slides, stock config and an
/// accepting submitter.
pub fn start_site(catalog: Catalog, slides: usize) -> Site<MemorySurface, SimulatedSubmitter> {
    let surface = MemorySurface::new(&catalog, slides);
    Site::start(SiteConfig::default(), surface, SimulatedSubmitter::default())
}

/// A contact form payload that passes validation.
pub fn valid_fields() -> ContactFields {
    ContactFields {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        email: "jane@example.com".into(),
        phone: "555-0100".into(),
        event_date: "2026-06-20".into(),
        message: "We are getting married in June.".into(),
    }
}

//! Font module root.
//!
//! Text blocks name a font family (often the generic `sans-serif`). Before a
//! block is measured or handed to the renderer the family is checked against
//! the installed fonts:
//! - try the name as given, lowercased, capitalized and title-cased
//! - otherwise walk the Devanagari fallback chain
//! - otherwise warn and keep the requested name; the renderer substitutes
//!
//! The catalog is a trait so resolution can run against a fixed list in tests
//! and against `fontdb` system fonts in practice.

pub mod fallbacks;
pub mod metrics;

use std::collections::BTreeSet;
use std::sync::Arc;

use fontdb::{Database, Family, ID, Query, Style, Weight};

pub use fallbacks::DEVANAGARI_FALLBACKS;

/// Anything that can answer "is this family installed?".
pub trait FontCatalog {
    fn has_family(&self, name: &str) -> bool;

    /// Installed family names, sorted.
    fn families(&self) -> Vec<String>;
}

/// A fixed list of families.
impl FontCatalog for [&str] {
    fn has_family(&self, name: &str) -> bool {
        self.iter().any(|f| *f == name)
    }

    fn families(&self) -> Vec<String> {
        let set: BTreeSet<String> = self.iter().map(|s| s.to_string()).collect();
        set.into_iter().collect()
    }
}

/// Outcome of [`resolve_font`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResolution {
    /// Family to use; the requested name when nothing matched.
    pub family: String,
    pub resolved: bool,
    /// Came from the fallback chain rather than the request.
    pub fallback: bool,
}

/// Spelling variants tried for one family name.
fn variants(font: &str) -> Vec<String> {
    let base = if fallbacks::GENERIC_SANS.contains(&font.to_lowercase().as_str()) {
        "sans"
    } else {
        font
    };

    let mut out = vec![
        font.to_string(),
        base.to_string(),
        base.to_lowercase(),
        capitalize(base),
        title_case(base),
    ];
    out.dedup();
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title_case(s: &str) -> String {
    s.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// First installed spelling of `font`, if any.
pub fn find_variant(font: &str, catalog: &(impl FontCatalog + ?Sized)) -> Option<String> {
    variants(font).into_iter().find(|v| catalog.has_family(v))
}

/// Resolve `requested` against `catalog`, falling back through `fallbacks`.
///
/// Never fails: an unresolvable name is returned as-is with a warning.
pub fn resolve_font(
    requested: &str,
    fallbacks: &[String],
    catalog: &(impl FontCatalog + ?Sized),
) -> FontResolution {
    if let Some(family) = find_variant(requested, catalog) {
        return FontResolution {
            family,
            resolved: true,
            fallback: false,
        };
    }

    for candidate in fallbacks {
        if let Some(family) = find_variant(candidate, catalog) {
            log::debug!("font {requested:?} not installed, using fallback {family:?}");
            return FontResolution {
                family,
                resolved: true,
                fallback: true,
            };
        }
    }

    log::warn!(
        "font {requested:?} not installed and none of {} fallbacks matched; leaving it to the renderer",
        fallbacks.len()
    );
    FontResolution {
        family: requested.to_string(),
        resolved: false,
        fallback: false,
    }
}

/// The default Devanagari chain as owned strings (config uses the same shape).
pub fn default_fallbacks() -> Vec<String> {
    DEVANAGARI_FALLBACKS.iter().map(|s| s.to_string()).collect()
}

/// Font bytes plus the face index inside a collection.
#[derive(Debug, Clone)]
pub struct LoadedFace {
    pub face_id: ID,
    pub bytes: Arc<[u8]>,
    pub index: u32,
}

/// Errors produced while loading a face for metrics.
#[derive(thiserror::Error, Debug)]
pub enum FontError {
    #[error("no face matches family {0:?}")]
    NoMatch(String),

    #[error("face data unavailable for {0:?}")]
    NoData(ID),

    #[error("failed to parse font face")]
    ParseFailed,
}

/// System fonts discovered through `fontdb`, loaded once.
pub struct SystemFonts {
    db: Database,
    families: BTreeSet<String>,
}

impl SystemFonts {
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        Self::from_database(db)
    }

    pub fn from_database(db: Database) -> Self {
        let families = db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        Self { db, families }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    fn generic(name: &str) -> Option<Family<'static>> {
        let lower = name.to_lowercase();
        let lower = lower.as_str();
        if fallbacks::GENERIC_SANS.contains(&lower) {
            Some(Family::SansSerif)
        } else if fallbacks::GENERIC_SERIF.contains(&lower) {
            Some(Family::Serif)
        } else if fallbacks::GENERIC_MONO.contains(&lower) {
            Some(Family::Monospace)
        } else {
            None
        }
    }

    /// Best face for `family` at `weight`.
    pub fn query(&self, family: &str, weight: u16) -> Option<ID> {
        let families = match Self::generic(family) {
            Some(generic) => vec![generic],
            None => vec![Family::Name(family)],
        };
        self.db.query(&Query {
            families: &families,
            weight: Weight(weight.clamp(1, 1000)),
            style: Style::Normal,
            stretch: fontdb::Stretch::Normal,
        })
    }

    /// Load the bytes of the best face for `family`.
    pub fn load_face(&self, family: &str, weight: u16) -> Result<LoadedFace, FontError> {
        let id = self
            .query(family, weight)
            .ok_or_else(|| FontError::NoMatch(family.to_string()))?;

        self.db
            .with_face_data(id, |data, index| LoadedFace {
                face_id: id,
                bytes: Arc::from(data),
                index,
            })
            .ok_or(FontError::NoData(id))
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl FontCatalog for SystemFonts {
    fn has_family(&self, name: &str) -> bool {
        if self.families.contains(name) {
            return true;
        }
        Self::generic(name).is_some() && self.query(name, 400).is_some()
    }

    fn families(&self) -> Vec<String> {
        self.families.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTALLED: &[&str] = &["DejaVu Sans", "noto sans", "Hind", "sans"];

    #[test]
    fn exact_and_case_variants() {
        let r = resolve_font("DejaVu Sans", &default_fallbacks(), INSTALLED);
        assert_eq!(r.family, "DejaVu Sans");
        assert!(r.resolved && !r.fallback);

        let r = resolve_font("Noto Sans", &default_fallbacks(), INSTALLED);
        assert_eq!(r.family, "noto sans");

        let r = resolve_font("HIND", &default_fallbacks(), INSTALLED);
        assert_eq!(r.family, "Hind");
        assert!(!r.fallback);
    }

    #[test]
    fn generic_sans_serif_is_sans() {
        let r = resolve_font("sans-serif", &default_fallbacks(), INSTALLED);
        assert_eq!(r.family, "sans");
        assert!(!r.fallback);
    }

    #[test]
    fn falls_back_in_order() {
        let installed: &[&str] = &["Mangal", "Hind"];
        let r = resolve_font("Kokila", &default_fallbacks(), installed);
        assert_eq!(r.family, "Mangal");
        assert!(r.resolved && r.fallback);
    }

    #[test]
    fn unresolved_keeps_request() {
        let installed: &[&str] = &["Courier"];
        let r = resolve_font("Kokila", &default_fallbacks(), installed);
        assert_eq!(
            r,
            FontResolution {
                family: "Kokila".to_string(),
                resolved: false,
                fallback: false,
            }
        );
    }

    #[test]
    fn case_helpers() {
        assert_eq!(capitalize("noTO sans"), "Noto sans");
        assert_eq!(title_case("noto sans devanagari"), "Noto Sans Devanagari");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn slice_catalog_lists_sorted() {
        let installed: &[&str] = &["b", "a", "b"];
        assert_eq!(installed.families(), vec!["a", "b"]);
    }

    #[test]
    fn empty_database_has_no_faces() {
        let fonts = SystemFonts::from_database(Database::new());
        assert_eq!(fonts.face_count(), 0);
        assert!(!fonts.has_family("sans-serif"));
        assert!(fonts.load_face("Hind", 400).is_err());
    }
}

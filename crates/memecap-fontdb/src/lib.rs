//! Where caption fonts come from: files, bytes, and the system
//!
//! Captions name a family ("Impact"), not a file. [`FontDatabase`] turns
//! that name into a parsed [`Font`], looking first at fonts registered by
//! hand and then at whatever the operating system has installed.
//!
//! ## Memory Management
//!
//! Fonts keep their raw bytes and parse tables on demand, so a [`Font`] is
//! cheap to share behind an `Arc` and works for collection files too.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use fontdb::{Database, Family, Query};
use parking_lot::RwLock;
use read_fonts::{types::GlyphId, FontRef as ReadFontRef, TableProvider};
use skrifa::{string::StringId, MetadataProvider};

use memecap_core::{
    error::{FontLoadError, Result},
    FontFamily,
};

/// A parsed font face, ready for metrics and outlines
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    family_name: Option<String>,
}

impl Font {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Open one face of a font file (collections hold several)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;

        Self::from_data_index(data, face_index)
    }

    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Parse raw bytes, rejecting anything that is not a font
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let family_name = skrifa::FontRef::from_index(&data, face_index)
            .ok()
            .and_then(|font| {
                font.localized_strings(StringId::FAMILY_NAME)
                    .english_or_first()
                    .map(|name| name.to_string())
            });

        Ok(Font {
            data,
            face_index,
            units_per_em,
            family_name,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// The family name from the `name` table, if it has one
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Parse view over the stored bytes
    pub fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Advance of a glyph in font units
    pub fn advance_width(&self, glyph_id: u32) -> Option<f32> {
        let font = self.font_ref()?;
        let hmtx = font.hmtx().ok()?;
        hmtx.advance(GlyphId::new(glyph_id)).map(f32::from)
    }

    /// Advance of `ch` at a 1px font size
    ///
    /// Unmapped characters fall back to `.notdef`, which is what gets drawn
    /// for them anyway.
    pub fn width_ratio(&self, ch: char) -> Option<f32> {
        let glyph_id = self.glyph_id(ch).unwrap_or(0);
        let advance = self.advance_width(glyph_id)?;
        Some(advance / self.units_per_em as f32)
    }

    /// Ascender at 1px, positive upward
    pub fn ascent_ratio(&self) -> f32 {
        self.font_ref()
            .and_then(|font| font.hhea().ok())
            .map(|hhea| hhea.ascender().to_i16() as f32 / self.units_per_em as f32)
            .unwrap_or(0.8)
    }

    /// Descender at 1px, negative below the baseline
    pub fn descent_ratio(&self) -> f32 {
        self.font_ref()
            .and_then(|font| font.hhea().ok())
            .map(|hhea| hhea.descender().to_i16() as f32 / self.units_per_em as f32)
            .unwrap_or(-0.2)
    }

    pub fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| maxp.num_glyphs() as u32))
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("family_name", &self.family_name)
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Family name to font resolution
///
/// Fonts registered by hand win over system fonts. Every resolved family is
/// remembered, so the system database is queried at most once per name.
pub struct FontDatabase {
    system: RwLock<Database>,
    resolved: RwLock<HashMap<FontFamily, Arc<Font>>>,
}

impl FontDatabase {
    /// An empty database: nothing resolves until fonts are added
    pub fn new() -> Self {
        Self {
            system: RwLock::new(Database::new()),
            resolved: RwLock::new(HashMap::new()),
        }
    }

    /// A database that already knows the installed fonts
    pub fn with_system_fonts() -> Self {
        let db = Self::new();
        db.load_system_fonts();
        db
    }

    pub fn load_system_fonts(&self) {
        let mut system = self.system.write();
        system.load_system_fonts();
        log::debug!("Loaded {} system font faces", system.len());
    }

    /// Load a font file and make it resolvable under its own family name
    pub fn load_font_file(&self, path: impl AsRef<Path>) -> Result<Arc<Font>> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;
        let font = Arc::new(Font::from_data(data.clone())?);

        self.system.write().load_font_data(data);

        if let Some(name) = font.family_name() {
            self.register(FontFamily::new(name), Arc::clone(&font));
        } else {
            log::warn!("{} has no family name; resolve it by registering it", path.display());
        }
        Ok(font)
    }

    /// Make `font` the answer for `family`, replacing any earlier answer
    pub fn register(&self, family: FontFamily, font: Arc<Font>) {
        log::debug!("Registered {:?} as '{}'", font, family);
        self.resolved.write().insert(family, font);
    }

    /// Find the font for `family`
    ///
    /// CSS generic names (`sans-serif`, `serif`, `monospace`, `cursive`,
    /// `fantasy`) map to the system's default for that class.
    pub fn resolve(&self, family: &FontFamily) -> Result<Arc<Font>> {
        if let Some(font) = self.resolved.read().get(family) {
            return Ok(Arc::clone(font));
        }

        let font = Arc::new(self.query_system(family)?);
        log::debug!("Resolved '{}' to {:?}", family, font);
        self.resolved
            .write()
            .insert(family.clone(), Arc::clone(&font));
        Ok(font)
    }

    fn query_system(&self, family: &FontFamily) -> Result<Font> {
        let not_found = || FontLoadError::FamilyNotFound(family.to_string());
        let target = match family.as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            name => Family::Name(name),
        };

        let system = self.system.read();
        let id = system
            .query(&Query {
                families: &[target],
                ..Query::default()
            })
            .ok_or_else(not_found)?;

        let (data, index) = system
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(not_found)?;
        Font::from_data_index(data, index)
    }

    /// Faces known to the underlying system database
    pub fn font_count(&self) -> usize {
        self.system.read().len()
    }

    /// Every family name available, sorted, without duplicates
    pub fn families(&self) -> Vec<String> {
        let system = self.system.read();
        let mut names: BTreeSet<String> = system
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        names.extend(self.resolved.read().keys().map(|family| family.to_string()));
        names.into_iter().collect()
    }

    /// Whether `family` has been resolved or registered already
    pub fn is_resolved(&self, family: &FontFamily) -> bool {
        self.resolved.read().contains_key(family)
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}

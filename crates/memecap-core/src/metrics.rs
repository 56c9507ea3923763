//! Per-family character width tables, probed once and kept forever
//!
//! Font metrics are not known up front. The first time a family is needed,
//! every character in [`REFERENCE_RANGE`] is probed at 1px and the ratios go
//! into a [`MetricsTable`]. After that, lookups are an array index.
//!
//! Tables are never invalidated: a family name is assumed to render the same
//! way for the life of the process.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::{
    error::{MemecapError, Result},
    traits::WidthProbe,
    FontFamily,
};

/// Code points probed for every family: printable ASCII plus the C0 controls
///
/// Anything outside this range has no metric and fails measurement with
/// [`MemecapError::MissingMetric`].
pub const REFERENCE_RANGE: RangeInclusive<u32> = 0..=126;

const TABLE_LEN: usize = *REFERENCE_RANGE.end() as usize + 1;

/// Source name of tables built with [`MetricsTable::from_ratios`]
pub const PRESET_SOURCE: &str = "preset";

/// Width ratios for one family, indexed by code point
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    family: FontFamily,
    source: &'static str,
    ratios: Box<[f32]>,
}

impl MetricsTable {
    /// Probe every reference character for `family`
    ///
    /// Fails on the first probe error, or on a width that is negative or not
    /// finite, so a half-usable table never exists.
    pub fn probe(family: &FontFamily, probe: &dyn WidthProbe) -> Result<Self> {
        let mut ratios = Vec::with_capacity(TABLE_LEN);

        for code in REFERENCE_RANGE {
            let ch = char::from(code as u8);
            let width = probe.probe(ch, family)?;

            if !width.is_finite() || width < 0.0 {
                log::warn!(
                    "{} probe returned width {} for {:?} in '{}'",
                    probe.name(),
                    width,
                    ch,
                    family
                );
                return Err(MemecapError::MissingMetric {
                    ch,
                    family: family.to_string(),
                });
            }

            ratios.push(width);
        }

        Ok(Self {
            family: family.clone(),
            source: probe.name(),
            ratios: ratios.into_boxed_slice(),
        })
    }

    /// Build a table from known ratios, e.g. metrics shipped alongside a font
    ///
    /// `ratios[i]` is the width of code point `i`. Exactly one entry per
    /// reference character is required.
    pub fn from_ratios(family: FontFamily, ratios: Vec<f32>) -> Result<Self> {
        if ratios.len() != TABLE_LEN {
            return Err(MemecapError::InvalidArgument(format!(
                "metrics table needs {} ratios, got {}",
                TABLE_LEN,
                ratios.len()
            )));
        }
        if let Some(code) = ratios.iter().position(|r| !r.is_finite() || *r < 0.0) {
            return Err(MemecapError::MissingMetric {
                ch: char::from(code as u8),
                family: family.to_string(),
            });
        }

        Ok(Self {
            family,
            source: PRESET_SOURCE,
            ratios: ratios.into_boxed_slice(),
        })
    }

    /// Width of `ch` at 1px, or `None` outside [`REFERENCE_RANGE`]
    pub fn ratio(&self, ch: char) -> Option<f32> {
        self.ratios.get(ch as usize).copied()
    }

    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    /// Name of the probe that measured this table, or [`PRESET_SOURCE`]
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

/// Create-once, read-forever tables keyed by family
///
/// Population happens outside the lock. Two callers that miss on the same
/// family at the same time both probe, and whichever publishes last wins;
/// the tables are identical so nothing is lost but the duplicate work.
pub struct MetricsCache {
    tables: RwLock<HashMap<FontFamily, Arc<MetricsTable>>>,
    builds: AtomicUsize,
    mismatches: AtomicUsize,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            builds: AtomicUsize::new(0),
            mismatches: AtomicUsize::new(0),
        }
    }

    /// The process-wide cache
    ///
    /// Tables are keyed by family alone: the first probe to measure a family
    /// decides its widths for every later caller, whatever probe they pass.
    /// A lookup through a different probe is served the existing table and
    /// logged once as a warning. Use a separate [`MetricsCache::new`] when
    /// several probes must measure the same family side by side.
    pub fn global() -> &'static MetricsCache {
        static GLOBAL: OnceLock<MetricsCache> = OnceLock::new();
        GLOBAL.get_or_init(MetricsCache::new)
    }

    /// Fetch the table for `family`, probing it on first use
    pub fn table(&self, family: &FontFamily, probe: &dyn WidthProbe) -> Result<Arc<MetricsTable>> {
        if let Some(table) = self.tables.read().get(family) {
            self.check_source(table, probe);
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(MetricsTable::probe(family, probe)?);
        self.builds.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Probed {} reference widths for '{}' via {}",
            table.len(),
            family,
            probe.name()
        );

        self.tables.write().insert(family.clone(), Arc::clone(&table));
        Ok(table)
    }

    fn check_source(&self, table: &MetricsTable, probe: &dyn WidthProbe) {
        if table.source() == probe.name() || table.source() == PRESET_SOURCE {
            return;
        }
        if self.mismatches.fetch_add(1, Ordering::Relaxed) == 0 {
            log::warn!(
                "'{}' was measured by the {} probe; the {} probe is reusing those widths",
                table.family(),
                table.source(),
                probe.name()
            );
        }
    }

    /// Seed the cache with a ready-made table, replacing any existing one
    pub fn insert(&self, table: MetricsTable) {
        self.tables
            .write()
            .insert(table.family().clone(), Arc::new(table));
    }

    /// Width of `ch` at 1px in `family`
    pub fn width_ratio(&self, ch: char, family: &FontFamily, probe: &dyn WidthProbe) -> Result<f32> {
        self.table(family, probe)?
            .ratio(ch)
            .ok_or_else(|| MemecapError::MissingMetric {
                ch,
                family: family.to_string(),
            })
    }

    pub fn contains(&self, family: &FontFamily) -> bool {
        self.tables.read().contains_key(family)
    }

    /// Number of families with a table
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }

    /// Lookups answered with a table another probe measured
    pub fn mismatches(&self) -> usize {
        self.mismatches.load(Ordering::Relaxed)
    }

    /// How many tables have been probed, counting raced duplicates
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new()
    }
}

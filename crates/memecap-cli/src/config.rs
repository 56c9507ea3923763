//! Caption settings from a TOML file
//!
//! ```toml
//! [top]
//! font_size_percent = 12
//!
//! [bottom]
//! fill_color = "#FFFF00"
//! anchor = "middle"
//! ```
//!
//! Each table overrides only the fields it names. Command-line flags are
//! layered on top of both tables.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use memecap_core::{
    error::{MemecapError, Result},
    CaptionOptions, CaptionOverrides,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub top: CaptionOverrides,
    pub bottom: CaptionOverrides,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| {
            MemecapError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&source)
            .map_err(|e| MemecapError::ConfigError(format!("{}: {}", path.display(), e)))?;
        log::info!("Loaded caption settings from {}", path.display());
        Ok(config)
    }

    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| MemecapError::ConfigError(e.to_string()))
    }

    /// Top and bottom options: defaults, then this file, then `flags`
    pub fn caption_options(&self, flags: &CaptionOverrides) -> (CaptionOptions, CaptionOptions) {
        let top = CaptionOptions::top().with_overrides(&self.top.clone().merge(flags));
        let bottom = CaptionOptions::bottom().with_overrides(&self.bottom.clone().merge(flags));
        (top, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memecap_core::{Anchor, Color, FontFamily};

    #[test]
    fn test_empty_config_gives_defaults() {
        let config = Config::parse("").unwrap();
        let (top, bottom) = config.caption_options(&CaptionOverrides::default());
        assert_eq!(top, CaptionOptions::top());
        assert_eq!(bottom, CaptionOptions::bottom());
    }

    #[test]
    fn test_tables_override_their_own_caption() {
        let config = Config::parse(
            r##"
            [top]
            font_size_percent = 12

            [bottom]
            fill_color = "#FFFF00"
            anchor = "middle"
            "##,
        )
        .unwrap();
        let (top, bottom) = config.caption_options(&CaptionOverrides::default());

        assert_eq!(top.font_size_percent, 12.0);
        assert_eq!(top.anchor, Anchor::Top);
        assert_eq!(bottom.font_size_percent, 10.0);
        assert_eq!(bottom.fill_color, Color::rgba(255, 255, 0, 255));
        assert_eq!(bottom.anchor, Anchor::Middle);
    }

    #[test]
    fn test_flags_win_over_file() {
        let config = Config::parse("[top]\nmargin = 5\nfont_family = \"Anton\"").unwrap();
        let flags = CaptionOverrides {
            margin: Some(12.0),
            ..CaptionOverrides::default()
        };
        let (top, bottom) = config.caption_options(&flags);

        assert_eq!(top.margin, 12.0);
        assert_eq!(top.font_family, FontFamily::new("Anton"));
        assert_eq!(bottom.margin, 12.0);
        assert_eq!(bottom.font_family, FontFamily::impact());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(matches!(
            Config::parse("[top]\nfont_size = 3"),
            Err(MemecapError::ConfigError(_))
        ));
        assert!(Config::parse("[middle]\nmargin = 3").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/no/such/memecap.toml")).unwrap_err();
        assert!(matches!(err, MemecapError::ConfigError(_)));
    }
}

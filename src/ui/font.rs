//! System font loading
//!
//! Watched pages are often Chinese, Japanese or Korean. egui's bundled fonts
//! carry no CJK glyphs, so a system font with CJK coverage is registered ahead
//! of the defaults for proportional text and behind them for monospace.

use eframe::egui::{FontData, FontDefinitions, FontFamily};
use font_kit::family_name::FamilyName;
use font_kit::handle::Handle;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use tracing::{info, warn};

const CJK_FONT_KEY: &str = "SystemCJKFont";
const FALLBACK_FONT_KEY: &str = "SystemFont";

/// Font definitions with the best CJK-capable system font available.
pub fn setup_fonts() -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    let source = SystemSource::new();

    for family in preferred_families(std::env::consts::OS) {
        let data = source
            .select_family_by_name(family)
            .ok()
            .and_then(|handle| handle.fonts().first().and_then(read_handle));
        if let Some(data) = data {
            register(&mut fonts, CJK_FONT_KEY, data, true);
            info!("Using system font '{}' for page text", family);
            return fonts;
        }
    }

    match source
        .select_best_match(&[FamilyName::SansSerif], &Properties::new())
        .ok()
        .and_then(|handle| read_handle(&handle))
    {
        Some(data) => {
            register(&mut fonts, FALLBACK_FONT_KEY, data, false);
            info!("No CJK font found, using generic sans-serif");
        }
        None => warn!("Could not load any system font, using egui defaults"),
    }
    fonts
}

fn preferred_families(os: &str) -> &'static [&'static str] {
    match os {
        "macos" => &["PingFang SC", "Hiragino Sans GB", "STSong", "Heiti SC"],
        "windows" => &["Microsoft YaHei", "SimSun", "SimHei", "MS Gothic"],
        "linux" => &["Noto Sans CJK SC", "Noto Sans CJK TC", "WenQuanYi Micro Hei"],
        _ => &[],
    }
}

fn read_handle(handle: &Handle) -> Option<Vec<u8>> {
    match handle {
        Handle::Memory { bytes, .. } => Some(bytes.to_vec()),
        Handle::Path { path, .. } => std::fs::read(path)
            .map_err(|e| warn!("Failed to read font {:?}: {}", path, e))
            .ok(),
    }
}

fn register(fonts: &mut FontDefinitions, key: &str, data: Vec<u8>, monospace_fallback: bool) {
    fonts
        .font_data
        .insert(key.to_owned(), FontData::from_owned(data).into());
    if let Some(proportional) = fonts.families.get_mut(&FontFamily::Proportional) {
        proportional.insert(0, key.to_owned());
    }
    if monospace_fallback && let Some(monospace) = fonts.families.get_mut(&FontFamily::Monospace) {
        monospace.push(key.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_os_has_no_preferred_families() {
        assert!(preferred_families("plan9").is_empty());
        assert!(preferred_families("linux").contains(&"Noto Sans CJK SC"));
    }

    #[test]
    fn registered_font_leads_proportional_and_trails_monospace() {
        let mut fonts = FontDefinitions::default();
        register(&mut fonts, CJK_FONT_KEY, vec![0u8; 4], true);
        assert_eq!(fonts.families[&FontFamily::Proportional][0], CJK_FONT_KEY);
        assert_eq!(
            fonts.families[&FontFamily::Monospace].last().map(String::as_str),
            Some(CJK_FONT_KEY)
        );
    }
}

use crate::diff::{DiffStyle, StyleColor};
use egui::{Color32, Context, FontId, Stroke, Style, TextFormat, Visuals};

const SUCCESS_COLOR: Color32 = Color32::from_rgb(0, 100, 0);
const ERROR_COLOR: Color32 = Color32::from_rgb(150, 0, 0);
const WARNING_COLOR: Color32 = Color32::from_rgb(160, 95, 0);
const SUCCESS_BG: Color32 = Color32::from_rgb(210, 245, 210);
const ERROR_BG: Color32 = Color32::from_rgb(255, 225, 225);
const WARNING_BG: Color32 = Color32::from_rgb(255, 240, 200);

pub const DIFF_FONT_SIZE: f32 = 14.0;

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(12);

    ctx.set_style(style);

    let mut visuals = Visuals::light();
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.0, Color32::TRANSPARENT);
    visuals.widgets.hovered.bg_fill = Color32::from_gray(240);
    visuals.widgets.active.bg_fill = Color32::from_gray(230);

    visuals.selection.bg_fill = Color32::from_rgb(200, 220, 255);
    visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(100, 100, 100));

    ctx.set_visuals(visuals);
}

pub fn color_for(color: StyleColor, visuals: &Visuals) -> Color32 {
    match color {
        StyleColor::Foreground => visuals.text_color(),
        StyleColor::Success => SUCCESS_COLOR,
        StyleColor::Error => ERROR_COLOR,
        StyleColor::Warning => WARNING_COLOR,
    }
}

/// Text format for a diff segment. Strong emphasis is drawn as a tinted
/// background since egui fonts carry no bold face.
pub fn diff_text_format(style: DiffStyle, visuals: &Visuals) -> TextFormat {
    let descriptor = style.descriptor();
    let background = if descriptor.bold {
        match descriptor.color {
            StyleColor::Success => SUCCESS_BG,
            StyleColor::Error => ERROR_BG,
            StyleColor::Warning => WARNING_BG,
            StyleColor::Foreground => Color32::TRANSPARENT,
        }
    } else {
        Color32::TRANSPARENT
    };

    TextFormat {
        font_id: FontId::proportional(DIFF_FONT_SIZE),
        color: color_for(descriptor.color, visuals),
        italics: descriptor.italic,
        background,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_uses_theme_text_color() {
        let visuals = Visuals::light();
        let format = diff_text_format(DiffStyle::Plain, &visuals);
        assert_eq!(format.color, visuals.text_color());
        assert_eq!(format.background, Color32::TRANSPARENT);
        assert!(!format.italics);
    }

    #[test]
    fn deleted_is_italic_red() {
        let format = diff_text_format(DiffStyle::Deleted, &Visuals::light());
        assert_eq!(format.color, ERROR_COLOR);
        assert!(format.italics);
    }

    #[test]
    fn inserted_and_replaced_are_highlighted() {
        let visuals = Visuals::light();
        assert_eq!(diff_text_format(DiffStyle::Inserted, &visuals).background, SUCCESS_BG);
        let replaced = diff_text_format(DiffStyle::Replaced, &visuals);
        assert_eq!(replaced.background, WARNING_BG);
        assert!(replaced.italics);
    }
}

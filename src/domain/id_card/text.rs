use super::card_font::TextStyle;
use image::{Rgba, RgbaImage};
use rusttype::{point, PositionedGlyph, Scale};

/// テキストの配置基準。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// (x, y) が左端・上端。
    LeftTop,
    /// x が水平方向の中央、y が文字の描画部分（インク）の上端。
    CenterTop,
    /// (x, y) がテキストの中心。
    CenterMiddle,
}

/// テキストの描画幅（ピクセル）を返します。
pub fn text_width(style: &TextStyle, text: &str) -> f32 {
    let glyphs = layout(style, text, 0.0, 0.0);
    glyphs
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// キャンバスにテキストを描画します。
///
/// グリフの被覆率をマスクとして、色の全チャンネル（アルファを含む）を
/// 既存のピクセルと線形に混ぜ合わせます。透明なレイヤーに描いた場合は
/// 被覆率に応じたアルファ値が残ります。
pub fn draw_text(
    canvas: &mut RgbaImage,
    style: &TextStyle,
    x: i32,
    y: i32,
    anchor: Anchor,
    color: Rgba<u8>,
    text: &str,
) {
    let v_metrics = style.font.v_metrics(Scale::uniform(style.px));
    let left = match anchor {
        Anchor::LeftTop => x as f32,
        Anchor::CenterTop | Anchor::CenterMiddle => x as f32 - text_width(style, text) / 2.0,
    };
    let baseline = match anchor {
        Anchor::LeftTop => y as f32 + v_metrics.ascent,
        // 一番高いグリフの上端が y に揃うようにベースラインを下げる
        Anchor::CenterTop => y as f32 - ink_top(style, text) as f32,
        Anchor::CenterMiddle => {
            y as f32 - (v_metrics.ascent - v_metrics.descent) / 2.0 + v_metrics.ascent
        }
    };

    for glyph in layout(style, text, left, baseline) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 || px >= canvas.width() as i32 || py >= canvas.height() as i32 {
                return;
            }
            if coverage <= 0.0 {
                return;
            }
            let coverage = coverage.min(1.0);
            let dst = canvas.get_pixel_mut(px as u32, py as u32);
            let inv = 1.0 - coverage;
            for c in 0..4 {
                dst.0[c] = (color.0[c] as f32 * coverage + dst.0[c] as f32 * inv).round() as u8;
            }
        });
    }
}

/// ベースラインを 0 としたときの、インクの最上端の y 座標（通常は負の値）。
fn ink_top(style: &TextStyle, text: &str) -> i32 {
    layout(style, text, 0.0, 0.0)
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .map(|bb| bb.min.y)
        .min()
        .unwrap_or(0)
}

fn layout<'a>(
    style: &'a TextStyle,
    text: &'a str,
    x: f32,
    baseline: f32,
) -> Vec<PositionedGlyph<'a>> {
    style
        .font
        .layout(text, Scale::uniform(style.px), point(x, baseline))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id_card::card_font::CardFonts;

    fn style(px: f32) -> TextStyle {
        TextStyle {
            font: CardFonts::fallback().label.font,
            px,
        }
    }

    fn ink_columns(img: &RgbaImage) -> (u32, u32) {
        let mut min_x = u32::MAX;
        let mut max_x = 0;
        for (x, _, p) in img.enumerate_pixels() {
            if p.0[0] < 128 {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
        }
        (min_x, max_x)
    }

    #[test]
    fn empty_text_has_zero_width() {
        let fonts = CardFonts::fallback();
        assert_eq!(text_width(&fonts.label, ""), 0.0);
        assert!(text_width(&fonts.label, "CUI:") > 0.0);
    }

    #[test]
    fn left_top_text_starts_near_x() {
        let mut img = RgbaImage::from_pixel(300, 60, Rgba([255, 255, 255, 255]));
        let black = Rgba([0, 0, 0, 255]);
        draw_text(&mut img, &style(32.0), 50, 10, Anchor::LeftTop, black, "HHHH");
        let (min_x, _) = ink_columns(&img);
        assert!((50..=56).contains(&min_x), "min_x = {}", min_x);
    }

    /// 中央揃えのテキストが x を中心に左右ほぼ対称に描かれることをテストします。
    #[test]
    fn center_anchor_is_roughly_symmetric() {
        let mut img = RgbaImage::from_pixel(300, 60, Rgba([255, 255, 255, 255]));
        let black = Rgba([0, 0, 0, 255]);
        draw_text(&mut img, &style(32.0), 150, 30, Anchor::CenterMiddle, black, "HHHHHH");
        let (min_x, max_x) = ink_columns(&img);
        let mid = (min_x + max_x) / 2;
        assert!((145..=155).contains(&mid), "mid = {}", mid);
    }

    #[test]
    fn drawing_on_transparent_layer_sets_alpha() {
        let mut layer = RgbaImage::from_pixel(200, 60, Rgba([255, 255, 255, 0]));
        let red = Rgba([255, 0, 0, 80]);
        draw_text(&mut layer, &style(28.0), 100, 30, Anchor::CenterMiddle, red, "MMM");
        let max_alpha = layer.pixels().map(|p| p.0[3]).max().unwrap_or(0);
        assert!(max_alpha > 0 && max_alpha <= 80, "max_alpha = {}", max_alpha);
    }

    #[test]
    fn text_outside_canvas_is_clipped() {
        let fonts = CardFonts::fallback();
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        let black = Rgba([0, 0, 0, 255]);
        draw_text(&mut img, &fonts.label, -500, -500, Anchor::LeftTop, black, "CLIPPED");
        assert!(img.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    /// 上揃えでは、インクの最上行が y に来ることをテストします。
    #[test]
    fn center_top_aligns_ink_top_to_y() {
        let white = Rgba([255, 255, 255, 255]);
        let mut img = RgbaImage::from_pixel(300, 80, white);
        let black = Rgba([0, 0, 0, 255]);
        draw_text(&mut img, &style(32.0), 150, 20, Anchor::CenterTop, black, "HÉ");
        let first_row = img
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != white)
            .map(|(_, y, _)| y)
            .min()
            .expect("何も描画されていません");
        assert!((20..=21).contains(&first_row), "first_row = {}", first_row);
    }
}

// --- 依存モジュール ---

use super::card_font::CardFonts;
use super::text::{draw_text, Anchor};
use crate::domain::patient::Patient;

use image::codecs::jpeg::JpegEncoder;
use image::{
    imageops, DynamicImage, ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage,
};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_ellipse_mut, draw_filled_rect_mut, draw_hollow_rect_mut,
};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use imageproc::rect::Rect;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// --- レイアウト定数 ---

/// 身分証画像の幅と高さ（クレジットカード比率を拡大したもの）。
pub const CARD_WIDTH: u32 = 600;
pub const CARD_HEIGHT: u32 = 380;

pub const JPEG_QUALITY: u8 = 90;

// グアテマラ国旗の色
pub const BLUE: Rgba<u8> = Rgba([0, 63, 135, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const LIGHT_BLUE: Rgba<u8> = Rgba([130, 170, 200, 255]);
pub const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);
pub const DARK_GRAY: Rgba<u8> = Rgba([64, 64, 64, 255]);
pub const LIGHT_GRAY: Rgba<u8> = Rgba([240, 240, 240, 255]);
const WATERMARK_RED: Rgba<u8> = Rgba([255, 0, 0, 80]);

// ヘッダーは 0..=50 行、フッターは 340 行目から下端まで
const HEADER_HEIGHT: u32 = 51;
const FOOTER_TOP: u32 = CARD_HEIGHT - 40;

const PHOTO_X: i32 = 30;
const PHOTO_Y: i32 = 70;
const PHOTO_W: i32 = 140;
const PHOTO_H: i32 = 180;

const TEXT_X: i32 = 190;
const LINE_HEIGHT: i32 = 28;

const WATERMARK_TEXT: &str = "MUESTRA - NO VÁLIDO";
const WATERMARK_DEGREES: f32 = 30.0;

/// 画像の保存時に発生する可能性のあるエラー。
#[derive(Debug, Error)]
pub enum CardImageError {
    #[error("JPEGのエンコードに失敗しました: {0}")]
    Encode(#[from] image::ImageError),

    #[error("ファイル {path} への書き込みに失敗しました: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 1人の患者について描画された身分証画像。
///
/// `render` で生成し、`save_to_dir` でJPEGとして書き出します。
pub struct IdCardImage {
    file_name: String,
    image: RgbImage,
}

impl IdCardImage {
    /// 患者データから身分証画像を描画します。
    ///
    /// ヘッダー、写真枠とシルエット、各項目、フッター、斜めの透かし、外枠の順に描きます。
    pub fn render(patient: &Patient, fonts: &CardFonts) -> Self {
        let mut canvas = RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, WHITE);

        draw_header(&mut canvas, fonts);
        draw_photo_placeholder(&mut canvas);
        draw_fields(&mut canvas, patient, fonts);
        draw_footer(&mut canvas, fonts);
        apply_watermark(&mut canvas, fonts);

        // JPEGはアルファを持たないので、外枠はRGBに変換してから描く
        let mut image = DynamicImage::ImageRgba8(canvas).to_rgb8();
        draw_border(&mut image);

        Self {
            file_name: patient.file_name(),
            image,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 画像をJPEGにエンコードしてバイト列を返します。
    pub fn encode_jpeg(&self) -> Result<Vec<u8>, CardImageError> {
        let mut bytes = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
        encoder.write_image(
            self.image.as_raw(),
            self.image.width(),
            self.image.height(),
            ExtendedColorType::Rgb8,
        )?;
        Ok(bytes)
    }

    /// `dir` に `file_name()` の名前でJPEGを保存し、そのパスを返します。
    ///
    /// 同名のファイルが既にある場合は上書きします。
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf, CardImageError> {
        let bytes = self.encode_jpeg()?;
        let path = dir.join(&self.file_name);
        fs::write(&path, bytes).map_err(|source| CardImageError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

// --- private な描画ヘルパー ---

fn draw_header(canvas: &mut RgbaImage, fonts: &CardFonts) {
    draw_filled_rect_mut(canvas, Rect::at(0, 0).of_size(CARD_WIDTH, HEADER_HEIGHT), BLUE);
    let cx = (CARD_WIDTH / 2) as i32;
    draw_text(
        canvas,
        &fonts.title,
        cx,
        15,
        Anchor::CenterTop,
        WHITE,
        "DOCUMENTO PERSONAL DE IDENTIFICACIÓN",
    );
    draw_text(
        canvas,
        &fonts.header,
        cx,
        35,
        Anchor::CenterTop,
        LIGHT_BLUE,
        "REPÚBLICA DE GUATEMALA",
    );
}

fn draw_photo_placeholder(canvas: &mut RgbaImage) {
    // 枠は両端を含むので +1
    let frame =
        Rect::at(PHOTO_X, PHOTO_Y).of_size((PHOTO_W + 1) as u32, (PHOTO_H + 1) as u32);
    draw_filled_rect_mut(canvas, frame, LIGHT_GRAY);
    draw_hollow_rect_mut(canvas, frame, GRAY);

    // 頭（円）と胴体（楕円）のシルエット
    let center_x = PHOTO_X + PHOTO_W / 2;
    let head_radius = 30;
    let head_y = PHOTO_Y + 50;
    draw_filled_circle_mut(canvas, (center_x, head_y), head_radius, GRAY);

    let body_top = head_y + head_radius + 10;
    let body_bottom = PHOTO_Y + PHOTO_H + 20;
    let body_half_height = (body_bottom - body_top) / 2;
    draw_filled_ellipse_mut(
        canvas,
        (center_x, body_top + body_half_height),
        50,
        body_half_height,
        GRAY,
    );
}

fn draw_fields(canvas: &mut RgbaImage, patient: &Patient, fonts: &CardFonts) {
    let mut y = 80;
    draw_text(canvas, &fonts.label, TEXT_X, y, Anchor::LeftTop, GRAY, "NOMBRES:");
    y += 15;
    let first_name = patient.first_name.to_uppercase();
    draw_text(canvas, &fonts.name, TEXT_X, y, Anchor::LeftTop, DARK_GRAY, &first_name);

    y += LINE_HEIGHT + 10;
    draw_text(canvas, &fonts.label, TEXT_X, y, Anchor::LeftTop, GRAY, "APELLIDOS:");
    y += 15;
    let last_name = patient.last_name.to_uppercase();
    draw_text(canvas, &fonts.name, TEXT_X, y, Anchor::LeftTop, DARK_GRAY, &last_name);

    y += LINE_HEIGHT + 15;
    draw_text(canvas, &fonts.label, TEXT_X, y, Anchor::LeftTop, GRAY, "CUI:");
    y += 15;
    let cui = patient.formatted_cui();
    draw_text(canvas, &fonts.cui, TEXT_X, y, Anchor::LeftTop, BLUE, &cui);

    y += LINE_HEIGHT + 10;
    draw_text(canvas, &fonts.label, TEXT_X, y, Anchor::LeftTop, GRAY, "SEXO:");
    draw_text(
        canvas,
        &fonts.label,
        TEXT_X + 50,
        y,
        Anchor::LeftTop,
        DARK_GRAY,
        patient.sex_label(),
    );
}

fn draw_footer(canvas: &mut RgbaImage, fonts: &CardFonts) {
    draw_filled_rect_mut(
        canvas,
        Rect::at(0, FOOTER_TOP as i32).of_size(CARD_WIDTH, CARD_HEIGHT - FOOTER_TOP),
        BLUE,
    );
    draw_text(
        canvas,
        &fonts.label,
        (CARD_WIDTH / 2) as i32,
        CARD_HEIGHT as i32 - 25,
        Anchor::CenterTop,
        WHITE,
        "REGISTRO NACIONAL DE LAS PERSONAS - RENAP",
    );
}

/// 透明なレイヤーに透かし文字を描き、中心で回転させてから合成します。
fn apply_watermark(canvas: &mut RgbaImage, fonts: &CardFonts) {
    let transparent = Rgba([255, 255, 255, 0]);
    let mut layer = RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, transparent);
    draw_text(
        &mut layer,
        &fonts.watermark,
        (CARD_WIDTH / 2) as i32,
        (CARD_HEIGHT / 2) as i32,
        Anchor::CenterMiddle,
        WATERMARK_RED,
        WATERMARK_TEXT,
    );

    // rotate_about_center は時計回り。サイズは変えない
    let rotated = rotate_about_center(
        &layer,
        WATERMARK_DEGREES.to_radians(),
        Interpolation::Nearest,
        transparent,
    );
    imageops::overlay(canvas, &rotated, 0, 0);
}

fn draw_border(image: &mut RgbImage) {
    let blue = Rgb([BLUE.0[0], BLUE.0[1], BLUE.0[2]]);
    // 幅2ピクセルの外枠
    draw_hollow_rect_mut(image, Rect::at(0, 0).of_size(CARD_WIDTH, CARD_HEIGHT), blue);
    draw_hollow_rect_mut(
        image,
        Rect::at(1, 1).of_size(CARD_WIDTH - 2, CARD_HEIGHT - 2),
        blue,
    );
}

// --- テストモジュール ---

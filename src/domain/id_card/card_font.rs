// rusttype でフォントを読み込み、役割ごとのサイズと組み合わせて保持します。
use log::debug;
use rusttype::Font;
use std::fs;
use std::path::Path;

/// 優先して使用するフォントファイルのパス。
pub const PREFERRED_FONT_PATH: &str = "/System/Library/Fonts/Helvetica.ttc";

/// フォールバック時に全ての役割で共通して使うピクセルサイズ。
pub const DEFAULT_FONT_PX: f32 = 10.0;

/// フォントとピクセルサイズの組。
#[derive(Clone)]
pub struct TextStyle {
    pub font: Font<'static>,
    pub px: f32,
}

/// どのフォントが読み込まれたか。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    Preferred,
    Fallback,
}

/// 身分証の描画に使うフォント一式。
///
/// 役割ごと（タイトル、見出し、氏名、ラベル、CUI番号、透かし）に
/// 別々のサイズを持ちます。
#[derive(Clone)]
pub struct CardFonts {
    pub title: TextStyle,
    pub header: TextStyle,
    pub name: TextStyle,
    pub label: TextStyle,
    pub cui: TextStyle,
    pub watermark: TextStyle,
    source: FontSource,
}

impl CardFonts {
    /// 新しい `CardFonts` を作成します。
    ///
    /// `font_path` のフォントを読み込めた場合は役割ごとのサイズで使い、
    /// 読み込めなかった場合は埋め込みの `DejaVuSans.ttf` を全ての役割に
    /// 同じサイズで割り当てます。失敗は呼び出し元に返しません。
    pub fn load(font_path: &Path) -> Self {
        match load_font_file(font_path) {
            Some(font) => Self::preferred(font),
            None => {
                debug!(
                    "フォント {} を読み込めなかったため、組み込みフォントを使用します",
                    font_path.display()
                );
                Self::fallback()
            }
        }
    }

    /// 埋め込みフォントだけで構成されたフォント一式。
    pub fn fallback() -> Self {
        let style = TextStyle {
            font: embedded_font(),
            px: DEFAULT_FONT_PX,
        };
        Self {
            title: style.clone(),
            header: style.clone(),
            name: style.clone(),
            label: style.clone(),
            cui: style.clone(),
            watermark: style,
            source: FontSource::Fallback,
        }
    }

    fn preferred(font: Font<'static>) -> Self {
        let sized = |px: f32| TextStyle {
            font: font.clone(),
            px,
        };
        Self {
            title: sized(18.0),
            header: sized(14.0),
            name: sized(16.0),
            label: sized(12.0),
            cui: sized(20.0),
            watermark: sized(28.0),
            source: FontSource::Preferred,
        }
    }

    pub fn source(&self) -> FontSource {
        self.source
    }
}

fn load_font_file(path: &Path) -> Option<Font<'static>> {
    let bytes = fs::read(path).ok()?;
    Font::try_from_vec(bytes)
}

fn embedded_font() -> Font<'static> {
    // include_bytes! でバイナリに埋め込むため、実行時にファイルは不要
    let bytes: &'static [u8] = include_bytes!("../../../fonts/DejaVuSans.ttf");
    match Font::try_from_bytes(bytes) {
        Some(font) => font,
        None => unreachable!("埋め込みフォントは常に有効なTTFです"),
    }
}

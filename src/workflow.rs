//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! 患者テーブルを順に画像へ変換する処理フローを実装します。

use crate::cli::Args;
use crate::domain::id_card::card_font::{CardFonts, PREFERRED_FONT_PATH};
use crate::domain::id_card::card_image::IdCardImage;
use crate::domain::output_dir::output_directory::OutputDirectory;
use crate::domain::patient::{Patient, PATIENTS};
use crate::error::AppError;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// 生成結果の概要。
#[derive(Debug)]
pub struct GenerationSummary {
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
}

impl GenerationSummary {
    /// 生成した画像の枚数。
    pub fn count(&self) -> usize {
        self.written.len()
    }

    /// 最後にコンソールへ表示する完了メッセージ。
    pub fn summary_line(&self) -> String {
        format!(
            "完了しました！ {} 枚の画像を {} に生成しました。",
            self.count(),
            self.output_dir.display()
        )
    }
}

/// デフォルトの出力先 (`<クレートのルート>/api/data/test-dpi-images`)。
pub fn default_output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("api")
        .join("data")
        .join("test-dpi-images")
}

// --- public な main 関数 ---

/// アプリケーションのメインロジックを実行します。
///
/// # 引数
/// * `args`: コマンドラインからパースされた引数 (`cli::Args`)。
///
/// # 戻り値
/// * `Ok(GenerationSummary)`: 全員分の画像を書き出せた場合。
/// * `Err(AppError)`: 出力ディレクトリの作成や画像の保存に失敗した場合。
pub fn run(args: Args) -> Result<GenerationSummary, AppError> {
    // 1. 出力ディレクトリの決定
    // 指定がなければクレートのルートからの相対パスを使う。
    let output_path = args.output_dir.unwrap_or_else(default_output_dir);

    // 2. フォントパスの決定
    let font_path = args
        .font_path
        .unwrap_or_else(|| PathBuf::from(PREFERRED_FONT_PATH));

    let summary = generate_images(&PATIENTS, &output_path, &font_path)?;

    println!();
    println!("{}", summary.summary_line());
    println!();
    println!("これらの画像を使って、患者の身分証アップロード機能をテストできます。");
    Ok(summary)
}

/// 患者ごとに身分証画像を1枚ずつ生成して保存します。
///
/// 出力ディレクトリがなければ作成し、あれば再利用します。
/// 患者はテーブルの順に処理され、同じファイル名になる患者がいた場合は後の方で上書きされます。
pub fn generate_images(
    patients: &[Patient],
    output_path: &Path,
    font_path: &Path,
) -> Result<GenerationSummary, AppError> {
    let output_dir = OutputDirectory::create_or_reuse(output_path)?;

    println!("{} 人分のテスト用DPI画像を生成します...", patients.len());
    println!("出力先ディレクトリ: {}", output_dir);
    println!();

    let mut written = Vec::with_capacity(patients.len());
    for patient in patients {
        // フォントや画像は1人分の処理の中だけで使い捨てる
        let fonts = CardFonts::load(font_path);
        debug!("患者 {} のフォント: {:?}", patient.id, fonts.source());

        let card = IdCardImage::render(patient, &fonts);
        let path = card.save_to_dir(output_dir.as_path())?;
        println!("  作成しました: {}", card.file_name());
        written.push(path);
    }

    info!("{} 枚の画像を書き出しました", written.len());
    Ok(GenerationSummary {
        output_dir: output_dir.as_path().to_path_buf(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_output_dir_is_under_crate_root() {
        let dir = default_output_dir();
        assert!(dir.starts_with(env!("CARGO_MANIFEST_DIR")));
        assert!(dir.ends_with("api/data/test-dpi-images"));
    }

    #[test]
    fn summary_line_reports_count() {
        let summary = GenerationSummary {
            output_dir: PathBuf::from("out"),
            written: vec![PathBuf::from("out/a.jpg"), PathBuf::from("out/b.jpg")],
        };
        assert_eq!(summary.count(), 2);
        assert!(summary.summary_line().contains(" 2 枚"));
    }

    /// 同じファイル名になる患者が2人いると、後の方で上書きされることをテストします。
    #[test]
    fn colliding_file_names_last_write_wins() {
        let dir = tempdir().expect("Failed to create temp directory");
        let a = Patient {
            id: 1,
            first_name: "Juan",
            last_name: "Perez Gonzalez",
            dpi: "DPI-1234567890101",
            sex: "M",
        };
        let b = Patient {
            id: 2,
            first_name: "Juan",
            last_name: "Perez Lopez",
            dpi: "DPI-9999999999999",
            sex: "M",
        };

        let summary = generate_images(&[a, b], dir.path(), Path::new("no_such_font.ttf"))
            .expect("生成に失敗");

        assert_eq!(summary.count(), 2);
        assert_eq!(summary.written[0], summary.written[1]);
        let files = std::fs::read_dir(dir.path()).expect("読み込みに失敗").count();
        assert_eq!(files, 1);
    }

    #[test]
    fn output_path_that_is_a_file_is_an_error() {
        let dir = tempdir().expect("Failed to create temp directory");
        let file_path = dir.path().join("occupied");
        std::fs::write(&file_path, "x").expect("Failed to create file");

        let result = generate_images(&PATIENTS[..1], &file_path, Path::new("no_such_font.ttf"));
        assert!(matches!(result, Err(AppError::Path(_))));
    }
}

use clap::Parser;
use std::path::PathBuf;

/// テスト用のDPI（身分証）画像を患者20人分生成するツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 画像の出力先フォルダのパス (オプション: デフォルトは <クレートのルート>/api/data/test-dpi-images)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// 優先して使うTTF/TTCフォントファイルのパス (オプション: 読み込めない場合は組み込みフォント)
    #[arg(short, long)]
    pub font_path: Option<PathBuf>,
}

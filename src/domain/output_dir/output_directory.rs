use super::path_error::PathError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// 画像の書き出し先ディレクトリ
#[derive(Debug)]
pub struct OutputDirectory {
    path: PathBuf,
}

impl OutputDirectory {
    // コンストラクタ: ディレクトリがなければ親ディレクトリごと作成し、あればそのまま使う
    pub fn create_or_reuse<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        // ファイルなど、ディレクトリ以外のものが既にある場合はエラー
        if path.exists() && !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        fs::create_dir_all(path).map_err(PathError::IoError)?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    // 内部のPathBufへの参照を返す
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

// Displayトレイトの実装（表示用）
impl fmt::Display for OutputDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

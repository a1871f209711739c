use std::fmt;
use std::path::PathBuf;

// 出力ディレクトリに関するエラー型
#[derive(Debug)]
pub enum PathError {
    NotADirectory(PathBuf),
    IoError(std::io::Error),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NotADirectory(p) => {
                write!(f, "パス '{}' はディレクトリではありません。", p.display())
            }
            PathError::IoError(e) => write!(f, "I/Oエラー: {}", e),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::IoError(e) => Some(e),
            PathError::NotADirectory(_) => None,
        }
    }
}

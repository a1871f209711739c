use crate::domain::id_card::card_image::CardImageError;
use crate::domain::output_dir::path_error::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("出力ディレクトリのエラー: {0}")]
    Path(#[from] PathError),

    #[error("身分証画像の生成エラー: {0}")]
    CardImage(#[from] CardImageError),
}

//! テスト用の身分証 (DPI) 画像を生成するライブラリ。
//!
//! 固定の患者テーブルから、ファイルアップロード機能の検証に使う
//! 600×380 のJPEG画像を1人1枚ずつ書き出します。

pub mod cli;
pub mod domain;
pub mod error;
pub mod workflow;

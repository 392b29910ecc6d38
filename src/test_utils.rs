//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::sync::Arc;

use serde_json::Value;

use crate::input::catalog::Catalog;

/// テスト用の Catalog を作成する
///
/// # Arguments
/// * `document` - ロケールをキーとする翻訳 JSON
///
/// # Panics
/// `document` がロケールごとのオブジェクトでない場合
#[allow(clippy::expect_used)]
pub(crate) fn create_catalog(document: &Value) -> Arc<Catalog> {
    Arc::new(Catalog::from_json(document).expect("test document must be locale-keyed"))
}

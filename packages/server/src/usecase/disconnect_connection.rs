//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した接続がブロードキャスト対象から外れることを保証
//! - close イベントが重複しても安全であることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済み接続の切断
//! - エッジケース：同じ接続の二重切断、未登録接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// Registry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続の登録を解除する（冪等）
    ///
    /// # Returns
    ///
    /// * `true` - 登録を解除した
    /// * `false` - すでに登録されていなかった
    pub async fn execute(&self, id: &ConnectionId) -> bool {
        self.registry.remove(id).await
    }
}

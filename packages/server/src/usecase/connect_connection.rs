//! UseCase: 接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 接続時に Registry へ登録され、ブロードキャスト対象になることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録
//! - 複数接続：登録数が接続数と一致する

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry};

/// 接続のユースケース
pub struct ConnectUseCase {
    /// Registry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectUseCase {
    /// 新しい ConnectUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を登録する
    ///
    /// # Returns
    ///
    /// 登録後の接続数
    pub async fn execute(&self, connection: Arc<dyn Connection>) -> usize {
        self.registry.add(connection).await;
        self.registry.count().await
    }
}

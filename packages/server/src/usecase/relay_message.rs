//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - パース → 整形 → 送信者以外へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者にエコーされず、他の全員に整形済みメッセージが届くことを保証
//! - 不正なペイロードが破棄され、後続のメッセージに影響しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 接続間での中継
//! - 異常系：フィールド欠落・JSON 以外のペイロード
//! - エッジケース：8 文字未満の送信者 ID、受信者の送信失敗

use std::sync::Arc;

use crate::domain::{
    BroadcastReport, ChatMessage, ConnectionId, ConnectionRegistry, OutboundChatMessage,
};

use super::error::RelayError;

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// Registry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// メッセージ中継を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信元の接続 ID
    /// * `payload` - 受信したテキストフレーム（JSON）
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - ブロードキャスト結果（一部の送信失敗を含みうる）
    /// * `Err(RelayError)` - ペイロードが不正で、メッセージは破棄された
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        payload: &str,
    ) -> Result<BroadcastReport, RelayError> {
        let inbound = ChatMessage::parse(payload)?;
        let outbound = OutboundChatMessage::from_sender(sender, inbound);

        Ok(self
            .registry
            .broadcast_except(sender, &outbound.to_string())
            .await)
    }
}

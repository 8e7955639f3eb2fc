//! InMemory ConnectionRegistry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//!
//! ## 並行性
//!
//! 接続の集合は `RwLock<Arc<HashMap>>` で保持するコピーオンライトのマップです。
//!
//! - 書き込み（add/remove）: write lock の中で `Arc::make_mut` により複製してから変更
//! - ブロードキャスト: read lock で `Arc` を複製してすぐに解放し、スナップショットを走査
//!
//! 走査中のスナップショットは変更されないため、ブロードキャスト中に接続が
//! 追加・削除されても二重送信やクラッシュは起きません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use futures_util::future::join_all;
use tokio::sync::RwLock;

use crate::domain::{BroadcastReport, Connection, ConnectionId, ConnectionRegistry};

type ConnectionMap = HashMap<ConnectionId, Arc<dyn Connection>>;

/// インメモリ ConnectionRegistry 実装
pub struct InMemoryConnectionRegistry {
    /// 接続中のコネクション
    ///
    /// Key: ConnectionId
    /// Value: Connection handle
    connections: RwLock<Arc<ConnectionMap>>,
}

impl InMemoryConnectionRegistry {
    /// 新しい空の InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// 現在の接続集合のスナップショットを取得
    async fn snapshot(&self) -> Arc<ConnectionMap> {
        self.connections.read().await.clone()
    }
}

impl Default for InMemoryConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn add(&self, connection: Arc<dyn Connection>) {
        let id = connection.id().clone();
        let mut guard = self.connections.write().await;
        let connections = Arc::make_mut(&mut *guard);
        if connections.insert(id.clone(), connection).is_some() {
            tracing::warn!("Connection '{}' was already registered, replaced", id);
        }
        tracing::debug!("Connection '{}' registered ({} total)", id, connections.len());
    }

    async fn remove(&self, id: &ConnectionId) -> bool {
        let mut guard = self.connections.write().await;
        if !guard.contains_key(id) {
            return false;
        }
        let connections = Arc::make_mut(&mut *guard);
        connections.remove(id);
        tracing::debug!(
            "Connection '{}' unregistered ({} remaining)",
            id,
            connections.len()
        );
        true
    }

    async fn broadcast_except(&self, sender_id: &ConnectionId, text: &str) -> BroadcastReport {
        let snapshot = self.snapshot().await;

        let sends = snapshot
            .iter()
            .filter(|(id, _)| *id != sender_id)
            .map(|(id, connection)| async move { (id, connection.send(text).await) });
        let results = join_all(sends).await;

        let mut report = BroadcastReport::default();
        for (id, result) in results {
            match result {
                Ok(()) => {
                    tracing::debug!("Relayed message to connection '{}'", id);
                    report.delivered += 1;
                }
                // ブロードキャストでは一部の送信失敗を許容
                Err(e) => {
                    tracing::warn!("Failed to relay message to connection '{}': {}", id, e);
                    report.failed.push((id.clone(), e));
                }
            }
        }

        report
    }

    async fn count(&self) -> usize {
        self.connections.read().await.len()
    }

    async fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.read().await.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::domain::{MockConnection, TransportError};
    use crate::infrastructure::connection::WebSocketConnection;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - add / remove / count / contains の基本操作
    // - broadcast_except: 送信者以外への配信
    // - 一部の送信失敗があっても残りに配信されること
    // - キューが満杯の遅い受信者がいてもブロードキャストが待たされないこと
    // - 並行した add / remove / broadcast で壊れないこと
    //
    // 【なぜこのテストが必要か】
    // - Registry は唯一の共有可変リソースであり、中継の正しさの中核
    // - 送信者へのエコーや受信者の取りこぼしがないことを保証する必要がある
    // ========================================

    /// Connection that forwards everything into an unbounded channel
    struct ChannelConnection {
        id: ConnectionId,
        sender: mpsc::UnboundedSender<String>,
    }

    #[async_trait]
    impl Connection for ChannelConnection {
        fn id(&self) -> &ConnectionId {
            &self.id
        }

        async fn send(&self, text: &str) -> Result<(), TransportError> {
            self.sender
                .send(text.to_string())
                .map_err(|_| TransportError::Closed(self.id.to_string()))
        }
    }

    fn test_id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn channel_connection(
        value: &str,
    ) -> (Arc<dyn Connection>, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let connection = ChannelConnection {
            id: test_id(value),
            sender,
        };
        (Arc::new(connection), receiver)
    }

    fn failing_connection(value: &str) -> Arc<dyn Connection> {
        let id = test_id(value);
        let mut mock = MockConnection::new();
        mock.expect_id().return_const(id.clone());
        mock.expect_send()
            .returning(move |_| Err(TransportError::Closed(id.to_string())));
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        // テスト項目: 追加した接続が登録され、削除すると消える
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx) = channel_connection("alice");

        // when (操作):
        registry.add(alice).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 1);
        assert!(registry.contains(&test_id("alice")).await);

        assert!(registry.remove(&test_id("alice")).await);
        assert_eq!(registry.count().await, 0);
        assert!(!registry.contains(&test_id("alice")).await);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        // テスト項目: 同じ接続を 2 回削除してもエラーにならず、状態も変わらない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx_alice) = channel_connection("alice");
        let (bob, _rx_bob) = channel_connection("bob");
        registry.add(alice).await;
        registry.add(bob).await;

        // when (操作):
        let first = registry.remove(&test_id("alice")).await;
        let second = registry.remove(&test_id("alice")).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(registry.count().await, 1);
        assert!(registry.contains(&test_id("bob")).await);
    }

    #[tokio::test]
    async fn test_add_same_id_keeps_single_entry() {
        // テスト項目: 同じ ID を再登録しても 1 件のまま（新しいハンドルに置き換わる）
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (old, mut rx_old) = channel_connection("alice");
        let (new, mut rx_new) = channel_connection("alice");
        let (bob, _rx_bob) = channel_connection("bob");
        registry.add(old).await;
        registry.add(bob).await;

        // when (操作):
        registry.add(new).await;
        registry.broadcast_except(&test_id("bob"), "ping").await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 2);
        assert_eq!(rx_new.recv().await, Some("ping".to_string()));
        assert!(rx_old.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_excludes_sender() {
        // テスト項目: 送信者以外の全員に届き、送信者には届かない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, mut rx_alice) = channel_connection("alice");
        let (bob, mut rx_bob) = channel_connection("bob");
        let (charlie, mut rx_charlie) = channel_connection("charlie");
        registry.add(alice).await;
        registry.add(bob).await;
        registry.add(charlie).await;

        // when (操作):
        let report = registry.broadcast_except(&test_id("alice"), "hello").await;

        // then (期待する結果):
        assert_eq!(report.delivered, 2);
        assert!(report.failed.is_empty());
        assert_eq!(rx_bob.recv().await, Some("hello".to_string()));
        assert_eq!(rx_charlie.recv().await, Some("hello".to_string()));
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 途中の受信者が失敗しても残りの受信者には届く
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (sender, _rx_sender) = channel_connection("sender");
        let (first, mut rx_first) = channel_connection("first");
        let (third, mut rx_third) = channel_connection("third");
        registry.add(sender).await;
        registry.add(first).await;
        registry.add(failing_connection("second")).await;
        registry.add(third).await;

        // when (操作):
        let report = registry.broadcast_except(&test_id("sender"), "hello").await;

        // then (期待する結果):
        assert_eq!(report.delivered, 2);
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, test_id("second"));
        assert_eq!(rx_first.recv().await, Some("hello".to_string()));
        assert_eq!(rx_third.recv().await, Some("hello".to_string()));
        // 失敗した受信者も登録は解除されない
        assert!(registry.contains(&test_id("second")).await);
    }

    #[tokio::test]
    async fn test_slow_peer_does_not_delay_broadcasts() {
        // テスト項目: キューが満杯のまま消化されない受信者がいても、連続したブロードキャストはすぐに戻る
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (sender, _rx_sender) = channel_connection("sender");
        let (slow, _rx_slow) = WebSocketConnection::channel(test_id("slow"), 1);
        let (fast, mut rx_fast) = WebSocketConnection::channel(test_id("fast"), 16);
        registry.add(sender).await;
        registry.add(Arc::new(slow)).await;
        registry.add(Arc::new(fast)).await;

        // when (操作):
        let started = Instant::now();
        let mut reports = Vec::new();
        for i in 0..5 {
            reports.push(
                registry
                    .broadcast_except(&test_id("sender"), &format!("msg-{}", i))
                    .await,
            );
        }
        let elapsed = started.elapsed();

        // then (期待する結果):
        assert!(elapsed < Duration::from_millis(200), "took {:?}", elapsed);
        assert_eq!(reports[0].delivered, 2);
        for report in &reports[1..] {
            assert_eq!(report.delivered, 1);
            assert_eq!(
                report.failed,
                vec![(test_id("slow"), TransportError::Full("slow".to_string()))]
            );
        }
        for i in 0..5 {
            assert_eq!(rx_fast.recv().await, Some(format!("msg-{}", i)));
        }
        assert!(registry.contains(&test_id("slow")).await);
    }

    #[tokio::test]
    async fn test_broadcast_with_only_sender() {
        // テスト項目: 送信者しかいない場合は誰にも送られない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, mut rx_alice) = channel_connection("alice");
        registry.add(alice).await;

        // when (操作):
        let report = registry.broadcast_except(&test_id("alice"), "hello").await;

        // then (期待する結果):
        assert_eq!(report, BroadcastReport::default());
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_from_unregistered_sender_reaches_everyone() {
        // テスト項目: 未登録の送信者からのブロードキャストは登録済み全員に届く
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, mut rx_alice) = channel_connection("alice");
        registry.add(alice).await;

        // when (操作):
        let report = registry.broadcast_except(&test_id("ghost"), "boo").await;

        // then (期待する結果):
        assert_eq!(report.delivered, 1);
        assert_eq!(rx_alice.recv().await, Some("boo".to_string()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_membership_changes_during_broadcast() {
        // テスト項目: ブロードキャスト中に接続の追加・削除が並行しても壊れない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let (stable, mut rx_stable) = channel_connection("stable");
        registry.add(stable).await;

        // when (操作):
        let churn = {
            let registry = registry.clone();
            tokio::spawn(async move {
                let mut receivers = Vec::new();
                for i in 0..200 {
                    let (connection, rx) = channel_connection(&format!("churn-{}", i));
                    registry.add(connection).await;
                    receivers.push(rx);
                    if i % 2 == 0 {
                        registry.remove(&test_id(&format!("churn-{}", i))).await;
                    }
                }
                receivers
            })
        };
        let broadcasts = {
            let registry = registry.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    registry
                        .broadcast_except(&test_id("broadcaster"), &format!("msg-{}", i))
                        .await;
                }
            })
        };
        let _receivers = churn.await.unwrap();
        broadcasts.await.unwrap();

        // then (期待する結果): 常に登録されていた接続は全メッセージを順番どおり受け取る
        for i in 0..200 {
            assert_eq!(rx_stable.recv().await, Some(format!("msg-{}", i)));
        }
        assert_eq!(registry.count().await, 101);
    }
}

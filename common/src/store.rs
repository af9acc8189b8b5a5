//! 保存先ゲートウェイ
//!
//! 最新の保存済みスナップショット1件だけを固定キーで保持する。
//! 書き込みは常に丸ごと上書き（後勝ち）、削除も丸ごと。

use crate::error::Result;
use crate::migrate::migrate_str;
use crate::types::SurveySnapshot;
use std::collections::HashMap;

/// 保存先キー
pub const STORAGE_KEY: &str = "sign_survey";

/// 旧フォームが使っていたキー（読み込み時のみ参照）
pub const LEGACY_STORAGE_KEYS: &[&str] = &["qt_sign_survey_v1_4"];

/// 文字列のキー・値ストア（ブラウザの localStorage と同じ形）
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    /// 削除した場合 true
    fn remove_item(&mut self, key: &str) -> Result<bool>;
}

/// メモリ上のストア
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool> {
        Ok(self.items.remove(key).is_some())
    }
}

/// スナップショットの保存・読込
#[derive(Debug, Clone, Default)]
pub struct SurveyStore<S> {
    inner: S,
}

impl<S: KeyValueStore> SurveyStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// 2スペースインデントのJSONで上書き保存
    pub fn put(&mut self, snapshot: &SurveySnapshot) -> Result<()> {
        let json = snapshot.to_pretty_json()?;
        self.inner.set_item(STORAGE_KEY, &json)?;
        tracing::debug!(key = STORAGE_KEY, bytes = json.len(), "snapshot stored");
        Ok(())
    }

    /// 保存済みスナップショットを取得
    ///
    /// 壊れたデータ・未対応の形式は黙って捨てて `None` を返す。
    /// 現行キーにない場合は旧キーを見て移行する。
    pub fn get(&self) -> Option<SurveySnapshot> {
        std::iter::once(STORAGE_KEY)
            .chain(LEGACY_STORAGE_KEYS.iter().copied())
            .find_map(|key| self.load_key(key))
    }

    fn load_key(&self, key: &str) -> Option<SurveySnapshot> {
        let raw = match self.inner.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(key, error = %e, "storage read failed");
                return None;
            }
        };

        match migrate_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::debug!(key, error = %e, "discarding unreadable snapshot");
                None
            }
        }
    }

    /// 保存済みレコードを削除（旧キーも含む）
    pub fn clear(&mut self) -> Result<bool> {
        let mut removed = self.inner.remove_item(STORAGE_KEY)?;
        for key in LEGACY_STORAGE_KEYS {
            removed |= self.inner.remove_item(key)?;
        }
        Ok(removed)
    }
}

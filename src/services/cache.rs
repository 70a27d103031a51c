//! # 목록 응답 캐시
//!
//! 관리자 클라이언트의 쿼리 캐시를 서버 쪽에서 명시적으로 재구성한 것입니다.
//! 리소스 타입을 키로 `findAll` 응답(JSON)만 캐싱하며,
//! 변경 요청이 성공하면 그 즉시 동기적으로 무효화합니다.
//! 백그라운드 재조회나 TTL은 없습니다.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

/// 캐시 키가 되는 리소스 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Levels,
    Lessons,
    Vocabularies,
    DialogueLines,
}

/// 리소스별 목록 캐시. clone해도 같은 저장소를 공유합니다 (내부 Arc).
#[derive(Clone, Default)]
pub struct ListCache {
    inner: Arc<RwLock<HashMap<Resource, Value>>>,
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 캐시된 목록을 반환합니다. 없으면 None.
    pub async fn get(&self, resource: Resource) -> Option<Value> {
        self.inner.read().await.get(&resource).cloned()
    }

    /// 목록 응답을 캐시에 올립니다.
    pub async fn put(&self, resource: Resource, value: Value) {
        self.inner.write().await.insert(resource, value);
    }

    /// 지정한 리소스들의 캐시 항목을 버립니다.
    ///
    /// 변경된 리소스뿐 아니라 그 리소스를 목록에 품는 쪽도 함께 넘겨야 합니다.
    /// 예: 레슨이 바뀌면 레슨을 품는 단어/회화 목록도 무효화.
    pub async fn invalidate(&self, resources: &[Resource]) {
        let mut guard = self.inner.write().await;
        for resource in resources {
            guard.remove(resource);
        }
    }
}

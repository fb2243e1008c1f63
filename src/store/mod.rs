// region:    --- Imports
use crate::domain::{Auction, Category, Product, User, UserScore, UserSuspension};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
// endregion: --- Imports

// region:    --- Store Errors

/// 저장소 오류
/// 검증 위반과 달리 호출자가 복구하기보다 그대로 전파하는 쪽
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} 엔티티 없음: id {1}")]
    NotFound(&'static str, i64),
    #[error("{0} 엔티티 id 충돌: id {1}")]
    Conflict(&'static str, i64),
}

// endregion: --- Store Errors

// region:    --- Entity Trait

/// 저장소가 다루는 엔티티 공통 인터페이스
/// id가 0이면 아직 저장되지 않은 엔티티로 본다
pub trait Entity: Clone + Send + Sync + 'static {
    const NAME: &'static str;
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

impl Entity for User {
    const NAME: &'static str = "User";
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Category {
    const NAME: &'static str = "Category";
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Product {
    const NAME: &'static str = "Product";
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Auction {
    const NAME: &'static str = "Auction";
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for UserScore {
    const NAME: &'static str = "UserScore";
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for UserSuspension {
    const NAME: &'static str = "UserSuspension";
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

// endregion: --- Entity Trait

// region:    --- Entity Store Trait

/// 엔티티 저장소 트레이트
/// 질의 결과는 삽입 순서를 유지한다
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    async fn insert(&self, entity: T) -> Result<T, StoreError>;
    async fn update(&self, entity: T) -> Result<T, StoreError>;
    async fn delete(&self, entity: &T) -> Result<(), StoreError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<T>, StoreError>;
    async fn query(
        &self,
        filter: Option<&(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)>,
    ) -> Result<Vec<T>, StoreError>;

    async fn get_all(&self) -> Result<Vec<T>, StoreError> {
        self.query(None).await
    }
}

/// 저장소 구현체(메모리)
pub struct MemoryStore<T: Entity> {
    inner: RwLock<MemoryInner<T>>,
}

struct MemoryInner<T> {
    rows: Vec<T>,
    next_id: i64,
}

/// 저장소 구현체 생성
impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        MemoryStore {
            inner: RwLock::new(MemoryInner {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

/// 저장소 구현체 메서드 구현
#[async_trait]
impl<T: Entity> EntityStore<T> for MemoryStore<T> {
    async fn insert(&self, mut entity: T) -> Result<T, StoreError> {
        let mut inner = self.inner.write().await;
        if entity.id() == 0 {
            entity.set_id(inner.next_id);
            inner.next_id += 1;
        } else {
            if inner.rows.iter().any(|row| row.id() == entity.id()) {
                return Err(StoreError::Conflict(T::NAME, entity.id()));
            }
            if entity.id() >= inner.next_id {
                inner.next_id = entity.id() + 1;
            }
        }
        inner.rows.push(entity.clone());
        debug!("{:<12} --> {} 저장: id {}", "Store", T::NAME, entity.id());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .rows
            .iter_mut()
            .find(|row| row.id() == entity.id())
            .ok_or(StoreError::NotFound(T::NAME, entity.id()))?;
        *slot = entity.clone();
        debug!("{:<12} --> {} 갱신: id {}", "Store", T::NAME, entity.id());
        Ok(entity)
    }

    async fn delete(&self, entity: &T) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .rows
            .iter()
            .position(|row| row.id() == entity.id())
            .ok_or(StoreError::NotFound(T::NAME, entity.id()))?;
        inner.rows.remove(index);
        debug!("{:<12} --> {} 삭제: id {}", "Store", T::NAME, entity.id());
        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<T>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn query(
        &self,
        filter: Option<&(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)>,
    ) -> Result<Vec<T>, StoreError> {
        let inner = self.inner.read().await;
        let rows = match filter {
            Some(keep) => inner.rows.iter().filter(|row| keep(row)).cloned().collect(),
            None => inner.rows.clone(),
        };
        Ok(rows)
    }
}

// endregion: --- Entity Store Trait

// region:    --- Imports
use super::ServiceError;
use crate::domain::User;
use crate::store::{EntityStore, StoreError};
use crate::validation::rules::validate_user;
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- User Service

/// 사용자 서비스
pub struct UserService {
    store: Arc<dyn EntityStore<User>>,
}

impl UserService {
    pub fn new(store: Arc<dyn EntityStore<User>>) -> Self {
        UserService { store }
    }

    pub async fn insert(&self, user: User) -> Result<User, ServiceError> {
        let report = validate_user(&user);
        if !report.is_valid() {
            warn!("{:<12} --> 사용자 등록 거절: {}", "UserService", report);
            return Err(ServiceError::Rejected(report));
        }
        let stored = self.store.insert(user).await?;
        info!("{:<12} --> 사용자 등록: id {}", "UserService", stored.id);
        Ok(stored)
    }

    pub async fn update(&self, user: User) -> Result<User, ServiceError> {
        let report = validate_user(&user);
        if !report.is_valid() {
            warn!("{:<12} --> 사용자 수정 거절: {}", "UserService", report);
            return Err(ServiceError::Rejected(report));
        }
        match self.store.update(user).await {
            Ok(stored) => {
                info!("{:<12} --> 사용자 수정: id {}", "UserService", stored.id);
                Ok(stored)
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 사용자 수정 거절: 없는 id {}", "UserService", id);
                Err(ServiceError::rejected_on("Id", "user does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn delete(&self, user: &User) -> Result<(), ServiceError> {
        match self.store.delete(user).await {
            Ok(()) => {
                info!("{:<12} --> 사용자 삭제: id {}", "UserService", user.id);
                Ok(())
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 사용자 삭제 거절: 없는 id {}", "UserService", id);
                Err(ServiceError::rejected_on("Id", "user does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>, ServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.store.get_all().await?)
    }
}

// endregion: --- User Service

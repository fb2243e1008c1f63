// region:    --- Imports
use crate::config::AppConfig;
use crate::domain::{Auction, Category, Product, User, UserScore, UserSuspension};
use crate::reputation::ReputationEngine;
use crate::store::{MemoryStore, StoreError};
use crate::validation::ValidationReport;
use std::sync::Arc;
use thiserror::Error;

pub mod auctions;
pub mod catalog;
pub mod reputation;
pub mod users;

pub use auctions::AuctionService;
pub use catalog::{CategoryService, ProductService};
pub use reputation::{ScoreService, SuspensionService};
pub use users::UserService;
// endregion: --- Imports

// region:    --- Service Errors

/// 서비스 계층 결과
/// 거절이면 위반 목록 전체가 담기고, 저장소 오류는 그대로 전파된다
/// 거절된 요청은 저장소에 아무것도 쓰지 않는다
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("검증 실패: {0}")]
    Rejected(ValidationReport),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// 단일 필드 거절 만들기
    pub fn rejected_on(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut report = ValidationReport::new();
        report.push(field, message);
        ServiceError::Rejected(report)
    }

    /// 거절이면 위반 목록 꺼내기
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ServiceError::Rejected(report) => Some(report),
            ServiceError::Store(_) => None,
        }
    }
}

// endregion: --- Service Errors

// region:    --- Service Manager

/// 서비스 전체를 생성자 주입으로 한 번에 조립하는 매니저
pub struct ServiceManager {
    pub users: UserService,
    pub categories: CategoryService,
    pub products: ProductService,
    pub auctions: AuctionService,
    pub scores: ScoreService,
    pub suspensions: SuspensionService,
    pub reputation: Arc<ReputationEngine>,
}

impl ServiceManager {
    pub fn new(config: AppConfig) -> Self {
        let users: Arc<MemoryStore<User>> = Arc::new(MemoryStore::new());
        let categories: Arc<MemoryStore<Category>> = Arc::new(MemoryStore::new());
        let products: Arc<MemoryStore<Product>> = Arc::new(MemoryStore::new());
        let auctions: Arc<MemoryStore<Auction>> = Arc::new(MemoryStore::new());
        let scores: Arc<MemoryStore<UserScore>> = Arc::new(MemoryStore::new());
        let suspensions: Arc<MemoryStore<UserSuspension>> = Arc::new(MemoryStore::new());

        let reputation = Arc::new(ReputationEngine::new(
            config.clone(),
            scores.clone(),
            suspensions.clone(),
        ));

        ServiceManager {
            users: UserService::new(users),
            categories: CategoryService::new(categories),
            products: ProductService::new(products),
            auctions: AuctionService::new(config, auctions, Arc::clone(&reputation)),
            scores: ScoreService::new(scores, Arc::clone(&reputation)),
            suspensions: SuspensionService::new(suspensions),
            reputation,
        }
    }
}

// endregion: --- Service Manager

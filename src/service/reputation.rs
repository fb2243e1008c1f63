// region:    --- Imports
use super::ServiceError;
use crate::domain::{UserScore, UserSuspension};
use crate::reputation::ReputationEngine;
use crate::store::{EntityStore, StoreError};
use crate::validation::rules::{suspension_add_rules, validate_score, validate_suspension};
use crate::validation::run_rules;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Score Service

/// 평가 점수 서비스
/// 점수가 기록되면 평판 엔진이 대상 사용자를 재평가한다
pub struct ScoreService {
    store: Arc<dyn EntityStore<UserScore>>,
    engine: Arc<ReputationEngine>,
}

impl ScoreService {
    pub fn new(store: Arc<dyn EntityStore<UserScore>>, engine: Arc<ReputationEngine>) -> Self {
        ScoreService { store, engine }
    }

    pub async fn insert(&self, score: UserScore) -> Result<UserScore, ServiceError> {
        let report = validate_score(&score);
        if !report.is_valid() {
            warn!("{:<12} --> 점수 기록 거절: {}", "ScoreSvc", report);
            return Err(ServiceError::Rejected(report));
        }
        let stored = self.store.insert(score).await?;
        info!(
            "{:<12} --> 점수 기록: id {}, 점수 {}",
            "ScoreSvc", stored.id, stored.score
        );
        if let Some(scored) = &stored.scored_user {
            self.engine.review(scored).await?;
        }
        Ok(stored)
    }

    pub async fn update(&self, score: UserScore) -> Result<UserScore, ServiceError> {
        let report = validate_score(&score);
        if !report.is_valid() {
            warn!("{:<12} --> 점수 수정 거절: {}", "ScoreSvc", report);
            return Err(ServiceError::Rejected(report));
        }
        match self.store.update(score).await {
            Ok(stored) => {
                info!("{:<12} --> 점수 수정: id {}", "ScoreSvc", stored.id);
                Ok(stored)
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 점수 수정 거절: 없는 id {}", "ScoreSvc", id);
                Err(ServiceError::rejected_on("Id", "user score does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn delete(&self, score: &UserScore) -> Result<(), ServiceError> {
        match self.store.delete(score).await {
            Ok(()) => {
                info!("{:<12} --> 점수 삭제: id {}", "ScoreSvc", score.id);
                Ok(())
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 점수 삭제 거절: 없는 id {}", "ScoreSvc", id);
                Err(ServiceError::rejected_on("Id", "user score does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<UserScore>, ServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<UserScore>, ServiceError> {
        Ok(self.store.get_all().await?)
    }
}

// endregion: --- Score Service

// region:    --- Suspension Service

/// 사용자 정지 서비스
/// 외부 등록은 시작일이 미래라야 하고, 평판 엔진이 만드는 정지는 즉시 시작한다
pub struct SuspensionService {
    store: Arc<dyn EntityStore<UserSuspension>>,
}

impl SuspensionService {
    pub fn new(store: Arc<dyn EntityStore<UserSuspension>>) -> Self {
        SuspensionService { store }
    }

    pub async fn insert(&self, suspension: UserSuspension) -> Result<UserSuspension, ServiceError> {
        let now = Utc::now();
        let mut report = validate_suspension(&suspension);
        report.merge(run_rules(&suspension, &suspension_add_rules(now)));
        if !report.is_valid() {
            warn!("{:<12} --> 정지 등록 거절: {}", "SuspensionSvc", report);
            return Err(ServiceError::Rejected(report));
        }
        let stored = self.store.insert(suspension).await?;
        info!("{:<12} --> 정지 등록: id {}", "SuspensionSvc", stored.id);
        Ok(stored)
    }

    pub async fn update(&self, suspension: UserSuspension) -> Result<UserSuspension, ServiceError> {
        let report = validate_suspension(&suspension);
        if !report.is_valid() {
            warn!("{:<12} --> 정지 수정 거절: {}", "SuspensionSvc", report);
            return Err(ServiceError::Rejected(report));
        }
        match self.store.update(suspension).await {
            Ok(stored) => {
                info!("{:<12} --> 정지 수정: id {}", "SuspensionSvc", stored.id);
                Ok(stored)
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 정지 수정 거절: 없는 id {}", "SuspensionSvc", id);
                Err(ServiceError::rejected_on("Id", "user suspension does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn delete(&self, suspension: &UserSuspension) -> Result<(), ServiceError> {
        match self.store.delete(suspension).await {
            Ok(()) => {
                info!("{:<12} --> 정지 삭제: id {}", "SuspensionSvc", suspension.id);
                Ok(())
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 정지 삭제 거절: 없는 id {}", "SuspensionSvc", id);
                Err(ServiceError::rejected_on("Id", "user suspension does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<UserSuspension>, ServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<UserSuspension>, ServiceError> {
        Ok(self.store.get_all().await?)
    }
}

// endregion: --- Suspension Service

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{Roles, User};
    use crate::store::MemoryStore;
    use chrono::Duration;

    fn user_with_id(id: i64, name: &str) -> User {
        let mut user = User::new(name, Roles::both());
        user.id = id;
        user
    }

    fn score_setup() -> (Arc<MemoryStore<UserSuspension>>, ScoreService) {
        let scores: Arc<MemoryStore<UserScore>> = Arc::new(MemoryStore::new());
        let suspensions: Arc<MemoryStore<UserSuspension>> = Arc::new(MemoryStore::new());
        let engine = Arc::new(ReputationEngine::new(
            AppConfig::default(),
            scores.clone(),
            suspensions.clone(),
        ));
        (suspensions, ScoreService::new(scores, engine))
    }

    #[tokio::test]
    async fn low_score_triggers_exactly_one_suspension() {
        let (suspensions, service) = score_setup();
        let scored = user_with_id(1, "김입찰");
        service
            .insert(UserScore::new(user_with_id(2, "박판매"), scored, 6))
            .await
            .unwrap();
        let created = suspensions.get_all().await.unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(
            created[0].end_date - created[0].start_date,
            Duration::days(AppConfig::default().suspension_days)
        );
    }

    #[tokio::test]
    async fn good_score_triggers_no_suspension() {
        let (suspensions, service) = score_setup();
        service
            .insert(UserScore::new(
                user_with_id(2, "박판매"),
                user_with_id(1, "김입찰"),
                10,
            ))
            .await
            .unwrap();
        assert!(suspensions.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected_without_write() {
        let (suspensions, service) = score_setup();
        let error = service
            .insert(UserScore::new(
                user_with_id(2, "박판매"),
                user_with_id(1, "김입찰"),
                11,
            ))
            .await
            .unwrap_err();
        assert!(error.report().is_some());
        assert!(service.get_all().await.unwrap().is_empty());
        assert!(suspensions.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn manual_suspension_must_start_in_the_future() {
        let service = SuspensionService::new(Arc::new(MemoryStore::new()));
        let now = Utc::now();
        let error = service
            .insert(UserSuspension::new(
                user_with_id(1, "김입찰"),
                now - Duration::hours(1),
                now + Duration::days(7),
            ))
            .await
            .unwrap_err();
        let report = error.report().expect("rejection expected");
        assert!(report.violations.iter().any(|violation| {
            violation.field == "StartDate"
                && violation.message == "start date must be in the future"
        }));

        service
            .insert(UserSuspension::new(
                user_with_id(1, "김입찰"),
                now + Duration::days(1),
                now + Duration::days(8),
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_skips_the_future_start_rule() {
        let service = SuspensionService::new(Arc::new(MemoryStore::new()));
        let now = Utc::now();
        let stored = service
            .insert(UserSuspension::new(
                user_with_id(1, "김입찰"),
                now + Duration::days(1),
                now + Duration::days(8),
            ))
            .await
            .unwrap();

        let mut moved = stored.clone();
        moved.start_date = now - Duration::days(1);
        service.update(moved).await.unwrap();
    }
}

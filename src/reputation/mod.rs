// region:    --- Imports
use crate::config::AppConfig;
use crate::domain::{User, UserScore, UserSuspension};
use crate::store::{EntityStore, StoreError};
use chrono::{DateTime, Duration, Months, Utc};
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region:    --- Median

/// 점수 목록의 중앙값(짝수 개면 가운데 두 값의 평균)
pub fn median(scores: &[i32]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid] as f64)
    } else {
        Some((sorted[mid - 1] + sorted[mid]) as f64 / 2.0)
    }
}

fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(3))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

// endregion: --- Median

// region:    --- Reputation Engine

/// 평판 엔진
/// 최근 3개월 동안 받은 점수의 중앙값으로 신뢰도를 계산하고 정지를 결정한다
pub struct ReputationEngine {
    config: AppConfig,
    scores: Arc<dyn EntityStore<UserScore>>,
    suspensions: Arc<dyn EntityStore<UserSuspension>>,
}

impl ReputationEngine {
    pub fn new(
        config: AppConfig,
        scores: Arc<dyn EntityStore<UserScore>>,
        suspensions: Arc<dyn EntityStore<UserSuspension>>,
    ) -> Self {
        ReputationEngine {
            config,
            scores,
            suspensions,
        }
    }

    /// 신뢰도 점수(받은 점수가 없으면 설정된 기본값)
    pub async fn seriousness_score(&self, user_id: i64) -> Result<f64, StoreError> {
        let since = window_start(Utc::now());
        let received = self
            .scores
            .query(Some(&move |score: &UserScore| {
                score.scored_user.as_ref().map(|scored| scored.id) == Some(user_id)
                    && score.date > since
            }))
            .await?;
        let values: Vec<i32> = received.iter().map(|score| score.score).collect();
        Ok(median(&values).unwrap_or(self.config.default_score as f64))
    }

    /// 점수가 기록된 뒤 호출되어 정지 여부를 재평가
    /// 기준 미만이면 지금부터 설정된 일수만큼의 정지를 만든다
    pub async fn review(&self, user: &User) -> Result<Option<UserSuspension>, StoreError> {
        let score = self.seriousness_score(user.id).await?;
        if score >= self.config.minimum_score as f64 {
            return Ok(None);
        }
        let now = Utc::now();
        let suspension = UserSuspension::new(
            user.clone(),
            now,
            now + Duration::days(self.config.suspension_days),
        );
        let stored = self.suspensions.insert(suspension).await?;
        info!(
            "{:<12} --> 사용자 정지: id {}, 점수 {:.1}, {}일",
            "Reputation", user.id, score, self.config.suspension_days
        );
        Ok(Some(stored))
    }

    /// 현재 정지 중인지 검사(사용자가 없으면 조회 없이 false)
    pub async fn is_suspended(&self, user: Option<&User>) -> Result<bool, StoreError> {
        let user = match user {
            Some(user) => user,
            None => return Ok(false),
        };
        let now = Utc::now();
        let user_id = user.id;
        let active = self
            .suspensions
            .query(Some(&move |suspension: &UserSuspension| {
                suspension.user.as_ref().map(|suspended| suspended.id) == Some(user_id)
                    && suspension.covers(now)
            }))
            .await?;
        Ok(!active.is_empty())
    }

    /// 사용자가 받은 점수 목록
    pub async fn scores_received(&self, user_id: i64) -> Result<Vec<UserScore>, StoreError> {
        self.scores
            .query(Some(&move |score: &UserScore| {
                score.scored_user.as_ref().map(|scored| scored.id) == Some(user_id)
            }))
            .await
    }

    /// 사용자가 준 점수 목록
    pub async fn scores_given(&self, user_id: i64) -> Result<Vec<UserScore>, StoreError> {
        self.scores
            .query(Some(&move |score: &UserScore| {
                score.scoring_user.as_ref().map(|scoring| scoring.id) == Some(user_id)
            }))
            .await
    }

    /// 사용자의 정지 이력
    pub async fn suspensions_of(&self, user_id: i64) -> Result<Vec<UserSuspension>, StoreError> {
        self.suspensions
            .query(Some(&move |suspension: &UserSuspension| {
                suspension.user.as_ref().map(|suspended| suspended.id) == Some(user_id)
            }))
            .await
    }
}

// endregion: --- Reputation Engine

use super::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 사용자 간 평가 점수
// scoring_user가 scored_user에게 준 점수 한 건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserScore {
    pub id: i64,
    pub scoring_user: Option<User>,
    pub scored_user: Option<User>,
    pub score: i32,
    pub date: DateTime<Utc>,
}

impl UserScore {
    pub fn new(scoring_user: User, scored_user: User, score: i32) -> Self {
        UserScore {
            id: 0,
            scoring_user: Some(scoring_user),
            scored_user: Some(scored_user),
            score,
            date: Utc::now(),
        }
    }
}

// 사용자 정지 구간
// [start_date, end_date] 사이에 현재 시각이 들어오면 정지 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSuspension {
    pub id: i64,
    pub user: Option<User>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl UserSuspension {
    pub fn new(user: User, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        UserSuspension {
            id: 0,
            user: Some(user),
            start_date,
            end_date,
        }
    }

    /// 주어진 시각이 정지 구간 안인지 검사(경계 포함)
    pub fn covers(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at <= self.end_date
    }
}

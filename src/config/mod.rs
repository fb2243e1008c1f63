use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

// 운영 설정
// 환경 변수로 조정하고, 없으면 기본값을 사용한다
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 판매자 한 명이 동시에 열 수 있는 경매 수
    pub max_active_auctions: usize,
    /// 받은 점수가 없는 사용자의 기본 평판
    pub default_score: i32,
    /// 이 값 미만으로 평판이 떨어지면 정지
    pub minimum_score: i32,
    /// 정지 기간(일)
    pub suspension_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            max_active_auctions: 5,
            default_score: 10,
            minimum_score: 7,
            suspension_days: 7,
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 설정 읽기
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            max_active_auctions: env_parse("AUCTION_MAX_ACTIVE", defaults.max_active_auctions),
            default_score: env_parse("AUCTION_DEFAULT_SCORE", defaults.default_score),
            minimum_score: env_parse("AUCTION_MINIMUM_SCORE", defaults.minimum_score),
            suspension_days: env_parse("AUCTION_SUSPENSION_DAYS", defaults.suspension_days),
        }
    }
}

fn env_parse<T: FromStr + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("{:<12} --> {} 값 해석 실패, 기본값 사용: {}", "Config", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

use serde::{Deserialize, Serialize};

// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Offerer,
    Bidder,
}

// 역할 집합(판매자/입찰자 조합)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    pub offerer: bool,
    pub bidder: bool,
}

impl Roles {
    pub fn offerer_only() -> Self {
        Roles { offerer: true, bidder: false }
    }

    pub fn bidder_only() -> Self {
        Roles { offerer: false, bidder: true }
    }

    pub fn both() -> Self {
        Roles { offerer: true, bidder: true }
    }

    /// 역할 보유 여부
    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Offerer => self.offerer,
            Role::Bidder => self.bidder,
        }
    }

    /// 아무 역할도 없는 조합 여부
    pub fn is_empty(&self) -> bool {
        !self.offerer && !self.bidder
    }
}

// 사용자 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub roles: Roles,
}

impl User {
    /// 새 사용자(식별자는 저장 시 부여)
    pub fn new(name: impl Into<String>, roles: Roles) -> Self {
        User {
            id: 0,
            name: name.into(),
            roles,
        }
    }
}

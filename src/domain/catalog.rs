use super::user::User;
use serde::{Deserialize, Serialize};

// 카테고리 모델
// 부모/자식은 식별자 참조로 이어진 다대다 그래프이며, 순환 방지는 호출자 책임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub children: Vec<i64>,
    pub products: Vec<i64>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: 0,
            name: name.into(),
            children: Vec::new(),
            products: Vec::new(),
        }
    }
}

// 상품 모델
// offerer / category 는 영속 계층이 채워 주는 내비게이션 객체라 비어 있을 수 있다
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub offerer: Option<User>,
    pub name: String,
    pub description: String,
    pub category: Option<Category>,
}

impl Product {
    pub fn new(
        offerer: User,
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        Product {
            id: 0,
            offerer: Some(offerer),
            name: name.into(),
            description: description.into(),
            category: Some(category),
        }
    }
}

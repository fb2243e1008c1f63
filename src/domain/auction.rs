use super::catalog::Product;
use super::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// 통화
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Euro,
    Dollar,
    Ron,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Euro => write!(f, "EUR"),
            Currency::Dollar => write!(f, "USD"),
            Currency::Ron => write!(f, "RON"),
        }
    }
}

// 시각 기준으로 유도되는 경매 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionPhase {
    NotStarted,
    Active,
    Finished,
}

// 경매 모델
// 상품과 입찰 이력을 함께 소유하며, 입찰 이력은 삽입 순서가 곧 시간 순서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    pub id: i64,
    pub product: Option<Product>,
    pub currency: Currency,
    pub start_price: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub finished: bool,
    pub bids: Vec<Bid>,
}

impl Auction {
    pub fn new(
        product: Product,
        currency: Currency,
        start_price: f64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Auction {
            id: 0,
            product: Some(product),
            currency,
            start_price,
            start_time,
            end_time,
            finished: false,
            bids: Vec::new(),
        }
    }

    /// 기준 가격(마지막 입찰가, 입찰이 없으면 시작가)
    pub fn reference_price(&self) -> f64 {
        self.bids.last().map(|bid| bid.price).unwrap_or(self.start_price)
    }

    /// 경매 상품의 판매자
    pub fn offerer(&self) -> Option<&User> {
        self.product.as_ref().and_then(|product| product.offerer.as_ref())
    }

    pub fn offerer_id(&self) -> Option<i64> {
        self.offerer().map(|user| user.id)
    }

    pub fn product_id(&self) -> Option<i64> {
        self.product.as_ref().map(|product| product.id)
    }

    /// 현재 시각 기준 경매 단계(종료 시각부터는 Finished)
    pub fn phase(&self, now: DateTime<Utc>) -> AuctionPhase {
        if now < self.start_time {
            AuctionPhase::NotStarted
        } else if now < self.end_time {
            AuctionPhase::Active
        } else {
            AuctionPhase::Finished
        }
    }
}

// 입찰 모델
// 수락된 뒤에는 변경되지 않는다
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: i64,
    pub auction_id: i64,
    pub bidder: Option<User>,
    pub price: f64,
    pub currency: Currency,
    pub placed_at: DateTime<Utc>,
}

impl Bid {
    pub fn new(auction_id: i64, bidder: User, price: f64, currency: Currency) -> Self {
        Bid {
            id: 0,
            auction_id,
            bidder: Some(bidder),
            price,
            currency,
            placed_at: Utc::now(),
        }
    }
}

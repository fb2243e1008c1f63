// region:    --- Imports
use super::ServiceError;
use crate::config::AppConfig;
use crate::domain::{Auction, AuctionPhase, Bid};
use crate::reputation::ReputationEngine;
use crate::similarity::near_duplicate;
use crate::store::{EntityStore, StoreError};
use crate::validation::auction::validate_auction;
use crate::validation::bidding::validate_bid;
use crate::validation::ValidationReport;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Auction Service

/// 경매 서비스
/// 기본 규칙에 더해 등록/수정 시점의 부가 규칙과 입찰 수락을 맡는다
pub struct AuctionService {
    config: AppConfig,
    store: Arc<dyn EntityStore<Auction>>,
    reputation: Arc<ReputationEngine>,
}

impl AuctionService {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn EntityStore<Auction>>,
        reputation: Arc<ReputationEngine>,
    ) -> Self {
        AuctionService {
            config,
            store,
            reputation,
        }
    }

    /// 경매 등록
    /// 과거 시작, 판매자 동시 경매 한도, 판매자 정지, 설명 중복, 상품 중복을 추가로 본다
    pub async fn insert(&self, auction: Auction) -> Result<Auction, ServiceError> {
        let now = Utc::now();
        let mut report = validate_auction(&auction, now);

        if auction.start_time < now {
            report.push("StartTime", "start time can't be in the past");
        }
        self.check_offerer_load(&auction, &mut report).await?;
        self.check_duplicate_description(&auction, &mut report).await?;
        self.check_product_is_free(&auction, &mut report).await?;

        if !report.is_valid() {
            warn!("{:<12} --> 경매 등록 거절: {}", "AuctionSvc", report);
            return Err(ServiceError::Rejected(report));
        }
        let stored = self.store.insert(auction).await?;
        info!("{:<12} --> 경매 등록: id {}", "AuctionSvc", stored.id);
        Ok(stored)
    }

    /// 경매 수정
    /// 없는 id는 거절, 이미 입찰이 붙었으면 통화를 바꿀 수 없다
    pub async fn update(&self, auction: Auction) -> Result<Auction, ServiceError> {
        let now = Utc::now();
        let existing = match self.store.get_by_id(auction.id).await? {
            Some(existing) => existing,
            None => {
                warn!("{:<12} --> 경매 수정 거절: 없는 id {}", "AuctionSvc", auction.id);
                return Err(ServiceError::rejected_on("Id", "auction does not exist"));
            }
        };

        let mut report = validate_auction(&auction, now);
        if auction.currency != existing.currency && !existing.bids.is_empty() {
            report.push(
                "Currency",
                "currency can't change once bids were placed in another currency",
            );
        }
        if !report.is_valid() {
            warn!("{:<12} --> 경매 수정 거절: {}", "AuctionSvc", report);
            return Err(ServiceError::Rejected(report));
        }
        let stored = self.store.update(auction).await?;
        info!("{:<12} --> 경매 수정: id {}", "AuctionSvc", stored.id);
        Ok(stored)
    }

    pub async fn delete(&self, auction: &Auction) -> Result<(), ServiceError> {
        match self.store.delete(auction).await {
            Ok(()) => {
                info!("{:<12} --> 경매 삭제: id {}", "AuctionSvc", auction.id);
                Ok(())
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 경매 삭제 거절: 없는 id {}", "AuctionSvc", id);
                Err(ServiceError::rejected_on("Id", "auction does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Auction>, ServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<Auction>, ServiceError> {
        Ok(self.store.get_all().await?)
    }

    /// 판매자의 경매 목록
    pub async fn auctions_of(&self, offerer_id: i64) -> Result<Vec<Auction>, ServiceError> {
        let rows = self
            .store
            .query(Some(&move |auction: &Auction| {
                auction.offerer_id() == Some(offerer_id)
            }))
            .await?;
        Ok(rows)
    }

    /// 입찰자가 넣은 입찰 목록(경매 이력에서 유도)
    pub async fn bids_of(&self, bidder_id: i64) -> Result<Vec<Bid>, ServiceError> {
        let auctions = self.store.get_all().await?;
        let mut bids = Vec::new();
        for auction in auctions {
            for bid in auction.bids {
                if bid.bidder.as_ref().map(|bidder| bidder.id) == Some(bidder_id) {
                    bids.push(bid);
                }
            }
        }
        Ok(bids)
    }

    /// 입찰 수락
    /// 진행 중인 경매에서 규칙을 모두 통과하면 이력에 붙이고 갱신된 경매를 돌려준다
    pub async fn place_bid(&self, mut bid: Bid) -> Result<Auction, ServiceError> {
        let now = Utc::now();
        let mut auction = match self.store.get_by_id(bid.auction_id).await? {
            Some(auction) => auction,
            None => {
                warn!("{:<12} --> 입찰 거절: 없는 경매 id {}", "AuctionSvc", bid.auction_id);
                return Err(ServiceError::rejected_on("Auction", "auction does not exist"));
            }
        };

        match auction.phase(now) {
            AuctionPhase::NotStarted => {
                warn!("{:<12} --> 입찰 거절: 시작 전, 경매 id {}", "AuctionSvc", auction.id);
                return Err(ServiceError::rejected_on("Auction", "auction has not started yet"));
            }
            AuctionPhase::Finished => {
                warn!("{:<12} --> 입찰 거절: 이미 종료, 경매 id {}", "AuctionSvc", auction.id);
                return Err(ServiceError::rejected_on("Auction", "auction has already ended"));
            }
            AuctionPhase::Active => {
                if auction.finished {
                    warn!("{:<12} --> 입찰 거절: 이미 종료, 경매 id {}", "AuctionSvc", auction.id);
                    return Err(ServiceError::rejected_on("Auction", "auction has already ended"));
                }
            }
        }

        let report = validate_bid(&auction, &bid);
        if !report.is_valid() {
            warn!("{:<12} --> 입찰 거절: {}", "AuctionSvc", report);
            return Err(ServiceError::Rejected(report));
        }

        bid.id = auction.bids.last().map(|last| last.id + 1).unwrap_or(1);
        bid.placed_at = now;
        auction.bids.push(bid);
        let stored = self.store.update(auction).await?;
        info!(
            "{:<12} --> 입찰 수락: 경매 id {}, 가격 {} {}",
            "AuctionSvc",
            stored.id,
            stored.reference_price(),
            stored.currency
        );
        Ok(stored)
    }

    /// 판매자의 동시 경매 한도와 정지 여부 검사
    async fn check_offerer_load(
        &self,
        auction: &Auction,
        report: &mut ValidationReport,
    ) -> Result<(), StoreError> {
        let offerer_id = match auction.offerer_id() {
            Some(id) => id,
            // 판매자 없음은 기본 규칙이 이미 잡는다
            None => return Ok(()),
        };
        let open = self
            .store
            .query(Some(&move |candidate: &Auction| {
                candidate.offerer_id() == Some(offerer_id) && !candidate.finished
            }))
            .await?;
        if open.len() >= self.config.max_active_auctions {
            report.push("Offerer", "offerer has too many active auctions");
        }
        if self.reputation.is_suspended(auction.offerer()).await? {
            report.push("Offerer", "offerer is currently suspended");
        }
        Ok(())
    }

    /// 같은 판매자의 기존 상품 설명과 너무 비슷한지 검사
    async fn check_duplicate_description(
        &self,
        auction: &Auction,
        report: &mut ValidationReport,
    ) -> Result<(), StoreError> {
        let (offerer_id, description) = match (auction.offerer_id(), &auction.product) {
            (Some(id), Some(product)) => (id, product.description.clone()),
            _ => return Ok(()),
        };
        let candidate_id = auction.id;
        let own = self
            .store
            .query(Some(&move |candidate: &Auction| {
                candidate.id != candidate_id && candidate.offerer_id() == Some(offerer_id)
            }))
            .await?;
        for candidate in own {
            if let Some(product) = &candidate.product {
                if near_duplicate(&description, &product.description) {
                    report.push(
                        "Product.Description",
                        "description is too similar to another product offered by the same user",
                    );
                    break;
                }
            }
        }
        Ok(())
    }

    /// 상품이 이미 다른 경매에 붙어 있는지 검사(상품과 경매는 1:1)
    async fn check_product_is_free(
        &self,
        auction: &Auction,
        report: &mut ValidationReport,
    ) -> Result<(), StoreError> {
        let product_id = match auction.product_id() {
            // 아직 저장되지 않은 상품(id 0)은 어디에도 붙어 있지 않다
            Some(id) if id != 0 => id,
            _ => return Ok(()),
        };
        let auction_id = auction.id;
        let taken = self
            .store
            .query(Some(&move |candidate: &Auction| {
                candidate.id != auction_id && candidate.product_id() == Some(product_id)
            }))
            .await?;
        if !taken.is_empty() {
            report.push("Product", "product is already attached to another auction");
        }
        Ok(())
    }
}

// endregion: --- Auction Service

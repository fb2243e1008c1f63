// region:    --- Imports
use crate::config::AppConfig;
use crate::domain::{Auction, Bid, Category, Currency, Product, Roles, User, UserScore};
use crate::service::ServiceManager;
use chrono::{Duration, Utc};
use tracing::info;
// endregion: --- Imports

// region:    --- Modules
mod config;
mod domain;
mod reputation;
mod service;
mod similarity;
mod store;
mod validation;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정과 서비스 조립
    let config = AppConfig::from_env();
    info!("{:<12} --> 설정: {:?}", "Main", config);
    let services = ServiceManager::new(config);

    // 사용자 등록
    let seller = services
        .users
        .insert(User::new("박판매", Roles::offerer_only()))
        .await?;
    let bidder_one = services
        .users
        .insert(User::new("김입찰", Roles::bidder_only()))
        .await?;
    let bidder_two = services
        .users
        .insert(User::new("이경매", Roles::both()))
        .await?;

    // 카테고리와 상품 등록
    let cameras = services.categories.insert(Category::new("카메라")).await?;
    let product = services
        .products
        .insert(Product::new(
            seller.clone(),
            "낡은 필름 카메라",
            "1970년대 필름 카메라, 셔터 작동 확인됨",
            cameras.clone(),
        ))
        .await?;

    // 경매 등록(시작은 1시간 뒤)
    let now = Utc::now();
    let auction = services
        .auctions
        .insert(Auction::new(
            product,
            Currency::Euro,
            10.5,
            now + Duration::hours(1),
            now + Duration::days(3),
        ))
        .await?;

    // 시작 시각을 과거로 당겨 바로 진행 중으로 만든다
    let mut active = auction.clone();
    active.start_time = now - Duration::hours(1);
    let active = services.auctions.update(active).await?;

    // 정상 입찰
    let auction = services
        .auctions
        .place_bid(Bid::new(active.id, bidder_one.clone(), 11.5, Currency::Euro))
        .await?;
    info!(
        "{:<12} --> 현재 기준 가격: {} {}",
        "Main",
        auction.reference_price(),
        auction.currency
    );

    // 기준 가격보다 낮은 입찰
    if let Err(error) = services
        .auctions
        .place_bid(Bid::new(active.id, bidder_two.clone(), 9.5, Currency::Euro))
        .await
    {
        info!("{:<12} --> 거절: {}", "Main", error);
    }

    // 3배 한도를 넘는 입찰
    if let Err(error) = services
        .auctions
        .place_bid(Bid::new(active.id, bidder_two.clone(), 10000.5, Currency::Euro))
        .await
    {
        info!("{:<12} --> 거절: {}", "Main", error);
    }

    // 통화가 다른 입찰
    if let Err(error) = services
        .auctions
        .place_bid(Bid::new(active.id, bidder_two.clone(), 12.5, Currency::Dollar))
        .await
    {
        info!("{:<12} --> 거절: {}", "Main", error);
    }

    // 같은 판매자가 비슷한 설명의 상품을 또 올리면 거절된다
    let duplicate = Product::new(
        seller.clone(),
        "낡은 필름 카메라 2",
        "1970년대 필름 카메라, 셔터 작동 확인됩니다",
        cameras.clone(),
    );
    if let Err(error) = services
        .auctions
        .insert(Auction::new(
            duplicate,
            Currency::Euro,
            8.0,
            now + Duration::hours(2),
            now + Duration::days(4),
        ))
        .await
    {
        info!("{:<12} --> 거절: {}", "Main", error);
        if let Some(report) = error.report() {
            info!("{:<12} --> 위반 목록: {}", "Main", serde_json::to_string(report)?);
        }
    }

    // 낮은 평가가 쌓이면 평판 엔진이 판매자를 정지시킨다
    services
        .scores
        .insert(UserScore::new(bidder_one.clone(), seller.clone(), 6))
        .await?;
    let score = services.reputation.seriousness_score(seller.id).await?;
    info!("{:<12} --> 판매자 신뢰도: {:.1}", "Main", score);
    if services.reputation.is_suspended(Some(&seller)).await? {
        info!("{:<12} --> 판매자 정지 중", "Main");
    }

    // 정지된 판매자는 새 경매를 올릴 수 없다
    let blocked = Product::new(
        seller.clone(),
        "중고 렌즈",
        "수동 초점 렌즈, 긁힘 없음",
        cameras,
    );
    if let Err(error) = services
        .auctions
        .insert(Auction::new(
            blocked,
            Currency::Euro,
            5.0,
            now + Duration::hours(2),
            now + Duration::days(4),
        ))
        .await
    {
        info!("{:<12} --> 거절: {}", "Main", error);
    }

    // 요약
    let my_bids = services.auctions.bids_of(bidder_one.id).await?;
    info!("{:<12} --> 김입찰의 입찰 수: {}", "Main", my_bids.len());
    let listings = services.auctions.auctions_of(seller.id).await?;
    info!("{:<12} --> 박판매의 경매 수: {}", "Main", listings.len());

    // 최종 경매 상태를 JSON으로 남긴다
    if let Some(snapshot) = services.auctions.get_by_id(active.id).await? {
        info!(
            "{:<12} --> 경매 스냅샷: {}",
            "Main",
            serde_json::to_string(&snapshot)?
        );
    }

    Ok(())
}
// endregion: --- Main

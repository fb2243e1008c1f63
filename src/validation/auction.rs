// region:    --- Imports
use super::rules::validate_product;
use super::{run_rules, Rule, ValidationReport};
use crate::domain::Auction;
use chrono::{DateTime, Utc};
// endregion: --- Imports

// region:    --- Auction Rules

/// 주어진 시각 기준의 경매 규칙
/// finished 플래그는 종료 시각부터 참이어야 한다(종료 시각 포함)
pub fn auction_rules(now: DateTime<Utc>) -> Vec<Rule<Auction>> {
    vec![
        Rule::new("Product", "product is required", |auction: &Auction| {
            auction.product.is_some()
        }),
        Rule::new(
            "StartPrice",
            "start price must be greater than zero",
            |auction: &Auction| auction.start_price > 0.0 && auction.start_price.is_finite(),
        ),
        Rule::new(
            "EndTime",
            "end time must be after the start time",
            |auction: &Auction| auction.end_time > auction.start_time,
        ),
        Rule::new(
            "Finished",
            "auction can't be finished before its end time",
            move |auction: &Auction| !auction.finished || now >= auction.end_time,
        ),
        Rule::new(
            "Finished",
            "auction must be finished after its end time",
            move |auction: &Auction| auction.finished || now < auction.end_time,
        ),
    ]
}

/// 경매 규칙 검증(내장 상품의 자체 규칙 포함)
pub fn validate_auction(auction: &Auction, now: DateTime<Utc>) -> ValidationReport {
    let mut report = run_rules(auction, &auction_rules(now));
    if let Some(product) = &auction.product {
        report.merge_nested("Product", validate_product(product));
    }
    report
}

// endregion: --- Auction Rules

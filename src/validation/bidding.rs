// region:    --- Imports
use super::rules::validate_user;
use super::{run_rules, Rule, ValidationReport};
use crate::domain::{Auction, Bid, Role};
// endregion: --- Imports

// region:    --- Bid Rules

/// 경매 상태에서 뽑은 입찰 수락 규칙
/// 기준 가격은 마지막 입찰가, 입찰이 없으면 시작가
pub fn bid_rules(auction: &Auction) -> Vec<Rule<Bid>> {
    let reference = auction.reference_price();
    let currency = auction.currency;
    vec![
        Rule::new("Bidder", "bidder is required", |bid: &Bid| {
            bid.bidder.is_some()
        }),
        Rule::new("Bidder.Role", "bidder must have the bidder role", |bid: &Bid| {
            bid.bidder
                .as_ref()
                .map(|bidder| bidder.roles.has(Role::Bidder))
                .unwrap_or(false)
        })
        .when(|bid: &Bid| bid.bidder.is_some()),
        Rule::new(
            "Currency",
            "currency must match the auction currency",
            move |bid: &Bid| bid.currency == currency,
        ),
        Rule::new("Price", "price can't be lower than last price", move |bid: &Bid| {
            bid.price > reference
        }),
        Rule::new(
            "Price",
            "price can't be 300% bigger than last price",
            move |bid: &Bid| bid.price < reference * 3.0,
        ),
    ]
}

/// 입찰 규칙 검증(입찰자의 자체 규칙 포함)
pub fn validate_bid(auction: &Auction, bid: &Bid) -> ValidationReport {
    let mut report = run_rules(bid, &bid_rules(auction));
    if let Some(bidder) = &bid.bidder {
        report.merge_nested("Bidder", validate_user(bidder));
    }
    report
}

// endregion: --- Bid Rules

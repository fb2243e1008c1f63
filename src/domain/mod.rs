/// 도메인 엔티티 모델
pub mod auction;
pub mod catalog;
pub mod score;
pub mod user;

pub use auction::{Auction, AuctionPhase, Bid, Currency};
pub use catalog::{Category, Product};
pub use score::{UserScore, UserSuspension};
pub use user::{Role, Roles, User};

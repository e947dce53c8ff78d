pub mod context;
pub mod iterative;
pub mod referral;

pub use context::ResolutionContext;
pub use iterative::IterativeResolver;
pub use referral::{referral_candidates, NextHop};

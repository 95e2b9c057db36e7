pub mod alert_service;
pub mod leaderboard_service;
pub mod portfolio_service;
pub mod valuation_service;

// ═══════════════════════════════════════════════════════════════════
// Model Tests — Portfolio, Holding, LevelTable, Transaction,
// UserAccount, Alert, ChartSettings, Quote wire shapes
// ═══════════════════════════════════════════════════════════════════

use papertrade_core::models::account::{
    AccountUpdate, Role, UserAccount, WatchlistEntry, HISTORY_CAP,
};
use papertrade_core::models::alert::{Alert, AlertCondition};
use papertrade_core::models::level::{Level, LevelTable};
use papertrade_core::models::portfolio::{Holding, Portfolio, STARTING_CASH};
use papertrade_core::models::quote::{ChangeDirection, MarketIndex, PricePoint, Quote};
use papertrade_core::models::settings::{ChartSettings, LineType};
use papertrade_core::models::transaction::{TradeSide, Transaction};

fn holding(ticker: &str, shares: u32, purchase_price: f64) -> Holding {
    Holding {
        ticker: ticker.to_string(),
        exchange: "NASDAQ".to_string(),
        company_name: format!("{ticker} Inc."),
        shares,
        purchase_price,
        current_value: None,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Portfolio & Holding
// ═══════════════════════════════════════════════════════════════════

mod portfolio {
    use super::*;

    #[test]
    fn new_starts_with_starting_cash() {
        let p = Portfolio::new();
        assert_eq!(p.cash, STARTING_CASH);
        assert_eq!(p.initial_value, STARTING_CASH);
        assert!(p.holdings.is_empty());
    }

    #[test]
    fn default_matches_new() {
        assert_eq!(Portfolio::default(), Portfolio::new());
    }

    #[test]
    fn holding_lookup_matches_ticker_and_exchange() {
        let mut p = Portfolio::new();
        p.holdings.push(holding("AAPL", 10, 150.0));

        assert!(p.holding("AAPL", "NASDAQ").is_some());
        assert!(p.holding("AAPL", "NYSE").is_none());
        assert!(p.holding("MSFT", "NASDAQ").is_none());
    }

    #[test]
    fn holding_mut_finds_same_position() {
        let mut p = Portfolio::new();
        p.holdings.push(holding("AAPL", 10, 150.0));

        p.holding_mut("AAPL", "NASDAQ").unwrap().shares = 25;
        assert_eq!(p.holding("AAPL", "NASDAQ").unwrap().shares, 25);
    }

    #[test]
    fn effective_price_prefers_current_value() {
        let mut h = holding("AAPL", 10, 150.0);
        assert_eq!(h.effective_price(), 150.0);

        h.current_value = Some(175.0);
        assert_eq!(h.effective_price(), 175.0);
    }

    #[test]
    fn market_value_uses_effective_price() {
        let mut h = holding("AAPL", 10, 150.0);
        assert_eq!(h.market_value(), 1500.0);

        h.current_value = Some(200.0);
        assert_eq!(h.market_value(), 2000.0);
    }

    #[test]
    fn holding_deserializes_without_current_value() {
        let json = r#"{
            "ticker": "AAPL",
            "exchange": "NASDAQ",
            "company_name": "Apple Inc.",
            "shares": 5,
            "purchase_price": 190.5
        }"#;
        let h: Holding = serde_json::from_str(json).unwrap();
        assert_eq!(h.current_value, None);
        assert_eq!(h.effective_price(), 190.5);
    }

    #[test]
    fn serde_roundtrip() {
        let mut p = Portfolio::new();
        p.holdings.push(holding("AAPL", 10, 150.0));
        p.holdings[0].current_value = Some(160.0);

        let json = serde_json::to_string(&p).unwrap();
        let back: Portfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  LevelTable
// ═══════════════════════════════════════════════════════════════════

mod level_table {
    use super::*;

    #[test]
    fn default_table_has_five_tiers() {
        let table = LevelTable::default();
        let names: Vec<&str> = table.levels().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Novice", "Apprentice", "Trader", "Investor", "Maestro"]
        );
    }

    #[test]
    fn classify_below_all_thresholds_is_lowest() {
        let table = LevelTable::default();
        assert_eq!(table.classify(-5.0).name, "Novice");
        assert_eq!(table.classify(0.0).name, "Novice");
    }

    #[test]
    fn classify_boundary_is_inclusive() {
        let table = LevelTable::default();
        assert_eq!(table.classify(149_999.0).name, "Apprentice");
        assert_eq!(table.classify(150_000.0).name, "Trader");
    }

    #[test]
    fn classify_middle_values() {
        let table = LevelTable::default();
        assert_eq!(table.classify(109_999.0).name, "Novice");
        assert_eq!(table.classify(110_000.0).name, "Apprentice");
        assert_eq!(table.classify(300_000.0).name, "Investor");
    }

    #[test]
    fn classify_above_all_is_highest() {
        let table = LevelTable::default();
        assert_eq!(table.classify(1_000_000_000.0).name, "Maestro");
    }

    #[test]
    fn promotion_fires_on_crossing_a_threshold() {
        let table = LevelTable::default();
        let event = table.detect_promotion(109_000.0, 111_000.0).unwrap();
        assert_eq!(event.from.name, "Novice");
        assert_eq!(event.to.name, "Apprentice");
    }

    #[test]
    fn promotion_silent_within_a_tier() {
        let table = LevelTable::default();
        assert!(table.detect_promotion(111_000.0, 120_000.0).is_none());
    }

    #[test]
    fn promotion_silent_on_demotion() {
        let table = LevelTable::default();
        assert!(table.detect_promotion(120_000.0, 90_000.0).is_none());
    }

    #[test]
    fn promotion_silent_on_equal_value() {
        let table = LevelTable::default();
        assert!(table.detect_promotion(115_000.0, 115_000.0).is_none());
    }

    #[test]
    fn promotion_can_skip_tiers() {
        let table = LevelTable::default();
        let event = table.detect_promotion(100_000.0, 600_000.0).unwrap();
        assert_eq!(event.from.name, "Novice");
        assert_eq!(event.to.name, "Maestro");
    }

    #[test]
    fn new_rejects_empty_table() {
        assert!(LevelTable::new(Vec::new()).is_err());
    }

    #[test]
    fn new_rejects_descending_thresholds() {
        let levels = vec![
            Level { name: "A".into(), threshold: 100.0 },
            Level { name: "B".into(), threshold: 50.0 },
        ];
        assert!(LevelTable::new(levels).is_err());
    }

    #[test]
    fn new_rejects_equal_thresholds() {
        let levels = vec![
            Level { name: "A".into(), threshold: 100.0 },
            Level { name: "B".into(), threshold: 100.0 },
        ];
        assert!(LevelTable::new(levels).is_err());
    }

    #[test]
    fn custom_table_classifies_against_own_thresholds() {
        let table = LevelTable::new(vec![
            Level { name: "Bronze".into(), threshold: 0.0 },
            Level { name: "Silver".into(), threshold: 10.0 },
            Level { name: "Gold".into(), threshold: 20.0 },
        ])
        .unwrap();
        assert_eq!(table.classify(9.99).name, "Bronze");
        assert_eq!(table.classify(10.0).name, "Silver");
        assert_eq!(table.classify(25.0).name, "Gold");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn gross_amount_is_shares_times_price() {
        let tx = Transaction::new(TradeSide::Buy, "AAPL", "NASDAQ", "Apple Inc.", 10, 150.5);
        assert_eq!(tx.gross_amount(), 1505.0);
    }

    #[test]
    fn side_display() {
        assert_eq!(TradeSide::Buy.to_string(), "buy");
        assert_eq!(TradeSide::Sell.to_string(), "sell");
    }

    #[test]
    fn side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TradeSide::Buy).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&TradeSide::Sell).unwrap(), "\"sell\"");
    }

    #[test]
    fn ids_are_unique() {
        let a = Transaction::new(TradeSide::Buy, "AAPL", "NASDAQ", "Apple Inc.", 1, 1.0);
        let b = Transaction::new(TradeSide::Buy, "AAPL", "NASDAQ", "Apple Inc.", 1, 1.0);
        assert_ne!(a.id, b.id);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  UserAccount
// ═══════════════════════════════════════════════════════════════════

mod user_account {
    use super::*;

    #[test]
    fn new_account_starts_fresh() {
        let account = UserAccount::new("Ada Lovelace", Role::User);
        assert_eq!(account.full_name, "Ada Lovelace");
        assert_eq!(account.portfolio.cash, STARTING_CASH);
        assert!(account.transactions.is_empty());
        assert!(account.watchlist.is_empty());
        assert!(account.analysis_history.is_empty());
        assert!(account.alerts.is_empty());
    }

    #[test]
    fn is_admin() {
        assert!(UserAccount::new("Root", Role::Admin).is_admin());
        assert!(!UserAccount::new("Player", Role::User).is_admin());
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn is_watching_matches_both_fields() {
        let mut account = UserAccount::new("Ada", Role::User);
        account.watchlist.push(WatchlistEntry::new("AAPL", "NASDAQ"));

        assert!(account.is_watching("AAPL", "NASDAQ"));
        assert!(!account.is_watching("AAPL", "NYSE"));
        assert!(!account.is_watching("MSFT", "NASDAQ"));
    }

    #[test]
    fn history_cap_is_twenty() {
        assert_eq!(HISTORY_CAP, 20);
    }

    #[test]
    fn update_applies_only_set_fields() {
        let mut account = UserAccount::new("Ada", Role::User);
        let original_name = account.full_name.clone();

        let mut portfolio = account.portfolio.clone();
        portfolio.cash = 42_000.0;
        let update = AccountUpdate {
            portfolio: Some(portfolio),
            ..AccountUpdate::default()
        };
        update.apply_to(&mut account);

        assert_eq!(account.portfolio.cash, 42_000.0);
        assert_eq!(account.full_name, original_name);
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut account = UserAccount::new("Ada", Role::User);
        let before = account.clone();

        AccountUpdate::default().apply_to(&mut account);
        assert_eq!(account, before);
    }

    #[test]
    fn serde_roundtrip() {
        let mut account = UserAccount::new("Ada", Role::User);
        account.watchlist.push(WatchlistEntry::new("AAPL", "NASDAQ"));
        account.alerts.push(Alert::new("P/E", AlertCondition::Gt, 20.0));

        let json = serde_json::to_string(&account).unwrap();
        let back: UserAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(account, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Alert
// ═══════════════════════════════════════════════════════════════════

mod alert {
    use super::*;

    #[test]
    fn condition_display() {
        assert_eq!(AlertCondition::Gt.to_string(), ">");
        assert_eq!(AlertCondition::Lt.to_string(), "<");
    }

    #[test]
    fn condition_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AlertCondition::Gt).unwrap(), "\"gt\"");
        assert_eq!(serde_json::to_string(&AlertCondition::Lt).unwrap(), "\"lt\"");
    }

    #[test]
    fn new_assigns_unique_ids() {
        let a = Alert::new("P/E", AlertCondition::Gt, 20.0);
        let b = Alert::new("P/E", AlertCondition::Gt, 20.0);
        assert_ne!(a.id, b.id);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ChartSettings
// ═══════════════════════════════════════════════════════════════════

mod chart_settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = ChartSettings::default();
        assert_eq!(s.revenue_color, "#4f46e5");
        assert_eq!(s.profit_color, "#10b981");
        assert_eq!(s.line_type, LineType::Monotone);
        assert!(s.show_grid);
    }

    #[test]
    fn line_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LineType::Step).unwrap(), "\"step\"");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let s: ChartSettings = serde_json::from_str(r#"{"showGrid": false}"#).unwrap();
        assert!(!s.show_grid);
        assert_eq!(s.line_type, LineType::Monotone);
        assert_eq!(s.revenue_color, "#4f46e5");
    }

    #[test]
    fn serde_roundtrip() {
        let s = ChartSettings {
            revenue_color: "#ff0000".into(),
            profit_color: "#00ff00".into(),
            line_type: LineType::Linear,
            show_grid: false,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: ChartSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Quote wire shapes
// ═══════════════════════════════════════════════════════════════════

mod quote_wire {
    use super::*;

    #[test]
    fn quote_deserializes_from_camel_case() {
        let json = r#"{
            "companyName": "Apple Inc.",
            "ticker": "AAPL",
            "exchange": "NASDAQ",
            "price": 212.4,
            "change": -1.2,
            "percentChange": "-0.56%",
            "volume": "48.2M",
            "summary": "Consumer electronics company.",
            "recommendation": "Hold",
            "confidenceScore": 78
        }"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.ticker, "AAPL");
        assert_eq!(quote.price, 212.4);
        assert_eq!(quote.market_cap, None);
        assert_eq!(quote.country, None);
    }

    #[test]
    fn quote_accepts_optional_fields() {
        let json = r#"{
            "companyName": "Sonatel",
            "ticker": "SNTS",
            "exchange": "BRVM",
            "price": 14500.0,
            "change": 100.0,
            "percentChange": "+0.69%",
            "volume": "12.5K",
            "summary": "Telecommunications operator.",
            "recommendation": "Buy",
            "confidenceScore": 82,
            "marketCap": "1.45T",
            "country": "Senegal"
        }"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.market_cap.as_deref(), Some("1.45T"));
        assert_eq!(quote.country.as_deref(), Some("Senegal"));
    }

    #[test]
    fn price_point_parses_iso_dates() {
        let json = r#"[{"date": "2026-07-01", "price": 210.0},
                       {"date": "2026-07-02", "price": 212.5}]"#;
        let points: Vec<PricePoint> = serde_json::from_str(json).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points[0].date < points[1].date);
    }

    #[test]
    fn market_index_maps_change_type() {
        let json = r#"{
            "name": "BRVM Composite",
            "value": "245.18",
            "change": "+1.02",
            "percentChange": "+0.42%",
            "changeType": "positive"
        }"#;
        let index: MarketIndex = serde_json::from_str(json).unwrap();
        assert_eq!(index.direction, ChangeDirection::Positive);
    }
}

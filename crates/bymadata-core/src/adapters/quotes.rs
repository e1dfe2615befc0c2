//! Row mappings for the quote boards: equities, fixed income and derivatives.

use serde_json::{json, Value};

use super::payload::{self, Envelope, Record};
use crate::data_source::{BondBoard, SecurityBoard};
use crate::{Bond, FetchError, FutureContract, OptionContract, Security};

/// Futures are quoted per unit; the exchange contract is 1000 units.
pub(crate) const FUTURES_MULTIPLIER: f64 = 1000.0;

/// Same-day (T+1) settlement, zero-priced rows included.
pub(crate) fn settlement_payload() -> Value {
    json!({
        "excludeZeroPxAndQty": false,
        "T2": false,
        "T1": true,
        "T0": false,
        "Content-Type": "application/json",
    })
}

pub(crate) fn futures_payload() -> Value {
    json!({
        "page_number": 1,
        "excludeZeroPxAndQty": true,
        "Content-Type": "application/json",
    })
}

pub(crate) const fn security_endpoint(board: SecurityBoard) -> (&'static str, Envelope) {
    match board {
        SecurityBoard::Bluechips => ("leading-equity", Envelope::Wrapped),
        SecurityBoard::Galpones => ("general-equity", Envelope::Wrapped),
        SecurityBoard::Cedears => ("cedears", Envelope::Bare),
    }
}

pub(crate) const fn bond_endpoint(board: BondBoard) -> (&'static str, Envelope) {
    match board {
        BondBoard::Government => ("public-bonds", Envelope::Wrapped),
        BondBoard::ShortTerm => ("lebacs", Envelope::Wrapped),
        BondBoard::Corporate => ("negociable-obligations", Envelope::Bare),
    }
}

pub(crate) fn parse_securities(body: &str, envelope: Envelope) -> Result<Vec<Security>, FetchError> {
    Ok(payload::decode_records(body, envelope)?
        .iter()
        .map(security_from)
        .collect())
}

pub(crate) fn parse_bonds(body: &str, envelope: Envelope) -> Result<Vec<Bond>, FetchError> {
    Ok(payload::decode_records(body, envelope)?
        .iter()
        .map(|row| Bond {
            quote: security_from(row),
            expiration: payload::date(row, "maturityDate"),
        })
        .collect())
}

pub(crate) fn parse_options(body: &str) -> Result<Vec<OptionContract>, FetchError> {
    Ok(payload::decode_records(body, Envelope::Bare)?
        .iter()
        .map(|row| OptionContract {
            symbol: payload::string(row, "symbol"),
            bid_size: payload::integer(row, "quantityBid"),
            bid: payload::float(row, "bidPrice"),
            ask: payload::float(row, "offerPrice"),
            ask_size: payload::integer(row, "quantityOffer"),
            last: payload::float(row, "settlementPrice"),
            close: payload::float(row, "closingPrice"),
            change: payload::float(row, "imbalance"),
            open: payload::float(row, "openingPrice"),
            high: payload::float(row, "tradingHighPrice"),
            low: payload::float(row, "tradingLowPrice"),
            previous_close: payload::float(row, "previousClosingPrice"),
            turnover: payload::float(row, "volumeAmount"),
            volume: payload::integer(row, "volume"),
            operations: payload::integer(row, "numberOfOrders"),
            timestamp: payload::trade_time(row, "tradeHour"),
            underlying_asset: payload::string(row, "underlyingSymbol"),
            expiration: payload::date(row, "maturityDate"),
        })
        .collect())
}

pub(crate) fn parse_futures(body: &str) -> Result<Vec<FutureContract>, FetchError> {
    let scaled = |row: &Record, key: &str| payload::float(row, key) * FUTURES_MULTIPLIER;

    Ok(payload::decode_records(body, Envelope::Wrapped)?
        .iter()
        .map(|row| FutureContract {
            symbol: payload::string(row, "symbol"),
            bid_size: payload::integer(row, "quantityBid"),
            bid: scaled(row, "bidPrice"),
            ask: scaled(row, "offerPrice"),
            ask_size: payload::integer(row, "quantityOffer"),
            last: scaled(row, "settlementPrice"),
            close: scaled(row, "closingPrice"),
            change: payload::float(row, "imbalance"),
            open: scaled(row, "openingPrice"),
            high: scaled(row, "tradingHighPrice"),
            low: scaled(row, "tradingLowPrice"),
            previous_close: scaled(row, "previousClosingPrice"),
            turnover: scaled(row, "volumeAmount"),
            volume: payload::integer(row, "volume").saturating_mul(FUTURES_MULTIPLIER as i64),
            operations: payload::integer(row, "numberOfOrders"),
            timestamp: payload::trade_time(row, "tradeHour"),
            expiration: payload::date(row, "maturityDate"),
            open_interest: payload::integer(row, "openInterest"),
        })
        .collect())
}

fn security_from(row: &Record) -> Security {
    Security {
        symbol: payload::string(row, "symbol"),
        settlement: payload::string(row, "settlementType"),
        bid_size: payload::integer(row, "quantityBid"),
        bid: payload::float(row, "bidPrice"),
        ask: payload::float(row, "offerPrice"),
        ask_size: payload::integer(row, "quantityOffer"),
        last: payload::float(row, "settlementPrice"),
        close: payload::float(row, "closingPrice"),
        change: payload::float(row, "imbalance"),
        open: payload::float(row, "openingPrice"),
        high: payload::float(row, "tradingHighPrice"),
        low: payload::float(row, "tradingLowPrice"),
        previous_close: payload::float(row, "previousClosingPrice"),
        turnover: payload::float(row, "volumeAmount"),
        volume: payload::integer(row, "volume"),
        operations: payload::integer(row, "numberOfOrders"),
        timestamp: payload::trade_time(row, "tradeHour"),
        group: payload::string(row, "securityType"),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    const GGAL_ROW: &str = r#"{
        "symbol": "GGAL",
        "settlementType": "2",
        "quantityBid": 1200,
        "bidPrice": 4150.5,
        "offerPrice": 4160.0,
        "quantityOffer": 800,
        "settlementPrice": 4155.0,
        "closingPrice": 4100.0,
        "imbalance": 1.34,
        "openingPrice": 4105.0,
        "tradingHighPrice": 4190.0,
        "tradingLowPrice": 4090.0,
        "previousClosingPrice": 4100.0,
        "volumeAmount": 152340000.5,
        "volume": 36720,
        "numberOfOrders": 512,
        "tradeHour": "16:59:58",
        "securityType": "CS"
    }"#;

    #[test]
    fn maps_security_fields() {
        let body = format!(r#"{{"data":[{GGAL_ROW}]}}"#);
        let securities = parse_securities(&body, Envelope::Wrapped).expect("valid payload");

        let ggal = &securities[0];
        assert_eq!(ggal.symbol, "GGAL");
        assert_eq!(ggal.settlement, "2");
        assert_eq!(ggal.bid_size, 1200);
        assert_eq!(ggal.bid, 4150.5);
        assert_eq!(ggal.ask, 4160.0);
        assert_eq!(ggal.last, 4155.0);
        assert_eq!(ggal.change, 1.34);
        assert_eq!(ggal.turnover, 152_340_000.5);
        assert_eq!(ggal.volume, 36720);
        assert_eq!(ggal.operations, 512);
        assert_eq!(ggal.group, "CS");
    }

    #[test]
    fn cedears_arrive_as_bare_array() {
        let body = r#"[{"symbol":"AAPL","settlementPrice":150.5,"imbalance":2.5,"volume":1000000}]"#;
        let cedears = parse_securities(body, Envelope::Bare).expect("bare array");

        assert_eq!(cedears[0].symbol, "AAPL");
        assert_eq!(cedears[0].last, 150.5);
        assert_eq!(cedears[0].volume, 1_000_000);
        assert_eq!(cedears[0].bid, 0.0);
    }

    #[test]
    fn bonds_carry_maturity() {
        let body = r#"{"data":[{"symbol":"AL30","settlementPrice":61250.0,"maturityDate":"2030-07-09"}]}"#;
        let bonds = parse_bonds(body, Envelope::Wrapped).expect("valid payload");

        assert_eq!(bonds[0].quote.symbol, "AL30");
        assert_eq!(bonds[0].quote.last, 61_250.0);
        assert_eq!(bonds[0].expiration, Some(datetime!(2030-07-09 00:00 -3)));
    }

    #[test]
    fn options_map_underlying_and_expiration() {
        let body = r#"[{"symbol":"GFGC4500AB","underlyingSymbol":"GGAL","maturityDate":"2024-04-19T00:00:00","settlementPrice":210.0}]"#;
        let options = parse_options(body).expect("valid payload");

        assert_eq!(options[0].underlying_asset, "GGAL");
        assert_eq!(options[0].last, 210.0);
        assert!(options[0].expiration.is_some());
    }

    #[test]
    fn futures_scale_prices_but_not_change_or_operations() {
        let body = r#"{"data":[{
            "symbol":"DLR/MAY24",
            "bidPrice":0.75,
            "settlementPrice":1.25,
            "imbalance":0.4,
            "volumeAmount":12.5,
            "volume":3,
            "numberOfOrders":7,
            "openInterest":1500
        }]}"#;
        let futures = parse_futures(body).expect("valid payload");

        let contract = &futures[0];
        assert_eq!(contract.bid, 750.0);
        assert_eq!(contract.last, 1250.0);
        assert_eq!(contract.turnover, 12_500.0);
        assert_eq!(contract.volume, 3000);
        assert_eq!(contract.change, 0.4);
        assert_eq!(contract.operations, 7);
        assert_eq!(contract.open_interest, 1500);
    }

    #[test]
    fn settlement_payload_requests_t1() {
        let payload = settlement_payload();
        assert_eq!(payload["T1"], true);
        assert_eq!(payload["excludeZeroPxAndQty"], false);
    }
}

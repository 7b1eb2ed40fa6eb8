//! Root defaults every venue inherits

use serde_json::{json, Value};

pub const ID: &str = "exchange";

pub fn describe() -> Value {
    json!({
        "id": ID,
        "name": "Exchange",
        "countries": [],
        "version": "",
        "has": {
            "CORS": false,
            "publicAPI": true,
            "privateAPI": true,
            "cancelOrder": true,
            "createDepositAddress": false,
            "createOrder": true,
            "deposit": false,
            "fetchBalance": true,
            "fetchClosedOrders": false,
            "fetchCurrencies": false,
            "fetchDepositAddress": false,
            "fetchMarkets": true,
            "fetchMyTrades": false,
            "fetchOHLCV": false,
            "fetchOpenOrders": false,
            "fetchOrder": false,
            "fetchOrderBook": true,
            "fetchOrders": false,
            "fetchTicker": true,
            "fetchTickers": false,
            "fetchTrades": true,
            "withdraw": false,
        },
        "urls": {
            "logo": "",
            "www": "",
            "doc": [],
            "fees": "",
        },
        "api": {},
        "requiredCredentials": {
            "apiKey": true,
            "secret": true,
            "uid": false,
            "password": false,
        },
        "exceptions": {},
        "options": {},
        "commonCurrencies": {
            "XBT": "BTC",
            "BCC": "BCH",
            "DRK": "DASH",
        },
    })
}

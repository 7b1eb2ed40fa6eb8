//! HADAX
//!
//! Huobi's alt-coin board. Same signing and payload shape as huobipro, its own
//! host and a `hadax/` prefixed subset of endpoints.

use serde_json::{json, Value};

pub const ID: &str = "hadax";
pub const EXTENDS: &str = super::huobipro::ID;

pub fn describe() -> Value {
    json!({
        "id": ID,
        "name": "HADAX",
        "countries": ["CN"],
        "hostname": "api.hadax.com",
        "urls": {
            "logo": "https://user-images.githubusercontent.com/1294454/38059952-4756c49e-32f1-11e8-90b9-45c1eccba9cd.jpg",
            "api": "https://api.hadax.com",
            "www": "https://www.hadax.com",
            "doc": ["https://github.com/huobiapi/API_Docs/wiki"],
        },
        "has": {
            "fetchCurrencies": false,
        },
        "api": {
            "public": {
                "get": [
                    "hadax/common/symbols",
                    "hadax/common/currencys",
                    "common/timestamp",
                    "hadax/settings/currencys",
                ],
            },
            "private": {
                "get": [
                    "account/accounts",
                    "hadax/account/accounts/{id}/balance",
                    "order/orders/{id}",
                    "order/orders/{id}/matchresults",
                    "order/orders",
                    "order/matchresults",
                    "dw/withdraw-virtual/addresses",
                    "dw/deposit-virtual/addresses",
                    "query/deposit-withdraw",
                    "margin/loan-orders",
                    "margin/accounts/balance",
                ],
                "post": [
                    "hadax/order/orders/place",
                    "order/orders",
                    "order/orders/{id}/place",
                    "order/orders/{id}/submitcancel",
                    "order/orders/batchcancel",
                    "dw/balance/transfer",
                    "dw/withdraw/api/create",
                    "dw/withdraw-virtual/create",
                    "dw/withdraw-virtual/{id}/place",
                    "dw/withdraw-virtual/{id}/cancel",
                    "dw/transfer-in/margin",
                    "dw/transfer-out/margin",
                    "margin/orders",
                    "margin/orders/{id}/repay",
                ],
            },
        },
        "exceptions": {
            "not-allow-entry-hadax": "PermissionDenied",
        },
        "options": {
            "fetchMarketsMethod": "publicGetHadaxCommonSymbols",
            "fetchBalanceMethod": "privateGetHadaxAccountAccountsIdBalance",
            "createOrderMethod": "privatePostHadaxOrderOrdersPlace",
        },
        "commonCurrencies": {
            "FAIR": "FairGame",
            "GET": "Themis",
            "HOT": "Hydro Protocol",
        },
    })
}

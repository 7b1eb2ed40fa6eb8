//! Huobi Pro
//!
//! Parent of the Huobi family. Requests are signed with [`HuobiSigner`](crate::client::HuobiSigner).

use serde_json::{json, Value};

pub const ID: &str = "huobipro";
pub const EXTENDS: &str = super::base::ID;

pub fn describe() -> Value {
    json!({
        "id": ID,
        "name": "Huobi Pro",
        "countries": ["CN"],
        "version": "v1",
        "hostname": "api.huobi.pro",
        "has": {
            "fetchCurrencies": true,
            "fetchDepositAddress": true,
            "fetchOHLCV": true,
            "fetchOrder": true,
            "fetchOrders": true,
            "fetchOpenOrders": true,
            "fetchClosedOrders": true,
            "fetchMyTrades": true,
            "withdraw": true,
        },
        "urls": {
            "logo": "https://user-images.githubusercontent.com/1294454/27766569-15aa7b9a-5edd-11e7-9e7f-44791f4ee49c.jpg",
            "api": {
                "market": "https://{hostname}",
                "public": "https://{hostname}",
                "private": "https://{hostname}",
            },
            "www": "https://www.huobi.pro",
            "doc": ["https://github.com/huobiapi/API_Docs/wiki/REST_api_reference"],
            "fees": "https://www.huobi.pro/about/fee/",
        },
        "api": {
            "market": {
                "get": [
                    "history/kline",
                    "detail/merged",
                    "depth",
                    "trade",
                    "history/trade",
                    "detail",
                    "tickers",
                ],
            },
            "public": {
                "get": [
                    "common/symbols",
                    "common/currencys",
                    "common/timestamp",
                    "common/exchange",
                    "settings/currencys",
                ],
            },
            "private": {
                "get": [
                    "account/accounts",
                    "account/accounts/{id}/balance",
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
                    "order/orders/place",
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
            "account-frozen-balance-insufficient-error": "InsufficientFunds",
            "invalid-amount": "InvalidOrder",
            "order-limitorder-amount-min-error": "InvalidOrder",
            "order-marketorder-amount-min-error": "InvalidOrder",
            "order-limitorder-price-min-error": "InvalidOrder",
            "order-limitorder-price-max-error": "InvalidOrder",
            "order-orderstate-error": "OrderNotFound",
            "order-queryorder-invalid": "OrderNotFound",
            "order-update-error": "ExchangeNotAvailable",
            "api-signature-check-failed": "AuthenticationError",
            "api-signature-not-valid": "AuthenticationError",
        },
        "options": {
            "signer": "huobi",
            "apiPrefix": { "market": "market" },
            "errorCodeKey": "err-code",
            "errorMessageKey": "err-msg",
            "errorStatusKey": "status",
            "errorStatusValue": "error",
            "createMarketBuyOrderRequiresPrice": true,
            "language": "en-US",
            "fetchMarketsMethod": "publicGetCommonSymbols",
            "fetchBalanceMethod": "privateGetAccountAccountsIdBalance",
            "createOrderMethod": "privatePostOrderOrdersPlace",
        },
    })
}

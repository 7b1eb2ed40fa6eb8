//! Huobi CNY

use serde_json::{json, Value};

pub const ID: &str = "huobicny";
pub const EXTENDS: &str = super::huobipro::ID;

pub fn describe() -> Value {
    json!({
        "id": ID,
        "name": "Huobi CNY",
        "hostname": "be.huobi.com",
        "urls": {
            "logo": "https://user-images.githubusercontent.com/1294454/27766569-15aa7b9a-5edd-11e7-9e7f-44791f4ee49c.jpg",
            "api": "https://be.huobi.com",
            "www": "https://www.huobi.com",
            "doc": ["https://github.com/huobiapi/API_Docs/wiki/REST_api_reference"],
        },
    })
}

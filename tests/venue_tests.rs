//! Integration tests for venue construction and introspection

mod common;

use std::sync::Arc;

use ccxt_runtime::{CcxtError, ExchangeConfig, Node, Transport, VenueRegistry, VenueSpec};
use common::{venue, StubTransport};
use serde_json::json;

#[test]
fn test_builtin_registry() {
    let registry = VenueRegistry::builtin().unwrap();
    assert_eq!(registry.ids(), vec!["exchange", "hadax", "huobicny", "huobipro"]);
    assert_eq!(registry.chain("huobicny").unwrap(), vec!["exchange", "huobipro", "huobicny"]);
}

#[test]
fn test_venue_introspection() {
    let hadax = venue("hadax", ExchangeConfig::new(), StubTransport::ok());

    assert_eq!(hadax.id(), "hadax");
    assert_eq!(hadax.name(), "HADAX");
    assert_eq!(hadax.countries(), vec!["CN".to_string()]);
    assert!(!hadax.has("fetchCurrencies"));
    assert!(hadax.has("fetchOrder"));
    assert_eq!(hadax.common_currency_code("GET"), "Themis");
    let api = hadax
        .urls()
        .and_then(Node::as_map)
        .and_then(|urls| urls.get("api"))
        .and_then(Node::as_str);
    assert_eq!(api, Some("https://api.hadax.com"));

    let described = hadax.describe();
    assert_eq!(described["id"], "hadax");
    assert_eq!(described["options"]["signer"], "huobi");
    assert_eq!(described["has"]["fetchCurrencies"], false);

    assert_eq!(hadax.method("fetchBalanceMethod").unwrap().path(), "hadax/account/accounts/{id}/balance");
    assert!(hadax.operation("publicGetCommonExchange").is_err());
    assert_eq!(hadax.operations().len(), 36);
}

#[test]
fn test_unknown_venue() {
    let registry = VenueRegistry::builtin().unwrap();
    assert!(matches!(registry.builder("bitmex"), Err(CcxtError::UnknownVenue { .. })));
}

#[test]
fn test_custom_child_of_builtin() {
    let mut registry = VenueRegistry::builtin().unwrap();
    registry
        .register(VenueSpec::new(
            "hadaxtest",
            Some("hadax"),
            json!({
                "id": "hadaxtest",
                "hostname": "api.testnet.hadax.com",
                "urls": { "api": "https://{hostname}" },
                "has": { "fetchCurrencies": true },
            }),
        ))
        .unwrap();

    let stub = StubTransport::ok();
    let child = registry
        .builder("hadaxtest")
        .unwrap()
        .config(ExchangeConfig::new())
        .transport(Arc::clone(&stub) as Arc<dyn Transport>)
        .build()
        .unwrap();

    assert!(child.has("fetchCurrencies"));
    let request = child
        .prepare("publicGetHadaxCommonSymbols", &Default::default())
        .unwrap();
    assert_eq!(request.url, "https://api.testnet.hadax.com/v1/hadax/common/symbols");

    // the parent is untouched by the child registration
    let hadax = registry.resolve("hadax").unwrap();
    assert!(!hadax.has("fetchCurrencies"));
}

#[test]
fn test_config_from_json() {
    let config: ExchangeConfig = serde_json::from_value(json!({
        "apiKey": "key",
        "secret": "secret",
        "hostname": "api.huobi.br.com",
    }))
    .unwrap();
    assert!(config.has_credentials());
    assert_eq!(config.hostname(), Some("api.huobi.br.com"));

    let stub = StubTransport::ok();
    let huobipro = venue("huobipro", config, Arc::clone(&stub));
    let request = huobipro
        .prepare("publicGetCommonSymbols", &Default::default())
        .unwrap();
    assert_eq!(request.url, "https://api.huobi.br.com/v1/common/symbols");
}

use kagami_core::symbol::error::ResolutionError;
use kagami_symbol::{AliasTable, SymbolResolver, resolve};
use proptest::prelude::*;

#[test]
fn test_resolve_reference_cases() {
    assert_eq!(resolve("2330").unwrap().as_str(), "2330.TW");
    assert_eq!(resolve("2330.tw").unwrap().as_str(), "2330.TW");
    assert_eq!(resolve("AAPL").unwrap().as_str(), "AAPL");
    assert_eq!(resolve("BRK.B").unwrap().as_str(), "BRK-B");
    assert_eq!(resolve(""), Err(ResolutionError::EmptyInput));
    assert!(matches!(
        resolve("!!!"),
        Err(ResolutionError::UnrecognizedFormat(_))
    ));
}

#[test]
fn test_resolve_trims_and_handles_lowercase_foreign() {
    assert_eq!(resolve("  tsla \n").unwrap().as_str(), "TSLA");
    assert_eq!(resolve("brk/b").unwrap().as_str(), "BRK-B");
    assert_eq!(resolve("   "), Err(ResolutionError::EmptyInput));
}

#[test]
fn test_resolve_alias_names() {
    assert_eq!(resolve("台積電").unwrap().as_str(), "2330.TW");
    assert_eq!(resolve(" 長榮 ").unwrap().as_str(), "2603.TW");
    assert_eq!(resolve("元太").unwrap().as_str(), "8069.TWO");
    assert_eq!(resolve("波克夏").unwrap().as_str(), "BRK-B");
}

#[test]
fn test_unknown_local_name_is_unrecognized() {
    assert!(matches!(
        resolve("不存在的公司"),
        Err(ResolutionError::UnrecognizedFormat(_))
    ));
}

#[test]
fn test_every_alias_resolves_like_its_code() {
    let resolver = SymbolResolver::default();
    for (name, code) in resolver.aliases().iter() {
        let by_name = resolver.resolve(name);
        let by_code = resolver.resolve(code);
        assert!(by_name.is_ok(), "alias {name} -> {code} failed: {by_name:?}");
        assert_eq!(by_name, by_code, "alias {name} differs from code {code}");
    }
}

#[test]
fn test_resolve_detailed_reports_substitution() {
    let resolver = SymbolResolver::default();

    let direct = resolver.resolve_detailed("AAPL").unwrap();
    assert!(!direct.is_substituted());
    assert!(direct.alias.is_none());

    let suffixed = resolver.resolve_detailed("2330").unwrap();
    assert!(suffixed.is_substituted());
    assert!(suffixed.alias.is_none());

    let aliased = resolver.resolve_detailed("台積電").unwrap();
    assert!(aliased.is_substituted());
    assert_eq!(aliased.alias.as_deref(), Some("台積電"));
    assert_eq!(aliased.input, "台積電");
}

#[test]
fn test_custom_alias_table() {
    let resolver = SymbolResolver::new(AliasTable::from_pairs([("我的ETF", "00878")]));
    assert_eq!(resolver.resolve("我的ETF").unwrap().as_str(), "00878.TW");
    // 自定义表不包含内置条目
    assert!(resolver.resolve("台積電").is_err());
}

proptest! {
    #[test]
    fn prop_resolve_is_idempotent(raw in "[ -~]{0,12}") {
        if let Ok(first) = resolve(&raw) {
            let second = resolve(first.as_str());
            prop_assert_eq!(second, Ok(first));
        }
    }

    #[test]
    fn prop_numeric_codes_get_listed_suffix(code in "[0-9]{4,6}[A-Z]?") {
        let symbol = resolve(&code).unwrap();
        prop_assert_eq!(symbol.as_str(), format!("{code}.TW"));
    }

    #[test]
    fn prop_foreign_tickers_are_uppercase_without_separators(
        head in "[a-zA-Z]{1,5}",
        tail in "([./][a-zA-Z]{1,2})?",
    ) {
        let raw = format!("{head}{tail}");
        let symbol = resolve(&raw).unwrap();
        prop_assert!(!symbol.as_str().contains(['.', '/']));
        prop_assert_eq!(symbol.as_str(), raw.to_ascii_uppercase().replace(['.', '/'], "-"));
    }
}

use std::collections::HashMap;

use promptkit_core::lang::header_fields;
use promptkit_core::lang::prompt;
use promptkit_core::lang::symbols;

#[test]
fn symbol_spellings_unique_and_resolvable() {
    let mut seen: HashMap<char, symbols::SymbolId> = HashMap::new();

    for info in symbols::SYMBOLS {
        assert_eq!(
            symbols::from_char(info.canonical),
            Some(info.id),
            "symbol canonical spelling not resolvable: {:?}",
            info.canonical
        );
        assert_eq!(
            symbols::as_char(info.id),
            info.canonical,
            "symbol as_char mismatch for {:?}",
            info.id
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate symbol spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn symbol_names_unique() {
    let mut seen: HashMap<&'static str, symbols::SymbolId> = HashMap::new();

    for info in symbols::SYMBOLS {
        if let Some(prev) = seen.insert(info.name, info.id) {
            panic!("duplicate symbol name {:?}: {:?} and {:?}", info.name, prev, info.id);
        }
    }
}

#[test]
fn reference_triggers_unique_and_resolvable() {
    let mut seen: HashMap<symbols::SymbolId, prompt::ReferenceKind> = HashMap::new();

    for info in prompt::REFERENCES {
        assert_eq!(
            prompt::from_trigger(info.trigger),
            Some(info.kind),
            "reference trigger not resolvable: {:?}",
            info.trigger
        );
        assert_eq!(prompt::trigger(info.kind), info.trigger);

        if let Some(prev) = seen.insert(info.trigger, info.kind) {
            panic!(
                "duplicate reference trigger {:?}: {:?} and {:?}",
                info.trigger, prev, info.kind
            );
        }
    }
}

#[test]
fn whitespace_never_invalidates_a_whitespace_terminated_reference() {
    for info in prompt::REFERENCES.iter().filter(|r| r.stops_at_whitespace) {
        for symbol in info.invalid_in_name {
            assert!(
                !symbols::is_spacing(*symbol) && !symbols::is_line_break(*symbol),
                "{:?} lists whitespace {:?} as invalid; whitespace must end the reference instead",
                info.kind,
                symbol
            );
        }
    }
}

#[test]
fn stop_symbols_never_invalidate_a_reference() {
    for info in prompt::REFERENCES {
        for symbol in info.stop_symbols {
            assert!(
                !info.invalid_in_name.contains(symbol),
                "{:?} lists {:?} both as a stop symbol and as invalid in its name",
                info.kind,
                symbol
            );
            assert!(
                !prompt::is_invalid_in_variable_data(*symbol),
                "{symbol:?} ends a reference but is invalid in variable data"
            );
            assert!(prompt::is_stop_symbol(info.kind, *symbol));
        }
    }
}

#[test]
fn header_field_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, header_fields::HeaderFieldId> = HashMap::new();

    for info in header_fields::HEADER_FIELDS {
        assert_eq!(
            header_fields::from_str(info.canonical),
            Some(info.id),
            "header field spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(header_fields::as_str(info.id), info.canonical);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate header field spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

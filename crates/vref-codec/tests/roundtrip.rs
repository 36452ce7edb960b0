//! End-to-end codec tests over the default and custom hash stores.

use std::sync::Arc;

use proptest::prelude::*;
use vref_codec::{CodecError, Encoding, Parser, ReferenceCodec, Stringifier};
use vref_hash::{
    HashConfig, HashError, HashRegistry, HashStore, InMemoryHashStore, NON_UUID_MARKER,
};
use vref_types::{ContentLocator, Reference, Resource, StoreId};

const DOC_ID: &str = "4c9a6b6e-6b2b-4e9a-9b0a-1d8b6f6a2c1e";
const TEMPLATE: &str = "/org/vref/templates/smart.json";

fn roundtrip(registry: &HashRegistry, reference: &Reference) -> (String, String) {
    let literal = Stringifier::literal().stringify(reference).unwrap();
    assert_eq!(&Parser::literal().parse(&literal).unwrap(), reference, "{literal}");

    let hashed = Stringifier::hashed(registry).stringify(reference).unwrap();
    assert_eq!(&Parser::hashed(registry).parse(&hashed).unwrap(), reference, "{hashed}");
    (literal, hashed)
}

fn tokens(wire: &str) -> Vec<&str> {
    wire.split('-').collect()
}

fn workspace(id: &str) -> ContentLocator {
    ContentLocator::new(StoreId::workspace(), id)
}

fn virtual_over(actual: Resource) -> Reference {
    Reference::virtual_ref(Resource::classpath(TEMPLATE), "/", actual)
}

#[test]
fn nested_chain_of_depth_five() {
    let registry = HashRegistry::standard().unwrap();
    let mut reference = Reference::vanilla(
        Resource::classpath(TEMPLATE),
        "/1/3",
        Resource::path("/app:company_home/st:sites/cm:swsdp"),
        Resource::classpath("/org/vref/templates/vanilla.js"),
    );
    for depth in 0..4 {
        let id = format!("doc-{depth}");
        reference = Reference::node(workspace(&id), reference);
    }
    let (literal, hashed) = roundtrip(&registry, &reference);
    assert!(hashed.len() < literal.len());
}

#[test]
fn uuid_local_ids_in_radix_36_and_16() {
    for radix in [36, 16] {
        let mut config = HashConfig::default();
        config.radix = radix;
        let registry = HashRegistry::from_config(&config).unwrap();
        let reference = virtual_over(Resource::locator(workspace(DOC_ID)));

        let (_, hashed) = roundtrip(&registry, &reference);
        let locator_token = tokens(&hashed)[6];
        assert!(locator_token.starts_with("11"));
        assert!(!locator_token[2..].starts_with(NON_UUID_MARKER));
    }
}

#[test]
fn non_uuid_local_id_carries_marker() {
    let registry = HashRegistry::standard().unwrap();
    let reference = virtual_over(Resource::locator(workspace("people")));

    let (_, hashed) = roundtrip(&registry, &reference);
    let locator_token = tokens(&hashed)[6];
    assert!(locator_token[2..].starts_with(NON_UUID_MARKER), "{locator_token}");
}

#[test]
fn unregistered_repository_path_is_literal() {
    let registry = HashRegistry::standard().unwrap();
    let reference = virtual_over(Resource::path("/nowhere/cm:foo"));

    let (_, hashed) = roundtrip(&registry, &reference);
    assert_eq!(&tokens(&hashed)[5..], ["6", "/nowhere/cm:foo"]);
}

#[test]
fn registered_prefix_gives_mixed_path() {
    let mut config = HashConfig::empty();
    config.paths.insert("/app:company_home".into(), "A".into());
    let registry = HashRegistry::from_config(&config).unwrap();

    let full = virtual_over(Resource::path("/app:company_home"));
    // The template classpath is unregistered here, so the actual resource
    // starts at token 4.
    let (_, hashed) = roundtrip(&registry, &full);
    assert_eq!(&tokens(&hashed)[4..], ["5", "A"]);

    let child = virtual_over(Resource::path("/app:company_home/cm:foo"));
    let (_, hashed) = roundtrip(&registry, &child);
    assert_eq!(&tokens(&hashed)[4..], ["7", "A", "/cm:foo"]);
}

#[test]
fn unregistered_store_fails_hashed_encoding() {
    let registry = HashRegistry::standard().unwrap();
    let locator = ContentLocator::new(StoreId::new("workspace", "MysteryStore"), DOC_ID);
    let reference = virtual_over(Resource::locator(locator));

    let err = Stringifier::hashed(&registry).stringify(&reference).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Hash(HashError::UnregisteredStore { component: "identifier", .. })
    ));

    // The literal encoding remains available.
    let literal = Stringifier::literal().stringify(&reference).unwrap();
    assert_eq!(Parser::literal().parse(&literal).unwrap(), reference);
}

#[test]
fn hashed_wire_needs_the_same_stores() {
    let standard = HashRegistry::standard().unwrap();
    let reference = virtual_over(Resource::path("/app:company_home/cm:foo"));
    let wire = Stringifier::hashed(&standard).stringify(&reference).unwrap();

    let bare = HashRegistry::from_config(&HashConfig::empty()).unwrap();
    assert!(Parser::hashed(&bare).parse(&wire).is_err());
}

#[test]
fn codec_envelope_over_custom_config() {
    let config = HashConfig::from_toml_str(
        r#"
        radix = 16

        [classpaths]
        "/org/vref/templates" = "T"
        "#,
    )
    .unwrap();
    let codec = ReferenceCodec::new(HashRegistry::from_config(&config).unwrap());
    let reference = Reference::node(
        workspace("child"),
        virtual_over(Resource::locator(workspace(DOC_ID))),
    );

    let locator = codec.to_locator(&reference, Encoding::Hashed).unwrap();
    assert_eq!(codec.from_locator(&locator).unwrap(), reference);
    assert!(locator.id().contains("-4-T-"));
}

/// A paths store that answers with codes no in-memory store would accept.
struct CarelessPaths;

impl HashStore for CarelessPaths {
    fn name(&self) -> &str {
        "careless paths"
    }

    fn hash(&self, value: &str) -> Option<String> {
        (value == "/a").then(|| "p-1".to_string())
    }

    fn lookup(&self, code: &str) -> Option<String> {
        (code == "p-1").then(|| "/a".to_string())
    }
}

#[test]
fn external_store_codes_never_reach_the_wire() {
    let protocols = InMemoryHashStore::with_entries("protocols", [("workspace", "1")]).unwrap();
    let identifiers =
        InMemoryHashStore::with_entries("identifiers", [("SpacesStore", "1")]).unwrap();
    let registry = HashRegistry::with_stores(
        Arc::new(protocols),
        Arc::new(identifiers),
        Arc::new(InMemoryHashStore::new("classpaths")),
        Arc::new(CarelessPaths),
        36,
    )
    .unwrap();

    let reference = Reference::virtual_ref(Resource::classpath("/t"), "/", Resource::path("/a"));
    let (_, hashed) = roundtrip(&registry, &reference);
    assert_eq!(hashed, "v-3-/t-r-6-/a");
}

fn local_id() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        "[A-F0-9]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        "[a-z0-9_.-]{0,12}",
        "\\PC{0,8}",
    ]
}

fn store() -> impl Strategy<Value = StoreId> {
    prop_oneof![
        Just(StoreId::workspace()),
        Just(StoreId::new("archive", "SpacesStore")),
        Just(StoreId::new("user", "alfrescoUserStore")),
        Just(StoreId::new("workspace", "version2Store")),
    ]
}

fn locator() -> impl Strategy<Value = ContentLocator> {
    (store(), local_id()).prop_map(|(store, id)| ContentLocator::new(store, id))
}

fn repository_path() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/app:company_home".to_string()),
        "(/[a-z]{2,3}:[a-z_]{1,8}){0,3}".prop_map(|rest| format!("/app:company_home{rest}")),
        "(/[a-z]{2,3}:[a-z_-]{1,8}){0,4}",
        "\\PC{0,10}",
    ]
}

fn classpath() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/org/vref/templates/vanilla.js".to_string()),
        "[a-z_]{1,8}\\.(json|js)".prop_map(|file| format!("/org/vref/templates/{file}")),
        "(/[a-z]{1,6}){1,3}",
    ]
}

fn template_path() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        "(/[0-9]{1,3}){1,4}",
        "(/[0-9]{1,3}){1,3}/[a-z:]{1,6}",
        "\\PC{0,8}",
    ]
}

fn resource() -> impl Strategy<Value = Resource> {
    prop_oneof![
        locator().prop_map(Resource::locator),
        repository_path().prop_map(Resource::path),
        classpath().prop_map(Resource::classpath),
    ]
}

fn virtual_reference() -> impl Strategy<Value = Reference> {
    prop_oneof![
        (classpath(), template_path(), resource()).prop_map(|(template, path, actual)| {
            Reference::virtual_ref(Resource::classpath(template), path, actual)
        }),
        (resource(), template_path(), resource(), resource()).prop_map(
            |(template, path, actual, vanilla)| Reference::vanilla(template, path, actual, vanilla)
        ),
    ]
}

/// References nested up to five levels deep.
fn reference() -> impl Strategy<Value = Reference> {
    virtual_reference().prop_recursive(4, 8, 1, |inner| {
        (locator(), inner).prop_map(|(locator, parent)| Reference::node(locator, parent))
    })
}

proptest! {
    #[test]
    fn any_reference_roundtrips_in_both_encodings(reference in reference()) {
        let registry = HashRegistry::standard().unwrap();

        let literal = Stringifier::literal().stringify(&reference).unwrap();
        prop_assert!(literal.is_ascii());
        prop_assert_eq!(Parser::literal().parse(&literal).unwrap(), reference.clone());

        let hashed = Stringifier::hashed(&registry).stringify(&reference).unwrap();
        prop_assert!(hashed.is_ascii());
        prop_assert_eq!(Parser::hashed(&registry).parse(&hashed).unwrap(), reference);
    }

    #[test]
    fn parser_never_panics(input in "[nvw0-7hrlm!%/a-z-]{0,40}") {
        let registry = HashRegistry::standard().unwrap();
        let _ = Parser::literal().parse(&input);
        let _ = Parser::hashed(&registry).parse(&input);
    }
}

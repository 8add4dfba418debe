//! Registry lookups and engine configuration

use hashbridge_digest::{
    init_digests, init_global, DefaultHost, DigestError, EngineConfig, HashType, Nid, Registry,
    ALGORITHMS,
};

#[test]
fn test_nids_follow_table_order() {
    let registry = Registry::new();
    let report = init_digests(&DefaultHost, &registry, &EngineConfig::default());

    assert!(report.is_complete());
    assert!(report.skipped.is_empty());
    assert_eq!(
        registry.nids(),
        vec![
            Nid::SHA256,
            Nid::SHA384,
            Nid::SHA512,
            Nid::SHA3_224,
            Nid::SHA3_256,
            Nid::SHA3_384,
            Nid::SHA3_512,
        ]
    );
    assert_eq!(report.registered, registry.nids());
    assert_eq!(ALGORITHMS.len(), HashType::ALL.len());
}

#[test]
fn test_empty_registry_reports_unavailable() {
    let registry = Registry::new();

    assert!(registry.nids().is_empty());
    assert!(registry.get(Nid::SHA256).is_none());
    assert!(!registry.is_registered(Nid::SHA512));
    assert!(matches!(
        registry.digest(Nid::SHA256, b"abc"),
        Err(DigestError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn test_unknown_nid_has_no_slot() {
    let registry = Registry::new();
    init_digests(&DefaultHost, &registry, &EngineConfig::default());

    assert!(registry.get(Nid(4)).is_none());
    assert!(registry.get(Nid::UNDEF).is_none());
}

#[test]
fn test_lookup_by_name() {
    let registry = Registry::new();
    init_digests(&DefaultHost, &registry, &EngineConfig::default());

    let md = registry.by_name("sha3-384").expect("known name");
    assert_eq!(md.nid(), Nid::SHA3_384);
    let md = registry.by_name("SHA-512").expect("dashed spelling");
    assert_eq!(md.nid(), Nid::SHA512);
    assert!(registry.by_name("MD5").is_none());
}

#[test]
fn test_hash_type_names_round_trip() {
    for hash_type in HashType::ALL {
        assert_eq!(HashType::from_name(hash_type.name()), Some(hash_type));
        assert_eq!(HashType::from_nid(hash_type.nid()), Some(hash_type));
        assert_eq!(hash_type.to_string().parse::<HashType>(), Ok(hash_type));
    }
    assert_eq!(HashType::from_nid(Nid::UNDEF), None);
    assert!("whirlpool".parse::<HashType>().is_err());
}

#[test]
fn test_config_selects_digests() {
    let config = EngineConfig::from_json(r#"{ "digests": ["SHA256", "sha3-256"] }"#)
        .expect("valid configuration");
    let registry = Registry::new();

    let report = init_digests(&DefaultHost, &registry, &config);

    assert!(report.is_complete());
    assert_eq!(registry.nids(), vec![Nid::SHA256, Nid::SHA3_256]);
    assert_eq!(report.skipped.len(), HashType::ALL.len() - 2);
    assert!(report.skipped.contains(&HashType::Sha512));
}

#[test]
fn test_config_defaults() {
    let config = EngineConfig::from_json("{}").expect("empty document is valid");

    assert_eq!(config, EngineConfig::default());
    assert!(HashType::ALL.iter().all(|ty| config.wants(*ty)));
    assert!(config.pkey_nids().is_empty());
}

#[test]
fn test_config_rejects_unknown_algorithm() {
    let err = EngineConfig::from_json(r#"{ "digests": ["SHA256", "MD4"] }"#)
        .expect_err("unknown algorithm");
    assert_eq!(
        err,
        DigestError::Config("unknown digest algorithm: MD4".to_string())
    );
}

#[test]
fn test_config_rejects_unknown_fields_and_bad_json() {
    assert!(matches!(
        EngineConfig::from_json(r#"{ "digest": [] }"#),
        Err(DigestError::Config(_))
    ));
    assert!(matches!(
        EngineConfig::from_json("not json"),
        Err(DigestError::Config(_))
    ));
}

#[test]
fn test_config_built_in_code_is_validated() {
    let config = EngineConfig {
        digests: Some(vec!["SHA-265".into()]),
        ..EngineConfig::default()
    };
    let registry = Registry::new();

    let report = init_digests(&DefaultHost, &registry, &config);

    assert!(!report.is_complete());
    assert!(report.registered.is_empty());
    assert!(report.skipped.is_empty());
    assert_eq!(
        report.failed,
        vec![(
            HashType::None,
            DigestError::Config("unknown digest algorithm: SHA-265".to_string())
        )]
    );
    assert!(registry.nids().is_empty());
}

#[test]
fn test_config_with_debug_log_and_pkey_nids() {
    let config = EngineConfig::from_json(r#"{ "debug_log": true, "pkey_nids": [6] }"#)
        .expect("valid configuration");
    assert!(config.debug_log);
    assert_eq!(config.pkey_nids(), vec![Nid(6)]);

    let registry = Registry::new();
    let report = init_digests(&DefaultHost, &registry, &config);
    assert!(report.is_complete());
}

#[test]
fn test_global_registry_is_write_once() {
    let first = init_global(&EngineConfig::default());
    let second = init_global(&EngineConfig::default());

    // Only this test touches the global registry.
    assert!(first.is_complete());
    assert_eq!(second.registered.len(), 0);
    assert_eq!(second.failed.len(), HashType::ALL.len());
    assert!(second
        .failed
        .iter()
        .all(|(_, e)| matches!(e, DigestError::AlreadyRegistered { .. })));

    let out = Registry::global()
        .digest(Nid::SHA384, b"abc")
        .expect("global SHA-384");
    assert_eq!(out.len(), 48);
}

//! Known-answer vectors for every registered algorithm

use hashbridge_common::LoggingTransformer;
use hashbridge_digest::{init_digests, DefaultHost, EngineConfig, HashType, MdCtx, Registry};
use hex_literal::hex;

fn registry() -> Registry {
    LoggingTransformer::init_test();
    let registry = Registry::new();
    let report = init_digests(&DefaultHost, &registry, &EngineConfig::default());
    assert!(report.is_complete(), "registration failed: {:?}", report.failed);
    registry
}

fn digest(registry: &Registry, hash_type: HashType, data: &[u8]) -> Vec<u8> {
    registry
        .digest(hash_type.nid(), data)
        .expect("digest of a registered algorithm should succeed")
}

#[test]
fn test_sha256_vectors() {
    let registry = registry();
    assert_eq!(
        digest(&registry, HashType::Sha256, b""),
        hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
    );
    assert_eq!(
        digest(&registry, HashType::Sha256, b"abc"),
        hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
}

#[test]
fn test_sha384_vectors() {
    let registry = registry();
    assert_eq!(
        digest(&registry, HashType::Sha384, b""),
        hex!("38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b")
    );
    assert_eq!(
        digest(&registry, HashType::Sha384, b"abc"),
        hex!("cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7")
    );
}

#[test]
fn test_sha512_vectors() {
    let registry = registry();
    assert_eq!(
        digest(&registry, HashType::Sha512, b""),
        hex!("cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e")
    );
    assert_eq!(
        digest(&registry, HashType::Sha512, b"abc"),
        hex!("ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f")
    );
}

#[test]
fn test_sha3_vectors() {
    let registry = registry();
    assert_eq!(
        digest(&registry, HashType::Sha3_224, b""),
        hex!("6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7")
    );
    assert_eq!(
        digest(&registry, HashType::Sha3_224, b"abc"),
        hex!("e642824c3f8cf24ad09234ee7d3c766fc9a3a5168d0c94ad73b46fdf")
    );
    assert_eq!(
        digest(&registry, HashType::Sha3_256, b""),
        hex!("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")
    );
    assert_eq!(
        digest(&registry, HashType::Sha3_256, b"abc"),
        hex!("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532")
    );
    assert_eq!(
        digest(&registry, HashType::Sha3_384, b""),
        hex!("0c63a75b845e4f7d01107d852e4c2485c51a50aaaa94fc61995e71bbee983a2ac3713831264adb47fb6bd1e058d5f004")
    );
    assert_eq!(
        digest(&registry, HashType::Sha3_384, b"abc"),
        hex!("ec01498288516fc926459f58e2c6ad8df9b473cb0fc08c2596da7cf0e49be4b298d88cea927ac7f539f1edf228376d25")
    );
    assert_eq!(
        digest(&registry, HashType::Sha3_512, b""),
        hex!("a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a615b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26")
    );
    assert_eq!(
        digest(&registry, HashType::Sha3_512, b"abc"),
        hex!("b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0")
    );
}

#[test]
fn test_output_length_matches_declared_size() {
    let registry = registry();
    for hash_type in HashType::ALL {
        let md = registry
            .get(hash_type.nid())
            .expect("every algorithm is compiled in by default");
        assert_eq!(md.result_size(), hash_type.digest_size());

        let out = digest(&registry, hash_type, b"fixed length");
        assert_eq!(out.len(), md.result_size(), "{hash_type}");
    }
}

#[test]
fn test_abc_in_one_update_matches_single_bytes() {
    let registry = registry();
    for hash_type in HashType::ALL {
        let md = registry
            .get(hash_type.nid())
            .expect("every algorithm is compiled in by default");

        let mut ctx = MdCtx::new(md);
        ctx.init().expect("init should succeed");
        for byte in [b"a", b"b", b"c"] {
            ctx.update(byte).expect("update should succeed");
        }
        let chunked = ctx.finalize().expect("final should succeed");
        ctx.cleanup();

        assert_eq!(chunked, digest(&registry, hash_type, b"abc"), "{hash_type}");
    }
}

#[test]
fn test_final_into_larger_buffer_writes_prefix_only() {
    let registry = registry();
    let md = registry
        .get(HashType::Sha256.nid())
        .expect("SHA-256 is registered");

    let mut ctx = MdCtx::new(md);
    ctx.init().expect("init should succeed");
    ctx.update(b"abc").expect("update should succeed");

    let mut out = [0xAAu8; 64];
    let len = ctx.finalize_into(&mut out).expect("final should succeed");

    assert_eq!(len, 32);
    assert_eq!(
        out[..32],
        hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
    assert!(out[32..].iter().all(|b| *b == 0xAA));
}

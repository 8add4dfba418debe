//! Property tests: determinism and chunking independence

use hashbridge_digest::{init_digests, DefaultHost, EngineConfig, HashType, MdCtx, Registry};
use once_cell::sync::Lazy;
use proptest::prelude::*;

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    init_digests(&DefaultHost, &registry, &EngineConfig::default());
    registry
});

fn hash_type() -> impl Strategy<Value = HashType> {
    proptest::sample::select(HashType::ALL.to_vec())
}

fn chunked_digest(hash_type: HashType, data: &[u8], cuts: &[usize]) -> Vec<u8> {
    let md = REGISTRY
        .get(hash_type.nid())
        .expect("every algorithm is compiled in by default");
    let mut ctx = MdCtx::new(md);
    ctx.init().expect("init should succeed");

    let mut start = 0;
    for cut in cuts {
        let end = (*cut).clamp(start, data.len());
        ctx.update(&data[start..end]).expect("update should succeed");
        start = end;
    }
    ctx.update(&data[start..]).expect("update should succeed");

    ctx.finalize().expect("final should succeed")
}

proptest! {
    #[test]
    fn digest_is_deterministic(hash_type in hash_type(), data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let first = REGISTRY.digest(hash_type.nid(), &data).expect("digest should succeed");
        let second = REGISTRY.digest(hash_type.nid(), &data).expect("digest should succeed");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn chunking_does_not_change_digest(
        hash_type in hash_type(),
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        mut cuts in proptest::collection::vec(0usize..2048, 0..16),
    ) {
        cuts.sort_unstable();
        let whole = REGISTRY.digest(hash_type.nid(), &data).expect("digest should succeed");
        let pieces = chunked_digest(hash_type, &data, &cuts);
        prop_assert_eq!(whole, pieces);
    }

    #[test]
    fn output_length_is_fixed(hash_type in hash_type(), data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let out = REGISTRY.digest(hash_type.nid(), &data).expect("digest should succeed");
        prop_assert_eq!(out.len(), hash_type.digest_size());
    }
}

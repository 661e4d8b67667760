//! Proptest generators for property-based testing.

use proptest::prelude::*;

use hashchain_core::{Block, BlockBuilder, Digest, DigestAlgorithm, Payload};

/// Generate a party name.
pub fn party() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,15}".prop_map(String::from)
}

/// Generate an amount as the command line would pass it.
pub fn amount() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..1_000_000).prop_map(|n| n.to_string()),
        (0u32..10_000, 0u32..100).prop_map(|(a, b)| format!("{a}.{b:02}")),
    ]
}

/// Generate a transfer payload.
pub fn payload() -> impl Strategy<Value = Payload> {
    (party(), party(), amount()).prop_map(|(s, r, a)| Payload::new(s, r, a))
}

/// Generate one of the digest algorithms.
pub fn digest_algorithm() -> impl Strategy<Value = DigestAlgorithm> {
    prop::sample::select(DigestAlgorithm::ALL.to_vec())
}

/// Generate a rendered timestamp.
pub fn timestamp() -> impl Strategy<Value = String> {
    (0i64..=2_000_000_000).prop_map(|secs| format!("t{secs}"))
}

/// Parameters for generating a standalone block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub index: u64,
    pub timestamp: String,
    pub payload: Payload,
    pub previous: [u8; 32],
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1u64..=10_000, timestamp(), payload(), any::<[u8; 32]>())
            .prop_map(|(index, timestamp, payload, previous)| BlockParams {
                index,
                timestamp,
                payload,
                previous,
            })
            .boxed()
    }
}

/// Seal a block from parameters.
pub fn block_from_params(params: &BlockParams, algorithm: DigestAlgorithm) -> Block {
    BlockBuilder::new(params.index)
        .timestamp(params.timestamp.clone())
        .payload(params.payload.clone())
        .previous(Digest::from_bytes(&params.previous))
        .seal(algorithm)
}

/// Parameters for building a whole chain.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub algorithm: DigestAlgorithm,
    pub payloads: Vec<Payload>,
}

/// Generate a chain of between `min` and `max` blocks.
pub fn chain_params(min: usize, max: usize) -> impl Strategy<Value = ChainParams> {
    (
        digest_algorithm(),
        prop::collection::vec(payload(), min..=max),
    )
        .prop_map(|(algorithm, payloads)| ChainParams {
            algorithm,
            payloads,
        })
}

//! Property tests over generated chains.

use hashchain::{ChainStatus, Ledger, LedgerConfig};
use hashchain_core::Payload;
use hashchain_store::MemoryStore;
use hashchain_testkit::generators::{chain_params, payload};
use hashchain_testkit::TestFixture;
use proptest::prelude::*;

fn ledger_for(params: &hashchain_testkit::ChainParams) -> TestFixture {
    let fixture = TestFixture::with_digest(params.algorithm);
    for p in &params.payloads {
        fixture.ledger.append_block(p.clone()).unwrap();
    }
    fixture
}

proptest! {
    #[test]
    fn test_generated_chains_verify(params in chain_params(0, 12)) {
        let fixture = ledger_for(&params);
        let report = fixture.ledger.verify_chain().unwrap();

        prop_assert_eq!(report.last_index, params.payloads.len() as u64);
        prop_assert!(report.is_intact());
    }

    #[test]
    fn test_any_payload_edit_is_detected(
        params in chain_params(2, 8),
        pick in any::<prop::sample::Index>(),
        receiver in "[a-z]{1,8}",
    ) {
        let fixture = ledger_for(&params);
        let index = pick.index(params.payloads.len()) as u64 + 1;
        let before = fixture.block(index);
        prop_assume!(before.payload.receiver != receiver);

        fixture.tamper_payload(index, &receiver);
        let report = fixture.ledger.verify_chain().unwrap();
        prop_assert_eq!(report.status_of(index), ChainStatus::Corrupted);
    }

    #[test]
    fn test_resealed_edit_is_detected_by_link(
        params in chain_params(2, 8),
        pick in any::<prop::sample::Index>(),
    ) {
        let fixture = ledger_for(&params);
        // Any block with a successor.
        let index = pick.index(params.payloads.len() - 1) as u64 + 1;
        fixture.tamper_and_reseal(index, "\u{1F47E}");

        let report = fixture.ledger.verify_chain().unwrap();
        prop_assert!(report.soft.iter().all(|f| f.status == ChainStatus::Readable));
        prop_assert_eq!(report.status_of(index), ChainStatus::Corrupted);
    }

    #[test]
    fn test_append_is_deterministic(transfer in payload()) {
        let a = TestFixture::new();
        let b = TestFixture::new();
        let first = a.ledger.append_block(transfer.clone()).unwrap();
        let second = b.ledger.append_block(transfer).unwrap();

        prop_assert_eq!(first.canonical(), second.canonical());
        prop_assert_eq!(first.digest, second.digest);
    }
}

#[test]
fn test_system_clock_ledger_verifies() {
    let ledger = Ledger::new(MemoryStore::new(), LedgerConfig::default());
    ledger.append_block(Payload::new("A", "B", "10")).unwrap();
    ledger.append_block(Payload::new("B", "C", "5")).unwrap();
    assert!(ledger.verify_chain().unwrap().is_intact());
}

// Snapshot record codec tests: round-trip law, fixed layout, byte offsets

use battstat::codec::{self, SNAPSHOT_LEN};
use battstat::models::{ChargeState, Snapshot, SysBlock};

fn sample_snapshot() -> Snapshot {
    Snapshot {
        percentage: 87,
        state: ChargeState::Discharging,
        when: 1_725_000_000,
        sys: SysBlock {
            uptime_secs: 123_456,
            load_one: 0.52,
            load_five: 0.41,
            load_fifteen: 0.38,
            mem_total: 16 * 1024 * 1024 * 1024,
            mem_free: 2 * 1024 * 1024 * 1024,
            mem_available: 9 * 1024 * 1024 * 1024,
            swap_total: 8 * 1024 * 1024 * 1024,
            swap_free: 8 * 1024 * 1024 * 1024,
            procs: 312,
        },
    }
}

#[test]
fn test_round_trip() {
    let snap = sample_snapshot();
    let bytes = codec::encode(&snap);
    let decoded = codec::decode(&bytes).expect("decode");
    assert_eq!(decoded, snap);
}

#[test]
fn test_record_is_fixed_size() {
    assert_eq!(codec::encode(&sample_snapshot()).len(), SNAPSHOT_LEN);
    assert_eq!(SNAPSHOT_LEN, 92);
}

#[test]
fn test_field_offsets_and_byte_order() {
    let snap = sample_snapshot();
    let bytes = codec::encode(&snap);
    assert_eq!(&bytes[0..4], &87u32.to_le_bytes());
    assert_eq!(
        &bytes[4..8],
        &ChargeState::Discharging.code().to_le_bytes()
    );
    assert_eq!(&bytes[8..16], &1_725_000_000u64.to_le_bytes());
    assert_eq!(&bytes[16..24], &123_456u64.to_le_bytes());
    assert_eq!(&bytes[24..32], &0.52f64.to_le_bytes());
    assert_eq!(&bytes[88..92], &312u32.to_le_bytes());
}

#[test]
fn test_zeroed_record_decodes_as_unknown_state() {
    let decoded = codec::decode(&[0u8; SNAPSHOT_LEN]).expect("decode");
    assert_eq!(decoded.percentage, 0);
    assert_eq!(decoded.state, ChargeState::Unknown);
    assert_eq!(decoded.when, 0);
}

#[test]
fn test_decode_rejects_wrong_length() {
    let err = codec::decode(&[0u8; SNAPSHOT_LEN - 1]).unwrap_err();
    assert!(err.to_string().contains("92 bytes"));
    assert!(codec::decode(&[]).is_err());
    assert!(codec::decode(&[0u8; SNAPSHOT_LEN + 1]).is_err());
}

#[test]
fn test_unrecognized_state_code_decodes_as_unknown() {
    let mut bytes = codec::encode(&sample_snapshot());
    bytes[4..8].copy_from_slice(&999u32.to_le_bytes());
    let decoded = codec::decode(&bytes).expect("decode");
    assert_eq!(decoded.state, ChargeState::Unknown);
}

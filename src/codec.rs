// Snapshot wire format. Fixed 92-byte little-endian records, no header,
// no separator, no version field.
//
// offset size field
//      0    4 percentage (u32)
//      4    4 state (u32, ChargeState wire code)
//      8    8 when (u64, unix seconds)
//     16    8 uptime_secs (u64)
//     24    8 load_one (f64 bits)
//     32    8 load_five (f64 bits)
//     40    8 load_fifteen (f64 bits)
//     48    8 mem_total (u64, bytes)
//     56    8 mem_free (u64, bytes)
//     64    8 mem_available (u64, bytes)
//     72    8 swap_total (u64, bytes)
//     80    8 swap_free (u64, bytes)
//     88    4 procs (u32)

use crate::models::{ChargeState, Snapshot, SysBlock};

/// Size of one encoded snapshot record in bytes.
pub const SNAPSHOT_LEN: usize = 92;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("snapshot record must be {SNAPSHOT_LEN} bytes, got {0}")]
    WrongLength(usize),
}

/// Encode one snapshot. Never fails; the output length is always [`SNAPSHOT_LEN`].
pub fn encode(snap: &Snapshot) -> [u8; SNAPSHOT_LEN] {
    let mut out = [0u8; SNAPSHOT_LEN];
    out[0..4].copy_from_slice(&snap.percentage.to_le_bytes());
    out[4..8].copy_from_slice(&snap.state.code().to_le_bytes());
    out[8..16].copy_from_slice(&snap.when.to_le_bytes());
    out[16..24].copy_from_slice(&snap.sys.uptime_secs.to_le_bytes());
    out[24..32].copy_from_slice(&snap.sys.load_one.to_le_bytes());
    out[32..40].copy_from_slice(&snap.sys.load_five.to_le_bytes());
    out[40..48].copy_from_slice(&snap.sys.load_fifteen.to_le_bytes());
    out[48..56].copy_from_slice(&snap.sys.mem_total.to_le_bytes());
    out[56..64].copy_from_slice(&snap.sys.mem_free.to_le_bytes());
    out[64..72].copy_from_slice(&snap.sys.mem_available.to_le_bytes());
    out[72..80].copy_from_slice(&snap.sys.swap_total.to_le_bytes());
    out[80..88].copy_from_slice(&snap.sys.swap_free.to_le_bytes());
    out[88..92].copy_from_slice(&snap.sys.procs.to_le_bytes());
    out
}

/// Decode one record. Exact inverse of [`encode`]; the input must be exactly
/// [`SNAPSHOT_LEN`] bytes.
pub fn decode(bytes: &[u8]) -> Result<Snapshot, CodecError> {
    if bytes.len() != SNAPSHOT_LEN {
        return Err(CodecError::WrongLength(bytes.len()));
    }
    Ok(Snapshot {
        percentage: read_u32(bytes, 0),
        state: ChargeState::from_code(read_u32(bytes, 4)),
        when: read_u64(bytes, 8),
        sys: SysBlock {
            uptime_secs: read_u64(bytes, 16),
            load_one: read_f64(bytes, 24),
            load_five: read_f64(bytes, 32),
            load_fifteen: read_f64(bytes, 40),
            mem_total: read_u64(bytes, 48),
            mem_free: read_u64(bytes, 56),
            mem_available: read_u64(bytes, 64),
            swap_total: read_u64(bytes, 72),
            swap_free: read_u64(bytes, 80),
            procs: read_u32(bytes, 88),
        },
    })
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap())
}

fn read_f64(bytes: &[u8], offset: usize) -> f64 {
    f64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap())
}

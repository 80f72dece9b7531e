use tiny_keccak::{Hasher, Keccak};

fn is_prefixed_hex(s: &str, hex_len: usize) -> bool {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(body) => body.len() == hex_len && hex::decode(body).is_ok(),
        None => false,
    }
}

/// `0x` followed by 20 bytes of hex.
pub fn is_address(s: &str) -> bool {
    is_prefixed_hex(s.trim(), 40)
}

/// `0x` followed by 32 bytes of hex.
pub fn is_tx_hash(s: &str) -> bool {
    is_prefixed_hex(s.trim(), 64)
}

/// EIP-55 mixed-case checksum encoding.
pub fn to_checksum_address(address: &str) -> Option<String> {
    let address = address.trim();
    if !is_address(address) {
        return None;
    }
    let lower = address[2..].to_ascii_lowercase();

    let mut hasher = Keccak::v256();
    hasher.update(lower.as_bytes());
    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);

    let checksummed: String = lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();

    Some(format!("0x{}", checksummed))
}

/// Abbreviate a hash or address for tables: `0x1234…abcd`.
pub fn short_hash(s: &str) -> String {
    if s.len() <= 13 || !s.is_ascii() {
        return s.to_string();
    }
    format!("{}…{}", &s[..6], &s[s.len() - 4..])
}

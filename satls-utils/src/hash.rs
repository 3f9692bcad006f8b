/// blake3 digest of `input`, used as a 32-byte generator seed.
pub fn u8s_from_str(input: &str) -> [u8; 32] {
    *blake3::hash(input.as_bytes()).as_bytes()
}

/// The digest of `input` as four little-endian words.
pub fn u64s_from_str(input: &str) -> [u64; 4] {
    let digest = u8s_from_str(input);
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(digest.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_le_bytes(bytes);
    }
    words
}

/// Parent seed for an experiment described by a phrase, e.g. `"hill climbing"`.
pub fn seed_from_str(input: &str) -> u64 {
    u64s_from_str(input)[0]
}

use rand::Rng;

pub const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
pub const SESSION_ID_LEN: usize = 10;
pub const USER_ID_LEN: usize = 8;

/// Draws `len` symbols uniformly from [`ID_ALPHABET`].
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

pub fn generate_session_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    generate_id(rng, SESSION_ID_LEN)
}

pub fn generate_user_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    generate_id(rng, USER_ID_LEN)
}

pub fn is_valid_id(id: &str, len: usize) -> bool {
    id.len() == len && id.bytes().all(|b| ID_ALPHABET.contains(&b))
}

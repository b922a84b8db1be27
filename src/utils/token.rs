use rand::Rng;

const TOKEN_BYTES: usize = 8;

/// 16 lowercase hex characters drawn from the thread-local CSPRNG.
pub fn generate_api_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    hex::encode(bytes)
}

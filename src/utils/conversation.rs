/// Deterministic two-party thread key: sorted pair, so both participants
/// compute the same id.
pub fn conversation_id(user_a: i64, user_b: i64) -> String {
    let (low, high) = if user_a <= user_b {
        (user_a, user_b)
    } else {
        (user_b, user_a)
    };
    format!("{low}-{high}")
}

pub fn balances_key(user_id: i64) -> String {
    format!("balances:{}", user_id)
}

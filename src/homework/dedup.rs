/// True iff `candidate` differs from the last delivered message.
pub fn should_notify(candidate: &str, last_notified: &str) -> bool {
    candidate != last_notified
}

//! Generated invoice identifiers.

use chrono::{Datelike, Utc};
use rand::Rng;

/// `INV-YY-MM-XXXX`: two-digit year and month plus a random 4-digit suffix.
/// Used when a draft arrives without a user-supplied id.
pub fn generate_invoice_id() -> String {
    let now = Utc::now();
    let random: u16 = rand::thread_rng().gen_range(0..10_000);
    format!(
        "INV-{:02}-{:02}-{:04}",
        now.year() % 100,
        now.month(),
        random
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn generated_ids_follow_the_inv_scheme() {
        let re = Regex::new(r"^INV-\d{2}-\d{2}-\d{4}$").unwrap();
        for _ in 0..32 {
            let id = generate_invoice_id();
            assert!(re.is_match(&id), "unexpected id shape: {id}");
        }
    }
}

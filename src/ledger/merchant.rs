//! A heuristic for telling whether two bank descriptions name the same merchant.
//!
//! Bank exports decorate the merchant with prefixes like "DEBIT" or "POS" and
//! suffixes like store numbers. The merchant token is the first meaningful
//! word once those are removed. Matching on it is a guess: "WALMART" and
//! "WALMART.COM" give different tokens, and unrelated merchants that share a
//! first word give the same one.

/// Words that banks put in front of the merchant name.
const PREFIXES: [&str; 12] = [
    "debit",
    "transfer",
    "payment",
    "check",
    "ach",
    "wire",
    "atm",
    "pos",
    "purchase",
    "transaction",
    "ref:",
    "memo:",
];

/// The shortest token that counts as a merchant.
const MIN_TOKEN_CHARS: usize = 3;

/// Get the merchant token of a transaction description.
///
/// Returns an empty string when the description has no usable token, e.g.
/// when its first word is a number or too short.
pub fn extract_merchant_token(description: &str) -> String {
    let normalized = description.trim().to_lowercase();
    let remainder = strip_prefix(&normalized).trim();

    let segment = remainder
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .next()
        .unwrap_or_default();

    let is_number = segment.chars().all(|c| c.is_ascii_digit());

    if segment.chars().count() >= MIN_TOKEN_CHARS && !is_number {
        segment.to_owned()
    } else {
        String::new()
    }
}

/// Whether two descriptions look like they are from the same merchant.
///
/// Descriptions without a token never match anything.
pub fn same_merchant(a: &str, b: &str) -> bool {
    let token = extract_merchant_token(a);

    !token.is_empty() && token == extract_merchant_token(b)
}

/// Remove at most one leading prefix word, which must be followed by whitespace.
fn strip_prefix(description: &str) -> &str {
    for prefix in PREFIXES {
        if let Some(rest) = description.strip_prefix(prefix) {
            if rest.starts_with(char::is_whitespace) {
                return rest;
            }
        }
    }

    description
}

#[cfg(test)]
mod tests {
    use crate::ledger::{extract_merchant_token, same_merchant};

    #[test]
    fn strips_prefix_and_store_number() {
        assert_eq!(
            extract_merchant_token("DEBIT WALMART SUPERCENTER #1234"),
            "walmart"
        );
    }

    #[test]
    fn punctuation_is_kept() {
        assert_eq!(extract_merchant_token("PURCHASE WALMART.COM"), "walmart.com");
        assert!(!same_merchant(
            "DEBIT WALMART SUPERCENTER #1234",
            "PURCHASE WALMART.COM"
        ));
    }

    #[test]
    fn splits_on_hyphen_and_slash() {
        assert_eq!(extract_merchant_token("POS uber-eats 55"), "uber");
        assert_eq!(extract_merchant_token("netflix/subscription"), "netflix");
    }

    #[test]
    fn only_one_prefix_is_removed() {
        assert_eq!(extract_merchant_token("POS DEBIT Countdown"), "debit");
    }

    #[test]
    fn prefix_must_be_a_whole_word() {
        assert_eq!(extract_merchant_token("Checkers Drive-In"), "checkers");
        assert_eq!(extract_merchant_token("Atmosphere Cafe"), "atmosphere");
        assert_eq!(extract_merchant_token("debit"), "debit");
    }

    #[test]
    fn memo_prefix_is_removed() {
        assert_eq!(extract_merchant_token("MEMO: Spotify premium"), "spotify");
    }

    #[test]
    fn short_or_numeric_tokens_are_empty() {
        assert_eq!(extract_merchant_token("ATM 4412 QUEEN ST"), "");
        assert_eq!(extract_merchant_token("BP connect"), "");
        assert_eq!(extract_merchant_token("   "), "");
    }

    #[test]
    fn extraction_is_idempotent() {
        let descriptions = [
            "DEBIT WALMART SUPERCENTER #1234",
            "PURCHASE WALMART.COM",
            "POS DEBIT Countdown",
            "transfer   to savings",
            "ATM 4412 QUEEN ST",
            "ref: INV-2291",
            "Pak'nSave Albany",
            "",
        ];

        for description in descriptions {
            let token = extract_merchant_token(description);

            assert_eq!(
                extract_merchant_token(&token),
                token,
                "extraction of {description:?} is not idempotent"
            );
        }
    }

    #[test]
    fn same_merchant_needs_non_empty_tokens() {
        assert!(same_merchant("POS Countdown Albany", "Countdown Glenfield"));
        assert!(!same_merchant("ATM 12", "ATM 12"));
    }
}

//! Suggested transaction categories.
//!
//! Categories are free text: these sets seed the pickers per transaction
//! kind but the store accepts any non-empty value. [`SAVINGS_CATEGORY`] is
//! reserved for expenses recorded by the contribution workflow.

use unicode_normalization::UnicodeNormalization;

use crate::{LedgerError, ResultLedger, TransactionKind};

/// Category of every contribution-created expense.
pub const SAVINGS_CATEGORY: &str = "Tabungan";

pub const INCOME_CATEGORIES: &[&str] = &["Gaji", "Bonus", "Investasi", "Lainnya"];

pub const EXPENSE_CATEGORIES: &[&str] =
    &["Makanan", "Transport", "Belanja", "Tagihan", "Hiburan", "Lainnya"];

/// Suggested categories for a transaction kind.
#[must_use]
pub fn suggested_categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// Normalize a category for storage (trim + NFC). Unknown values pass.
pub(crate) fn normalize_category(raw: &str) -> ResultLedger<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation("category", "must not be empty"));
    }
    Ok(trimmed.nfc().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_follow_the_kind() {
        assert!(suggested_categories(TransactionKind::Income).contains(&"Gaji"));
        assert!(suggested_categories(TransactionKind::Expense).contains(&"Makanan"));
        // The reserved contribution category is not suggested for entry.
        assert!(!suggested_categories(TransactionKind::Expense).contains(&SAVINGS_CATEGORY));
    }

    #[test]
    fn normalize_trims_and_rejects_blank() {
        assert_eq!(normalize_category("  Belanja ").unwrap(), "Belanja");
        assert!(normalize_category("   ").is_err());
    }
}

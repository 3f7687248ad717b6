pub mod models;

use crate::error::ValidationError;
use models::{DonationForm, DonationRecord};

/// Append-only list of the donations one session has made.
#[derive(Debug, Default, Clone)]
pub struct SessionLedger {
    records: Vec<DonationRecord>,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the zero-based index the record landed at.
    pub fn append(&mut self, record: DonationRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Validates and appends. The ledger is untouched on error.
    pub fn submit(&mut self, form: &DonationForm) -> Result<usize, ValidationError> {
        let record = form.to_record()?;
        Ok(self.append(record))
    }

    pub fn list(&self) -> &[DonationRecord] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(donor: &str) -> DonationForm {
        DonationForm {
            donor_name: donor.into(),
            food_type: "Both".into(),
            quantity: "5kg rice".into(),
            location: "Community Hall".into(),
            contact: "555-0142".into(),
            expiry: "2026-10-20".into(),
        }
    }

    #[test]
    fn submit_appends_exactly_one_matching_record() {
        let mut ledger = SessionLedger::new();
        let idx = ledger.submit(&form("Asha")).expect("valid");
        assert_eq!(idx, 0);
        assert_eq!(ledger.count(), 1);
        assert_eq!(ledger.list()[0].donor_name, "Asha");
        assert_eq!(ledger.list()[0].quantity, "5kg rice");
    }

    #[test]
    fn rejected_submit_leaves_ledger_unchanged() {
        let mut ledger = SessionLedger::new();
        ledger.submit(&form("Asha")).expect("valid");
        let mut bad = form("Ben");
        bad.location = String::new();
        assert!(ledger.submit(&bad).is_err());
        assert_eq!(ledger.count(), 1);
        assert_eq!(ledger.list()[0].donor_name, "Asha");
    }

    #[test]
    fn records_keep_insertion_order() {
        let mut ledger = SessionLedger::new();
        ledger.submit(&form("first")).expect("valid");
        let second = ledger.submit(&form("second")).expect("valid");
        assert_eq!(second, 1);
        let donors: Vec<_> = ledger.list().iter().map(|r| r.donor_name.as_str()).collect();
        assert_eq!(donors, ["first", "second"]);
    }
}

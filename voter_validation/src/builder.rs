pub use crate::config::*;

use log::debug;

/// A voter list that is assembled and edited by hand before validation.
///
/// ```
/// pub use voter_validation::builder::Roster;
/// pub use voter_validation::{ValidationRules, VoterField, VoterRecord};
/// # use voter_validation::RosterError;
///
/// let mut roster = Roster::new();
/// roster.add_voter(VoterRecord::new("Anna", "1990-04-12", "ABC1234567", "9876543210"));
///
/// let idx = roster.add_blank_voter();
/// roster.update_voter(idx, VoterField::Name, "Bob")?;
/// roster.update_voter(idx, VoterField::VoterId, "ABC1234567")?;
///
/// let report = roster.validate(&ValidationRules::DEFAULT_RULES);
/// assert_eq!(report.summary.total, 2);
/// assert_eq!(report.summary.invalid, 1);
///
/// # Ok::<(), RosterError>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Roster {
    pub(crate) _records: Vec<VoterRecord>,
}

impl Roster {
    pub fn new() -> Roster {
        Roster {
            _records: Vec::new(),
        }
    }

    pub fn from_records(records: &[VoterRecord]) -> Roster {
        Roster {
            _records: records.to_vec(),
        }
    }

    /// Adds an entry with all the fields empty, to be filled in later.
    ///
    /// Returns the index of the new entry.
    pub fn add_blank_voter(&mut self) -> usize {
        self.add_voter(VoterRecord::default())
    }

    pub fn add_voter(&mut self, record: VoterRecord) -> usize {
        self._records.push(record);
        self._records.len() - 1
    }

    /// Replaces the content of one field of an entry.
    pub fn update_voter(
        &mut self,
        index: usize,
        field: VoterField,
        value: &str,
    ) -> Result<(), RosterError> {
        let len = self._records.len();
        let record = self
            ._records
            .get_mut(index)
            .ok_or(RosterError::NoSuchEntry { index, len })?;
        debug!(
            "update_voter: index: {:?} field: {:?} value: {:?}",
            index, field, value
        );
        *field.get_mut(record) = value.to_string();
        Ok(())
    }

    /// Removes an entry. The entries after it move up by one position.
    pub fn remove_voter(&mut self, index: usize) -> Result<VoterRecord, RosterError> {
        let len = self._records.len();
        if index >= len {
            return Err(RosterError::NoSuchEntry { index, len });
        }
        Ok(self._records.remove(index))
    }

    pub fn records(&self) -> &[VoterRecord] {
        &self._records
    }

    pub fn len(&self) -> usize {
        self._records.len()
    }

    pub fn is_empty(&self) -> bool {
        self._records.is_empty()
    }

    /// Runs the validation on the current entries. The roster is left untouched.
    pub fn validate(&self, rules: &ValidationRules) -> ValidationReport {
        crate::validate_voters(&self._records, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_then_validate() {
        let mut roster = Roster::new();
        assert!(roster.is_empty());
        let idx = roster.add_blank_voter();
        assert_eq!(idx, 0);
        for (field, value) in VoterField::ALL
            .iter()
            .zip(["Lakshmi N", "1972-08-21", "XYZ7654321", "9000000001"])
        {
            roster.update_voter(idx, *field, value).unwrap();
        }
        assert_eq!(
            roster.records()[0],
            VoterRecord::new("Lakshmi N", "1972-08-21", "XYZ7654321", "9000000001")
        );
        let report = roster.validate(&ValidationRules::DEFAULT_RULES);
        assert_eq!(report.summary.valid, 1);
        // The roster can be validated again after edits.
        roster.update_voter(idx, VoterField::Mobile, " ").unwrap();
        let report = roster.validate(&ValidationRules::DEFAULT_RULES);
        assert_eq!(report.invalid[0].errors, vec![ValidationIssue::IncompleteRecord]);
    }

    #[test]
    fn blank_entry_is_incomplete() {
        let mut roster = Roster::new();
        roster.add_blank_voter();
        let report = roster.validate(&ValidationRules::DEFAULT_RULES);
        assert_eq!(report.summary.invalid, 1);
        assert_eq!(report.invalid[0].errors, vec![ValidationIssue::IncompleteRecord]);
    }

    #[test]
    fn remove_shifts_entries() {
        let mut roster = Roster::from_records(&[
            VoterRecord::new("A", "1990-01-01", "V1", "1"),
            VoterRecord::new("B", "1990-01-02", "V2", "2"),
            VoterRecord::new("C", "1990-01-03", "V3", "3"),
        ]);
        let removed = roster.remove_voter(1).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.records()[1].name, "C");
    }

    #[test]
    fn out_of_range_index() {
        let mut roster = Roster::new();
        roster.add_blank_voter();
        assert_eq!(
            roster.update_voter(3, VoterField::Name, "X"),
            Err(RosterError::NoSuchEntry { index: 3, len: 1 })
        );
        assert_eq!(
            roster.remove_voter(1),
            Err(RosterError::NoSuchEntry { index: 1, len: 1 })
        );
    }
}

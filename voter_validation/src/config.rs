// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use chrono::NaiveDate;

/// One entry of a voter list.
///
/// All the fields are free text. An empty field (after trimming) is treated as missing.
#[derive(Eq, PartialEq, Debug, Clone, Default, Hash)]
pub struct VoterRecord {
    pub name: String,
    pub date_of_birth: String,
    pub voter_id: String,
    pub mobile: String,
}

impl VoterRecord {
    pub fn new(name: &str, date_of_birth: &str, voter_id: &str, mobile: &str) -> VoterRecord {
        VoterRecord {
            name: name.to_string(),
            date_of_birth: date_of_birth.to_string(),
            voter_id: voter_id.to_string(),
            mobile: mobile.to_string(),
        }
    }
}

/// The fields of a voter record, as they can be edited in a roster.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum VoterField {
    Name,
    DateOfBirth,
    VoterId,
    Mobile,
}

impl VoterField {
    pub const ALL: [VoterField; 4] = [
        VoterField::Name,
        VoterField::DateOfBirth,
        VoterField::VoterId,
        VoterField::Mobile,
    ];

    pub fn get(self, record: &VoterRecord) -> &str {
        match self {
            VoterField::Name => &record.name,
            VoterField::DateOfBirth => &record.date_of_birth,
            VoterField::VoterId => &record.voter_id,
            VoterField::Mobile => &record.mobile,
        }
    }

    pub fn get_mut(self, record: &mut VoterRecord) -> &mut String {
        match self {
            VoterField::Name => &mut record.name,
            VoterField::DateOfBirth => &mut record.date_of_birth,
            VoterField::VoterId => &mut record.voter_id,
            VoterField::Mobile => &mut record.mobile,
        }
    }
}

// ******** Output data structures *********

/// A reason for which a voter record is rejected.
///
/// The display form of each issue is the label shown to the operators.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum ValidationIssue {
    /// One of the name, date of birth, voter ID or mobile is missing.
    IncompleteRecord,
    /// The voter ID already appeared earlier in the list.
    DuplicateVoterId,
    /// The voter is younger than the minimum age on the reference date.
    UnderAge { age: i32, minimum: u32 },
    /// The same name (case insensitive) and date of birth already appeared earlier in the list.
    DuplicateNameAndDob,
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::IncompleteRecord => write!(f, "Incomplete record"),
            ValidationIssue::DuplicateVoterId => write!(f, "Duplicate Voter ID"),
            ValidationIssue::UnderAge { age, minimum } => {
                write!(f, "Age below {} ({} years)", minimum, age)
            }
            ValidationIssue::DuplicateNameAndDob => write!(f, "Duplicate Name + DOB combination"),
        }
    }
}

/// A voter record together with the outcome of its validation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ValidatedVoter {
    /// The position of the record in the input list, starting at 1.
    pub id: usize,
    pub record: VoterRecord,
    /// The issues found, in the order the checks are run.
    pub errors: Vec<ValidationIssue>,
}

impl ValidatedVoter {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

/// The partition of a voter list into valid and invalid records.
///
/// Both lists keep the relative order of the input.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ValidationReport {
    pub summary: ValidationSummary,
    pub valid: Vec<ValidatedVoter>,
    pub invalid: Vec<ValidatedVoter>,
}

/// Errors when editing a roster.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RosterError {
    NoSuchEntry { index: usize, len: usize },
}

impl Error for RosterError {}

impl Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::NoSuchEntry { index, len } => write!(
                f,
                "RosterError: no entry at index {} (the roster has {} entries)",
                index, len
            ),
        }
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ValidationRules {
    /// Voters strictly younger than this age are rejected.
    pub minimum_age: u32,
    /// The date at which the ages are computed. If not provided, the current local date is used.
    pub reference_date: Option<NaiveDate>,
}

impl ValidationRules {
    pub const DEFAULT_RULES: ValidationRules = ValidationRules {
        minimum_age: 18,
        reference_date: None,
    };
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules::DEFAULT_RULES
    }
}

mod config;
pub mod builder;
pub mod manual;

use chrono::{Datelike, NaiveDate};
use log::{debug, info};

use std::collections::HashSet;

pub use crate::config::*;

// **** Private structures ****

/// The formats accepted for a date of birth, tried in order.
/// The first one is what HTML date inputs produce.
const DATE_OF_BIRTH_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

// The trimmed view of a record. Empty fields are None.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct CheckedFields<'a> {
    name: Option<&'a str>,
    date_of_birth: Option<&'a str>,
    voter_id: Option<&'a str>,
    mobile: Option<&'a str>,
}

impl<'a> CheckedFields<'a> {
    fn new(record: &'a VoterRecord) -> CheckedFields<'a> {
        CheckedFields {
            name: non_empty(&record.name),
            date_of_birth: non_empty(&record.date_of_birth),
            voter_id: non_empty(&record.voter_id),
            mobile: non_empty(&record.mobile),
        }
    }

    fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.date_of_birth.is_some()
            && self.voter_id.is_some()
            && self.mobile.is_some()
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t)
    }
}

// The identities seen so far during one validation run.
#[derive(Debug)]
struct SeenIdentities {
    voter_ids: HashSet<String>,
    name_dob_keys: HashSet<String>,
}

impl SeenIdentities {
    fn with_capacity(n: usize) -> SeenIdentities {
        SeenIdentities {
            voter_ids: HashSet::with_capacity(n),
            name_dob_keys: HashSet::with_capacity(n),
        }
    }

    /// Returns true if the voter id was already registered.
    fn check_voter_id(&mut self, voter_id: &str) -> bool {
        !self.voter_ids.insert(voter_id.to_string())
    }

    /// Returns true if the name and date of birth were already registered together.
    fn check_name_dob(&mut self, name: &str, date_of_birth: &str) -> bool {
        let key = format!("{}_{}", name.to_lowercase(), date_of_birth);
        !self.name_dob_keys.insert(key)
    }
}

/// Parses a date of birth in one of the accepted formats.
///
/// ```
/// use voter_validation::parse_date_of_birth;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date_of_birth("2001-03-09"), NaiveDate::from_ymd_opt(2001, 3, 9));
/// assert_eq!(parse_date_of_birth("09/03/2001"), NaiveDate::from_ymd_opt(2001, 3, 9));
/// assert_eq!(parse_date_of_birth("next tuesday"), None);
/// ```
pub fn parse_date_of_birth(text: &str) -> Option<NaiveDate> {
    let t = text.trim();
    DATE_OF_BIRTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(t, fmt).ok())
}

/// The age in whole years on the given date.
///
/// The age only increases on the anniversary of the birth date. Someone born on February 29th
/// gets one year older on March 1st in non-leap years.
pub fn compute_age(date_of_birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Validates a list of voters and partitions it into valid and invalid records.
///
/// Arguments:
/// * `records` the voter list, in input order. It may be empty.
/// * `rules` the minimum age and the date at which the ages are computed.
///
/// Every record ends up in exactly one of the two lists. The checks are run in this order:
/// incomplete record, duplicate voter id, age, duplicate name and date of birth.
/// For duplicates, only the second and later occurrences are flagged.
///
/// This function keeps no state between calls.
pub fn validate_voters(records: &[VoterRecord], rules: &ValidationRules) -> ValidationReport {
    let reference_date = rules
        .reference_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(
        "Validating {:?} voters, reference date: {}, rules: {:?}",
        records.len(),
        reference_date,
        rules
    );

    let mut seen = SeenIdentities::with_capacity(records.len());
    let mut valid: Vec<ValidatedVoter> = Vec::new();
    let mut invalid: Vec<ValidatedVoter> = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let errors = check_record(record, &mut seen, rules.minimum_age, reference_date);
        debug!("validate_voters: idx: {:?} errors: {:?}", idx, errors);
        let vv = ValidatedVoter {
            id: idx + 1,
            record: record.clone(),
            errors,
        };
        if vv.is_valid() {
            valid.push(vv);
        } else {
            invalid.push(vv);
        }
    }

    let summary = ValidationSummary {
        total: records.len(),
        valid: valid.len(),
        invalid: invalid.len(),
    };
    info!(
        "Validation done: {} total, {} valid, {} invalid",
        summary.total, summary.valid, summary.invalid
    );
    ValidationReport {
        summary,
        valid,
        invalid,
    }
}

fn check_record(
    record: &VoterRecord,
    seen: &mut SeenIdentities,
    minimum_age: u32,
    reference_date: NaiveDate,
) -> Vec<ValidationIssue> {
    let fields = CheckedFields::new(record);
    let mut errors: Vec<ValidationIssue> = Vec::new();

    if !fields.is_complete() {
        errors.push(ValidationIssue::IncompleteRecord);
    }

    if let Some(voter_id) = fields.voter_id {
        if seen.check_voter_id(voter_id) {
            errors.push(ValidationIssue::DuplicateVoterId);
        }
    }

    if let Some(dob) = fields.date_of_birth {
        match parse_date_of_birth(dob) {
            Some(d) => {
                let age = compute_age(d, reference_date);
                if age < minimum_age as i32 {
                    errors.push(ValidationIssue::UnderAge {
                        age,
                        minimum: minimum_age,
                    });
                }
            }
            // No age can be computed, so the age check does not apply.
            None => debug!("check_record: could not read date of birth {:?}", dob),
        }
    }

    if let (Some(name), Some(dob)) = (fields.name, fields.date_of_birth) {
        if seen.check_name_dob(name, dob) {
            errors.push(ValidationIssue::DuplicateNameAndDob);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Months};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rules_at(y: i32, m: u32, d: u32) -> ValidationRules {
        ValidationRules {
            reference_date: Some(date(y, m, d)),
            ..ValidationRules::DEFAULT_RULES
        }
    }

    fn labels(vv: &ValidatedVoter) -> Vec<String> {
        vv.errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn empty_list() {
        init();
        let res = validate_voters(&[], &ValidationRules::DEFAULT_RULES);
        assert_eq!(
            res.summary,
            ValidationSummary {
                total: 0,
                valid: 0,
                invalid: 0
            }
        );
        assert!(res.valid.is_empty());
        assert!(res.invalid.is_empty());
    }

    #[test]
    fn complete_adult_unique_record_is_valid() {
        init();
        let records = vec![VoterRecord::new("Asha Rao", "1990-04-12", "ABC1234567", "9876543210")];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        assert_eq!(res.summary.valid, 1);
        assert_eq!(res.valid[0].id, 1);
        assert!(res.valid[0].is_valid());
        assert_eq!(res.valid[0].record, records[0]);
    }

    #[test]
    fn duplicate_voter_id_flags_later_occurrence() {
        init();
        let records = vec![
            VoterRecord::new("Asha Rao", "1990-04-12", "ABC1234567", "9876543210"),
            VoterRecord::new("Vikram Das", "1985-01-30", "ABC1234567", "9123456780"),
        ];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        assert_eq!(res.valid.len(), 1);
        assert_eq!(res.valid[0].id, 1);
        assert_eq!(res.invalid.len(), 1);
        assert_eq!(res.invalid[0].id, 2);
        assert_eq!(labels(&res.invalid[0]), vec!["Duplicate Voter ID"]);
    }

    #[test]
    fn voter_id_is_trimmed_and_case_sensitive() {
        init();
        let records = vec![
            VoterRecord::new("A", "1990-04-12", "abc1", "1"),
            VoterRecord::new("B", "1990-04-13", " abc1 ", "2"),
            VoterRecord::new("C", "1990-04-14", "ABC1", "3"),
        ];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        let invalid_ids: Vec<usize> = res.invalid.iter().map(|v| v.id).collect();
        assert_eq!(invalid_ids, vec![2]);
    }

    #[test]
    fn age_boundary_is_inclusive() {
        init();
        let records = vec![
            VoterRecord::new("Exactly Eighteen", "2006-06-15", "V1", "1"),
            VoterRecord::new("Almost Eighteen", "2006-07-15", "V2", "2"),
        ];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        assert_eq!(res.valid.len(), 1);
        assert_eq!(res.valid[0].record.name, "Exactly Eighteen");
        assert_eq!(labels(&res.invalid[0]), vec!["Age below 18 (17 years)"]);
    }

    #[test]
    fn age_relative_to_today() {
        init();
        let today = Local::now().date_naive();
        let eighteen = today.checked_sub_months(Months::new(18 * 12)).unwrap();
        let almost = today.checked_sub_months(Months::new(17 * 12 + 11)).unwrap();
        assert_eq!(compute_age(eighteen, today), 18);
        assert_eq!(compute_age(almost, today), 17);

        let records = vec![
            VoterRecord::new("A", &eighteen.format("%Y-%m-%d").to_string(), "V1", "1"),
            VoterRecord::new("B", &almost.format("%Y-%m-%d").to_string(), "V2", "2"),
        ];
        let res = validate_voters(&records, &ValidationRules::DEFAULT_RULES);
        assert_eq!(res.summary.valid, 1);
        assert_eq!(labels(&res.invalid[0]), vec!["Age below 18 (17 years)"]);
    }

    #[test]
    fn leap_day_birthday() {
        let dob = date(2008, 2, 29);
        assert_eq!(compute_age(dob, date(2026, 2, 28)), 17);
        assert_eq!(compute_age(dob, date(2026, 3, 1)), 18);
        assert_eq!(compute_age(dob, date(2028, 2, 29)), 20);
    }

    #[test]
    fn future_birth_date_is_under_age() {
        init();
        let records = vec![VoterRecord::new("Not Born", "2030-01-01", "V1", "1")];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        assert_eq!(labels(&res.invalid[0]), vec!["Age below 18 (-6 years)"]);
    }

    #[test]
    fn incomplete_records() {
        init();
        let records = vec![
            VoterRecord::new("  ", "1990-04-12", "V1", "1"),
            VoterRecord::new("B", "1990-04-12", "V2", ""),
            VoterRecord::default(),
        ];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        assert_eq!(res.summary.invalid, 3);
        for vv in res.invalid.iter() {
            assert_eq!(vv.errors, vec![ValidationIssue::IncompleteRecord]);
        }
    }

    #[test]
    fn duplicate_name_and_dob_ignores_case() {
        init();
        let records = vec![
            VoterRecord::new("Meena Iyer", "1979-11-02", "V1", "1"),
            VoterRecord::new("MEENA IYER ", "1979-11-02", "V2", "2"),
            VoterRecord::new("Meena Iyer", "1979-11-03", "V3", "3"),
        ];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        assert_eq!(res.invalid.len(), 1);
        assert_eq!(res.invalid[0].id, 2);
        assert_eq!(
            labels(&res.invalid[0]),
            vec!["Duplicate Name + DOB combination"]
        );
    }

    #[test]
    fn duplicate_name_and_dob_compares_dates_as_written() {
        init();
        let records = vec![
            VoterRecord::new("Kiran Patel", "15/08/1980", "V1", "1"),
            VoterRecord::new("Kiran Patel", "1980-08-15", "V2", "2"),
            VoterRecord::new("Joseph M", "sometime", "V3", "3"),
            VoterRecord::new("joseph m", " sometime", "V4", "4"),
        ];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        let valid_ids: Vec<usize> = res.valid.iter().map(|v| v.id).collect();
        assert_eq!(valid_ids, vec![1, 2, 3]);
        assert_eq!(res.invalid[0].id, 4);
        assert_eq!(
            res.invalid[0].errors,
            vec![ValidationIssue::DuplicateNameAndDob]
        );
    }

    #[test]
    fn errors_follow_check_order() {
        init();
        let records = vec![
            VoterRecord::new("Ravi Kumar", "2010-05-05", "V1", "1"),
            VoterRecord::new("ravi kumar", "2010-05-05", "V1", ""),
        ];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        assert_eq!(res.invalid.len(), 2);
        assert_eq!(labels(&res.invalid[0]), vec!["Age below 18 (14 years)"]);
        assert_eq!(
            labels(&res.invalid[1]),
            vec![
                "Incomplete record",
                "Duplicate Voter ID",
                "Age below 18 (14 years)",
                "Duplicate Name + DOB combination"
            ]
        );
    }

    #[test]
    fn unreadable_date_of_birth_is_not_age_checked() {
        init();
        let records = vec![
            VoterRecord::new("A", "31st of May", "V1", "1"),
            // Month first: not one of the accepted formats.
            VoterRecord::new("B", "08/15/1980", "V2", "2"),
            VoterRecord::new("C", "2010-13-01", "V3", "3"),
        ];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        assert_eq!(res.summary.valid, 3);
        assert!(res.invalid.is_empty());
    }

    #[test]
    fn partitions_keep_order_and_cover_input() {
        init();
        let records = vec![
            VoterRecord::new("A", "1990-01-01", "V1", "1"),
            VoterRecord::new("B", "2015-01-01", "V2", "2"),
            VoterRecord::new("C", "1990-01-02", "V3", "3"),
            VoterRecord::new("D", "1990-01-03", "V1", "4"),
            VoterRecord::new("E", "1990-01-04", "V5", "5"),
        ];
        let res = validate_voters(&records, &rules_at(2024, 6, 15));
        assert_eq!(res.valid.len() + res.invalid.len(), records.len());
        let valid_ids: Vec<usize> = res.valid.iter().map(|v| v.id).collect();
        let invalid_ids: Vec<usize> = res.invalid.iter().map(|v| v.id).collect();
        assert_eq!(valid_ids, vec![1, 3, 5]);
        assert_eq!(invalid_ids, vec![2, 4]);
    }

    #[test]
    fn validation_is_idempotent() {
        init();
        let records = vec![
            VoterRecord::new("A", "1990-01-01", "V1", "1"),
            VoterRecord::new("a", "1990-01-01", "V1", ""),
        ];
        let rules = rules_at(2024, 6, 15);
        let first = validate_voters(&records, &rules);
        let second = validate_voters(&records, &rules);
        assert_eq!(first, second);
    }

    #[test]
    fn custom_minimum_age() {
        init();
        let rules = ValidationRules {
            minimum_age: 21,
            reference_date: Some(date(2024, 6, 15)),
        };
        let records = vec![VoterRecord::new("A", "2004-01-01", "V1", "1")];
        let res = validate_voters(&records, &rules);
        assert_eq!(labels(&res.invalid[0]), vec!["Age below 21 (20 years)"]);
    }

    #[test]
    fn date_formats() {
        let expected = Some(date(1999, 12, 31));
        assert_eq!(parse_date_of_birth("1999-12-31"), expected);
        assert_eq!(parse_date_of_birth("1999/12/31"), expected);
        assert_eq!(parse_date_of_birth("31-12-1999"), expected);
        assert_eq!(parse_date_of_birth("31/12/1999"), expected);
        assert_eq!(parse_date_of_birth(" 31.12.1999 "), expected);
        assert_eq!(parse_date_of_birth("1999-02-30"), None);
        assert_eq!(parse_date_of_birth(""), None);
    }
}

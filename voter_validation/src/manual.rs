/*!

This is the long-form manual for `voter_validation` and `votercheck`.

## Checks

Every record of a voter list goes through the following checks, in this order. A record
may fail several of them; it is valid only if it passes all of them.

| Label                               | Condition                                                              |
|-------------------------------------|------------------------------------------------------------------------|
| `Incomplete record`                 | one of name, date of birth, voter ID or mobile is empty                |
| `Duplicate Voter ID`                | the voter ID already appeared earlier in the list                      |
| `Age below 18 (<n> years)`          | the voter is younger than 18 on the reference date                     |
| `Duplicate Name + DOB combination`  | the same name (ignoring case) and date of birth appeared earlier        |

Only the second and later occurrences of a duplicate are flagged: the first record
with a given voter ID stays valid if nothing else is wrong with it.

Ages are counted in whole years, and a voter becomes one year older on the
anniversary of the date of birth. A voter who turns 18 on the reference date is valid.

Dates of birth are read in the formats `YYYY-MM-DD`, `YYYY/MM/DD`, `DD-MM-YYYY`,
`DD/MM/YYYY` and `DD.MM.YYYY`. A date of birth in any other form is not age checked.

The name and date of birth are compared as written: `15/08/1980` and `1980-08-15` are
different dates of birth for the duplicate check.

## Input formats

The following formats are supported by `votercheck`:
* `csv` Comma Separated Values with a header row (default)
* `xlsx` Excel spreadsheet with a header row
* `json` the list of voters as a JSON array

### csv

The first row holds the column names. Names are not case sensitive, and spaces,
dashes and underscores are ignored, so `Voter ID`, `voter_id` and `VOTERID` are the same column.

```text
Name,DOB,Voter ID,Mobile
Asha Rao,1990-04-12,ABC1234567,9876543210
Vikram Das,1985-01-30,ABC1234568,9123456780
```

The recognized column names are:

| Field          | Accepted names                                        |
|----------------|-------------------------------------------------------|
| name           | `name`, `full name`, `voter name`                     |
| date of birth  | `dob`, `date of birth`, `birth date`                  |
| voter ID       | `voter id`, `voter id number`, `epic`, `epic no`, `epic number` |
| mobile         | `mobile`, `mobile no`, `mobile number`, `phone`, `phone number` |

Other columns are ignored (or rejected with `--strict-columns`). A missing column is
treated as empty for every row, so all the records will be reported as incomplete.

### xlsx

Same layout as `csv`, in the first worksheet of the workbook (or the one given by
`--excel-worksheet-name`). Date cells are read as `YYYY-MM-DD`.

### json

```text
[
  {"name": "Asha Rao", "dob": "1990-04-12", "voterId": "ABC1234567", "mobile": "9876543210"}
]
```

`dateOfBirth` is accepted instead of `dob`. Missing keys are treated as empty.

## Configuration

`votercheck` comes with sensible defaults, but a configuration file in JSON can be used to
validate several files at once or to fix the reference date (for reproducible reports).

```text
{
  "outputSettings": { "listName": "Ward 12 draft roll", "outputPath": "ward12_report.json" },
  "voterFileSources": [
    { "provider": "csv", "filePath": "ward12.csv" },
    { "provider": "xlsx", "filePath": "ward12_additions.xlsx", "excelWorksheetName": "Sheet1" }
  ],
  "rules": { "minimumAge": 18, "referenceDate": "2024-06-01" }
}
```

File paths are relative to the directory of the configuration file. All the sources are
read in order and validated together as a single list, so duplicates are detected across
files.

Command line flags take precedence over the configuration file.

 */

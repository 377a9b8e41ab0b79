/*!

This is the long-form manual for `survey_mapping` and `svmap`.

## Input formats

The following formats are supported:
* `xlsx` Excel exports, as produced by Microsoft Forms and Google Forms
* `csv` Comma Separated Values exports

In both cases the first row of the first sheet (or of the file) is the header
row, and every following row is one survey response. When no format is given
on the command line, it is inferred from the file extension.

## The question schema

The schema is a JSON file that lists the questions of the survey, keyed by
the field name wanted in the output:

```text
{
  "survey_metadata": {
    "title": "Team onboarding survey",
    "wave": 3
  },
  "questions": {
    "role": { "question": "What is your role?", "type": "single_choice" },
    "colors": { "question": "Favorite colors", "type": "multiple_choice" },
    "feedback": { "question": "Anything else?", "type": "open_text" }
  }
}
```

The order of the keys under `questions` is the order of the fields in every
output record. `survey_metadata` is optional and is copied to the output
untouched.

Each question carries:
- `question`: the text as it appeared in the survey. It is matched against
  the column headers of the export, first verbatim, then after canonicalizing
  case, whitespace and punctuation, then by canonicalized containment in
  either direction.
- `type` (optional, defaults to `other`): one of `open_text`,
  `single_choice`, `multiple_choice`, `identifier` or `other`. Only
  `multiple_choice` changes the handling: the cell is split on `;` and the
  answer becomes a list of selections. All other types produce a single
  cleaned string.

## Metadata columns

Export bookkeeping columns (identifiers, start and completion times, email
addresses, respondent names, timestamps, IP addresses) are recognized by
their header and dropped: a question that lands on one of them is left out
of the output records entirely.

## Output

The output is a single JSON document:

```text
{
  "survey_metadata": { ... },
  "responses": [
    { "response_id": 1, "role": "Engineer", "colors": ["Red", "Blue"], "feedback": null },
    { "response_id": 2, "role": "Designer", "colors": null, "feedback": "More snacks" }
  ]
}
```

`response_id` is the 1-based position of the row in the export. Questions
whose text could not be matched to any column are reported as `null` for
every response, with a warning on the console naming the question.

## Command line

```text
svmap --schema schema.json --input export.xlsx --out responses.json
```

Useful flags:
- `--input-type` overrides the format inference (`xlsx` or `csv`).
- `--out` writes the document to a file instead of the standard output.
- `--reference` compares the output against a known-good document and fails
  on any difference.
- `--verbose` enables debug logging, including the column resolved for each
  question.

 */

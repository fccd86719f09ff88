use screening_spec::{
    AnswerRecord, candidate_profile, example_record, validate_all, validate_section, word_count,
};

fn filled_section_one() -> AnswerRecord {
    let registry = candidate_profile();
    let mut record = AnswerRecord::with_defaults(&registry);
    record.insert("full_name", "Ada Lovelace");
    record.insert("email", "ada@example.com");
    record.insert("role1_company", "Analytical Engines Ltd");
    record.insert("role1_title", "Principal PM");
    record.insert("role1_duration", "2019-2024");
    record.insert("role1_supervisor", "Charles Babbage, CTO");
    record.insert("role1_rating", 9);
    record.insert("reference_check_consent", "Yes, all three");
    record
}

#[test]
fn validation_is_deterministic_and_idempotent() {
    let registry = candidate_profile();
    let record = filled_section_one();
    let first = validate_section(&registry, 3, &record);
    let second = validate_section(&registry, 3, &record);
    assert_eq!(first, second);
}

#[test]
fn empty_record_fails_section_one_with_required_errors() {
    let registry = candidate_profile();
    let record = AnswerRecord::with_defaults(&registry);
    let report = validate_section(&registry, 1, &record);
    assert!(!report.valid);
    assert_eq!(
        report.errors.get("full_name").map(String::as_str),
        Some("This field is required")
    );
    // Rating at its zero default counts as unanswered.
    assert!(report.errors.contains_key("role1_rating"));
    // Optional role-two fields never gate progress.
    assert!(!report.errors.contains_key("role2_company"));
}

#[test]
fn filled_section_one_passes() {
    let registry = candidate_profile();
    let record = filled_section_one();
    let report = validate_section(&registry, 1, &record);
    assert!(report.valid, "unexpected errors: {:?}", report.errors);
}

#[test]
fn malformed_email_is_flagged_on_every_pass() {
    let registry = candidate_profile();
    let mut record = filled_section_one();
    record.insert("email", "not-an-address");

    let section_one = validate_section(&registry, 1, &record);
    assert_eq!(
        section_one.errors.get("email").map(String::as_str),
        Some("Please enter a valid email address")
    );

    // Cross-cutting: flagged even when validating a section that does not
    // own the email field.
    let section_five = validate_section(&registry, 5, &record);
    assert!(section_five.errors.contains_key("email"));
}

#[test]
fn empty_email_is_not_shape_checked_outside_its_section() {
    let registry = candidate_profile();
    let record = AnswerRecord::with_defaults(&registry);
    let report = validate_section(&registry, 4, &record);
    assert!(!report.errors.contains_key("email"));
}

#[test]
fn allocation_sum_must_be_exactly_one_hundred() {
    let registry = candidate_profile();
    let mut record = example_record(&registry);
    record.insert("prioritization_privacy", 30);
    record.insert("prioritization_ai", 30);
    record.insert("prioritization_ux", 20);
    record.insert("prioritization_growth", 15);
    record.insert("prioritization_revenue", 10); // sums to 105

    let report = validate_section(&registry, 3, &record);
    assert!(!report.valid);
    assert_eq!(
        report.errors.get("prioritization_total").map(String::as_str),
        Some("Prioritization values must sum to exactly 100 points")
    );
    // The aggregate error stands alone; the individual fields are fine.
    assert!(!report.errors.contains_key("prioritization_privacy"));

    // The rule only fires when validating the owning section.
    let elsewhere = validate_section(&registry, 2, &record);
    assert!(!elsewhere.errors.contains_key("prioritization_total"));
}

#[test]
fn word_ceiling_passes_at_limit_and_fails_one_over() {
    let registry = candidate_profile();

    let at_limit = vec!["word"; 150].join(" ");
    let mut record = example_record(&registry);
    record.insert("scenario_response", at_limit.clone());
    let report = validate_section(&registry, 3, &record);
    assert!(
        !report.errors.contains_key("scenario_response"),
        "150 words must be accepted"
    );

    record.insert("scenario_response", format!("{at_limit} extra"));
    let report = validate_section(&registry, 3, &record);
    assert_eq!(
        report.errors.get("scenario_response").map(String::as_str),
        Some("Must be 150 words or less")
    );
}

#[test]
fn word_ceilings_apply_outside_the_owning_section() {
    let registry = candidate_profile();
    let mut record = AnswerRecord::with_defaults(&registry);
    record.insert("unique_edge", vec!["word"; 151].join(" "));

    // unique_edge lives in section 7; the ceiling is checked from section 1.
    let report = validate_section(&registry, 1, &record);
    assert!(report.errors.contains_key("unique_edge"));
}

#[test]
fn ratings_outside_the_scale_are_rejected() {
    let registry = candidate_profile();
    let mut record = filled_section_one();
    record.insert("role1_rating", 11);
    let report = validate_section(&registry, 1, &record);
    assert_eq!(
        report.errors.get("role1_rating").map(String::as_str),
        Some("Rating must be between 1 and 10")
    );
}

#[test]
fn choice_answers_must_match_an_option() {
    let registry = candidate_profile();
    let mut record = filled_section_one();
    record.insert("reference_check_consent", "Maybe later");
    let report = validate_section(&registry, 1, &record);
    assert!(report.errors.contains_key("reference_check_consent"));
}

#[test]
fn validate_all_reports_every_section() {
    let registry = candidate_profile();
    let record = AnswerRecord::with_defaults(&registry);
    let reports = validate_all(&registry, &record);
    assert_eq!(reports.len(), 9);
    assert!(reports.iter().any(|report| !report.valid));

    let valid = example_record(&registry);
    assert!(
        validate_all(&registry, &valid)
            .iter()
            .all(|report| report.valid)
    );
}

#[test]
fn word_count_splits_on_any_whitespace() {
    assert_eq!(word_count("  one\ttwo\nthree  "), 3);
    assert_eq!(word_count(""), 0);
}

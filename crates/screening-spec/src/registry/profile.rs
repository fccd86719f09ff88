//! Built-in registry for the product-manager candidate screening form.

use crate::registry::field::{FieldKind, FieldSpec};
use crate::registry::section::SectionSpec;
use crate::registry::{AllocationRule, Registry};

fn field(name: &str, label: &str, kind: FieldKind) -> FieldSpec {
    FieldSpec::new(name, label, kind)
}

fn required(mut field: FieldSpec) -> FieldSpec {
    field.required = true;
    field
}

fn capped(mut field: FieldSpec, words: usize) -> FieldSpec {
    field.word_limit = Some(words);
    field
}

fn choice(name: &str, label: &str, options: &[&str]) -> FieldSpec {
    let mut spec = FieldSpec::new(name, label, FieldKind::Choice);
    spec.choices = Some(options.iter().map(|option| option.to_string()).collect());
    spec
}

// `gating`: the role blocks navigation, so everything but the free-text
// scope is required.
fn role_fields(ordinal: u8, gating: bool) -> Vec<FieldSpec> {
    let prefix = format!("role{ordinal}");
    let label = |suffix: &str| format!("Role {ordinal} {suffix}");
    let mut fields = vec![
        field(&format!("{prefix}_company"), &label("Company"), FieldKind::Text),
        field(&format!("{prefix}_title"), &label("Title"), FieldKind::Text),
        field(
            &format!("{prefix}_duration"),
            &label("Duration"),
            FieldKind::Text,
        ),
        field(
            &format!("{prefix}_supervisor"),
            &label("Direct Supervisor Name & Title"),
            FieldKind::Text,
        ),
        field(
            &format!("{prefix}_scope"),
            &label("Brief Scope Description"),
            FieldKind::LongText,
        ),
        field(
            &format!("{prefix}_rating"),
            &label("Self-assessed Performance Rating"),
            FieldKind::Rating,
        ),
    ];
    if gating {
        for spec in &mut fields {
            if !spec.name.ends_with("_scope") {
                spec.required = true;
            }
        }
    }
    fields
}

/// The nine-section candidate screening registry.
pub fn candidate_profile() -> Registry {
    let mut excellence = vec![
        required(field("full_name", "Full Name", FieldKind::Text)),
        required(field("email", "Email Address", FieldKind::Text)),
    ];
    excellence.extend(role_fields(1, true));
    let mut role2 = role_fields(2, false);
    for spec in &mut role2 {
        if spec.name == "role2_scope" {
            spec.word_limit = Some(50);
        }
    }
    excellence.extend(role2);
    excellence.extend(role_fields(3, false));
    excellence.push(required(choice(
        "reference_check_consent",
        "Reference Check Consent",
        &[
            "Yes, all three",
            "Yes, two of three",
            "Yes, one of three",
            "No, but can explain why",
        ],
    )));
    excellence.push(field(
        "reference_check_explanation",
        "Explanation for Limited Reference Availability",
        FieldKind::LongText,
    ));

    let expertise = vec![
        required(field("ai_arch_rating", "AI Architecture Self-rating", FieldKind::Rating)),
        required(field(
            "ai_arch_recent_experience",
            "Most Recent Hands-on AI Experience",
            FieldKind::LongText,
        )),
        field(
            "ai_arch_models_frameworks",
            "AI Models/Frameworks Shipped",
            FieldKind::LongText,
        ),
        required(field("b2c_growth_rating", "B2C Growth Self-rating", FieldKind::Rating)),
        field(
            "b2c_growth_best_achievement",
            "Best Scaling Achievement",
            FieldKind::LongText,
        ),
        field(
            "b2c_growth_largest_userbase",
            "Largest User Base Managed",
            FieldKind::Text,
        ),
        required(field("mobile_rating", "Mobile Product Self-rating", FieldKind::Rating)),
        field(
            "mobile_apps_launched",
            "Number of Mobile Apps Launched",
            FieldKind::Integer,
        ),
        field("mobile_downloads", "Total Downloads Across Apps", FieldKind::Text),
        required(field("privacy_rating", "Privacy & Security Self-rating", FieldKind::Rating)),
        field(
            "privacy_challenge",
            "Hardest Privacy Challenge Solved",
            FieldKind::LongText,
        ),
        field(
            "privacy_compliance_experience",
            "Compliance Experience",
            FieldKind::LongText,
        ),
    ];

    let execution = vec![
        required(field("beta_product", "Beta Product Name", FieldKind::Text)),
        required(field("beta_company", "Beta Product Company", FieldKind::Text)),
        required(field(
            "beta_participants",
            "Number of Beta Participants",
            FieldKind::Integer,
        )),
        field("beta_metrics", "Key Beta Metrics", FieldKind::LongText),
        field("beta_pivot", "Pivot Driven by Beta Feedback", FieldKind::LongText),
        field("beta_involvement", "Your Involvement", FieldKind::LongText),
        required(field(
            "prioritization_privacy",
            "Points: Privacy",
            FieldKind::Integer,
        )),
        required(field("prioritization_ai", "Points: AI Capability", FieldKind::Integer)),
        required(field("prioritization_ux", "Points: User Experience", FieldKind::Integer)),
        required(field("prioritization_growth", "Points: Growth", FieldKind::Integer)),
        required(field(
            "prioritization_revenue",
            "Points: Revenue",
            FieldKind::Integer,
        )),
        capped(
            field(
                "prioritization_explanation",
                "Prioritization Rationale",
                FieldKind::LongText,
            ),
            100,
        ),
        required(capped(
            field("scenario_response", "Scenario Response", FieldKind::LongText),
            150,
        )),
    ];

    let vision = vec![
        required(field(
            "transformative_thinking",
            "Transformative Product Thinking",
            FieldKind::LongText,
        )),
        required(capped(
            field(
                "sovereignty_philosophy",
                "Data Sovereignty Philosophy",
                FieldKind::LongText,
            ),
            100,
        )),
        required(capped(
            field(
                "competitive_differentiation",
                "Competitive Differentiation",
                FieldKind::LongText,
            ),
            100,
        )),
    ];

    let assessment = vec![
        required(field("impact_plan_1", "First 30 Days Impact Plan", FieldKind::LongText)),
        required(field("impact_plan_2", "Days 31-60 Impact Plan", FieldKind::LongText)),
        required(field("impact_plan_3", "Days 61-90 Impact Plan", FieldKind::LongText)),
        required(field("critical_q1", "Critical Question 1", FieldKind::LongText)),
        required(field("critical_q2", "Critical Question 2", FieldKind::LongText)),
        required(field("critical_q3", "Critical Question 3", FieldKind::LongText)),
    ];

    let logistics = vec![
        required(field("employment_status", "Current Employment Status", FieldKind::Text)),
        required(field("notice_period", "Notice Period", FieldKind::Text)),
        field(
            "available_by_july15",
            "Available by July 15?",
            FieldKind::Boolean,
        ),
        field("contract_to_hire", "Open to Contract-to-Hire?", FieldKind::Boolean),
        required(choice(
            "comp_alignment",
            "Compensation Alignment",
            &[
                "Aligns with my expectations",
                "Would like to discuss further",
                "Doesn't meet my requirements",
            ],
        )),
        required(capped(
            field(
                "remote_work_excellence",
                "Remote Work Excellence",
                FieldKind::LongText,
            ),
            75,
        )),
    ];

    let differentiator = vec![
        required(capped(
            field("unique_edge", "Your Unique Edge", FieldKind::LongText),
            150,
        )),
        field("evidence_link1", "Evidence Link 1", FieldKind::Text),
        field("evidence_link2", "Evidence Link 2", FieldKind::Text),
        field("evidence_link3", "Evidence Link 3", FieldKind::Text),
    ];

    let vendor = vec![
        required(field(
            "vendor_experience",
            "Vendor Management Experience",
            FieldKind::LongText,
        )),
        field("vendor_metrics", "Vendor Performance Metrics", FieldKind::LongText),
        field("vendor_escalation", "Vendor Escalation Example", FieldKind::LongText),
    ];

    let declaration = vec![
        required(field(
            "declaration_accurate",
            "All answers are accurate and complete",
            FieldKind::Declaration,
        )),
        required(field(
            "declaration_excited",
            "Genuinely excited about this mission",
            FieldKind::Declaration,
        )),
        required(field(
            "declaration_understands_excellence",
            "Understands the excellence bar",
            FieldKind::Declaration,
        )),
        required(field(
            "declaration_accountable",
            "Will be held accountable to these answers",
            FieldKind::Declaration,
        )),
        required(field("digital_signature", "Digital Signature", FieldKind::Text)),
    ];

    let sections = vec![
        ("excellence-accountability", "Excellence & Accountability", excellence),
        ("technical-expertise", "Technical & Domain Expertise", expertise),
        ("execution-impact", "Execution & Impact", execution),
        ("vision-alignment", "Vision Alignment", vision),
        ("practical-assessment", "Practical Assessment", assessment),
        ("logistics-commitment", "Logistics & Commitment", logistics),
        ("differentiator", "The Differentiator", differentiator),
        ("vendor-management", "Vendor Management", vendor),
        ("final-declaration", "Final Declaration", declaration),
    ];

    Registry {
        id: "pm-candidate-screening".into(),
        title: "Product Manager Candidate Screening".into(),
        version: "1.2.0".into(),
        sections: sections
            .into_iter()
            .enumerate()
            .map(|(index, (slug, title, fields))| SectionSpec {
                number: (index + 1) as u8,
                slug: slug.into(),
                title: title.into(),
                fields,
            })
            .collect(),
        allocations: vec![AllocationRule {
            key: "prioritization_total".into(),
            label: "Prioritization".into(),
            fields: vec![
                "prioritization_privacy".into(),
                "prioritization_ai".into(),
                "prioritization_ux".into(),
                "prioritization_growth".into(),
                "prioritization_revenue".into(),
            ],
            total: 100,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_passes_integrity_checks() {
        let registry = candidate_profile();
        registry.verify().expect("registry is well-formed");
        assert_eq!(registry.section_count(), 9);
    }

    #[test]
    fn every_required_field_is_owned_by_one_section() {
        let registry = candidate_profile();
        for section in &registry.sections {
            for field in section.required_fields() {
                assert_eq!(registry.owning_section(&field.name), Some(section.number));
            }
        }
    }

    #[test]
    fn allocation_rule_targets_section_three() {
        let registry = candidate_profile();
        let rules: Vec<_> = registry.allocations_for(3).collect();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].total, 100);
        assert_eq!(rules[0].fields.len(), 5);
    }
}

mod gateway;
mod store;

mod wizard;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gateway::DirectoryGateway;
use screening_flow::{Advance, DISPLAY_NAME_FIELD, Phase, Session, SubmitError};
use screening_spec::{
    AnswerRecord, FieldSpec, ReceiptContext, SectionReport, TemplateEngine, answers_schema,
    build_section_payload, candidate_profile, example_record, registry_schema, validate_all,
    validate_section,
};
use store::FileDraftStore;
use wizard::{PromptContext, PromptOutcome, Verbosity, WizardPresenter, parse_answer};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const DEFAULT_LOG_FILTER: &str = "screening_cli=info,screening_flow=info,screening_spec=info";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Candidate screening wizard CLI",
    long_about = "Runs the multi-section screening wizard with draft persistence, validates answer files, and dumps the registry layout, answer schema, and example answers."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive screening wizard with draft persistence.
    Wizard {
        /// Directory holding the draft snapshot, submissions, and outbox.
        #[arg(long, value_name = "DIR", default_value = ".screening")]
        data_dir: PathBuf,
        /// Show verbose output (full section renders, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
    },
    /// Validate an answers JSON file against one section or the whole form.
    Validate {
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Restrict validation to a single section.
        #[arg(long, value_name = "N")]
        section: Option<u8>,
    },
    /// Print the section and field layout of the built-in registry.
    Sections,
    /// Emit the answers JSON Schema.
    Schema {
        /// Emit the registry document schema instead.
        #[arg(long)]
        registry: bool,
    },
    /// Emit a fully valid example answers file.
    Example,
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Wizard { data_dir, verbose } => run_wizard(data_dir, verbose),
        Command::Validate { answers, section } => run_validate(answers, section),
        Command::Sections => run_sections(),
        Command::Schema { registry } => run_schema(registry),
        Command::Example => run_example(),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_wizard(data_dir: PathBuf, verbose: bool) -> CliResult<()> {
    let registry = candidate_profile();
    let store = FileDraftStore::new(data_dir.join("draft.cbor"));
    let mut gateway = DirectoryGateway::new(&data_dir)?;
    let templates = TemplateEngine::new()?;
    let mut session = Session::open(registry, store)?;

    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose));
    presenter.show_header(
        &session.registry().title,
        session.registry().section_count(),
    );

    while session.phase() != Phase::Submitted {
        let section = session.pointer();
        let fields = session
            .registry()
            .section(section)
            .map(|spec| spec.fields.clone())
            .unwrap_or_default();
        let errors = session.section_errors(section).cloned().unwrap_or_default();
        let payload = build_section_payload(
            session.registry(),
            section,
            session.record(),
            &errors,
            session.completed(),
        );
        presenter.show_section(&payload);

        let total = fields.len();
        let mut interrupted = false;
        for (index, field) in fields.iter().enumerate() {
            let current = session
                .record()
                .get(&field.name)
                .map(|value| value.display())
                .unwrap_or_default();
            let prompt = PromptContext::new(field, index + 1, total, current);
            match prompt_field(&presenter, &prompt, field)? {
                PromptOutcome::Value(value) => {
                    if let Err(error) = session.set(&field.name, value) {
                        eprintln!("{error}");
                    }
                }
                PromptOutcome::Keep => {}
                PromptOutcome::Back => {
                    if !session.retreat() {
                        println!("Already at the first section.");
                    }
                    interrupted = true;
                    break;
                }
                PromptOutcome::Exit => {
                    println!("Draft saved; resume any time with the same data directory.");
                    return Ok(());
                }
            }
        }
        if interrupted {
            continue;
        }

        if section == session.registry().section_count() {
            match session.submit(&mut gateway) {
                Ok(receipt) => {
                    let display_name = session.record().text(DISPLAY_NAME_FIELD).to_string();
                    let text = templates.render_receipt(&ReceiptContext {
                        display_name,
                        reference_id: receipt.reference_id.clone(),
                    })?;
                    presenter.show_receipt(&text);
                }
                Err(SubmitError::Incomplete { first_invalid }) => {
                    println!("Please complete all required fields before submitting.");
                    presenter.show_errors(&session.composed_errors());
                    session.rewind(first_invalid);
                }
                Err(SubmitError::Persist { reason }) => {
                    println!("Submission failed: {reason}");
                    println!("Your answers are saved; submit again to retry.");
                }
                Err(other) => println!("{other}"),
            }
        } else {
            match session.advance() {
                // The fresh section render at the top of the loop is the
                // "scroll to top" of this shell.
                Advance::Moved { .. } => {}
                Advance::Blocked => {
                    if let Some(errors) = session.section_errors(section) {
                        presenter.show_errors(errors);
                    }
                }
            }
        }
    }

    Ok(())
}

fn prompt_field(
    presenter: &WizardPresenter,
    prompt: &PromptContext,
    field: &FieldSpec,
) -> CliResult<PromptOutcome> {
    loop {
        presenter.show_prompt(prompt);
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF behaves like an explicit exit so drafts survive.
            return Ok(PromptOutcome::Exit);
        }

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(PromptOutcome::Keep);
        }
        if trimmed.eq_ignore_ascii_case("exit") {
            return Ok(PromptOutcome::Exit);
        }
        if trimmed.eq_ignore_ascii_case("back") {
            return Ok(PromptOutcome::Back);
        }

        match parse_answer(field, trimmed) {
            Ok(value) => return Ok(PromptOutcome::Value(value)),
            Err(error) => presenter.show_parse_error(&error),
        }
    }
}

fn run_validate(answers_path: PathBuf, section: Option<u8>) -> CliResult<()> {
    let registry = candidate_profile();
    let raw = fs::read_to_string(&answers_path)?;
    let record: AnswerRecord = serde_json::from_str(&raw)?;
    record.check_against(&registry)?;

    let reports = match section {
        Some(number) => {
            if registry.section(number).is_none() {
                return Err(format!(
                    "section {number} is out of range (1-{})",
                    registry.section_count()
                )
                .into());
            }
            vec![validate_section(&registry, number, &record)]
        }
        None => validate_all(&registry, &record),
    };

    let valid = reports.iter().all(|report| report.valid);
    println!(
        "Validation result: {}",
        if valid { "valid" } else { "invalid" }
    );
    describe_reports(&reports);

    if valid { Ok(()) } else { Err("validation failed".into()) }
}

fn describe_reports(reports: &[SectionReport]) {
    for report in reports {
        if report.valid {
            continue;
        }
        println!("Section {}:", report.section);
        for (field, message) in &report.errors {
            println!("  {field} - {message}");
        }
    }
}

fn run_sections() -> CliResult<()> {
    let registry = candidate_profile();
    println!("{} ({}) v{}", registry.title, registry.id, registry.version);
    for section in &registry.sections {
        println!(
            "Section {}: {} ({} fields, {} required)",
            section.number,
            section.title,
            section.fields.len(),
            section.required_fields().count()
        );
        for field in &section.fields {
            let mut entry = format!(" - {} ({}) [{}]", field.name, field.label, field.kind.as_str());
            if field.required {
                entry.push_str(" [required]");
            }
            if let Some(limit) = field.word_limit {
                entry.push_str(&format!(" [max {limit} words]"));
            }
            println!("{entry}");
        }
    }
    Ok(())
}

fn run_schema(registry_document: bool) -> CliResult<()> {
    let schema = if registry_document {
        registry_schema()
    } else {
        answers_schema(&candidate_profile())
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_example() -> CliResult<()> {
    let registry = candidate_profile();
    let record = example_record(&registry);
    println!("{}", record.to_json_pretty()?);
    Ok(())
}

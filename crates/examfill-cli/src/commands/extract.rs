//! Extract command - pull answers out of a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use serde::Serialize;
use tracing::{debug, info, warn};

use examfill_core::models::config::ExamfillConfig;
use examfill_core::models::{count_words, AnswerSheet, Exam, QuestionId};
use examfill_core::pdf::{document_text_from_file, DocumentKind};
use examfill_core::{AnswerExtractor, ExtractionResult};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    target: TargetArgs,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Assign paragraphs by position when no numbered answers are found
    #[arg(long)]
    paragraph_fallback: bool,

    /// Print the full extraction report instead of just the answers
    #[arg(long)]
    report: bool,
}

/// What the answers are extracted for.
#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Number of questions on the exam
    #[arg(short = 'n', long)]
    questions: Option<usize>,

    /// Exam definition (JSON) to bind answers to
    #[arg(short, long)]
    exam: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// Resolve the format from the flag or the configured default.
    pub fn resolve(flag: Option<Self>, config: &ExamfillConfig) -> anyhow::Result<Self> {
        match flag {
            Some(format) => Ok(format),
            None => OutputFormat::from_str(&config.output.format, true)
                .map_err(|e| anyhow::anyhow!("Invalid output format in config: {}", e)),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Resolved extraction target.
pub enum Target {
    /// Only the number of questions is known.
    Count(usize),
    /// A full exam; answers are bound to its question ids.
    Exam(Exam),
}

impl TargetArgs {
    pub fn resolve(&self) -> anyhow::Result<Target> {
        match (&self.questions, &self.exam) {
            (_, Some(path)) => {
                let json = fs::read_to_string(path)?;
                let exam = Exam::from_json(&json)?;
                debug!("Loaded exam {} with {} questions", exam.id, exam.question_count());
                Ok(Target::Exam(exam))
            }
            (Some(count), None) => Ok(Target::Count(*count)),
            (None, None) => anyhow::bail!("Either --questions or --exam is required"),
        }
    }
}

impl Target {
    pub fn question_count(&self) -> usize {
        match self {
            Target::Count(count) => *count,
            Target::Exam(exam) => exam.question_count(),
        }
    }
}

/// Answers extracted from one document.
pub struct DocumentAnswers {
    pub result: ExtractionResult,
    /// Filled answer sheet when extracting for an exam.
    pub sheet: Option<AnswerSheet>,
}

/// One output row.
struct AnswerRow<'a> {
    number: usize,
    question_id: Option<QuestionId>,
    answer: &'a str,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let target = args.target.resolve()?;
    let format = OutputFormat::resolve(args.format, &config)?;
    let extractor = AnswerExtractor::from_config(&config.extraction)
        .with_paragraph_fallback(args.paragraph_fallback || config.extraction.paragraph_fallback);

    info!("Processing file: {}", args.input.display());

    let document = extract_document(&args.input, &target, &config, &extractor)?;

    if document.result.answers.is_empty() {
        eprintln!(
            "{} No answers could be extracted from {}",
            style("!").yellow(),
            args.input.display()
        );
    }

    let output = format_answers(&document, &target, format, config.output.pretty, args.report)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read a document and extract answers for the target.
pub fn extract_document(
    path: &Path,
    target: &Target,
    config: &ExamfillConfig,
    extractor: &AnswerExtractor,
) -> anyhow::Result<DocumentAnswers> {
    let text = document_text_from_file(path, &config.pdf)?;

    if DocumentKind::classify(&text, config.pdf.min_text_length) == DocumentKind::Empty {
        warn!(
            "{} has no extractable text (scanned document?)",
            path.display()
        );
    }

    let result = extractor.extract_with_report(&text, target.question_count());
    for warning in &result.warnings {
        debug!("{}: {}", path.display(), warning);
    }

    let sheet = match target {
        Target::Exam(exam) => {
            let mut sheet = AnswerSheet::for_exam(exam);
            sheet.apply(&result.answers);
            Some(sheet)
        }
        Target::Count(_) => None,
    };

    Ok(DocumentAnswers { result, sheet })
}

fn answer_rows<'a>(document: &'a DocumentAnswers, target: &Target) -> Vec<AnswerRow<'a>> {
    match (target, &document.sheet) {
        (Target::Exam(exam), Some(sheet)) => exam
            .questions
            .iter()
            .enumerate()
            .filter_map(|(index, question)| {
                sheet.answer(question.id).map(|answer| AnswerRow {
                    number: index + 1,
                    question_id: Some(question.id),
                    answer,
                })
            })
            .collect(),
        _ => document
            .result
            .answers
            .iter()
            .map(|(number, answer)| AnswerRow {
                number: number as usize,
                question_id: None,
                answer,
            })
            .collect(),
    }
}

/// Render extracted answers in the requested format.
pub fn format_answers(
    document: &DocumentAnswers,
    target: &Target,
    format: OutputFormat,
    pretty: bool,
    report: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            if report {
                to_json(&document.result, pretty)
            } else if let Some(sheet) = &document.sheet {
                to_json(&sheet.submission(), pretty)
            } else {
                to_json(&document.result.answers, pretty)
            }
        }
        OutputFormat::Csv => format_csv(&answer_rows(document, target)),
        OutputFormat::Text => Ok(format_text(document, &answer_rows(document, target), report)),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

fn format_csv(rows: &[AnswerRow<'_>]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["question", "question_id", "answer", "words"])?;

    for row in rows {
        let number = row.number.to_string();
        let question_id = row.question_id.map(|id| id.to_string()).unwrap_or_default();
        let words = count_words(row.answer).to_string();
        wtr.write_record([number.as_str(), question_id.as_str(), row.answer, words.as_str()])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(document: &DocumentAnswers, rows: &[AnswerRow<'_>], report: bool) -> String {
    let mut output = String::new();
    let result = &document.result;

    for row in rows {
        match row.question_id {
            Some(id) => output.push_str(&format!("Question {} (id {}):\n", row.number, id)),
            None => output.push_str(&format!("Question {}:\n", row.number)),
        }
        for line in row.answer.lines() {
            output.push_str(&format!("  {}\n", line));
        }
        output.push_str(&format!("  [{} words]\n\n", count_words(row.answer)));
    }

    output.push_str(&format!(
        "Extracted {} of {} answers",
        result.answers.len(),
        result.question_count
    ));
    if let Some(strategy) = result.strategy {
        output.push_str(&format!(" ({} strategy)", strategy));
    }
    output.push('\n');

    if let Some(sheet) = &document.sheet {
        output.push_str(&format!("Total words: {}\n", sheet.total_words()));
    }

    if report {
        for warning in &result.warnings {
            output.push_str(&format!("Warning: {}\n", warning));
        }
        output.push_str(&format!("Processing time: {}ms\n", result.processing_time_ms));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use examfill_core::models::Question;

    fn exam() -> Exam {
        Exam {
            id: 3,
            title: "Quiz".to_string(),
            questions: vec![
                Question { id: 100, text: "one".to_string(), rubric: None },
                Question { id: 200, text: "two".to_string(), rubric: None },
            ],
        }
    }

    fn document_for(text: &str, target: &Target) -> DocumentAnswers {
        let result = AnswerExtractor::new().extract_with_report(text, target.question_count());
        let sheet = match target {
            Target::Exam(exam) => {
                let mut sheet = AnswerSheet::for_exam(exam);
                sheet.apply(&result.answers);
                Some(sheet)
            }
            Target::Count(_) => None,
        };
        DocumentAnswers { result, sheet }
    }

    #[test]
    fn test_json_answer_map() {
        let target = Target::Count(2);
        let document = document_for("Question 1: A\nQuestion 2: B", &target);
        let output = format_answers(&document, &target, OutputFormat::Json, false, false).unwrap();
        assert_eq!(output, r#"{"1":"A","2":"B"}"#);
    }

    #[test]
    fn test_json_submission_for_exam() {
        let target = Target::Exam(exam());
        let document = document_for("1. first\n2. second", &target);
        let output = format_answers(&document, &target, OutputFormat::Json, false, false).unwrap();
        assert_eq!(output, r#"{"examId":3,"answers":{"100":"first","200":"second"}}"#);
    }

    #[test]
    fn test_csv_rows() {
        let target = Target::Exam(exam());
        let document = document_for("Question 2: two words", &target);
        let output = format_answers(&document, &target, OutputFormat::Csv, false, false).unwrap();
        assert_eq!(output, "question,question_id,answer,words\n2,200,two words,2\n");
    }

    #[test]
    fn test_text_summary() {
        let target = Target::Count(3);
        let document = document_for("Answer 1: yes", &target);
        let output = format_answers(&document, &target, OutputFormat::Text, false, true).unwrap();
        assert!(output.contains("Question 1:\n  yes\n  [1 words]"));
        assert!(output.contains("Extracted 1 of 3 answers (labeled strategy)"));
        assert!(output.contains("Warning: Extracted 1 of 3 answers, missing: 2, 3"));
    }
}

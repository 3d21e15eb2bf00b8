use crate::cli::{DataArgs, ReportArgs, VariantArgs};
use crate::infra::AssessmentService;
use ai_maturity::assessment::{
    MaturityLevel, PopulationReport, ReferenceRow, ScoreBreakdown, SubmissionReport,
};
use ai_maturity::config::AppConfig;
use ai_maturity::error::AppError;

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        data,
        submission_id,
    } = args;
    let service = service_for(data)?;
    let dataset = service.load_dataset()?;
    let engine = service.engine();
    println!(
        "Data source: {} ({} submissions, {} rejected rows)",
        dataset.source,
        dataset.len(),
        dataset.rejected_rows.len()
    );

    if let Some(id) = submission_id.as_deref() {
        match dataset.find(id) {
            Ok(submission) => {
                let report = engine.submission_report(submission)?;
                render_submission_report(&service, &report);
                return Ok(());
            }
            Err(err) => println!("Warning: {err}; showing the population summary instead"),
        }
    }

    let report = engine.population_report(&dataset.submissions)?;
    render_population_report(&service, &report);
    Ok(())
}

pub(crate) fn run_summary(args: DataArgs) -> Result<(), AppError> {
    let service = service_for(args)?;
    let dataset = service.load_dataset()?;
    println!("Data source: {}", dataset.source);
    let report = service.engine().population_report(&dataset.submissions)?;
    render_population_report(&service, &report);
    Ok(())
}

pub(crate) fn run_levels(args: VariantArgs) -> Result<(), AppError> {
    let service = service_for(DataArgs {
        csv: Vec::new(),
        variant: args,
    })?;
    println!("AI maturity levels");
    render_reference_table(&service.engine().reference_table(None));
    Ok(())
}

fn service_for(args: DataArgs) -> Result<AssessmentService, AppError> {
    let config = AppConfig::load()?;
    Ok(AssessmentService::from_settings(config.assessment, args))
}

pub(crate) fn render_submission_report(service: &AssessmentService, report: &SubmissionReport) {
    let submission = &report.submission;
    println!("\nAI maturity report: {}", submission.hospital_name);
    println!(
        "Respondent: {} ({}) | Submission {}",
        submission.respondent_name, submission.position, submission.submission_id
    );
    if let Some(location) = &submission.hospital_location {
        println!("Location: {}", location);
    }
    if let Some(beds) = submission.bed_count {
        println!("Beds: {}", beds);
    }

    render_breakdown(service, &report.breakdown);
    render_level(&report.level);
    render_reference_table(&report.reference);
}

pub(crate) fn render_population_report(service: &AssessmentService, report: &PopulationReport) {
    let summary = &report.summary;
    println!(
        "\nPopulation summary: {} scored submissions",
        summary.submission_count
    );

    println!("\nDimension statistics");
    for stats in &summary.dimensions {
        println!(
            "- {}: mean {:.2} | min {:.1} | max {:.1} | std {:.2}",
            stats.name, stats.mean, stats.min, stats.max, stats.std_dev
        );
    }

    render_breakdown(service, &summary.average_breakdown);
    render_level(&summary.average_level);

    println!("\nLevel distribution");
    for (label, count) in &summary.level_distribution {
        println!("- {}: {}", label, count);
    }

    if summary.skipped.is_empty() {
        println!("\nSkipped submissions: none");
    } else {
        println!("\nSkipped submissions");
        for skipped in &summary.skipped {
            println!("- {}: {}", skipped.submission_id, skipped.reason);
        }
    }

    render_reference_table(&report.reference);
}

fn render_breakdown(service: &AssessmentService, breakdown: &ScoreBreakdown) {
    println!("\nDimension scores");
    for dimension in &breakdown.dimensions {
        println!(
            "- {}: {:.1}/15 (weight {:.0}%) -> {:.2}",
            dimension.name, dimension.raw, dimension.weight_percent, dimension.weighted
        );
    }

    let policy = service.engine().config().policy;
    println!(
        "Raw total {:.1} | Weighted total {:.2} | Percentage {:.1}% | Classified on {:.1}",
        breakdown.raw_total,
        breakdown.weighted_total,
        breakdown.percentage,
        policy.measure(breakdown.weighted_total)
    );
}

fn render_level(level: &MaturityLevel) {
    println!("\n{} ({})", level.label(), level.color);
    println!("{}", level.description);
    println!("Characteristics:");
    for item in &level.characteristics {
        println!("  - {}", item);
    }
    println!("Next steps:");
    for item in &level.next_steps {
        println!("  - {}", item);
    }
}

fn render_reference_table(rows: &[ReferenceRow]) {
    println!("\nLevel reference");
    for row in rows {
        let marker = if row.is_current { " <- current" } else { "" };
        println!(
            "- Level {} {} [{}] {}{}",
            row.level, row.name, row.range, row.color, marker
        );
    }
}

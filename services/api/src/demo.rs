use crate::infra::{build_taxonomy, parse_dimension, RecentNotifications};
use clap::Args;
use registry_taxonomy::config::{AppConfig, TaxonomyConfig};
use registry_taxonomy::error::AppError;
use registry_taxonomy::telemetry;
use registry_taxonomy::taxonomy::{
    parse_rows, Dimension, EditSession, EntityId, ImportSummary, LabelKind, NamedEntity,
    NamedEntityDraft, ProfessionDraft, Taxonomy, TaxonomyError, TaxonomyService,
};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// categories, sub-categories, degree-types, degrees or specialisations
    #[arg(value_parser = parse_dimension)]
    pub(crate) dimension: Dimension,
    /// Case-insensitive match on name, code or abbreviation
    #[arg(long, default_value = "")]
    pub(crate) filter: String,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Dimension the rows belong to
    #[arg(value_parser = parse_dimension)]
    pub(crate) dimension: Dimension,
    /// CSV file with a name,code,description[,abbreviation] header
    pub(crate) csv: PathBuf,
    /// Print the resulting records after the import summary
    #[arg(long)]
    pub(crate) list: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Stop after the reference-data listing.
    #[arg(long)]
    pub(crate) skip_professions: bool,
}

/// Config for a one-shot subcommand, with the log subscriber installed like `serve` does.
fn load_cli_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;
    Ok(config)
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), AppError> {
    let config = load_cli_config()?;
    let taxonomy = build_taxonomy(&config.taxonomy);

    let records = taxonomy.list_entities(args.dimension, &args.filter);
    println!(
        "{} ({} of {})",
        args.dimension.kind(),
        records.len(),
        taxonomy.store(args.dimension).len()
    );
    render_records(records);
    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let config = load_cli_config()?;
    let file = File::open(&args.csv)?;
    let rows = parse_rows(file)?;

    let service = TaxonomyService::new(
        build_taxonomy(&config.taxonomy),
        Arc::new(RecentNotifications::default()),
    );
    let summary = service.import_entities(args.dimension, rows);
    render_import_summary(args.dimension, &summary);

    if args.list {
        let records = service.list_entities(args.dimension, "");
        render_records(records.iter());
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    load_cli_config()?;
    let notifications = Arc::new(RecentNotifications::default());
    let taxonomy = build_taxonomy(&TaxonomyConfig {
        seed_defaults: true,
    });
    let service = TaxonomyService::new(taxonomy, notifications.clone());

    println!("Registry taxonomy demo");
    for dimension in Dimension::ALL {
        let records = service.list_entities(dimension, "");
        println!("- {}: {} records", dimension.kind(), records.len());
    }

    println!("\nDuplicate codes are rejected per field");
    match service.create_entity(Dimension::Category, &NamedEntityDraft::new("Dental", "MED")) {
        Err(TaxonomyError::Validation(errors)) => println!("  rejected: {errors}"),
        Ok(record) => println!("  unexpectedly created {}", record.code),
        Err(other) => println!("  rejected: {other}"),
    }

    println!("\nEdit session keeps the draft until it validates");
    let mut session = EditSession::<NamedEntityDraft>::new();
    session.open_create();
    if let Some(draft) = session.draft_mut() {
        *draft = NamedEntityDraft::new("Veterinary", "vet").with_description("Animal health");
    }
    let first = session.submit(|_, draft| service.create_entity(Dimension::Category, draft));
    if let Err(error) = first {
        println!("  first attempt: {error}");
    }
    if let Some(draft) = session.draft_mut() {
        draft.code = "VET".to_string();
    }
    match session.submit(|_, draft| service.create_entity(Dimension::Category, draft)) {
        Ok(record) => println!("  created {} ({}) with id {}", record.name, record.code, record.id),
        Err(error) => println!("  second attempt failed: {error}"),
    }

    println!("\nCategory/sub-category mapping");
    let medical = EntityId(1);
    print_links(&service.snapshot(), medical);
    service.toggle_link(medical, EntityId(5))?;
    print_links(&service.snapshot(), medical);
    service.toggle_link(medical, EntityId(5))?;
    print_links(&service.snapshot(), medical);

    if args.skip_professions {
        render_notifications(&notifications);
        return Ok(());
    }

    println!("\nProfession composer");
    let mut draft = ProfessionDraft {
        name: "Cardiac Surgeon".to_string(),
        ..ProfessionDraft::default()
    };
    let snapshot = service.snapshot();
    draft.select_category(medical, snapshot.mapping());
    let options: Vec<String> = service
        .profession_options(medical)
        .into_iter()
        .map(|record| record.name)
        .collect();
    println!("  sub-category options for Medical: {}", options.join(", "));
    if !draft.select_subcategory(EntityId(5), snapshot.mapping()) {
        println!("  Staff Nurse is not offered under Medical");
    }
    draft.select_subcategory(EntityId(2), snapshot.mapping());
    draft.qualification_id = Some(EntityId(2));

    match service.create_profession(&draft) {
        Ok(profession) => println!(
            "  created {} -> {} / {} / {}",
            profession.name,
            service.resolve_label(LabelKind::Category, profession.category_id),
            service.resolve_label(LabelKind::SubCategory, profession.subcategory_id),
            service.resolve_label(LabelKind::Qualification, profession.qualification_id),
        ),
        Err(error) => println!("  profession rejected: {error}"),
    }

    draft.select_category(EntityId(3), snapshot.mapping());
    println!(
        "  switching to Nursing clears the sub-category: {:?}",
        draft.subcategory_id
    );

    match service.remove_entity(Dimension::Category, medical) {
        Err(error) => println!("  deleting Medical: {error}"),
        Ok(_) => println!("  deleting Medical unexpectedly succeeded"),
    }

    render_notifications(&notifications);
    Ok(())
}

fn print_links(taxonomy: &Taxonomy, category: EntityId) {
    let names: Vec<String> = taxonomy
        .linked(category)
        .into_iter()
        .map(|id| taxonomy.resolve_label(LabelKind::SubCategory, id))
        .collect();
    println!(
        "  {} -> [{}]",
        taxonomy.resolve_label(LabelKind::Category, category),
        names.join(", ")
    );
}

fn render_records<'a, I>(records: I)
where
    I: IntoIterator<Item = &'a NamedEntity>,
{
    for record in records {
        let status = if record.is_active { "active" } else { "inactive" };
        let abbreviation = record
            .abbreviation
            .as_deref()
            .map(|value| format!(" [{value}]"))
            .unwrap_or_default();
        println!(
            "  {:>3}  {:<10} {}{} ({status})",
            record.id.0, record.code, record.name, abbreviation
        );
        if let Some(description) = &record.description {
            println!("       {description}");
        }
    }
}

fn render_import_summary(dimension: Dimension, summary: &ImportSummary) {
    println!(
        "{} import: {} created, {} rejected",
        dimension.kind(),
        summary.created.len(),
        summary.rejected.len()
    );
    for record in &summary.created {
        println!("  + {} {}", record.code, record.name);
    }
    for row in &summary.rejected {
        println!("  ! line {} ({}): {}", row.line, row.code, row.errors);
    }
}

fn render_notifications(notifications: &RecentNotifications) {
    println!("\nNotifications");
    for event in notifications.recent() {
        println!(
            "  {} {:?}: {}",
            event.emitted_at.format("%H:%M:%S"),
            event.kind,
            event.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_commands_install_the_log_subscriber() {
        let config = load_cli_config().expect("cli config loads");

        match telemetry::init(&config.telemetry, config.environment) {
            Err(telemetry::TelemetryError::Subscriber(_)) => {}
            other => panic!("expected the subscriber to be installed already, got {other:?}"),
        }
    }
}

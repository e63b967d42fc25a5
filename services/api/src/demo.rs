use crate::infra::{build_service, load_catalog, InMemoryProfileRepository};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use visa_advisor::advisor::{
    CountrySummary, EducationLevel, MaritalStatus, Profile, Purpose, Recommendation,
};
use visa_advisor::config::AppConfig;
use visa_advisor::error::AppError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Profile JSON file, either bare or wrapped as {"profile": {...}}
    #[arg(long)]
    pub(crate) profile: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
    /// Skip the configured remote source
    #[arg(long)]
    pub(crate) local_only: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CountriesArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Replace the sample profiles' preferred countries (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub(crate) countries: Vec<String>,
    /// Score every sample for this purpose instead of its own
    #[arg(long)]
    pub(crate) purpose: Option<Purpose>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileDocument {
    Wrapped { profile: Profile },
    Bare(Profile),
}

impl From<ProfileDocument> for Profile {
    fn from(document: ProfileDocument) -> Self {
        match document {
            ProfileDocument::Wrapped { profile } | ProfileDocument::Bare(profile) => profile,
        }
    }
}

#[derive(Serialize)]
struct RecommendationRow<'a> {
    rank: usize,
    country: &'a str,
    score: f64,
    eligible: bool,
    funds_required: u64,
    funds_standing: &'a str,
    processing_time: &'a str,
    visas: String,
}

pub(crate) async fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let profile = read_profile(&args.profile)?;
    let service = build_service(
        &config.advisor,
        Arc::new(InMemoryProfileRepository::default()),
        !args.local_only,
    )?;

    let recommendations = service.recommend(&profile).await;
    let stdout = io::stdout();
    write_recommendations(stdout.lock(), &recommendations, args.format)
}

pub(crate) fn run_countries(args: CountriesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.advisor)?;
    let stdout = io::stdout();
    write_countries(stdout.lock(), &catalog.countries(), args.format)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(
        &config.advisor,
        Arc::new(InMemoryProfileRepository::default()),
        false,
    )?;

    println!("Visa advisor demo");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (label, mut profile) in sample_profiles() {
        if !args.countries.is_empty() {
            profile.preferred_countries = args.countries.clone();
        }
        if let Some(purpose) = args.purpose {
            profile.purpose = purpose;
        }

        writeln!(
            out,
            "\n{label} | age {} | {} | {} yrs | {} | funds {} | purpose {}",
            profile.age,
            profile.education.label(),
            profile.work_experience,
            profile.language_score,
            profile.available_funds,
            profile.purpose
        )?;
        let recommendations = service.engine().score(&profile);
        if recommendations.is_empty() {
            writeln!(out, "  no catalog country offers a {} visa", profile.purpose)?;
            continue;
        }
        write_recommendations(&mut out, &recommendations, OutputFormat::Table)?;
        if let Some(best) = recommendations.first() {
            writeln!(out, "  best: {}", best.summary())?;
            writeln!(out, "  why {}: {}", best.name, best.eligibility_reason)?;
        }
    }

    Ok(())
}

fn read_profile(path: &Path) -> Result<Profile, AppError> {
    let file = File::open(path)?;
    let document: ProfileDocument = serde_json::from_reader(BufReader::new(file))?;
    Ok(document.into())
}

pub(crate) fn write_recommendations<W: Write>(
    mut out: W,
    recommendations: &[Recommendation],
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &json!({ "recommendations": recommendations }))?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for (index, recommendation) in recommendations.iter().enumerate() {
                writer
                    .serialize(recommendation_row(index, recommendation))
                    .map_err(io::Error::from)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "  {:<4} {:<16} {:>5} {:<9} {:>10} {:<13} {}",
                "#", "Country", "Score", "Eligible", "Funds", "Standing", "Processing"
            )?;
            for (index, recommendation) in recommendations.iter().enumerate() {
                let row = recommendation_row(index, recommendation);
                writeln!(
                    out,
                    "  {:<4} {:<16} {:>5.2} {:<9} {:>10} {:<13} {}",
                    row.rank,
                    row.country,
                    row.score,
                    if row.eligible { "yes" } else { "no" },
                    row.funds_required,
                    row.funds_standing,
                    row.processing_time
                )?;
            }
        }
    }
    Ok(())
}

fn recommendation_row(index: usize, recommendation: &Recommendation) -> RecommendationRow<'_> {
    RecommendationRow {
        rank: index + 1,
        country: &recommendation.name,
        score: recommendation.score,
        eligible: recommendation.is_eligible,
        funds_required: recommendation.funds_required,
        funds_standing: recommendation
            .funds_standing
            .map(|standing| standing.label())
            .unwrap_or("unknown"),
        processing_time: &recommendation.processing_time,
        visas: recommendation
            .visa_types
            .iter()
            .map(|visa| visa.name.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    }
}

pub(crate) fn write_countries<W: Write>(
    mut out: W,
    countries: &[CountrySummary],
    format: OutputFormat,
) -> Result<(), AppError> {
    let purposes = |summary: &CountrySummary| {
        summary
            .purposes
            .iter()
            .map(|purpose| purpose.label())
            .collect::<Vec<_>>()
            .join(";")
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &json!({ "countries": countries }))?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer
                .write_record(["name", "aliases", "purposes"])
                .map_err(io::Error::from)?;
            for summary in countries {
                writer
                    .write_record([
                        summary.name.as_str(),
                        summary.aliases.join(";").as_str(),
                        purposes(summary).as_str(),
                    ])
                    .map_err(io::Error::from)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            for summary in countries {
                let aliases = if summary.aliases.is_empty() {
                    String::new()
                } else {
                    format!(" (also {})", summary.aliases.join(", "))
                };
                writeln!(out, "{}{aliases}: {}", summary.name, purposes(summary))?;
            }
        }
    }
    Ok(())
}

fn sample_profiles() -> Vec<(&'static str, Profile)> {
    let all_countries = || {
        vec![
            "Canada".to_string(),
            "Australia".to_string(),
            "UK".to_string(),
        ]
    };

    vec![
        (
            "Senior software engineer",
            Profile {
                age: 31,
                education: EducationLevel::Masters,
                field_of_study: "Software Engineering".to_string(),
                work_experience: 8,
                language_score: "advanced".to_string(),
                available_funds: 45_000,
                marital_status: MaritalStatus::Single,
                spouse_included: false,
                number_of_dependents: 0,
                purpose: Purpose::Work,
                preferred_countries: all_countries(),
            },
        ),
        (
            "Recent graduate",
            Profile {
                age: 21,
                education: EducationLevel::HighSchool,
                field_of_study: "Biology".to_string(),
                work_experience: 0,
                language_score: "intermediate".to_string(),
                available_funds: 12_000,
                marital_status: MaritalStatus::Single,
                spouse_included: false,
                number_of_dependents: 0,
                purpose: Purpose::Study,
                preferred_countries: all_countries(),
            },
        ),
        (
            "Family relocation",
            Profile {
                age: 38,
                education: EducationLevel::Bachelors,
                field_of_study: "Healthcare Administration".to_string(),
                work_experience: 12,
                language_score: "proficient".to_string(),
                available_funds: 60_000,
                marital_status: MaritalStatus::Married,
                spouse_included: true,
                number_of_dependents: 2,
                purpose: Purpose::Permanent,
                preferred_countries: all_countries(),
            },
        ),
    ]
}

use chrono::{DateTime, Utc};
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use trinity_os::config::AppConfig;
use trinity_os::error::AppError;
use trinity_os::nutrition::{
    NutritionSearchRequest, NutritionSearchResponse, NutritionSearchService,
    ReqwestFoodDataClient, NUTRIENT_IDS,
};
use trinity_os::wellness::{UserId, WellnessDashboard, WellnessHistory, WellnessSnapshot};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON export with `sleep`, `exercise`, and `mood` record arrays
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Evaluation instant (RFC 3339). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// User label attached to the dashboard
    #[arg(long, default_value = "local")]
    pub(crate) user: String,
    /// Print the dashboard as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct NutritionSearchArgs {
    /// Free-text food query
    #[arg(long)]
    pub(crate) query: String,
    /// Results per page (1-200, default 25)
    #[arg(long)]
    pub(crate) page_size: Option<u32>,
    /// Print the proxied response as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        now,
        user,
        json,
    } = args;

    let config = AppConfig::load()?;
    let history: WellnessHistory = serde_json::from_reader(BufReader::new(File::open(input)?))?;
    let now = now.unwrap_or_else(Utc::now);

    let snapshot = WellnessSnapshot::from_history(&history, now, config.wellness);
    let dashboard = WellnessDashboard::compose(UserId(user), &snapshot, now, config.wellness);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        render_dashboard(&dashboard);
    }
    Ok(())
}

pub(crate) async fn run_nutrition_search(args: NutritionSearchArgs) -> Result<(), AppError> {
    let NutritionSearchArgs {
        query,
        page_size,
        json,
    } = args;

    let config = AppConfig::load()?;
    let client = Arc::new(ReqwestFoodDataClient::from_config(&config.nutrition)?);
    let service = NutritionSearchService::new(client);
    let response = service
        .search(NutritionSearchRequest {
            query: Some(query),
            page_size,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        render_search(&response);
    }
    Ok(())
}

fn render_dashboard(dashboard: &WellnessDashboard) {
    println!(
        "Trinity score for {} at {}",
        dashboard.user_id.0,
        dashboard.generated_at.to_rfc3339()
    );
    println!("- Overall: {}", dashboard.trinity.overall);
    for pillar in dashboard.trinity.pillars() {
        println!(
            "  - {}: {} ({})",
            pillar.pillar_label,
            pillar.score,
            pillar.status.label()
        );
    }
    println!("- Sleep quality trend: {}", dashboard.trend.label);

    match &dashboard.sleep {
        Some(sleep) => println!(
            "- Sleep: {:.1}/10 quality, {:.1} h average over {} sessions",
            sleep.avg_quality, sleep.avg_duration, sleep.sessions
        ),
        None => println!("- Sleep: no records"),
    }
    match &dashboard.exercise {
        Some(exercise) => println!(
            "- Exercise: {:.0} minutes across {} sessions this week",
            exercise.total_minutes, exercise.sessions
        ),
        None => println!("- Exercise: no records this week"),
    }
    match &dashboard.mood {
        Some(mood) => println!(
            "- Mood: {:.1} mood | {:.1} stress | {:.1} energy over {} check-ins",
            mood.avg_mood, mood.avg_stress, mood.avg_energy, mood.check_ins
        ),
        None => println!("- Mood: no check-ins"),
    }

    if !dashboard.observations.is_empty() {
        println!("Observations:");
        for note in &dashboard.observations {
            println!("  - {note}");
        }
    }
}

fn render_search(response: &NutritionSearchResponse) {
    println!(
        "{} matching foods ({} shown)",
        response.total_hits,
        response.foods.len()
    );
    for food in &response.foods {
        println!("- [{}] {} ({})", food.fdc_id, food.description, food.data_type);
        let per_100g: Vec<String> = NUTRIENT_IDS
            .iter()
            .filter_map(|(_, field)| {
                food.nutrients
                    .get(*field)
                    .map(|value| format!("{} {value}", field.name()))
            })
            .collect();
        if per_100g.is_empty() {
            println!("    no mapped nutrients");
        } else {
            println!("    per 100 g: {}", per_100g.join(", "));
        }
    }
}

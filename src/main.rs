use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod controller;
mod gateway;
mod geo;
mod model;
mod panel;
mod theme;

use controller::RequestState;
use gateway::ApiGateway;
use geo::{EnvLocationProvider, FacilityLookup, FixedLocationProvider, LocationProvider};
use model::{ClientConfig, FeedbackEvent, GeoCoordinate, Sex, SymptomCheckRequest, Verdict};
use panel::{
    DashboardPanel, EmergencyPanel, FeedbackSender, LogNotifier, MisinformationPanel,
    Notifier, SymptomPanel,
};
use theme::{Theme, ThemeContext};

#[derive(Parser)]
#[command(name = "medlens")]
#[command(about = "MedLens health-advisory client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a free-text symptom description
    Check {
        /// Symptom description, e.g. "fever and cough for 2 days"
        text: String,
        #[arg(long)]
        age: Option<u32>,
        /// male | female | other
        #[arg(long, value_parser = parse_sex)]
        sex: Option<Sex>,
        /// Skip model-based extraction on the backend
        #[arg(long)]
        heuristic_only: bool,
    },
    /// Scan medical-claim text for misinformation
    Scan {
        /// Article or post text to scan
        text: String,
    },
    /// Show the symptom-pattern summary
    Patterns {
        #[arg(long, default_value_t = 3)]
        clusters: u32,
        #[arg(long, default_value_t = 200)]
        limit: u32,
    },
    /// Show the recent-activity feed
    Activity {
        #[arg(long, default_value_t = 6)]
        limit: u32,
    },
    /// Find the nearest medical facilities
    Nearby {
        /// Override the device latitude
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        /// Override the device longitude
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
    },
    /// Send feedback on a feature's output
    Feedback {
        /// Feature the feedback refers to, e.g. "symptom_check"
        context: String,
        /// up | down | neutral
        #[arg(value_parser = parse_verdict)]
        verdict: Verdict,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show or set the light/dark theme
    Theme {
        /// light | dark; omit to show the current theme
        #[arg(value_parser = parse_theme)]
        mode: Option<Theme>,
    },
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    s.parse()
}

fn parse_sex(s: &str) -> Result<Sex, String> {
    match s {
        "male" => Ok(Sex::Male),
        "female" => Ok(Sex::Female),
        "other" => Ok(Sex::Other),
        _ => Err(format!("expected male, female or other, got '{}'", s)),
    }
}

fn parse_verdict(s: &str) -> Result<Verdict, String> {
    match s {
        "up" => Ok(Verdict::Up),
        "down" => Ok(Verdict::Down),
        "neutral" => Ok(Verdict::Neutral),
        _ => Err(format!("expected up, down or neutral, got '{}'", s)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: ClientConfig) -> Result<(), String> {
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    match command {
        Commands::Check {
            text,
            age,
            sex,
            heuristic_only,
        } => {
            let gateway = Arc::new(ApiGateway::new(&config).map_err(|e| e.to_string())?);
            let prefer_model = config.prefer_model && !heuristic_only;
            let panel = SymptomPanel::new(gateway, notifier, prefer_model);

            let state = panel.submit(SymptomCheckRequest { text, age, sex }).await;
            match state {
                RequestState::Success(result) => {
                    for symptom in &result.extracted_symptoms {
                        println!(
                            "symptom: {} ({}%)",
                            symptom.name,
                            (symptom.confidence * 100.0).round()
                        );
                    }
                    for action in &result.suggested_actions {
                        println!("action: {}", action);
                    }
                    for flag in &result.caution_flags {
                        println!("caution: {}", flag);
                    }
                    Ok(())
                }
                RequestState::Error(message) => Err(message),
                _ => Err("request was not sent".to_string()),
            }
        }

        Commands::Scan { text } => {
            let gateway = Arc::new(ApiGateway::new(&config).map_err(|e| e.to_string())?);
            let panel = MisinformationPanel::new(gateway, notifier);

            let state = panel.submit(text).await;
            match state {
                RequestState::Success(result) => {
                    println!("{}", result.summary);
                    for assessment in &result.assessments {
                        println!("[{:?}] {}", assessment.risk, assessment.claim);
                        println!("  {}", assessment.rationale);
                        for reference in &assessment.references {
                            println!("  ref: {}", reference);
                        }
                    }
                    Ok(())
                }
                RequestState::Error(message) => Err(message),
                _ => Err("request was not sent".to_string()),
            }
        }

        Commands::Patterns { clusters, limit } => {
            let gateway = Arc::new(ApiGateway::new(&config).map_err(|e| e.to_string())?);
            let panel = DashboardPanel::new(gateway);

            match panel.load_patterns(clusters, limit).await {
                RequestState::Success(_) => {
                    for cluster in panel.display_clusters() {
                        println!(
                            "cluster #{} ({}): {}",
                            cluster.label,
                            cluster.count,
                            cluster.terms.join(", ")
                        );
                    }
                    Ok(())
                }
                RequestState::Error(message) => Err(message),
                _ => Err("request was not sent".to_string()),
            }
        }

        Commands::Activity { limit } => {
            let gateway = Arc::new(ApiGateway::new(&config).map_err(|e| e.to_string())?);
            let panel = DashboardPanel::new(gateway);

            match panel.load_activity(limit).await {
                RequestState::Success(entries) => {
                    for entry in entries {
                        let when = entry
                            .created_at
                            .map(|t| t.to_rfc3339())
                            .unwrap_or_else(|| "-".to_string());
                        println!(
                            "{} {} {}",
                            when,
                            entry.entry_type,
                            entry.result_summary.unwrap_or_default()
                        );
                    }
                    Ok(())
                }
                RequestState::Error(message) => Err(message),
                _ => Err("request was not sent".to_string()),
            }
        }

        Commands::Nearby { lat, lng } => {
            let locator: Arc<dyn LocationProvider> = match (lat, lng) {
                (Some(lat), Some(lng)) => {
                    Arc::new(FixedLocationProvider::new(GeoCoordinate::new(lat, lng)))
                }
                _ => Arc::new(EnvLocationProvider),
            };
            let lookup = FacilityLookup::new(&config).map_err(|e| e.to_string())?;
            let panel = EmergencyPanel::new(locator, lookup, notifier);

            match panel.find_nearby().await {
                RequestState::Success(_) => {
                    for candidate in panel.nearest() {
                        println!("{} ({} km)", candidate.name, candidate.distance_km);
                        println!("  {}", candidate.address);
                        println!("  directions: {}", panel.directions(&candidate));
                    }
                    Ok(())
                }
                RequestState::Error(message) => Err(message),
                _ => Err("location unavailable; facility search did not run".to_string()),
            }
        }

        Commands::Feedback {
            context,
            verdict,
            notes,
        } => {
            let gateway = Arc::new(ApiGateway::new(&config).map_err(|e| e.to_string())?);
            let sender = FeedbackSender::new(gateway, notifier);
            sender
                .send(FeedbackEvent {
                    context,
                    verdict,
                    notes,
                })
                .await;
            // Fire and forget: failures were already surfaced as a notice.
            Ok(())
        }

        Commands::Theme { mode } => {
            let context = ThemeContext::load(config.theme_path.clone());
            if let Some(mode) = mode {
                context.set(mode);
            }
            println!("{}", context.current().as_str());
            Ok(())
        }
    }
}

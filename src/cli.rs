//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvCatalogAdapter;
use crate::adapters::demo_adapter::DemoCatalogAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_report_adapter::HtmlReportAdapter;
use crate::domain::alerts::{self, AlertThresholds};
use crate::domain::config_validation::{
    validate_alert_config, validate_catalog_config, validate_pricing_config,
};
use crate::domain::error::PricedeskError;
use crate::domain::insights::{category_rollups, InsightsSummary};
use crate::domain::pricing::{recommend, PricingRules};
use crate::domain::review::ReviewSession;
use crate::ports::catalog_port::CatalogPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::{ReportPort, ReportSnapshot};

#[derive(Parser, Debug)]
#[command(name = "pricedesk", about = "Dynamic pricing review engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a pricing pass over the catalog
    Recommend {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the configured catalog with a CSV file
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Limit the pass to a single SKU
        #[arg(long)]
        sku: Option<String>,
        /// Write an HTML report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Scan the catalog against alert thresholds
    Alerts {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List SKUs in the configured catalog
    ListProducts {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the web dashboard
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Output an argon2 hash for a password
    HashPassword,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Recommend {
            config,
            catalog,
            sku,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_recommend(&config, catalog.as_ref(), sku.as_deref(), output.as_ref())
            }
        }
        Command::Alerts { config, catalog } => run_alerts(&config, catalog.as_ref()),
        Command::ListProducts { config, catalog } => run_list_products(&config, catalog.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Serve { config } => run_serve(&config),
        Command::HashPassword => run_hash_password(),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PricedeskError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_pricing_rules(config: &dyn ConfigPort) -> PricingRules {
    let defaults = PricingRules::default();
    PricingRules {
        demand_up_min: config.get_double("pricing", "demand_up_min", defaults.demand_up_min),
        demand_up_max: config.get_double("pricing", "demand_up_max", defaults.demand_up_max),
        demand_down_max: config.get_double("pricing", "demand_down_max", defaults.demand_down_max),
        market_band_low_pct: config.get_double(
            "pricing",
            "market_band_low",
            defaults.market_band_low_pct,
        ),
        market_band_high_pct: config.get_double(
            "pricing",
            "market_band_high",
            defaults.market_band_high_pct,
        ),
        oos_bump_min: config.get_double("pricing", "oos_bump_min", defaults.oos_bump_min),
        oos_bump_max: config.get_double("pricing", "oos_bump_max", defaults.oos_bump_max),
        launch_discount: config.get_double("pricing", "launch_discount", defaults.launch_discount),
        growth_increase: config.get_double("pricing", "growth_increase", defaults.growth_increase),
        maturity_adjustment: config.get_double(
            "pricing",
            "maturity_adjustment",
            defaults.maturity_adjustment,
        ),
        decline_discount: config.get_double(
            "pricing",
            "decline_discount",
            defaults.decline_discount,
        ),
    }
}

pub fn build_alert_thresholds(config: &dyn ConfigPort) -> AlertThresholds {
    let defaults = AlertThresholds::default();
    AlertThresholds {
        margin_floor: config.get_double("alerts", "margin_floor", defaults.margin_floor),
        deviation_ceiling: config.get_double(
            "alerts",
            "deviation_ceiling",
            defaults.deviation_ceiling,
        ),
        demand_surge: config.get_double("alerts", "demand_surge", defaults.demand_surge),
    }
}

fn build_catalog_port(
    config: &dyn ConfigPort,
    catalog_override: Option<&PathBuf>,
) -> Box<dyn CatalogPort> {
    if let Some(path) = catalog_override {
        return Box::new(CsvCatalogAdapter::new(path.clone()));
    }
    let source = config
        .get_string("catalog", "source")
        .unwrap_or_else(|| "demo".to_string());
    match source.as_str() {
        "csv" => {
            let path = config.get_string("catalog", "path").unwrap_or_default();
            Box::new(CsvCatalogAdapter::new(PathBuf::from(path)))
        }
        _ => Box::new(DemoCatalogAdapter::new()),
    }
}

fn validate_all(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    validate_catalog_config(config)?;
    validate_pricing_config(config)?;
    validate_alert_config(config)?;
    Ok(())
}

fn run_recommend(
    config_path: &PathBuf,
    catalog_override: Option<&PathBuf>,
    sku_filter: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_all(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let rules = build_pricing_rules(&config);
    let thresholds = build_alert_thresholds(&config);

    // Stage 2: Load catalog
    let catalog_port = build_catalog_port(&config, catalog_override);
    let catalog = match catalog_port.load_catalog() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if catalog.is_empty() {
        eprintln!("error: catalog is empty");
        return ExitCode::from(3);
    }
    eprintln!("Loaded {} products", catalog.len());

    if let Some(sku) = sku_filter {
        if catalog.get(sku).is_none() {
            eprintln!("error: no product with SKU {sku}");
            return ExitCode::from(3);
        }
    }

    // Stage 3: Run the pricing pass
    let now = chrono::Utc::now().naive_utc();
    let today = now.date();
    let mut session = ReviewSession::new();
    let mut skipped = 0usize;

    for record in catalog.records() {
        if let Some(sku) = sku_filter {
            if record.sku != sku {
                continue;
            }
        }
        match recommend(record, &rules, today) {
            Ok(rec) => {
                session.submit(rec);
            }
            Err(e) => {
                eprintln!("warning: skipping {} ({})", record.sku, e);
                skipped += 1;
            }
        }
    }

    if session.is_empty() {
        eprintln!("error: no products produced recommendations");
        return ExitCode::from(4);
    }

    // Stage 4: Compute summaries
    let recommendations: Vec<_> = session
        .recommendations()
        .into_iter()
        .cloned()
        .collect();
    let summary = InsightsSummary::compute(&recommendations);
    let rollups = category_rollups(&recommendations);
    let stats = session.workflow_stats();
    let alert_entries = alerts::evaluate(&catalog, &thresholds, now);

    // Stage 5: Print console summary
    eprintln!("\n=== Pricing Summary ===");
    eprintln!("Recommendations:   {}", summary.recommendation_count);
    eprintln!("Avg Margin:        {:.1}%", summary.avg_margin * 100.0);
    eprintln!(
        "Projected Revenue: {:+.1}%",
        summary.revenue_change_pct * 100.0
    );
    eprintln!(
        "Optimal Pricing:   {:.1}%",
        summary.optimal_pricing_pct * 100.0
    );
    eprintln!("Competitive:       {:.1}%", summary.competitive_pct * 100.0);
    eprintln!("Pending Review:    {}", summary.pending_review);
    if skipped > 0 {
        eprintln!("Skipped:           {}", skipped);
    }

    eprintln!("\n=== Approval Pipeline ===");
    eprintln!("  Auto:      {}", stats.auto);
    eprintln!("  Manager:   {}", stats.manager);
    eprintln!("  Director:  {}", stats.director);
    eprintln!("  Executive: {}", stats.executive);

    if !rollups.is_empty() {
        eprintln!("\n=== Per-Category Summary ===");
        for rollup in &rollups {
            eprintln!(
                "  {}: {} products, {:.1}% avg margin, {:+.1}% avg change",
                rollup.category,
                rollup.products,
                rollup.avg_margin * 100.0,
                rollup.avg_change_pct * 100.0,
            );
        }
    }

    let (info, warning, critical) = alerts::severity_counts(&alert_entries);
    eprintln!(
        "\n{} alerts ({} critical, {} warning, {} info)",
        alert_entries.len(),
        critical,
        warning,
        info
    );

    for rec in &recommendations {
        println!(
            "{}\t{:.2}\t{:.2}\t{:+.1}%\t{}",
            rec.sku,
            rec.current_price,
            rec.proposed_price,
            rec.change_pct() * 100.0,
            rec.approval_level,
        );
    }

    // Stage 6: Write report
    if let Some(output) = output_path {
        let snapshot = ReportSnapshot {
            summary: &summary,
            rollups: &rollups,
            recommendations: &recommendations,
            alerts: &alert_entries,
            history: session.history(),
        };
        let adapter = HtmlReportAdapter::new();
        match adapter.write(&snapshot, &output.display().to_string()) {
            Ok(()) => eprintln!("\nReport written to: {}", output.display()),
            Err(e) => {
                eprintln!("error: failed to write report: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_all(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Config validated successfully");

    let rules = build_pricing_rules(&config);
    let thresholds = build_alert_thresholds(&config);

    eprintln!("\nPricing rules:");
    eprintln!(
        "  demand uplift: {:.1}%-{:.1}%",
        rules.demand_up_min * 100.0,
        rules.demand_up_max * 100.0
    );
    eprintln!("  demand discount cap: {:.1}%", rules.demand_down_max * 100.0);
    eprintln!(
        "  market band: {:+.1}% to {:+.1}%",
        rules.market_band_low_pct * 100.0,
        rules.market_band_high_pct * 100.0
    );
    eprintln!(
        "  out-of-stock bump: {:.1}%-{:.1}%",
        rules.oos_bump_min * 100.0,
        rules.oos_bump_max * 100.0
    );

    eprintln!("\nAlert thresholds:");
    eprintln!("  margin floor: {:.1}%", thresholds.margin_floor * 100.0);
    eprintln!(
        "  deviation ceiling: {:.1}%",
        thresholds.deviation_ceiling * 100.0
    );
    eprintln!("  demand surge: {:.2}", thresholds.demand_surge);

    let source = config
        .get_string("catalog", "source")
        .unwrap_or_else(|| "demo".to_string());
    eprintln!("\nCatalog source: {source}");

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_alerts(config_path: &PathBuf, catalog_override: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_all(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let thresholds = build_alert_thresholds(&config);
    let catalog_port = build_catalog_port(&config, catalog_override);
    let catalog = match catalog_port.load_catalog() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let entries = alerts::evaluate(&catalog, &thresholds, chrono::Utc::now().naive_utc());

    if entries.is_empty() {
        eprintln!("No alerts: all pricing metrics are within thresholds");
        return ExitCode::SUCCESS;
    }

    for entry in &entries {
        println!("{}\t{}\t{}", entry.severity, entry.sku, entry.condition);
    }
    let (info, warning, critical) = alerts::severity_counts(&entries);
    eprintln!(
        "{} alerts ({} critical, {} warning, {} info)",
        entries.len(),
        critical,
        warning,
        info
    );
    ExitCode::SUCCESS
}

fn run_list_products(config_path: &PathBuf, catalog_override: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let catalog_port = build_catalog_port(&config, catalog_override);
    let skus = match catalog_port.list_skus() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if skus.is_empty() {
        eprintln!("No products found");
    } else {
        for sku in &skus {
            println!("{sku}");
        }
        eprintln!("{} products found", skus.len());
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_all(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Configuration is valid.");
    ExitCode::SUCCESS
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState, Backend};
        use std::net::SocketAddr;
        use std::sync::Mutex;
        use tower_sessions::cookie::Key;

        eprintln!("Loading config from {}", config_path.display());
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };
        if let Err(e) = validate_all(&config) {
            eprintln!("error: {e}");
            return (&e).into();
        }

        let username = match config.get_string("auth", "username") {
            Some(u) => u,
            None => {
                let err = PricedeskError::ConfigMissing {
                    section: "auth".into(),
                    key: "username".into(),
                };
                eprintln!("error: {err}");
                return (&err).into();
            }
        };
        let password_hash = match config.get_string("auth", "password_hash") {
            Some(h) => h,
            None => {
                let err = PricedeskError::ConfigMissing {
                    section: "auth".into(),
                    key: "password_hash".into(),
                };
                eprintln!("error: {err}");
                return (&err).into();
            }
        };

        let rules = build_pricing_rules(&config);
        let thresholds = build_alert_thresholds(&config);
        let catalog_port = build_catalog_port(&config, None);
        let catalog = match catalog_port.load_catalog() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let now = chrono::Utc::now().naive_utc();
        let mut session = ReviewSession::new();
        for record in catalog.records() {
            match recommend(record, &rules, now.date()) {
                Ok(rec) => {
                    session.submit(rec);
                }
                Err(e) => eprintln!("warning: skipping {} ({})", record.sku, e),
            }
        }
        let alert_entries = alerts::evaluate(&catalog, &thresholds, now);
        eprintln!(
            "Prepared {} recommendations, {} alerts",
            session.len(),
            alert_entries.len()
        );

        // Session cookies are signed; the key comes from config or is
        // generated fresh per process.
        let session_key = config
            .get_string("web", "session_key")
            .and_then(|s| hex::decode(s).ok())
            .and_then(|bytes| Key::try_from(bytes.as_slice()).ok())
            .unwrap_or_else(Key::generate);

        let addr: SocketAddr = config
            .get_string("web", "listen")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:3000".parse().unwrap());

        eprintln!("Starting web dashboard on {addr}");

        let state = AppState {
            catalog,
            session: Mutex::new(session),
            alerts: alert_entries,
        };
        let router = build_router(state, Backend::new(username, password_hash), session_key);

        match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime.block_on(async {
                let listener = match tokio::net::TcpListener::bind(addr).await {
                    Ok(l) => l,
                    Err(e) => {
                        eprintln!("error: failed to bind {addr}: {e}");
                        return ExitCode::from(1);
                    }
                };
                if let Err(e) = axum::serve(listener, router).await {
                    eprintln!("error: server failed: {e}");
                    return ExitCode::from(1);
                }
                ExitCode::SUCCESS
            }),
            Err(e) => {
                eprintln!("error: failed to start runtime: {e}");
                ExitCode::from(1)
            }
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}

fn run_hash_password() -> ExitCode {
    #[cfg(feature = "web")]
    {
        use argon2::{
            password_hash::SaltString, Algorithm, Argon2, Params, PasswordHasher, Version,
        };
        use rand::rngs::OsRng;
        use std::io::{self, BufRead};

        eprintln!("Enter password to hash:");
        let stdin = io::stdin();
        let password = match stdin.lock().lines().next() {
            Some(Ok(line)) => line,
            _ => {
                eprintln!("error: failed to read password");
                return ExitCode::from(1);
            }
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default());
        match argon2.hash_password(password.as_bytes(), &salt) {
            Ok(hash) => {
                println!("{hash}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to hash password: {e}");
                ExitCode::from(1)
            }
        }
    }

    #[cfg(not(feature = "web"))]
    {
        eprintln!("error: web feature is required for hash-password");
        ExitCode::from(1)
    }
}

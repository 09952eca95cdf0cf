use clap::{Args, Parser, Subcommand};
use std::fmt::{self, Write as _};
use tracing::info;

use crate::api::run_http_server;
use crate::core::{AssumptionField, Card, Dashboard, DashboardSnapshot};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(
    name = "subdash",
    about = "Subscription economics dashboard (subscribers, revenue, CLV, profit)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the interactive dashboard over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Print the dashboard cards for one set of assumptions
    Calc(CalcArgs),
}

/// Raw control values; each is clamped the same way the web form clamps it.
#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    #[arg(long, allow_hyphen_values = true, help = "Monthly subscription price in $")]
    pub monthly_price: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Yearly subscription price in $")]
    pub yearly_price: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Conversion rate as a fraction, 0.0001 to 0.01"
    )]
    pub conversion_rate: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Profit margin in percent")]
    pub profit_margin: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Months a monthly subscriber stays"
    )]
    pub retention_months: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Years a yearly subscriber stays"
    )]
    pub yearly_retention_years: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Share of subscribers on the yearly plan, in percent"
    )]
    pub yearly_ratio: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Number of impressions")]
    pub impressions: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "App store cut in percent")]
    pub app_store_cut: Option<String>,
    #[arg(long, help = "Print the full snapshot as JSON")]
    pub json: bool,
}

impl CalcArgs {
    fn fields(&self) -> [(AssumptionField, Option<&str>); 9] {
        [
            (AssumptionField::MonthlyPrice, self.monthly_price.as_deref()),
            (AssumptionField::YearlyPrice, self.yearly_price.as_deref()),
            (AssumptionField::ConversionRate, self.conversion_rate.as_deref()),
            (AssumptionField::ProfitMargin, self.profit_margin.as_deref()),
            (AssumptionField::RetentionMonths, self.retention_months.as_deref()),
            (
                AssumptionField::YearlyRetentionYears,
                self.yearly_retention_years.as_deref(),
            ),
            (AssumptionField::YearlyRatio, self.yearly_ratio.as_deref()),
            (AssumptionField::Impressions, self.impressions.as_deref()),
            (AssumptionField::AppStoreCut, self.app_store_cut.as_deref()),
        ]
    }

    pub fn dashboard(&self) -> Dashboard {
        let mut dashboard = Dashboard::default();
        for (field, raw) in self.fields() {
            if let Some(raw) = raw {
                dashboard.set(field, raw);
            }
        }
        dashboard
    }
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve { port } => {
            info!(port, "starting dashboard server");
            run_http_server(port).await?;
        }
        Command::Calc(args) => {
            let snapshot = args.dashboard().snapshot();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render_report(&snapshot)?);
            }
        }
    }
    Ok(())
}

fn card_heading(card: Card) -> &'static str {
    match card {
        Card::Subscribers => "Subscribers",
        Card::Revenue => "Revenue",
        Card::Profit => "Profit",
    }
}

/// Plain-text rendering of the dashboard: inputs first, then one block per
/// result card with its worked formulas.
pub fn render_report(snapshot: &DashboardSnapshot) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Assumptions")?;
    for field in AssumptionField::ALL {
        writeln!(
            out,
            "  {:<38} {}",
            field.label(),
            snapshot.assumptions.control_value(field)
        )?;
    }
    let captions = &snapshot.captions;
    writeln!(
        out,
        "  conversion {} | yearly plan {}",
        captions.conversion_rate, captions.yearly_ratio
    )?;
    writeln!(out, "  {}", captions.monthly_retention)?;
    writeln!(out, "  {}", captions.yearly_retention)?;

    let mut current = None;
    for line in &snapshot.breakdown {
        if current != Some(line.card) {
            current = Some(line.card);
            writeln!(out)?;
            writeln!(out, "{}", card_heading(line.card))?;
        }
        writeln!(out, "  {}", line.evaluation)?;
    }
    Ok(out)
}

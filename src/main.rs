use anyhow::Result;
use clap::{Parser, Subcommand};

use fraudlens::{cli, config, web};

#[derive(Debug, Parser)]
#[command(name = "fraudlens")]
#[command(about = "Fraud-detection model dashboard and prediction CLI")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the dashboard web server
    Serve {
        /// Address to bind, e.g. 127.0.0.1:9848
        #[arg(long)]
        addr: Option<String>,
    },
    /// Load model metrics and print the comparison report
    Metrics {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Score a single transaction against the prediction endpoint
    Predict {
        /// Transaction type: cashout, debit, payment, transfer
        #[arg(long)]
        tx_type: String,
        /// Transaction amount
        #[arg(long)]
        amount: f64,
        /// Originator balance before the transaction
        #[arg(long, default_value_t = 0.0)]
        old_balance_org: f64,
        /// Originator balance after the transaction
        #[arg(long, default_value_t = 0.0)]
        new_balance_orig: f64,
        /// Destination balance before the transaction
        #[arg(long, default_value_t = 0.0)]
        old_balance_dest: f64,
        /// Destination balance after the transaction
        #[arg(long, default_value_t = 0.0)]
        new_balance_dest: f64,
    },
    /// Check upstream endpoints, snapshot, and config
    Health,
}

fn main() -> Result<()> {
    let app = App::parse();
    let cfg = config::load();

    match app.command {
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| cfg.server.addr.clone());
            web::serve(&addr, &cfg)
        }
        Commands::Metrics { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_metrics(fmt, &cfg)
        }
        Commands::Predict {
            tx_type,
            amount,
            old_balance_org,
            new_balance_orig,
            old_balance_dest,
            new_balance_dest,
        } => cli::run_predict(
            &cfg,
            &tx_type,
            amount,
            old_balance_org,
            new_balance_orig,
            old_balance_dest,
            new_balance_dest,
        ),
        Commands::Health => cli::run_health(&cfg),
    }
}

//! Run the mining simulation from the command line.
//!
//!     RUST_LOG=info cargo run --example simulate -- --days 730

use clap::Parser;
use mining_sim::{
    error::Result,
    models::{
        package::{LicencePackage, LicenceTier},
        user::User,
    },
    system::{
        pricing::{MiningParameters, PricingInputs},
        simulator::{SimulationConfig, Simulator},
    },
    Decimal,
};

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Simulate reinvesting mining proceeds into licences and cards", long_about = None)]
struct Cli {
    /// Fiat price of one unit of the mined currency
    #[arg(long, default_value = "91000")]
    price: Decimal,

    /// Number of days to simulate
    #[arg(short, long, default_value_t = 365)]
    days: u32,

    /// Tier of the initial licence (prime or platinum)
    #[arg(long, default_value = "prime")]
    initial_tier: LicenceTier,

    /// Cards bought with the initial licence
    #[arg(long, default_value_t = 14)]
    initial_cards: usize,

    /// Tier bought when reinvesting in whole licences
    #[arg(long, default_value = "platinum")]
    reinvest_tier: LicenceTier,

    /// Cards bought with each reinvested licence
    #[arg(long, default_value_t = 10)]
    reinvest_cards: usize,
}

fn run(cli: &Cli) -> Result<()> {
    let params = MiningParameters::derive(&PricingInputs::with_price(cli.price))?;
    let (licence, invested) = LicencePackage::configure(cli.initial_tier, &params)
        .with_card_count(cli.initial_cards)?
        .build()?;
    let mut user = User::new(params.clone(), 0)?;
    user.add_licence(licence);

    let config = SimulationConfig::builder()
        .days(cli.days)
        .reinvest_tier(cli.reinvest_tier)
        .reinvest_cards(cli.reinvest_cards)
        .build()
        .map_err(|e| mining_sim::error::Error::BuilderFailed(e))?;
    let report = Simulator::new(config).run(&mut user)?;
    for day in report.days() {
        println!("day: {}, value: ${:.2}, number of cards added: {}", day.day(), day.balance_value(), day.cards_added());
    }

    let cagr = report.growth_rate(invested)?;
    println!("--- Results ---");
    println!("currency price: ${:.2}", params.currency_price());
    println!("{} licence cost: ${:.2}", cli.initial_tier, params.to_fiat(params.tier(cli.initial_tier).licence_cost().clone()));
    println!("card cost: ${:.2}", params.to_fiat(params.card_cost().clone()));
    println!("card lifetime: {} days", params.card_lifetime_days());
    println!("invested amount: ${:.2}", params.to_fiat(invested));
    println!("final amount: ${:.2}", params.to_fiat(report.final_balance().clone()));
    println!("CAGR: {:.2}%", cagr * Decimal::from(100));
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("simulation failed: {}", e);
        std::process::exit(1);
    }
}

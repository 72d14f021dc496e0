use clap::Args;

#[derive(Args)]
pub struct TopupArgs {
    #[arg(help = "Amount in UZS (1000 to 5000000)")]
    pub amount: u64,
}

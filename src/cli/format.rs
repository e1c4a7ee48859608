//! Format command: run the price formatter on raw values

use crate::app::AppContext;
use crate::format::SmallNumberStyle;
use clap::Args;

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Values to format, as the exchange would send them
    #[arg(required = true, allow_hyphen_values = true)]
    pub values: Vec<String>,

    /// Render small values in scientific notation
    #[arg(long)]
    pub scientific: bool,
}

impl FormatArgs {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let formatter = if self.scientific {
            ctx.formatter().clone().small_style(SmallNumberStyle::Scientific)
        } else {
            ctx.formatter().clone()
        };

        for value in &self.values {
            println!("{:<24} {}", value, formatter.format(Some(value.as_str())));
        }
        Ok(())
    }
}

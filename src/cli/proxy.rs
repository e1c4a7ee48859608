//! Proxy command: validate and probe a proxy

use crate::app::AppContext;
use crate::proxy::ProxyCommand;
use clap::Args;

#[derive(Args, Debug)]
pub struct ProxyArgs {
    /// Proxy URL, e.g. http://127.0.0.1:7890 (defaults to the configured one)
    pub url: Option<String>,
}

impl ProxyArgs {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let url = self
            .url
            .clone()
            .or_else(|| ctx.config().proxy.url.clone())
            .ok_or(crate::proxy::ProxyError::MissingUrl)?;

        let mut ctx = ctx.clone();
        ctx.set_proxy(ProxyCommand::Open(url.clone())).await?;
        println!("Proxy {} is reachable ({})", url, ctx.proxy().check_url);

        let started = std::time::Instant::now();
        ctx.binance().ping().await?;
        println!("Binance via proxy: {:?}", started.elapsed());
        Ok(())
    }
}

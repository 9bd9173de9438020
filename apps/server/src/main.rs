use anyhow::Context;
use cargroup::domain::config::ApiConfig;
use cargroup::kernel::config::load_config;
use cargroup_server::{Server, init_logger};

#[cargroup_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging)?;

    Server::builder().config(cfg).build().await?.run().await
}

use circle_track::app;
use circle_track::config::Config;
use circle_track::farmware;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let log = farmware::from_env(config.farmware.clone());
    app::run(&config, log.as_ref())?;
    Ok(())
}

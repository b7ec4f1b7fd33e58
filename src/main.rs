use beacon::config::{AppConfig, load_dotenv};
use beacon::ui::{App, AppServices};

fn main() -> anyhow::Result<()> {
    load_dotenv();
    beacon::logging::init();

    let config = AppConfig::from_env()?;
    let services = AppServices::from_config(&config);
    dioxus::LaunchBuilder::new().with_context(services).launch(App);
    Ok(())
}

use aimeshare::{
    config::AppConfig,
    ui::{app::App, cli::Cli},
    util::{hook::set_panic_hook, log::initialize_logging},
};
use clap::Parser;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    setup()?;

    let mut app = App::new(AppConfig::from_env());
    app.run(cli).await
}

fn setup() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    initialize_logging()
}

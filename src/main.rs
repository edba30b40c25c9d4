use channel_dash::{run_dashboard, DashboardConfig};
use tracing::error;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cfg = match DashboardConfig::load_or_default(".") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("invalid dashboard config: {e}");
            std::process::exit(2);
        }
    };
    run_dashboard(cfg)
}

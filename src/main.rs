// Operator sanity-check shell: load the feeds, build the catalog and
// print a summary. The interactive map consumes the library crate; this
// binary exists to verify a data directory or feed endpoint end to end.

use std::path::PathBuf;

use corsmap_lib::error::FeedError;
use corsmap_lib::feeds::{self, FeedClient, FeedSource};
use corsmap_lib::session::MapSession;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("corsmap=info"))
        .init();

    let source = match std::env::args().nth(1) {
        Some(arg) if arg.starts_with("http://") || arg.starts_with("https://") => {
            FeedSource::BaseUrl(arg)
        }
        Some(arg) => FeedSource::Dir(PathBuf::from(arg)),
        None => FeedSource::Dir(PathBuf::from("./data")),
    };
    log::info!("Loading feeds from {:?}", source);

    if let Err(e) = run(source).await {
        log::error!("Feed check failed on {}: {}", e.feed(), e);
        std::process::exit(1);
    }
}

async fn run(source: FeedSource) -> Result<(), FeedError> {
    let client = FeedClient::new(source)?;
    let feeds = feeds::load_all(&client).await?;
    let session = MapSession::new(feeds);

    log::info!(
        "Session ready at {}: {} stations, {} regions, {} circuits",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        session.catalog().len(),
        session.regions().len(),
        session.circuits().len()
    );

    for station in session.catalog() {
        log::debug!(
            "{:5} {:30} ({:8.4}, {:9.4}) port {} status {}",
            station.code,
            station.name,
            station.lat,
            station.lon,
            station.assigned_port,
            station.status
        );
    }

    let legend = session.legend();
    for entry in &legend.single_ports {
        log::info!("Port {}: {} ({})", entry.port, entry.name, entry.color);
    }
    for group in &legend.network_ports {
        log::info!("Network port {}: {}", group.port, group.regions.join(", "));
    }
    log::info!("Auto-connect: port {} (nearest)", legend.nearest_port);

    Ok(())
}

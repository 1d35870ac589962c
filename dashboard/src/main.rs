use anyhow::Context;
use ride_queue_dashboard::{
    command::HELP, demo_ride, poller, ui, Command, Config, QueueController, ReqwestTransport,
    RidesService, TerminalUi,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load().context("loading configuration")?;
    let transport = ReqwestTransport::new(config.request_timeout).context("building HTTP client")?;
    let service = RidesService::new(&config.api_base, transport);

    if config.seed_demo {
        match service.create_ride(&demo_ride()).await {
            Ok(ride) => tracing::info!(ride_id = ride.id, "demo ride queued"),
            Err(e) => tracing::warn!(error = %e, "could not queue demo ride"),
        }
    }

    let input = ui::stdin_lines();
    let controller = QueueController::new(service, TerminalUi::new(input.clone()));

    let mut updates = controller.subscribe();
    let renderer = {
        let controller = controller.clone();
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                print!("{}", ui::render(controller.filter(), &controller.rides()));
            }
        })
    };
    let polling = poller::spawn(controller.clone(), config.poll_interval);

    println!("{HELP}");
    loop {
        let line = match input.lock().await.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match command {
            Command::List => print!("{}", ui::render(controller.filter(), &controller.rides())),
            Command::Refresh => {
                if let Err(e) = controller.refresh().await {
                    println!("{}", e.message());
                }
            }
            Command::Filter(filter) => controller.set_filter(filter),
            Command::Delete(id) | Command::Finish(id) if !controller.is_displayed(id) => {
                println!("ride {id} is not in the queue");
            }
            Command::Delete(id) => {
                controller.delete_ride(id).await;
            }
            Command::Finish(id) => {
                controller.finish_ride(id).await;
            }
            Command::Notify(id) => {
                controller.notify(id).await;
            }
            Command::Gps(id) => {
                if controller.gps(id, config.platform).is_none() {
                    println!("ride {id} is not in the queue");
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    polling.shutdown().await;
    renderer.abort();
    Ok(())
}

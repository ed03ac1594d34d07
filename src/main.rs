use log::{error, info};
use vitrine::configuration::config::Config;
use vitrine::controller::controller_handler::Controller;

#[tokio::main]
async fn main() {
    // Example how to log
    // https://docs.rs/env_logger/latest/env_logger/
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    println!(
        "
██╗   ██╗██╗████████╗██████╗ ██╗███╗   ██╗███████╗
██║   ██║██║╚══██╔══╝██╔══██╗██║████╗  ██║██╔════╝
██║   ██║██║   ██║   ██████╔╝██║██╔██╗ ██║█████╗
╚██╗ ██╔╝██║   ██║   ██╔══██╗██║██║╚██╗██║██╔══╝
 ╚████╔╝ ██║   ██║   ██║  ██║██║██║ ╚████║███████╗
  ╚═══╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝╚═╝╚═╝  ╚═══╝╚══════╝
==================================================
    An authenticated dashboard screenshot bridge
==================================================
"
    );

    info!("Importing configuration");

    let config = Config::from_args().map_err(|e| {
        error!("Unable to import configuration: {}", e);
        std::process::exit(1);
    });

    info!("Configuration imported successfully");

    let mut controller = Controller::new(config.unwrap())
        .map_err(|e| {
            error!(
                "Unable to create a controller instance: {:?}, exiting...",
                e
            );
            std::process::exit(1);
        })
        .unwrap();

    let result = tokio::spawn(async move {
        info!("Spawning the controller");
        controller
            .run()
            .await
            .map_err(|e| {
                error!(
                    "Error occured in the controller process: {:?}, exiting...",
                    e
                )
            })
            .unwrap();
    });

    let _ = result.await.map_err(|e| {
        error!("Error joining at the end of execution: {:?}", e);
        std::process::exit(1);
    });
}

use tokio::io::{AsyncBufReadExt, BufReader};
use villa_booking::{
    config::BookingConfig, domain::commands::ReservationCommand, logging,
    state::new_application_state,
};

// Drives one booking panel session from stdin: each line is a JSON-encoded
// `ReservationCommand` (e.g. `{"SelectDate":{"date":"2027-05-10"}}` or
// `"Continue"`), and the rendered booking screen is printed after each one.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = BookingConfig::from_env()?;
    logging::init(&config.log_level);

    let state = new_application_state(&config);
    let id = state.start().await?;
    tracing::info!(reservation_id = %id, "booking session started");
    println!("{}", serde_json::to_string(&state.screen(id).await?)?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command: ReservationCommand = match serde_json::from_str(line) {
            Ok(command) => command,
            Err(err) => {
                tracing::warn!(%err, input = line, "unreadable command");
                continue;
            }
        };
        if let Err(err) = state.execute(id, command).await {
            tracing::error!(%err, "command failed");
            continue;
        }
        println!("{}", serde_json::to_string(&state.screen(id).await?)?);
    }

    Ok(())
}

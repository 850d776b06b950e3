use atphone::{CommandChannel, SerialConfig};
use tracing_subscriber::{EnvFilter, prelude::*};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let device = std::env::var("ATPHONE_DEVICE").unwrap_or_else(|_| "/dev/ttyACM0".to_owned());
    let delete = std::env::args().skip(1).any(|arg| arg == "--delete");

    let mut phone = CommandChannel::open_serial(&SerialConfig::device(device))?;
    let mut inbox = phone.messages()?;

    for msg in &inbox {
        println!("{msg}");
    }
    println!("{} message(s).", inbox.len());

    if delete {
        inbox.delete_all(&mut phone)?;
        println!("Deleted from phone.");
    }

    Ok(())
}

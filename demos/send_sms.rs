use std::io::{self, BufRead, Write};

use atphone::{AtError, CommandChannel, SerialConfig};
use tracing_subscriber::{EnvFilter, prelude::*};

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let device = std::env::var("ATPHONE_DEVICE").unwrap_or_else(|_| "/dev/ttyACM0".to_owned());

    let mut args = std::env::args().skip(1);
    let number = match args.next() {
        Some(number) => number,
        None => prompt("Enter number: ")?,
    };
    let message = match args.next() {
        Some(message) => message,
        None => prompt(&format!("Enter message for {number}: "))?,
    };

    let mut phone = CommandChannel::open_serial(&SerialConfig::device(device))?;
    match phone.send_sms(&number, &message) {
        Ok(_) => println!("Sent."),
        Err(AtError::Validation(err)) => println!("Error! {err}"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

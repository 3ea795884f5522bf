use cardentry::application::machine::CardEntryMachine;
use cardentry::interfaces::csv::entry_reader::EntryReader;
use cardentry::interfaces::csv::event_writer::CsvEventWriter;
use cardentry::interfaces::event_record::{EventRecord, EventRecordWriter, EventRecordWriterBox};
use cardentry::interfaces::json::event_writer::JsonEventWriter;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

/// Replays recorded card-form edits and prints the events a host UI receives.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input entry script CSV file (header: action,value)
    input: PathBuf,

    /// Output format for emitted events
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cli.log_level).into_diagnostic()?,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = EntryReader::new(file);

    let stdout = io::stdout();
    let mut writer: EventRecordWriterBox = match cli.format {
        Format::Csv => Box::new(CsvEventWriter::new(stdout.lock())),
        Format::Json => Box::new(JsonEventWriter::new(stdout.lock())),
    };

    let mut machine: CardEntryMachine = CardEntryMachine::default();
    for (index, command) in reader.commands().enumerate() {
        let step = index + 1;
        match command {
            Ok(command) => {
                if let Err(e) = machine.apply(command) {
                    tracing::warn!(step, "Rejected entry: {}", e);
                }
            }
            Err(e) => {
                tracing::error!(step, "Error reading entry: {}", e);
            }
        }

        let card_type = machine.card_type();
        let state = machine.state();
        for event in machine.listener_mut().drain() {
            writer
                .write_record(&EventRecord::new(step, event, card_type, state))
                .into_diagnostic()?;
        }
    }

    writer.flush().into_diagnostic()?;
    tracing::info!(state = %machine.state(), "replay finished");

    Ok(())
}

use clap::Parser;
use gen2_rs::{
    gen2::{build_select, MemoryBank, SelectAction, SelectTarget},
    LogOutput, Logger, ReaderConfig,
};

#[derive(Parser)]
struct CliOpts {
    /// Select target code (0-4)
    #[clap(default_value = "4", long, short)]
    target: i32,
    /// Select action code (0-7)
    #[clap(default_value = "0", long, short)]
    action: i32,
    /// Bit pointer into the EPC bank
    #[clap(default_value = "32", long)]
    pointer: u32,
    /// Mask, as hex
    #[clap(default_value = "E280", long)]
    mask: String,
    /// Reader URI used for the configuration dump
    #[clap(default_value = "tmr:///COM19", long, short)]
    connection_uri: String,
    /// Print every target/action combination
    #[clap(long)]
    table: bool,
}

fn error<T>(val: T) -> std::io::Error
where
    T: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    std::io::Error::new(std::io::ErrorKind::Other, val)
}

fn main() -> std::io::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or("info".to_string()))
        .init();

    let opts = CliOpts::parse();
    let log_output = &LogOutput::LogTarget(log::Level::Info, "select_table".into());

    if opts.table {
        for (t_code, target) in SelectTarget::TABLE.iter().enumerate() {
            for (a_code, action) in SelectAction::TABLE.iter().enumerate() {
                log::info!(
                    "target {t_code} action {a_code}: {target:?} (0b{:03b}) / {action:?} (0b{:03b})",
                    target.value(),
                    action.value()
                );
            }
        }
    }

    let uri = opts
        .connection_uri
        .parse()
        .map_err(|e| error(format!("{e}")))?;
    Logger::log(log_output, &ReaderConfig::new(uri));

    let mask = hex::decode(&opts.mask).map_err(error)?;
    let bits = u16::try_from(mask.len() * 8).map_err(error)?;

    let select = build_select(
        opts.target,
        opts.action,
        MemoryBank::Epc,
        opts.pointer,
        bits,
        mask,
    )
    .map_err(|e| error(e.to_string()))?;

    Logger::log(log_output, &select);

    Ok(())
}

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use env_logger::{Env, Target};
use log::{error, info, warn};

use qrcraft::{
    ECLevel, MaskPattern, QRBuilder, QRResult, Stage, Version, DEFAULT_MODULE_SIZE,
    DEFAULT_QUIET_ZONE,
};

#[derive(Parser)]
#[command(name = "qrcraft", version, about = "Generate QR codes (versions 1 to 7)")]
struct Args {
    /// Text to encode
    data: String,

    /// Output PNG path
    #[arg(short, long, default_value = "qrcode.png")]
    output: PathBuf,

    /// Error correction level, strongest fitting level if omitted
    #[arg(short, long)]
    ec_level: Option<EcArg>,

    /// Symbol version, smallest fitting version if omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=7))]
    version: Option<u8>,

    /// Mask pattern, lowest penalty mask if omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=7))]
    mask: Option<u8>,

    /// Pixels per module
    #[arg(short = 's', long, default_value_t = DEFAULT_MODULE_SIZE)]
    module_size: u32,

    /// Quiet zone width in modules
    #[arg(short, long, default_value_t = DEFAULT_QUIET_ZONE)]
    quiet_zone: u32,

    /// Last generation step to run
    #[arg(long, default_value = "mask")]
    until: StageArg,

    /// Draw modules without message bits in red
    #[arg(long)]
    debug: bool,

    /// Also print the symbol to the terminal
    #[arg(long)]
    print: bool,

    /// File the log is appended to, next to the terminal output
    #[arg(long, default_value = "logs.txt")]
    log_file: PathBuf,

    /// Log to the terminal only
    #[arg(long)]
    no_log_file: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum EcArg {
    L,
    M,
    Q,
    H,
}

impl From<EcArg> for ECLevel {
    fn from(value: EcArg) -> Self {
        match value {
            EcArg::L => Self::L,
            EcArg::M => Self::M,
            EcArg::Q => Self::Q,
            EcArg::H => Self::H,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum StageArg {
    ModeIndicator,
    CharCount,
    Data,
    ErrorCorrection,
    Mask,
}

impl From<StageArg> for Stage {
    fn from(value: StageArg) -> Self {
        match value {
            StageArg::ModeIndicator => Self::ModeIndicator,
            StageArg::CharCount => Self::CharCount,
            StageArg::Data => Self::Data,
            StageArg::ErrorCorrection => Self::ErrorCorrection,
            StageArg::Mask => Self::Mask,
        }
    }
}

// Log
//------------------------------------------------------------------------------

// Copies every log line to stderr and to the log file
struct Tee<W: Write> {
    file: W,
}

impl<W: Write> Write for Tee<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

fn init_logger(args: &Args) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_secs();

    let mut file_err = None;
    if !args.no_log_file {
        match OpenOptions::new().create(true).append(true).open(&args.log_file) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(Tee::<File> { file })));
            }
            Err(e) => file_err = Some(e),
        }
    }
    builder.init();

    if let Some(e) = file_err {
        warn!("Logging to terminal only, couldn't open {}: {e}", args.log_file.display());
    }
}


// Run
//------------------------------------------------------------------------------

fn run(args: &Args) -> QRResult<()> {
    let mut builder = QRBuilder::new(&args.data);
    builder.until(args.until.into());
    if let Some(ecl) = args.ec_level {
        builder.ec_level(ecl.into());
    }
    if let Some(v) = args.version {
        builder.version(Version::new(v as usize)?);
    }
    if let Some(m) = args.mask {
        builder.mask(MaskPattern::try_from(m)?);
    }

    let qr = builder.build()?;
    if args.debug {
        qr.render_debug(args.module_size, args.quiet_zone).save(&args.output)?;
    } else {
        qr.save(&args.output, args.module_size, args.quiet_zone)?;
    }
    info!("Saved {} to {}", qr.metadata(), args.output.display());

    if args.print {
        println!("{}", qr.to_str(args.quiet_zone as usize));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

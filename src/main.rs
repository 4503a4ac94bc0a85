use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
};

use clap::Parser;
use log::LevelFilter;

#[derive(Debug)]
enum Error {
    /// just relaying io::Error from stdin, stdout or file metadata
    Io(io::Error),

    /// no input path was given and stdin is a terminal
    NoStdin,

    /// encoding or decoding failed
    Codec(huffpack::Error),
}

impl From<huffpack::Error> for Error {
    fn from(err: huffpack::Error) -> Self {
        Error::Codec(err)
    }
}

/// Compress a file with a Huffman code, then decompress it again.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// file to compress; read from stdin when omitted
    input: Option<PathBuf>,

    /// where the compressed file is written
    #[clap(long, default_value = "encoded.bin")]
    encoded: PathBuf,

    /// where the decompressed file is written
    #[clap(long, default_value = "decoded.txt")]
    decoded: PathBuf,

    /// print each byte and its code
    #[clap(long)]
    codebook: bool,

    /// log more, repeat for even more
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // prepare stdout with buffering
    let stdout = io::stdout();
    let mut stdout = BufWriter::new(stdout.lock());
    macro_rules! println {
        ($($arg:tt)*) => ({
            writeln!(stdout, $($arg)*).map_err(Error::Io)?;
        })
    }

    // the input bytes are only kept around when the codebook is wanted
    let (input_len, input) = match &args.input {
        Some(path) => {
            log::info!("encoding {}", path.display());
            huffpack::encode(path, &args.encoded)?;
            let input_len = fs::metadata(path).map_err(Error::Io)?.len();
            let input = if args.codebook {
                fs::read(path).map_err(Error::Io)?
            } else {
                Vec::new()
            };
            (input_len, input)
        }
        None => {
            // abort when there is no input from stdin
            if atty::is(atty::Stream::Stdin) {
                println!("huffpack reads stdin when no input file is given.");
                stdout.flush().map_err(Error::Io)?;
                return Err(Error::NoStdin);
            }
            let mut input = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut input)
                .map_err(Error::Io)?;
            log::info!("encoding {} bytes from stdin", input.len());
            huffpack::encode_into(&input, &args.encoded)?;
            (input.len() as u64, input)
        }
    };

    if args.codebook {
        match huffpack::code_table(&input)? {
            Some(table) => println!("{}", table),
            None => println!("(empty input, no codes)"),
        }
    }

    log::info!("decoding {}", args.encoded.display());
    huffpack::decode(&args.encoded, &args.decoded)?;

    let encoded_len = fs::metadata(&args.encoded).map_err(Error::Io)?.len();
    let decoded_len = fs::metadata(&args.decoded).map_err(Error::Io)?.len();
    println!(
        "Encoding and decoding done successfully: {} bytes -> {} ({} bytes) -> {} ({} bytes).",
        input_len,
        args.encoded.display(),
        encoded_len,
        args.decoded.display(),
        decoded_len
    );
    stdout.flush().map_err(Error::Io)?;
    Ok(())
}

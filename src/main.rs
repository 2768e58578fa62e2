use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use hashnest::payload::PayloadFile;
use hashnest::random::{SALT_LEN, generate_salt};
use hashnest::{
    Algorithm, Backend, Digester, HkdfParams, LaneWidth, Output, OutputFormat, Pbkdf2Params,
    SaltingMode,
};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod auth;
use auth::Fallback;

#[derive(Debug, clap::Args)]
struct InputArgs {
    /// Input text (stdin when neither DATA nor --file is given)
    data: Option<String>,

    /// Read the input from a file
    #[arg(long, value_name = "PATH", conflicts_with = "data")]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn from_stdin(&self) -> bool {
        self.data.is_none() && self.file.is_none()
    }

    fn read(&self) -> Result<Vec<u8>> {
        if let Some(data) = &self.data {
            return Ok(data.as_bytes().to_vec());
        }
        if let Some(path) = &self.file {
            return PayloadFile::new(path).read();
        }
        read_stdin()
    }
}

#[derive(Debug, clap::Args)]
struct SaltArgs {
    /// Salt as text
    #[arg(long)]
    salt: Option<String>,

    /// Salt as hex (e.g. from `hashnest salt`)
    #[arg(long, value_name = "HEX", conflicts_with = "salt")]
    salt_hex: Option<String>,
}

impl SaltArgs {
    fn bytes(&self) -> Result<Vec<u8>> {
        match (&self.salt, &self.salt_hex) {
            (Some(text), _) => Ok(text.as_bytes().to_vec()),
            (None, Some(h)) => hex::decode(h.trim()).context("--salt-hex is not valid hex"),
            (None, None) => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "hashnest")]
#[command(
    version,
    about = "Hashing, HMAC, HKDF, PBKDF2 and RC4 with portable SHA-3 implementations."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Implementation to use: native or portable (SHA-3 only)
    #[arg(long, global = true, env = "HASHNEST_BACKEND", default_value = "native")]
    backend: Backend,

    /// Keccak lanes for the portable backend: native64, split32 or auto
    #[arg(long, global = true, env = "HASHNEST_LANES", default_value = "auto")]
    lanes: LaneWidth,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Computes a (salted) digest
    Hash {
        algorithm: Algorithm,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        salt: SaltArgs,
        /// How the salt is combined with the input
        #[arg(long, default_value = "append")]
        salting: SaltingMode,
        /// raw, hex, hex-upper, base64 or base64url
        #[arg(long, default_value = "hex")]
        format: OutputFormat,
    },

    /// Computes an HMAC; the key is read from HASHNEST_KEY or prompted for
    Hmac {
        algorithm: Algorithm,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        salt: SaltArgs,
        #[arg(long, default_value = "append")]
        salting: SaltingMode,
        #[arg(long, default_value = "hex")]
        format: OutputFormat,
    },

    /// Derives key material with HKDF; the input is the key material
    Hkdf {
        algorithm: Algorithm,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        salt: SaltArgs,
        /// Output length in bytes (0 = digest size)
        #[arg(long, default_value_t = 0)]
        length: usize,
        /// Context and application specific information
        #[arg(long, default_value = "")]
        info: String,
        #[arg(long, default_value = "hex")]
        format: OutputFormat,
    },

    /// Derives a key from a password read from HASHNEST_PASSWORD, stdin or a prompt
    Pbkdf2 {
        algorithm: Algorithm,
        #[command(flatten)]
        salt: SaltArgs,
        #[arg(long, default_value_t = Pbkdf2Params::default().iterations())]
        iterations: u32,
        /// Output length in bytes (0 = digest size)
        #[arg(long, default_value_t = 0)]
        length: usize,
        #[arg(long, default_value = "hex")]
        format: OutputFormat,
    },

    /// Checks a plain digest; exits non-zero when it does not match
    #[command(arg_required_else_help = true)]
    Verify {
        algorithm: Algorithm,
        /// Expected digest, encoded as --format (hex when --format raw)
        digest: String,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        salt: SaltArgs,
        #[arg(long, default_value = "append")]
        salting: SaltingMode,
        #[arg(long, default_value = "hex")]
        format: OutputFormat,
    },

    /// Encrypts or decrypts with RC4; the key is read from HASHNEST_KEY or prompted for
    Rc4 {
        #[command(subcommand)]
        action: Rc4Action,
    },

    /// Prints a random salt as hex
    Salt {
        /// Salt length in bytes
        #[arg(long, default_value_t = SALT_LEN)]
        length: usize,
    },

    /// Lists the supported algorithms
    Algorithms {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum Rc4Action {
    Encrypt(Rc4Args),
    Decrypt(Rc4Args),
}

#[derive(Debug, clap::Args)]
struct Rc4Args {
    /// Input file (stdin when omitted)
    #[arg(long = "in", value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output file; without it ciphertext is printed as hex and plaintext as-is
    #[arg(long = "out", value_name = "PATH")]
    output: Option<PathBuf>,

    /// The input is hex text rather than raw bytes
    #[arg(long, default_value_t = false)]
    hex: bool,
}

#[derive(Serialize)]
struct AlgorithmRow {
    name: Algorithm,
    output_len: usize,
    block_len: usize,
    portable: bool,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set up logging")?;

    let backend = cli.backend;
    let lanes = cli.lanes;
    match cli.command {
        Commands::Hash {
            algorithm,
            input,
            salt,
            salting,
            format,
        } => {
            let digester = Digester::new(algorithm)
                .backend(backend)
                .lane_width(lanes)
                .salt(salt.bytes()?)
                .salting(salting)
                .format(format);
            let data = input.read()?;
            info!(%algorithm, %backend, bytes = data.len(), "hashing");
            print_output(&digester.digest(&data)?)?;
        }
        Commands::Hmac {
            algorithm,
            input,
            salt,
            salting,
            format,
        } => {
            let key = auth::read_secret("HASHNEST_KEY", "Key: ", key_fallback(input.from_stdin()))?;
            let digester = Digester::new(algorithm)
                .backend(backend)
                .lane_width(lanes)
                .keyed(key.as_bytes())
                .salt(salt.bytes()?)
                .salting(salting)
                .format(format);
            let data = input.read()?;
            info!(%algorithm, %backend, bytes = data.len(), "computing hmac");
            print_output(&digester.digest(&data)?)?;
        }
        Commands::Hkdf {
            algorithm,
            input,
            salt,
            length,
            info,
            format,
        } => {
            let digester = Digester::new(algorithm)
                .backend(backend)
                .lane_width(lanes)
                .hkdf(HkdfParams::new(length, info.into_bytes()))
                .salt(salt.bytes()?)
                .format(format);
            let ikm = zeroize::Zeroizing::new(input.read()?);
            info!(%algorithm, %backend, length, "deriving with hkdf");
            print_output(&digester.digest(&ikm)?)?;
        }
        Commands::Pbkdf2 {
            algorithm,
            salt,
            iterations,
            length,
            format,
        } => {
            let params = Pbkdf2Params::new(iterations, length)?;
            let password =
                auth::read_secret("HASHNEST_PASSWORD", "Password: ", Fallback::StdinOrPrompt)?;
            let digester = Digester::new(algorithm)
                .backend(backend)
                .lane_width(lanes)
                .pbkdf2(params)
                .salt(salt.bytes()?)
                .format(format);
            info!(%algorithm, %backend, iterations, length, "deriving with pbkdf2");
            print_output(&digester.digest(password.as_bytes())?)?;
        }
        Commands::Verify {
            algorithm,
            digest,
            input,
            salt,
            salting,
            format,
        } => {
            let digester = Digester::new(algorithm)
                .backend(backend)
                .lane_width(lanes)
                .salt(salt.bytes()?)
                .salting(salting)
                .format(format);
            let expected = match format {
                OutputFormat::Raw => {
                    Output::Raw(hex::decode(digest.trim()).context("digest is not valid hex")?)
                }
                _ => Output::Text(digest),
            };
            let data = input.read()?;
            if digester.verify(&data, &expected)? {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Rc4 { action } => {
            let (encrypting, args) = match action {
                Rc4Action::Encrypt(args) => (true, args),
                Rc4Action::Decrypt(args) => (false, args),
            };
            run_rc4(encrypting, &args)?;
        }
        Commands::Salt { length } => {
            if length == 0 {
                bail!("salt length must be at least 1 byte");
            }
            println!("{}", hex::encode(generate_salt(length)?));
        }
        Commands::Algorithms { json } => {
            let rows: Vec<AlgorithmRow> = Algorithm::all()
                .map(|a| AlgorithmRow {
                    name: a,
                    output_len: a.output_len(),
                    block_len: a.block_len(),
                    portable: a.has_portable(),
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{:<10}  {:>6}  {:>6}  Portable", "Algorithm", "Bytes", "Block");
                println!("{:-<10}  {:->6}  {:->6}  {:-<8}", "", "", "", "");
                for row in rows {
                    let portable = if row.portable { "yes" } else { "no" };
                    println!(
                        "{:<10}  {:>6}  {:>6}  {portable}",
                        row.name.name(),
                        row.output_len,
                        row.block_len
                    );
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_rc4(encrypting: bool, args: &Rc4Args) -> Result<()> {
    // with no --in the payload owns stdin
    let fallback = key_fallback(args.input.is_none());
    let key = auth::read_secret("HASHNEST_KEY", "Key: ", fallback)?;

    let raw = match &args.input {
        Some(path) => PayloadFile::new(path).read()?,
        None => read_stdin()?,
    };
    let data = if args.hex {
        hex::decode(String::from_utf8_lossy(&raw).trim()).context("input is not valid hex")?
    } else {
        raw
    };

    info!(encrypting, bytes = data.len(), "rc4");
    let out = if encrypting {
        hashnest::rc4_encrypt(key.as_bytes(), &data)?
    } else {
        hashnest::rc4_decrypt(key.as_bytes(), &data)?
    };

    match &args.output {
        Some(path) => {
            PayloadFile::new(path).write(&out)?;
            println!("wrote {} bytes to {}", out.len(), path.display());
        }
        None if encrypting => println!("{}", hex::encode(&out)),
        None => io::stdout().write_all(&out)?,
    }
    Ok(())
}

fn key_fallback(payload_on_stdin: bool) -> Fallback {
    if payload_on_stdin {
        Fallback::PromptOnly
    } else {
        Fallback::StdinOrPrompt
    }
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    io::stdin()
        .read_to_end(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

fn print_output(output: &Output) -> Result<()> {
    match output {
        Output::Raw(bytes) => io::stdout().write_all(bytes)?,
        Output::Text(text) => println!("{text}"),
    }
    Ok(())
}

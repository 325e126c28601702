//! Kyrax CLI - ML-KEM key encapsulation command-line tool.

use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use kyrax_pqc::ml_kem::inspect::KeyInspection;
use kyrax_pqc::ml_kem::{
    MlKem, ParameterSet, KEYPAIR_SEED_SIZE, MESSAGE_SIZE, ML_KEM_1024, ML_KEM_512, ML_KEM_768,
};
use rand::rngs::OsRng;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroize;

/// Post-quantum key encapsulation CLI tool
#[derive(Parser)]
#[command(name = "kyrax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "hex")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair
    Keygen {
        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "ml-kem-768")]
        algo: Algorithm,

        /// Output file prefix (creates `<prefix>.pub` and `<prefix>.sec`)
        #[arg(short, long)]
        output: String,

        /// Derive the key pair from a 64-byte seed `d || z` (hex) instead of
        /// drawing fresh randomness
        #[arg(long)]
        seed: Option<String>,
    },

    /// Encapsulate a shared secret using a public key
    Encaps {
        /// Path to the public key file
        #[arg(long = "pub")]
        pubkey: PathBuf,

        /// Output file for ciphertext (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fixed 32-byte message (hex) for deterministic encapsulation
        #[arg(long)]
        message: Option<String>,
    },

    /// Decapsulate a shared secret using a secret key
    Decaps {
        /// Path to the secret key file
        #[arg(long = "key")]
        key: PathBuf,

        /// Path to the ciphertext file (reads from stdin if not specified)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the structure of a public key
    Inspect {
        /// Path to the public key file
        #[arg(long = "pub")]
        pubkey: PathBuf,
    },

    /// Display information about supported algorithms
    Info,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// ML-KEM-512 (NIST Security Level 1, 128-bit)
    #[value(name = "ml-kem-512")]
    MlKem512,
    /// ML-KEM-768 (NIST Security Level 3, 192-bit)
    #[value(name = "ml-kem-768")]
    MlKem768,
    /// ML-KEM-1024 (NIST Security Level 5, 256-bit)
    #[value(name = "ml-kem-1024")]
    MlKem1024,
}

impl Algorithm {
    fn params(self) -> ParameterSet {
        match self {
            Algorithm::MlKem512 => ML_KEM_512,
            Algorithm::MlKem768 => ML_KEM_768,
            Algorithm::MlKem1024 => ML_KEM_1024,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Hexadecimal encoding
    Hex,
    /// Base64 encoding
    Base64,
    /// PEM format
    Pem,
}

/// Which half of a key pair a key file holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyRole {
    Public,
    Secret,
}

/// Encode bytes to the specified format
fn encode_output(data: &[u8], format: OutputFormat, label: &str) -> String {
    match format {
        OutputFormat::Hex => hex::encode(data),
        OutputFormat::Base64 => BASE64.encode(data),
        OutputFormat::Pem => {
            let b64 = BASE64.encode(data);
            let wrapped: Vec<&str> = b64
                .as_bytes()
                .chunks(64)
                .filter_map(|chunk| std::str::from_utf8(chunk).ok())
                .collect();
            format!(
                "-----BEGIN {}-----\n{}\n-----END {}-----",
                label,
                wrapped.join("\n"),
                label
            )
        }
    }
}

/// Check if a string is valid hexadecimal
fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Decode bytes with auto-detection of format.
/// Detection order: PEM (by header) -> Hex (if all hex chars) -> Base64.
fn decode_input(data: &str) -> Result<Vec<u8>> {
    let data = data.trim();

    if data.starts_with("-----BEGIN") {
        let lines: Vec<&str> = data.lines().map(str::trim).collect();
        if lines.len() < 3 || !lines[lines.len() - 1].starts_with("-----END") {
            bail!("Invalid PEM format");
        }
        let b64: String = lines[1..lines.len() - 1].concat();
        return BASE64
            .decode(&b64)
            .context("Failed to decode PEM base64 content");
    }

    // Hex: only 0-9, a-f, A-F (and must have even length for valid bytes)
    // Base64: may contain +, /, = which are not valid hex
    if is_hex(data) && data.len() % 2 == 0 {
        return hex::decode(data).context("Failed to decode hex");
    }

    BASE64.decode(data).context("Failed to decode base64")
}

/// Decode a hex argument that must be exactly `expected` bytes long.
fn decode_hex_arg(value: &str, name: &str, expected: usize) -> Result<Vec<u8>> {
    let bytes = hex::decode(value.trim()).with_context(|| format!("--{} must be hex", name))?;
    if bytes.len() != expected {
        bail!(
            "--{} must be {} bytes, got {} bytes",
            name,
            expected,
            bytes.len()
        );
    }
    Ok(bytes)
}

/// Detect the parameter set from a key size
fn detect_params(key_size: usize, role: KeyRole) -> Result<ParameterSet> {
    let size_of = |params: &ParameterSet| match role {
        KeyRole::Public => params.encapsulation_key_size(),
        KeyRole::Secret => params.decapsulation_key_size(),
    };
    if let Some(params) = ParameterSet::ALL.iter().find(|p| size_of(p) == key_size) {
        return Ok(*params);
    }

    let expected: Vec<String> = ParameterSet::ALL
        .iter()
        .map(|p| size_of(p).to_string())
        .collect();
    let kind = match role {
        KeyRole::Public => "public",
        KeyRole::Secret => "secret",
    };
    bail!(
        "Unknown {} key size: {} bytes. Expected one of {}.",
        kind,
        key_size,
        expected.join(", ")
    )
}

/// Read and decode a key file, returning its bytes and parameter set.
fn read_key(path: &PathBuf, role: KeyRole) -> Result<(Vec<u8>, ParameterSet)> {
    let mut data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read key file {}", path.display()))?;
    let bytes = decode_input(&data);
    data.zeroize();
    let bytes = bytes?;
    let params = detect_params(bytes.len(), role)?;
    debug!(params = params.name(), key_len = bytes.len(), ?role, "loaded key");
    Ok((bytes, params))
}

/// Generate a key pair for the specified algorithm
fn cmd_keygen(
    algo: Algorithm,
    output: &str,
    seed: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let params = algo.params();
    info!(params = params.name(), derived = seed.is_some(), "generating key pair");

    let mut kem = MlKem::new(params, OsRng);
    let (ek, dk) = match seed {
        Some(hex_seed) => {
            let mut seed = decode_hex_arg(hex_seed, "seed", KEYPAIR_SEED_SIZE)?;
            let keys = kem.derive_key_pair(&seed);
            seed.zeroize();
            keys
        }
        None => kem.generate_key_pair(),
    }
    .map_err(|e| anyhow!("Key generation failed: {}", e))?;

    let pk_encoded = encode_output(ek.as_bytes(), format, "ML-KEM PUBLIC KEY");
    let mut sk_encoded = encode_output(dk.as_bytes(), format, "ML-KEM SECRET KEY");

    let pub_path = format!("{}.pub", output);
    let sec_path = format!("{}.sec", output);

    fs::write(&pub_path, &pk_encoded).context("Failed to write public key")?;
    let written = fs::write(&sec_path, &sk_encoded).context("Failed to write secret key");
    sk_encoded.zeroize();
    written?;

    debug!(
        ek_len = ek.as_bytes().len(),
        dk_len = dk.as_bytes().len(),
        "key pair written"
    );

    println!("Public key written to: {}", pub_path);
    println!("Secret key written to: {}", sec_path);

    Ok(())
}

/// Encapsulate a shared secret
fn cmd_encaps(
    pubkey: &PathBuf,
    output: Option<&PathBuf>,
    message: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let (pk_bytes, params) = read_key(pubkey, KeyRole::Public)?;
    info!(params = params.name(), "encapsulating");

    let mut msg = message
        .map(|m| decode_hex_arg(m, "message", MESSAGE_SIZE))
        .transpose()?;

    let mut kem = MlKem::new(params, OsRng);
    let result = kem.encap(&pk_bytes, msg.as_deref());
    if let Some(m) = msg.as_mut() {
        m.zeroize();
    }
    let (ct, ss) = result.map_err(|e| anyhow!("Encapsulation failed: {}", e))?;

    let ct_encoded = encode_output(ct.as_bytes(), format, "ML-KEM CIPHERTEXT");

    if let Some(out_path) = output {
        fs::write(out_path, &ct_encoded).context("Failed to write ciphertext")?;
        debug!(path = %out_path.display(), ct_len = ct.as_bytes().len(), "ciphertext written");
    } else {
        println!("{}", ct_encoded);
    }

    // Shared secret goes to whichever stream the ciphertext does not use
    let mut ss_encoded = encode_output(ss.as_bytes(), format, "SHARED SECRET");
    if output.is_some() {
        println!("Shared secret: {}", ss_encoded);
    } else {
        eprintln!("Shared secret: {}", ss_encoded);
    }
    ss_encoded.zeroize();

    Ok(())
}

/// Decapsulate a shared secret
fn cmd_decaps(key: &PathBuf, input: Option<&PathBuf>, format: OutputFormat) -> Result<()> {
    let (mut sk_bytes, params) = read_key(key, KeyRole::Secret)?;

    let ct_data = if let Some(ct_path) = input {
        fs::read_to_string(ct_path).context("Failed to read ciphertext file")?
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read ciphertext from stdin")?;
        buf
    };
    let ct_bytes = decode_input(&ct_data)?;
    info!(params = params.name(), ct_len = ct_bytes.len(), "decapsulating");

    let kem = MlKem::new(params, OsRng);
    let result = kem.decap(&ct_bytes, &sk_bytes);
    sk_bytes.zeroize();
    let ss = result.map_err(|e| anyhow!("Decapsulation failed: {}", e))?;

    let mut ss_encoded = encode_output(ss.as_bytes(), format, "SHARED SECRET");
    println!("{}", ss_encoded);
    ss_encoded.zeroize();

    Ok(())
}

/// Print the decoded structure of a public key
fn cmd_inspect(pubkey: &PathBuf) -> Result<()> {
    let (pk_bytes, params) = read_key(pubkey, KeyRole::Public)?;
    let inspection = KeyInspection::new(params, &pk_bytes)
        .map_err(|e| anyhow!("Inspection failed: {}", e))?;
    if !inspection.is_canonical() {
        tracing::warn!("public key has coefficients >= q and will be rejected by encaps");
    }
    print!("{}", inspection);
    Ok(())
}

/// Display information about supported algorithms
fn cmd_info() {
    println!("Kyrax - ML-KEM (FIPS 203) Key Encapsulation");
    println!();
    println!("Supported algorithms:");
    println!();
    let levels = ["1 (128-bit)", "3 (192-bit)", "5 (256-bit)"];
    for (params, level) in ParameterSet::ALL.iter().zip(levels) {
        println!(
            "    {:<12} Security Level {}  PK: {}B  SK: {}B  CT: {}B  SS: {}B",
            params.name().to_lowercase(),
            level,
            params.encapsulation_key_size(),
            params.decapsulation_key_size(),
            params.ciphertext_size(),
            params.shared_secret_size()
        );
    }
    println!();
    println!("Output formats:");
    println!("    hex    - Hexadecimal encoding (default)");
    println!("    base64 - Base64 encoding");
    println!("    pem    - PEM format with headers");
    println!();
    println!("Input files are auto-detected as PEM, hex or base64.");
}

/// Generate shell completions
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "kyrax", &mut io::stdout());
}

/// Install the stderr log subscriber.
///
/// `KYRAX_LOG`, then `RUST_LOG`, override the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("KYRAX_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Keygen { algo, output, seed } => {
            cmd_keygen(algo, &output, seed.as_deref(), cli.format)
        }

        Commands::Encaps {
            pubkey,
            output,
            message,
        } => cmd_encaps(&pubkey, output.as_ref(), message.as_deref(), cli.format),

        Commands::Decaps { key, input } => cmd_decaps(&key, input.as_ref(), cli.format),

        Commands::Inspect { pubkey } => cmd_inspect(&pubkey),

        Commands::Info => {
            cmd_info();
            Ok(())
        }

        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

//! signtool-client CLI
//!
//! Signs files through a remote Authenticode signing service and reports
//! the signature status of signed files.

use clap::{Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Result};
use std::path::PathBuf;
use signtool_client::{
    Certificate, ConfigManager, DecodedReply, HashAlgorithm, PropertyBag, ServiceConfig,
    SignOptions, SignWorkflow, SignatureResult, SigningSession, TimestampUrl, VerifyWorkflow,
};

#[derive(Parser)]
#[command(name = "signtool-client")]
#[command(about = "Sign and verify files with a remote Authenticode signing service")]
#[command(long_about = "
signtool-client - Remote Authenticode signing

EXAMPLES:
    # Create the configuration file
    signtool-client config init --endpoint https://sign.example.com/signtool --authorization TOKEN

    # Sign a file in place
    signtool-client sign myapp.exe --certificate codesign.pem --timestamp-url http://timestamp.digicert.com

    # Check the signatures of several files
    signtool-client verify myapp.exe helper.dll

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a file in place
    Sign {
        /// File to sign
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Signing certificate (PEM or DER); selects the key by thumbprint
        #[arg(short, long, value_name = "CERT_FILE")]
        certificate: PathBuf,

        /// File digest algorithm
        #[arg(long, value_name = "ALGORITHM", default_value = "SHA256")]
        hash: String,

        /// RFC 3161 timestamp server URL
        #[arg(short, long, value_name = "URL")]
        timestamp_url: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Verify the signatures of one or more files
    Verify {
        /// Files to verify
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Show certificate details
        #[arg(short, long)]
        verbose: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Create the configuration file
    Init {
        /// Signing service endpoint URL
        #[arg(long)]
        endpoint: String,
        /// Authorization header value
        #[arg(long)]
        authorization: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new().into_diagnostic()?,
    };

    let all_ok = match cli.command {
        Commands::Sign {
            input_file,
            certificate,
            hash,
            timestamp_url,
            verbose,
        } => {
            handle_sign_command(
                config_manager,
                input_file,
                certificate,
                &hash,
                &timestamp_url,
                verbose,
            )
            .await?
        }
        Commands::Verify { files, verbose } => {
            handle_verify_command(config_manager, &files, verbose).await?
        }
        Commands::Config(config_cmd) => {
            handle_config_command(&config_manager, config_cmd)?;
            true
        }
    };

    if !all_ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn handle_sign_command(
    config_manager: ConfigManager,
    input_file: PathBuf,
    certificate: PathBuf,
    hash: &str,
    timestamp_url: &str,
    verbose: bool,
) -> Result<bool> {
    let cert_bytes = std::fs::read(&certificate)
        .into_diagnostic()
        .with_context(|| format!("Failed to read certificate {}", certificate.display()))?;
    let certificate = Certificate::from_pem_or_der(&cert_bytes).into_diagnostic()?;

    let options = SignOptions {
        certificate,
        hash_algorithm: hash.parse::<HashAlgorithm>().into_diagnostic()?,
        timestamp_server: TimestampUrl::new(timestamp_url).into_diagnostic()?,
    };

    let mut session = SigningSession::new(config_manager);
    let outcome = SignWorkflow::new(options)
        .run(&mut session, &input_file)
        .await
        .into_diagnostic()?;

    match outcome.into_result() {
        Ok(result) => {
            println!("✅ File signed successfully!");
            print_result(&result, verbose);
            Ok(true)
        }
        Err(failure) => {
            eprintln!("❌ Signing failed: {failure}");
            Ok(false)
        }
    }
}

async fn handle_verify_command(
    config_manager: ConfigManager,
    files: &[PathBuf],
    verbose: bool,
) -> Result<bool> {
    let mut session = SigningSession::new(config_manager);
    let outcomes = VerifyWorkflow::new()
        .run(&mut session, files)
        .await
        .into_diagnostic()?;

    let mut all_ok = true;
    for outcome in outcomes {
        match outcome.into_result() {
            Ok(DecodedReply::Decoded(result)) => print_result(&result, verbose),
            Ok(DecodedReply::Raw(bag)) => print_raw(&bag),
            Err(failure) => {
                eprintln!("❌ {failure}");
                all_ok = false;
            }
        }
        println!();
    }

    Ok(all_ok)
}

fn handle_config_command(config_manager: &ConfigManager, config_cmd: ConfigCommands) -> Result<()> {
    match config_cmd {
        ConfigCommands::Show => match config_manager.load() {
            Ok(config) => {
                println!("📋 Current Configuration:");
                println!("  Endpoint: {}", config.endpoint);
                println!("  Authorization: [REDACTED]");
                println!(
                    "  Configuration file: {}",
                    config_manager.config_path().display()
                );
            }
            Err(e) => {
                println!("📋 {e}");
                println!("   Use 'config init' to create one.");
            }
        },

        ConfigCommands::Init {
            endpoint,
            authorization,
        } => {
            let config = ServiceConfig::new(endpoint, authorization);
            if config_manager.init(&config).into_diagnostic()? {
                println!(
                    "✅ Configuration initialized: {}",
                    config_manager.config_path().display()
                );
            } else {
                println!(
                    "ℹ️  Configuration already exists: {}",
                    config_manager.config_path().display()
                );
            }
        }
    }

    Ok(())
}

fn print_result(result: &SignatureResult, verbose: bool) {
    println!("  Path: {}", result.path().display());
    println!(
        "  Status: {} (0x{:08X})",
        result.status(),
        result.status_code()
    );
    println!("  StatusMessage: {}", result.status_message());

    if let Some(kind) = result.signature_type() {
        println!("  SignatureType: {kind}");
    }
    if let Some(is_os_binary) = result.is_os_binary() {
        println!("  IsOSBinary: {is_os_binary}");
    }

    let certificates = [
        ("SignerCertificate", result.signer_certificate()),
        ("TimeStamperCertificate", result.timestamp_certificate()),
    ];
    for (label, cert) in certificates {
        let Some(cert) = cert else { continue };
        println!("  {label}: {}", cert.subject());
        println!("    Thumbprint: {}", cert.thumbprint());
        if verbose {
            println!("    Issuer: {}", cert.issuer());
            println!("    Serial: {}", cert.serial_number());
        }
    }
}

fn print_raw(bag: &PropertyBag) {
    for (name, value) in bag {
        println!("  {name}: {value}");
    }
}

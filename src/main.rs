use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use devcert::cert::params::DistinguishedName;
use devcert::issuer::{DEFAULT_VALIDITY_DAYS, IssuerConfig, default_dns_names, issue_self_signed};
use devcert::key::{KeyAlgorithm, KeyFormat, MIN_RSA_BITS};
use devcert::output::{DEFAULT_OUTPUT_DIR, write_identity};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    about = "Generate a self-signed certificate and key for local HTTPS development",
    long_about = None
)]
struct Cli {
    /// Directory that receives key.pem and cert.pem
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,

    /// Days the certificate stays valid
    #[arg(long, default_value_t = DEFAULT_VALIDITY_DAYS)]
    days: u32,

    /// Subject common name
    #[arg(long)]
    common_name: Option<String>,

    /// Subject organization
    #[arg(long)]
    organization: Option<String>,

    /// DNS subject alternative name; repeat for several
    #[arg(long = "san", value_name = "NAME")]
    dns_names: Vec<String>,

    #[arg(long, value_enum, default_value_t = Algorithm::Rsa)]
    key_algorithm: Algorithm,

    /// RSA modulus size
    #[arg(long, default_value_t = MIN_RSA_BITS)]
    key_bits: usize,

    #[arg(long, value_enum, default_value_t = Format::Traditional)]
    key_format: Format,

    /// Log issuance steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    Rsa,
    EcdsaP256,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Traditional,
    Pkcs8,
}

impl Cli {
    fn issuer_config(&self) -> IssuerConfig {
        let defaults = DistinguishedName::default();
        let subject = DistinguishedName {
            common_name: self.common_name.clone().unwrap_or(defaults.common_name),
            organization: self.organization.clone().or(defaults.organization),
            ..defaults
        };
        let key_algorithm = match self.key_algorithm {
            Algorithm::Rsa => KeyAlgorithm::Rsa {
                bits: self.key_bits,
            },
            Algorithm::EcdsaP256 => KeyAlgorithm::EcdsaP256,
        };
        let key_format = match self.key_format {
            Format::Traditional => KeyFormat::Traditional,
            Format::Pkcs8 => KeyFormat::Pkcs8,
        };
        let dns_names = if self.dns_names.is_empty() {
            default_dns_names()
        } else {
            self.dns_names.clone()
        };

        IssuerConfig::builder()
            .key_algorithm(key_algorithm)
            .key_format(key_format)
            .subject(subject)
            .validity_days(self.days)
            .dns_names(dns_names)
            .build()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.issuer_config();

    println!("Generating self-signed certificate...");
    let identity = issue_self_signed(&config)
        .map_err(|e| anyhow::anyhow!("certificate issuance failed during {}: {e}", e.stage()))?;
    let paths = write_identity(&cli.out_dir, &identity)
        .map_err(|e| anyhow::anyhow!("certificate issuance failed during {}: {e}", e.stage()))?;

    println!("✓ Certificate generated");
    println!("  - {} (certificate)", paths.certificate.display());
    println!("  - {} (private key)", paths.private_key.display());
    Ok(())
}

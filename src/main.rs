//! ml-gateway CLI
//!
//! Issues one call through the request gateway (or one of the web-service
//! helpers) and prints the outcome. Useful to check connectivity, sessions and
//! slow-call logging from the machine a plugin host runs on.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use ml_gateway::config::{default_config, load_config, GatewayConfig};
use ml_gateway::http::{Gateway, GatewayError, GatewayResult, RequestDescriptor, ResponseBody};
use ml_gateway::observability::init_logging;
use ml_gateway::webservices::WebServices;

#[derive(Parser)]
#[command(name = "ml-gateway")]
#[command(about = "Diagnostic CLI for the Marvin Live request gateway", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults plus JCWSURL when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CallArgs {
    url: String,

    /// Request header as `Name: value` (repeatable).
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Decode the response as JSON and pretty-print it.
    #[arg(long)]
    decode_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a GET request
    Get {
        #[command(flatten)]
        call: CallArgs,
    },
    /// Send a POST request
    Post {
        #[command(flatten)]
        call: CallArgs,

        /// JSON body.
        #[arg(long, conflicts_with_all = ["form", "data"])]
        json: Option<String>,

        /// Form field as `key=value` (repeatable).
        #[arg(long, value_parser = parse_form_field, conflicts_with = "data")]
        form: Vec<(String, String)>,

        /// Raw body sent verbatim.
        #[arg(long)]
        data: Option<String>,
    },
    /// Convert a structure to another format through the web services
    Convert {
        structure: String,

        #[arg(short, long, default_value = "smiles")]
        format: String,
    },
    /// Resolve image URLs for structures through the web services
    ImageUrls {
        #[arg(required = true)]
        structures: Vec<String>,

        #[arg(long, requires = "height")]
        width: Option<u32>,

        #[arg(long, requires = "width")]
        height: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path),
        None => default_config(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability);

    tracing::debug!(
        base_url = %config.webservices.base_url,
        slow_call_threshold_ms = config.client.slow_call_threshold_ms,
        "Configuration loaded"
    );

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &GatewayConfig) -> GatewayResult<()> {
    let gateway = Gateway::new(&config.client)?;

    match command {
        Commands::Get { call } => {
            let body = gateway.get(build_descriptor(call)).await?;
            print_body(body)?;
        }
        Commands::Post {
            call,
            json,
            form,
            data,
        } => {
            let mut descriptor = build_descriptor(call);
            if let Some(json) = json {
                descriptor = descriptor.json(serde_json::from_str(&json)?);
            } else if !form.is_empty() {
                descriptor = descriptor.form(form);
            } else if let Some(data) = data {
                descriptor = descriptor.raw(data);
            }
            let body = gateway.post(descriptor).await?;
            print_body(body)?;
        }
        Commands::Convert { structure, format } => {
            let services = WebServices::new(gateway, &config.webservices)?;
            let converted = services.convert(&structure, &format).await?;
            println!("{}", converted.trim_end());
        }
        Commands::ImageUrls {
            structures,
            width,
            height,
        } => {
            let services = WebServices::new(gateway, &config.webservices)?;
            let size = width.zip(height);
            for url in services.image_urls(&structures[..], size).await? {
                println!("{}", url.as_deref().unwrap_or("-"));
            }
        }
    }

    Ok(())
}

fn build_descriptor(call: CallArgs) -> RequestDescriptor {
    let mut descriptor = RequestDescriptor::new(call.url);
    for (name, value) in call.headers {
        descriptor = descriptor.header(name, value);
    }
    if let Some(ms) = call.timeout_ms {
        descriptor = descriptor.timeout_ms(ms);
    }
    if call.decode_json {
        descriptor = descriptor.decode_json();
    }
    descriptor
}

fn print_body(body: ResponseBody) -> GatewayResult<()> {
    match body {
        ResponseBody::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        ResponseBody::Raw(bytes) => print!("{}", String::from_utf8_lossy(&bytes)),
    }
    Ok(())
}

fn report(error: &GatewayError) {
    eprintln!("Error: {}", error);
    if let Some(response) = error.response() {
        eprintln!("Response: {}", response.body_text());
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    raw.split_once(':')
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| format!("expected `Name: value`, got `{}`", raw))
}

fn parse_form_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected `key=value`, got `{}`", raw))
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! MCS CLI - command-line client for the MCS mobile backend.
//!
//! Every subcommand maps onto one SDK operation and prints the backend's
//! answer to stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zeroize::Zeroizing;

use mcs::{FileStore, McsClient, StaticPushRegistrar};
use mcs_cli_config::{load_config_with_cli, CliOverrides, LogFormat, LoggingConfig, McsConfig};

mod commands;
mod version;

use commands::LocationKindArg;

/// MCS - command-line client for the mobile backend
#[derive(Parser, Debug)]
#[command(name = "mcs", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	log_json: bool,

	/// Backend base URL (overrides config)
	#[arg(long)]
	base_url: Option<String>,

	/// Backend identifier (overrides config)
	#[arg(long)]
	backend_id: Option<String>,

	/// Platform to report as: android or ios (overrides config)
	#[arg(long)]
	platform: Option<String>,

	/// Username to authenticate as
	#[arg(short, long, env = "MCS_USERNAME")]
	username: Option<String>,

	/// Password for --username
	#[arg(long, env = "MCS_PASSWORD", hide_env_values = true)]
	password: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Log in with --username/--password and print the user record
	Login,
	/// Send a single custom analytics event
	SendEvent {
		/// Event name
		name: String,
	},
	/// Queue custom analytics events and flush them as one batch
	StoreEvents {
		/// Event names, sent in order
		#[arg(required = true)]
		names: Vec<String>,
	},
	/// Register a push token for this application
	RegisterDevice {
		/// Push token obtained from the platform push service
		#[arg(long)]
		token: String,
		/// Application package name
		#[arg(long)]
		package: String,
		/// Application version
		#[arg(long)]
		app_version: String,
	},
	/// Deregister a push token
	DeregisterDevice {
		/// Push token obtained from the platform push service
		#[arg(long)]
		token: String,
		/// Application package name
		#[arg(long)]
		package: String,
	},
	/// List storage collections
	Collections,
	/// List the objects of a collection
	Items {
		/// Collection identifier
		collection: String,
	},
	/// Download an object
	GetItem {
		/// Collection identifier
		collection: String,
		/// Object identifier
		item: String,
		/// Write the decoded object here instead of printing the raw body
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
	/// Upload a file into a collection
	StoreItem {
		/// Collection identifier
		collection: String,
		/// File to upload
		#[arg(long)]
		file: PathBuf,
		/// Object name (defaults to the file name)
		#[arg(long)]
		name: Option<String>,
		/// Content type of the object
		#[arg(long, default_value = "application/octet-stream")]
		content_type: String,
	},
	/// Delete an object
	DeleteItem {
		/// Collection identifier
		collection: String,
		/// Object identifier
		item: String,
	},
	/// Print the client application policies
	AppPolicies,
	/// GET a custom API endpoint
	ApiGet {
		/// Custom API name
		api: String,
		/// Endpoint within the API
		endpoint: String,
		/// Query parameter (repeatable: -p KEY=VALUE), not URL-encoded
		#[arg(long, short = 'p', value_name = "KEY=VALUE", value_parser = commands::parse_key_value)]
		param: Vec<(String, String)>,
	},
	/// POST to a custom API endpoint
	ApiPost {
		/// Custom API name
		api: String,
		/// Endpoint within the API
		endpoint: String,
		/// Request body, sent as-is
		#[arg(long, default_value = "")]
		body: String,
		/// Extra header (repeatable: -H KEY=VALUE)
		#[arg(long = "header", short = 'H', value_name = "KEY=VALUE", value_parser = commands::parse_key_value)]
		headers: Vec<(String, String)>,
	},
	/// Look up a device, place or asset location
	Location {
		/// What to look up
		#[arg(value_enum)]
		kind: LocationKindArg,
		/// Look up by name
		#[arg(long, conflicts_with = "id", required_unless_present = "id")]
		name: Option<String>,
		/// Look up by identifier
		#[arg(long)]
		id: Option<String>,
	},
	/// Print build information
	Version,
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		CliOverrides {
			base_url: args.base_url.clone(),
			backend_id: args.backend_id.clone(),
			platform: args.platform.clone(),
			log_level: args.log_level.clone(),
			log_format: args.log_json.then(|| "json".to_string()),
			config_file: args.config.clone(),
		}
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("mcs={0},mcs_cli={0}", logging.level)));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

/// Builds the SDK client. A push token given on the command line stands in
/// for the platform push service.
fn build_client(config: &McsConfig, push_token: Option<String>) -> Result<McsClient> {
	let backend = &config.backend;
	let store = FileStore::new(config.paths.store_file());
	debug!(path = %store.path().display(), "using device id store");

	let mut builder = McsClient::builder()
		.base_url(backend.base_url.as_str())
		.backend_id(backend.backend_id.as_str())
		.platform(backend.platform)
		.request_timeout(backend.request_timeout)
		.key_value_store(Arc::new(store));

	if let Some(key) = &backend.android_application_key {
		builder = builder.android_application_key(key.as_str());
	}
	if let Some(key) = &backend.ios_application_key {
		builder = builder.ios_application_key(key.as_str());
	}
	if let Some(key) = &backend.anonymous_key {
		builder = builder.anonymous_key(key.as_str());
	}
	if let Some(token) = push_token {
		builder = builder.push_registrar(Arc::new(StaticPushRegistrar::new(token)));
	}

	builder.build().context("failed to build MCS client")
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	if let Command::Version = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	let config = load_config_with_cli(CliOverrides::from(&args))
		.context("failed to load configuration")?;

	init_tracing(&config.logging);

	info!(
		base_url = %config.backend.base_url,
		platform = %config.backend.platform,
		"starting mcs"
	);

	let push_token = match &args.command {
		Command::RegisterDevice { token, .. } | Command::DeregisterDevice { token, .. } => {
			Some(token.clone())
		}
		_ => None,
	};
	let client = build_client(&config, push_token)?;
	let password = args.password.clone().map(Zeroizing::new);

	if let Command::Login = args.command {
		let username = args.username.as_deref().context("--username is required")?;
		let password = password.as_deref().context("--password is required")?;
		let body = client.login(username, password).await.context("login failed")?;
		println!("{body}");
		return Ok(());
	}

	if let (Some(username), Some(password)) = (args.username.as_deref(), password.as_deref()) {
		client.set_authorization(username, password);
	}

	commands::run(&client, args.command).await
}

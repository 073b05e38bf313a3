// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subcommand handlers.

use anyhow::{Context, Result};
use mcs::{HeaderParam, LocationKind, LocationLookup, McsClient, QueryParam};

use crate::Command;

mod storage;

/// Location collection selected on the command line.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum LocationKindArg {
	Device,
	Place,
	Asset,
}

impl From<LocationKindArg> for LocationKind {
	fn from(kind: LocationKindArg) -> Self {
		match kind {
			LocationKindArg::Device => LocationKind::Devices,
			LocationKindArg::Place => LocationKind::Places,
			LocationKindArg::Asset => LocationKind::Assets,
		}
	}
}

/// Parses a `KEY=VALUE` argument. The value may itself contain `=`.
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
	match arg.split_once('=') {
		Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
		_ => Err(format!("expected KEY=VALUE, got '{arg}'")),
	}
}

pub(crate) async fn run(client: &McsClient, command: Command) -> Result<()> {
	match command {
		Command::SendEvent { name } => {
			let body = client
				.send_basic_event(&name)
				.await
				.context("failed to send event")?;
			println!("{body}");
		}
		Command::StoreEvents { names } => {
			for name in &names {
				client.store_basic_event(name);
			}
			match client.flush_events().await.context("failed to flush events")? {
				Some(body) => println!("{body}"),
				None => println!("No events queued."),
			}
		}
		Command::RegisterDevice {
			package,
			app_version,
			..
		} => {
			let body = client
				.register_device_token(&package, &app_version)
				.await
				.context("failed to register device")?;
			println!("{body}");
		}
		Command::DeregisterDevice { package, .. } => {
			let message = client
				.deregister_device_token(&package)
				.await
				.context("failed to deregister device")?;
			println!("{message}");
		}
		Command::Collections => storage::collections(client).await?,
		Command::Items { collection } => storage::items(client, &collection).await?,
		Command::GetItem {
			collection,
			item,
			output,
		} => storage::get_item(client, &collection, &item, output.as_deref()).await?,
		Command::StoreItem {
			collection,
			file,
			name,
			content_type,
		} => storage::store_item(client, &collection, &file, name, content_type).await?,
		Command::DeleteItem { collection, item } => {
			storage::delete_item(client, &collection, &item).await?
		}
		Command::AppPolicies => {
			let body = client
				.get_app_policies()
				.await
				.context("failed to fetch application policies")?;
			println!("{body}");
		}
		Command::ApiGet {
			api,
			endpoint,
			param,
		} => {
			let params: Vec<QueryParam> = param
				.into_iter()
				.map(|(key, value)| QueryParam::new(key, value))
				.collect();
			let body = client
				.api_caller_get(&api, &endpoint, &params)
				.await
				.with_context(|| format!("GET {api}/{endpoint} failed"))?;
			println!("{body}");
		}
		Command::ApiPost {
			api,
			endpoint,
			body,
			headers,
		} => {
			let headers: Vec<HeaderParam> = headers
				.into_iter()
				.map(|(key, value)| HeaderParam::new(key, value))
				.collect();
			let response = client
				.api_caller_post(&api, &endpoint, body, &headers)
				.await
				.with_context(|| format!("POST {api}/{endpoint} failed"))?;
			println!("{response}");
		}
		Command::Location { kind, name, id } => {
			let lookup = match (name, id) {
				(Some(name), _) => LocationLookup::ByName(name),
				(None, Some(id)) => LocationLookup::ById(id),
				(None, None) => anyhow::bail!("either --name or --id is required"),
			};
			let body = client
				.get_location_list(kind.into(), lookup)
				.await
				.context("location lookup failed")?;
			println!("{body}");
		}
		Command::Login | Command::Version => {}
	}

	Ok(())
}

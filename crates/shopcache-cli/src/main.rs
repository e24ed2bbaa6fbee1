//! shopcache - an offline-first demo storefront from the terminal.
//!
//! Thin front-end over `shopcache-core`: browse the demo catalog, list the
//! user directory (cache-then-network, with an offline switch), and manage
//! the demo auth token.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shopcache_core::api::DirectoryClient;
use shopcache_core::auth::{AuthManager, KeyringSecretStore};
use shopcache_core::cache::JsonFileCache;
use shopcache_core::catalog::demo_catalog;
use shopcache_core::config::Config;
use shopcache_core::connectivity::SimulatedConnectivity;
use shopcache_core::device::SimulatedDeviceModule;
use shopcache_core::store::{FetchOutcome, UserDirectory};
use shopcache_core::utils::format_inr;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("shopcache starting");

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("users") => cmd_users(args.iter().any(|a| a == "--offline")).await,
        Some("catalog") => cmd_catalog(),
        Some("login") => cmd_login().await,
        Some("logout") => cmd_logout().await,
        Some("status") => cmd_status().await,
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    eprintln!("Usage: shopcache <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  users [--offline]   List the user directory (cached, refreshed as needed)");
    eprintln!("  catalog             Show the demo product catalog");
    eprintln!("  login               Generate and store a demo auth token");
    eprintln!("  logout              Remove the stored token and log out");
    eprintln!("  status              Show device and auth status");
}

/// The app's mount sequence: replay the persisted cache, then refresh
async fn cmd_users(offline: bool) -> Result<()> {
    let config = Config::load()?;
    let cache = Arc::new(JsonFileCache::new(config.cache_dir()?)?);
    let connectivity = Arc::new(SimulatedConnectivity::new(!offline));
    let client = match &config.directory_base_url {
        Some(base) => DirectoryClient::with_base_url(base.clone())?,
        None => DirectoryClient::new()?,
    };

    let directory = UserDirectory::new(cache, connectivity, Arc::new(client));
    directory.load_from_cache().await;
    let outcome = directory.fetch().await;

    let state = directory.snapshot();
    match outcome {
        FetchOutcome::Refreshed => {
            println!("Fetched {} users from the network", state.users.len());
        }
        FetchOutcome::CacheFresh => {
            println!(
                "Cache still fresh (last fetch {}), {} users",
                state.cache_age_display(),
                state.users.len()
            );
        }
        FetchOutcome::OfflineFallback => {
            println!(
                "Offline - showing {} users cached {}",
                state.users.len(),
                state.cache_age_display()
            );
        }
        FetchOutcome::Failed => {
            eprintln!(
                "Error: {}",
                state.error.as_deref().unwrap_or("fetch failed")
            );
            return Ok(());
        }
    }

    println!();
    for user in &state.users {
        println!(
            "{:>4}  {:<24} {:<28} {}",
            user.id,
            user.name,
            user.email,
            user.address.city
        );
    }
    Ok(())
}

fn cmd_catalog() -> Result<()> {
    for product in demo_catalog() {
        println!(
            "{:<4} {:<24} {:>12}  {}",
            product.id,
            product.title,
            format_inr(product.price),
            product.category
        );
    }
    Ok(())
}

async fn cmd_login() -> Result<()> {
    let auth = AuthManager::new(Arc::new(KeyringSecretStore));
    if auth.load_token().await {
        println!("Already logged in");
        return Ok(());
    }

    let token = auth.generate_token();
    auth.save_token(&token).await?;
    println!("Logged in with a new demo token");
    Ok(())
}

async fn cmd_logout() -> Result<()> {
    let auth = AuthManager::new(Arc::new(KeyringSecretStore));
    if let Err(e) = auth.remove_token().await {
        // Best effort: the in-memory state is cleared either way
        warn!(error = %e, "Failed to delete stored token");
    }
    auth.logout();
    println!("Logged out");
    Ok(())
}

async fn cmd_status() -> Result<()> {
    let device = SimulatedDeviceModule.os_info().await;
    println!("OS:      {} ({})", device.os_name, device.os_version);
    println!(
        "Device:  {} {}{}",
        device.device_brand,
        device.device_model,
        if device.is_emulator { " (emulator)" } else { "" }
    );

    let auth = AuthManager::new(Arc::new(KeyringSecretStore));
    auth.load_token().await;
    match auth.snapshot().token {
        Some(token) => {
            let preview: String = token.chars().take(16).collect();
            println!("Auth:    logged in ({}...)", preview);
        }
        None => println!("Auth:    logged out"),
    }
    Ok(())
}

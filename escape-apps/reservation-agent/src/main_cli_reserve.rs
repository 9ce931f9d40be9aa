//!  Escape Reservation Agent
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//!
//! # Examples
//!
//! ## Zero World, theme by name
//!
//! ```bash
//! # 깜방탈출 on a Saturday resolves to the weekend theme id
//! escape-reserve zero-world -t 깜방탈출 -d 2025-12-13 -T 17:00:00 -n 홍길동 -p 01012345678 --agree
//! ```
//!
//! ## Zero World, time as a Unix timestamp
//!
//! ```bash
//! escape-reserve zero-world -t 57 -d 2025-12-13 -T 1765612800 -n 홍길동 -p 01012345678 --agree
//! ```
//!
//! ## Earth Escape
//!
//! ```bash
//! escape-reserve earth-escape -b 2 -t 18 -d 2025-12-04 -T 20:30 -n 홍길동 -p 010-1234-5678 -P 4 --agree
//! ```
//!
//! ## Dry run (show request and URLs only)
//!
//! ```bash
//! escape-reserve --dry-run earth-escape -t 18 -d 2025-12-04 -T 20:30 -n 홍길동 -p 01012345678 --agree
//! ```
//!
//! # Output
//!
//! The booking site's answer, or the reason the attempt failed. With `--json`
//! the outcome is printed as `{"success", "message", "reservationId"}`.
//! Exit code is 1 when the reservation was not made.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use escape_reservation_agent::catalog::{
    EARTH_ESCAPE_SLOTS, ZERO_WORLD_SLOTS, earth_escape_branch, earth_escape_theme,
    is_listed_slot, zero_world_theme_id,
};
use escape_reservation_agent::{
    EarthEscapeRequest, EngineConfig, ReservationAdapter, ReservationEngine, ReservationRequest,
    ZeroWorldRequest, format_phone_number, time_from_unix_timestamp,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "escape-reserve")]
#[command(version = "0.1.0")]
#[command(about = "Book an escape-room session by replaying the site's reservation form")]
struct Args {
    #[arg(short = 'c', long, global = true, default_value = "escape-reserve.toml")]
    config: PathBuf,
    #[arg(long, global = true, help = "Whole-call timeout, overrides the config file")]
    timeout_secs: Option<u64>,
    #[arg(long, global = true, help = "Show request and URLs without making requests")]
    dry_run: bool,
    #[arg(long, global = true, help = "Print the outcome as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Zero World Hongdae (zerohongdae.com)
    ZeroWorld {
        #[arg(short = 't', long, help = "Theme id or name (e.g. 57, 깜방탈출, NOX)")]
        theme: String,
        #[arg(short = 'd', long, help = "YYYY-MM-DD")]
        date: String,
        #[arg(short = 'T', long, help = "HH:MM:SS or Unix timestamp")]
        time: String,
        #[arg(short = 'n', long)]
        name: String,
        #[arg(short = 'p', long)]
        phone: String,
        #[arg(short = 'P', long, default_value = "2")]
        people: u32,
        #[arg(long, default_value = "1", help = "1 = pay on site")]
        payment_type: String,
        #[arg(long, help = "Agree to the privacy policy")]
        agree: bool,
    },
    /// Earth Escape (지구별방탈출.com)
    EarthEscape {
        #[arg(short = 'b', long, default_value = "2")]
        branch: String,
        #[arg(short = 't', long)]
        theme: String,
        #[arg(short = 'd', long, help = "YYYY-MM-DD")]
        date: String,
        #[arg(short = 'T', long, help = "HH:MM")]
        time: String,
        #[arg(short = 'n', long)]
        name: String,
        #[arg(short = 'p', long)]
        phone: String,
        #[arg(short = 'P', long, default_value = "2")]
        people: String,
        #[arg(long, default_value = "21", help = "21 = virtual account transfer")]
        payment_method: String,
        #[arg(long, help = "Agree to the privacy policy")]
        agree: bool,
    },
}

fn parse_date(s: &str) -> Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| anyhow!("Invalid date: {}", s))
}

/// Accept `HH:MM:SS`, `HH:MM` or epoch seconds
fn parse_zero_world_time(s: &str) -> Result<String> {
    let s = s.trim();
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        return time_from_unix_timestamp(s);
    }
    chrono::NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| chrono::NaiveTime::parse_from_str(s, "%H:%M"))
        .map(|t| t.format("%H:%M:%S").to_string())
        .map_err(|_| anyhow!("Invalid time: {}", s))
}

fn resolve_zero_world_theme(theme: &str, date: &str, time: &str) -> Result<String> {
    let theme = theme.trim();
    if theme.chars().all(|c| c.is_ascii_digit()) {
        return Ok(theme.to_string());
    }
    let date = parse_date(date)?;
    let time = chrono::NaiveTime::parse_from_str(time, "%H:%M:%S")
        .with_context(|| format!("Invalid time: {}", time))?;
    zero_world_theme_id(theme, date, time)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Unknown Zero World theme: {}", theme))
}

fn build_request(command: Command) -> Result<ReservationRequest> {
    let request: ReservationRequest = match command {
        Command::ZeroWorld {
            theme,
            date,
            time,
            name,
            phone,
            people,
            payment_type,
            agree,
        } => {
            let reservation_time = parse_zero_world_time(&time)?;
            let theme_id = resolve_zero_world_theme(&theme, &date, &reservation_time)?;
            if !is_listed_slot(ZERO_WORLD_SLOTS, &reservation_time) {
                eprintln!(
                    "Warning: {} is not a listed Zero World slot ({})",
                    reservation_time,
                    ZERO_WORLD_SLOTS.join(", ")
                );
            }
            ZeroWorldRequest {
                theme_id,
                reservation_date: date,
                reservation_time,
                name,
                phone: format_phone_number(&phone),
                people,
                payment_type,
                policy: agree,
            }
            .into()
        }
        Command::EarthEscape {
            branch,
            theme,
            date,
            time,
            name,
            phone,
            people,
            payment_method,
            agree,
        } => {
            if earth_escape_branch(&branch).is_none() {
                eprintln!("Warning: Unknown Earth Escape branch: {}", branch);
            }
            if !is_listed_slot(EARTH_ESCAPE_SLOTS, &time) {
                eprintln!(
                    "Warning: {} is not a listed Earth Escape slot ({})",
                    time,
                    EARTH_ESCAPE_SLOTS.join(", ")
                );
            }
            EarthEscapeRequest {
                branch,
                theme,
                date,
                time,
                name,
                phone: format_phone_number(&phone),
                people,
                payment_method,
                policy: agree,
            }
            .into()
        }
    };
    Ok(request)
}

fn print_summary(engine: &ReservationEngine, request: &ReservationRequest) {
    println!("\n🔐 Escape Room Reservation");
    println!("==========================");
    println!("Target: {}", request.target());
    match request {
        ReservationRequest::ZeroWorld(r) => {
            println!("Theme: {}", r.theme_id);
            println!("Slot: {} {}", r.reservation_date, r.reservation_time);
            println!("Guest: {} ({}), {} people", r.name, r.phone, r.people);
            println!("Page URL: {}", engine.zero_world().listing_url(r));
            println!("Form URL: {}", engine.zero_world().submission_url());
        }
        ReservationRequest::EarthEscape(r) => {
            let branch = earth_escape_branch(&r.branch).map_or("?", |b| b.name);
            let theme = earth_escape_theme(&r.theme).map_or("?", |t| t.name);
            println!("Branch: {} ({})", r.branch, branch);
            println!("Theme: {} ({})", r.theme, theme);
            println!("Slot: {} {}", r.date, r.time);
            println!("Guest: {} ({}), {} people", r.name, r.phone, r.people);
            println!("Page URL: {}", engine.earth_escape().listing_url(r));
            println!("Form URL: {}", engine.earth_escape().submission_url());
        }
    }
    println!("==========================");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".to_string().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();
    tracing::debug!("Parsed args: {:?}", args);

    let mut config = EngineConfig::load(&args.config)?;
    if let Some(timeout_secs) = args.timeout_secs {
        config.submission_timeout_secs = timeout_secs;
    }

    let request = build_request(args.command)?;
    let engine = ReservationEngine::new(&config).context("Failed to create reservation engine")?;

    if !args.json {
        print_summary(&engine, &request);
    }
    if args.dry_run {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        return Ok(());
    }

    let outcome = engine.submit(&request).await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.to_api_response())?);
    } else if outcome.is_success() {
        println!("\n✅ {}", outcome.message());
    } else {
        eprintln!("\n❌ {}", outcome.message());
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

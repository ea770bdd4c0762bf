//! Seed CLI — grow a Fibonacci-gated description corpus from the shell
//!
//! Commands:
//!   seed add       — add a description to a descriptor and link it to an asset
//!   seed describe  — add a description to a descriptor only
//!   seed link      — link an existing descriptor to an existing asset
//!   seed unlink    — remove that link again
//!   seed relations — assets sharing descriptors with an asset
//!   seed export    — every description of an asset
//!   seed pending   — assets and descriptors that still need input
//!   seed stats     — store summary
//!   seed validate  — load the store strictly and report problems

use seed_core::{Result, SeedStore, StoreConfig};
use std::env;
use std::process::ExitCode;

fn print_usage() {
    println!(
        r#"
Usage: seed <command> [args]

Commands:
  add       <asset> <descriptor> <text...>   Add a description and link descriptor to asset
  describe  <descriptor> <text...>           Add a description to a descriptor
  link      <asset> <descriptor>             Link an existing descriptor to an existing asset
  unlink    <asset> <descriptor>             Remove a link
  relations <asset>                          Show assets sharing a descriptor
  export    <asset>                          Print every description of an asset
  pending                                    List uneven assets and descriptors
  stats                                      Show store summary
  validate                                   Load the store strictly

Environment:
  SEED_STORE   store file (default seed-store.json)
  SEED_STRICT  reject stale derived fields on load (1/true)
  RUST_LOG     log filter (default info)

Examples:
  seed add billy soldier middle-aged
  seed add billy hair "short and grey"
  seed relations billy
"#
    );
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let config = StoreConfig::from_env();
    let result = match args[1].as_str() {
        "add" => cmd_add(&config, &args[2..]),
        "describe" => cmd_describe(&config, &args[2..]),
        "link" => cmd_link(&config, &args[2..], true),
        "unlink" => cmd_link(&config, &args[2..], false),
        "relations" => cmd_relations(&config, &args[2..]),
        "export" => cmd_export(&config, &args[2..]),
        "pending" => cmd_pending(&config),
        "stats" => cmd_stats(&config),
        "validate" => cmd_validate(&config),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("  Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Print the command's usage line when fewer than `min` arguments were given
fn has_args(args: &[String], min: usize, usage: &str) -> bool {
    if args.len() < min {
        eprintln!("Usage: seed {}", usage);
        return false;
    }
    true
}

fn cmd_add(config: &StoreConfig, args: &[String]) -> Result<ExitCode> {
    if !has_args(args, 3, "add <asset> <descriptor> <text...>") {
        return Ok(ExitCode::FAILURE);
    }
    let text = args[2..].join(" ");

    let mut store = SeedStore::open(config)?;
    let added = store
        .seed_mut()
        .add_description_to_asset(&args[0], &args[1], &text)?;
    store.save()?;

    if added {
        println!("  Added {:?} to {} on {}", text.to_lowercase(), args[1], args[0]);
    } else {
        println!("  {:?} already present under {}", text.to_lowercase(), args[1]);
    }
    if let Some(descriptor) = store.seed().descriptor(&args[1]) {
        println!(
            "  {}: {} descriptions, next level at {}",
            descriptor.name(),
            descriptor.num_descriptions(),
            descriptor.next_fib()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_describe(config: &StoreConfig, args: &[String]) -> Result<ExitCode> {
    if !has_args(args, 2, "describe <descriptor> <text...>") {
        return Ok(ExitCode::FAILURE);
    }
    let text = args[1..].join(" ");

    let mut store = SeedStore::open(config)?;
    if store.seed_mut().add_description(&args[0], &text)? {
        println!("  Added {:?} to {}", text.to_lowercase(), args[0]);
    } else {
        println!("  {:?} already present under {}", text.to_lowercase(), args[0]);
    }
    store.save()?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_link(config: &StoreConfig, args: &[String], link: bool) -> Result<ExitCode> {
    let usage = if link { "link <asset> <descriptor>" } else { "unlink <asset> <descriptor>" };
    if !has_args(args, 2, usage) {
        return Ok(ExitCode::FAILURE);
    }

    let mut store = SeedStore::open(config)?;
    if link {
        store.seed_mut().link_descriptor(&args[0], &args[1])?;
        println!("  Linked {} -> {}", args[0], args[1]);
    } else {
        store.seed_mut().unlink_descriptor(&args[0], &args[1])?;
        println!("  Unlinked {} -> {}", args[0], args[1]);
    }
    store.save()?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_relations(config: &StoreConfig, args: &[String]) -> Result<ExitCode> {
    if !has_args(args, 1, "relations <asset>") {
        return Ok(ExitCode::FAILURE);
    }

    let store = SeedStore::open(config)?;
    let shared = store.seed().shared_descriptor_assets(&args[0])?;
    if shared.is_empty() {
        println!("\n  {} shares no descriptors.", args[0]);
        return Ok(ExitCode::SUCCESS);
    }
    println!("\n  Relations of {}:", args[0]);
    for (descriptor, assets) in shared {
        let assets: Vec<&str> = assets.iter().map(String::as_str).collect();
        println!("  #{:<20} {}", descriptor, assets.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_export(config: &StoreConfig, args: &[String]) -> Result<ExitCode> {
    if !has_args(args, 1, "export <asset>") {
        return Ok(ExitCode::FAILURE);
    }

    let store = SeedStore::open(config)?;
    for description in store.seed().export_asset_descriptions(&args[0])? {
        println!("{}", description);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_pending(config: &StoreConfig) -> Result<ExitCode> {
    let store = SeedStore::open(config)?;
    let seed = store.seed();

    let assets = seed.uneven_assets();
    let descriptors = seed.uneven_descriptors();
    if assets.is_empty() && descriptors.is_empty() {
        println!("\n  Everything is level.");
        return Ok(ExitCode::SUCCESS);
    }

    for asset in assets {
        println!(
            "  asset {:<20} {} descriptors, needs {}",
            asset.name(),
            asset.num_descriptors(),
            asset.next_fib()
        );
    }
    for descriptor in descriptors {
        println!(
            "  #{:<20} {} descriptions, needs {}",
            descriptor.name(),
            descriptor.num_descriptions(),
            descriptor.next_fib()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_stats(config: &StoreConfig) -> Result<ExitCode> {
    let store = SeedStore::open(config)?;
    let seed = store.seed();

    println!("\n  {}", store.summary());
    println!("  {}", "-".repeat(60));
    println!("  Dangling descriptors: {}", seed.dangling_descriptors().len());
    println!("  Uneven assets:        {}", seed.uneven_assets().len());
    println!("  Uneven descriptors:   {}", seed.uneven_descriptors().len());
    Ok(ExitCode::SUCCESS)
}

fn cmd_validate(config: &StoreConfig) -> Result<ExitCode> {
    let strict = StoreConfig {
        strict: true,
        ..config.clone()
    };
    let store = SeedStore::open(&strict)?;

    let broken = store.seed().broken_links();
    if broken.is_empty() {
        println!("  {} is valid", store.path().display());
    } else {
        for link in &broken {
            println!("  one-sided link: {} <-> #{}", link.asset, link.descriptor);
        }
    }
    Ok(ExitCode::SUCCESS)
}

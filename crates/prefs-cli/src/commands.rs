use anyhow::Context;
use colored::Colorize;
use prefs::{Prefs, PrefsBuilder, PrefsConfig, SerializerKind};
use serde_json::Value;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let prefs = open_prefs(&cli)?;
    let json = matches!(cli.format, OutputFormat::Json);
    match cli.command {
        Command::List => cmd_list(&prefs, json),
        Command::Get(args) => cmd_get(&prefs, args, json),
        Command::Set(args) => {
            prefs.put_string(&args.key, &args.value)?;
            println!("{} Set {}", "✓".green(), args.key.bold());
            Ok(())
        }
        Command::Remove(args) => {
            prefs.remove(&args.key)?;
            println!("{} Removed {}", "✓".green(), args.key.bold());
            Ok(())
        }
        Command::Contains(args) => {
            let present = prefs.contains(&args.key)?;
            if json {
                println!("{}", serde_json::json!({ "key": args.key, "present": present }));
            } else if present {
                println!("{} is {}", args.key.bold(), "set".green());
            } else {
                println!("{} is {}", args.key.bold(), "not set".dimmed());
            }
            Ok(())
        }
        Command::Clear => {
            prefs.clear()?;
            println!("{} Cleared {}", "✓".green(), prefs.name().bold());
            Ok(())
        }
        Command::ListGet(args) => cmd_list_get(&prefs, args, json),
        Command::ListSet(args) => {
            let count = args.values.len();
            prefs.put_ordered_string_set(&args.key, args.values)?;
            println!("{} Stored {} values at {}", "✓".green(), count, args.key.bold());
            Ok(())
        }
        Command::ObjectGet(args) => cmd_object_get(&prefs, args),
        Command::ObjectSet(args) => {
            let value: Value = serde_json::from_str(&args.json)
                .with_context(|| format!("value for {} is not valid JSON", args.key))?;
            prefs.put_object(&args.key, &value)?;
            println!("{} Stored object at {}", "✓".green(), args.key.bold());
            Ok(())
        }
    }
}

pub fn open_prefs(cli: &Cli) -> anyhow::Result<Prefs> {
    let mut config = match &cli.config {
        Some(path) => PrefsConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PrefsConfig::default(),
    };

    if let Some(dir) = &cli.dir {
        config.storage_dir = Some(dir.clone());
    }
    if let Some(name) = &cli.name {
        config.name = Some(name.clone());
    }
    if config.name.is_none() && config.app_name.is_none() {
        config.name = Some("prefs".to_string());
    }
    config.serializer = match (cli.serializer, config.serializer) {
        (Some(SerializerArg::SerdeJson), _) => SerializerKind::SerdeJson,
        (Some(SerializerArg::SimdJson), _) => SerializerKind::SimdJson,
        (None, SerializerKind::None) => SerializerKind::SerdeJson,
        (None, configured) => configured,
    };

    tracing::debug!(?config, "resolved preferences config");
    Ok(PrefsBuilder::from_config(&config).build()?)
}

fn cmd_list(prefs: &Prefs, json: bool) -> anyhow::Result<()> {
    let all = prefs.get_all()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }
    if all.is_empty() {
        println!("No preferences stored in {}.", prefs.name().bold());
        return Ok(());
    }
    for (key, value) in &all {
        println!("{} = {}", key.cyan(), value);
    }
    Ok(())
}

fn cmd_get(prefs: &Prefs, args: KeyArgs, json: bool) -> anyhow::Result<()> {
    let value = prefs.store().get_string(&args.key)?;
    match (value, json) {
        (Some(value), true) => println!("{}", serde_json::json!({ "key": args.key, "value": value })),
        (None, true) => println!("{}", serde_json::json!({ "key": args.key, "value": null })),
        (Some(value), false) => println!("{}", value),
        (None, false) => println!("{} = {}", args.key.bold(), "(not set)".dimmed()),
    }
    Ok(())
}

fn cmd_list_get(prefs: &Prefs, args: KeyArgs, json: bool) -> anyhow::Result<()> {
    if !prefs.store().contains(&prefs_codec::length_key(&args.key))? {
        println!("{} = {}", args.key.bold(), "(no ordered set)".dimmed());
        return Ok(());
    }
    let values = prefs.get_ordered_string_set(&args.key, Vec::new())?;
    if json {
        println!("{}", serde_json::to_string(&values)?);
    } else {
        for (index, value) in values.iter().enumerate() {
            println!("{} {}", format!("[{index}]").yellow(), value);
        }
    }
    Ok(())
}

fn cmd_object_get(prefs: &Prefs, args: KeyArgs) -> anyhow::Result<()> {
    match prefs.get_object::<Value>(&args.key)? {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("{} = {}", args.key.bold(), "(no readable object)".dimmed()),
    }
    Ok(())
}

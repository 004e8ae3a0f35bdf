//! Circle Profile CLI
//!
//! Command-line front end for viewing and editing the stored circle profile.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use circle_profile_store::config;
use circle_profile_store::storage::{FileStorage, GRID_COLUMNS};
use circle_profile_store::utils::avatar::encode_avatar_file;
use circle_profile_store::utils::logging::init_logging;
use circle_profile_store::utils::parsing::{parse_keywords, parse_selection};
use circle_profile_store::{
    AttributeChoice, IngredientPatch, LoadOutcome, ProfileData, ProfileStore, Selection, Trend,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Circle profile editor
#[derive(Parser, Debug)]
#[command(name = "circle-profile")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the stored profile (overrides config.json)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current profile
    Show {
        /// Print the stored JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Set the circle name
    SetCircleName { name: String },

    /// Set the avatar from an image file (png, jpg, gif, webp, svg)
    SetAvatar { path: PathBuf },

    /// Replace keywords (only the first 5 are kept)
    SetKeywords {
        /// Keywords, separated by spaces or commas
        #[arg(num_args = 0..)]
        keywords: Vec<String>,
    },

    /// Set main and/or other interests
    SetInterests {
        #[arg(long)]
        main: Option<String>,
        #[arg(long)]
        other: Option<String>,
    },

    /// Update fields of one ingredient
    SetIngredient {
        /// Ingredient slot (0-5)
        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        index: u8,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        percentage: Option<f64>,
        /// up, stable or down
        #[arg(long)]
        trend: Option<Trend>,
    },

    /// Move an ingredient to another slot
    MoveIngredient {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        from: u8,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        to: u8,
    },

    /// Add or replace a two-option attribute
    SetAttribute {
        name: String,
        first: String,
        second: String,
        /// Selected option (0 or 1)
        #[arg(short, long, default_value = "0", value_parser = selection_arg)]
        selected: Selection,
    },

    /// Select an option of an existing attribute
    SelectAttribute {
        name: String,
        #[arg(value_parser = selection_arg)]
        selected: Selection,
    },
}

fn selection_arg(value: &str) -> std::result::Result<Selection, String> {
    parse_selection(value).map_err(|e| e.to_string())
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut store = open_store(args.data_dir.as_deref())?;

    match args.command {
        Command::Show { json } => cmd_show(store.profile(), json),
        Command::SetCircleName { name } => {
            store
                .update_circle_name(name)
                .context("Failed to save circle name")?;
            println!("✅ Circle name set to '{}'", store.profile().circle_name);
            Ok(())
        }
        Command::SetAvatar { path } => cmd_set_avatar(&mut store, &path),
        Command::SetKeywords { keywords } => cmd_set_keywords(&mut store, &keywords),
        Command::SetInterests { main, other } => {
            if main.is_none() && other.is_none() {
                bail!("Nothing to update. Pass --main and/or --other");
            }
            store
                .update_interests(main, other)
                .context("Failed to save interests")?;
            println!("✅ Interests updated");
            Ok(())
        }
        Command::SetIngredient {
            index,
            name,
            image,
            percentage,
            trend,
        } => {
            let patch = IngredientPatch {
                name,
                image,
                percentage,
                trend,
            };
            cmd_set_ingredient(&mut store, index as usize, &patch)
        }
        Command::MoveIngredient { from, to } => {
            store
                .update_ingredients_order(from as usize, to as usize)
                .context("Failed to reorder ingredients")?;
            println!("✅ Moved ingredient {} → {}", from, to);
            print_grid(store.profile());
            Ok(())
        }
        Command::SetAttribute {
            name,
            first,
            second,
            selected,
        } => {
            let choice = AttributeChoice::new(first, second, selected);
            let label = choice.selected_label().to_string();
            store
                .update_attribute(name.clone(), choice)
                .context("Failed to save attribute")?;
            println!("✅ {} = {}", name, label);
            Ok(())
        }
        Command::SelectAttribute { name, selected } => {
            store
                .select_attribute(&name, selected)
                .with_context(|| format!("Failed to select attribute '{}'", name))?;
            let label = store.profile().personal_info.attributes[&name].selected_label();
            println!("✅ {} = {}", name, label);
            Ok(())
        }
    }
}

fn open_store(data_dir: Option<&Path>) -> Result<ProfileStore<FileStorage>> {
    let mut config = config::load_config().context("Failed to load config")?;
    if let Some(dir) = data_dir {
        config.data_dir = Some(dir.to_path_buf());
    }

    let dir = config
        .resolve_data_dir()
        .context("Failed to resolve data directory")?;
    log::debug!("Using data directory {}", dir.display());

    let mut store = ProfileStore::from_config(FileStorage::new(dir), &config);
    match store
        .load_from_storage()
        .context("Failed to read stored profile")?
    {
        LoadOutcome::Loaded | LoadOutcome::Missing => {}
        LoadOutcome::Malformed => {
            let backup = store
                .storage()
                .backup(store.key())
                .context("Failed to set aside unreadable profile")?;
            if let Some(backup) = backup {
                log::warn!(
                    "Stored profile is unreadable; kept a copy at {} and starting from an empty profile",
                    backup.display()
                );
            }
        }
    }
    Ok(store)
}

// =============================================================================
// Command Implementations
// =============================================================================

fn cmd_show(profile: &ProfileData, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(profile)?);
        return Ok(());
    }

    let info = &profile.personal_info;
    let name = if profile.circle_name.is_empty() {
        "(unnamed)"
    } else {
        profile.circle_name.as_str()
    };

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("👥 Circle:    {}", name);
    if info.avatar.is_empty() {
        println!("🖼️  Avatar:    none");
    } else {
        println!("🖼️  Avatar:    {} bytes encoded", info.avatar.len());
    }
    println!("⭐ Main:      {}", info.main_interests);
    println!("✨ Other:     {}", info.other_interests);
    println!("🏷️  Keywords:  {}", info.keywords.join(", "));
    for (attr, choice) in &info.attributes {
        println!(
            "⚖️  {}: [{}] / [{}] → {}",
            attr,
            choice.options[0],
            choice.options[1],
            choice.selected_label()
        );
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    print_grid(profile);
    Ok(())
}

fn print_grid(profile: &ProfileData) {
    for row in profile.ingredients.chunks(GRID_COLUMNS) {
        let cells: Vec<String> = row
            .iter()
            .map(|i| {
                let arrow = match i.trend {
                    Trend::Up => "↑",
                    Trend::Stable => "→",
                    Trend::Down => "↓",
                };
                let name = if i.name.is_empty() { "-" } else { i.name.as_str() };
                format!("{}: {} {}% {}", i.order(), name, i.percentage, arrow)
            })
            .collect();
        println!("  {}", cells.join("  |  "));
    }
}

fn cmd_set_avatar(store: &mut ProfileStore<FileStorage>, path: &Path) -> Result<()> {
    let encoded = encode_avatar_file(path)
        .with_context(|| format!("Failed to read avatar {}", path.display()))?;
    store
        .update_avatar(encoded)
        .context("Failed to save avatar")?;
    println!("✅ Avatar set from {}", path.display());
    Ok(())
}

fn cmd_set_keywords(store: &mut ProfileStore<FileStorage>, args: &[String]) -> Result<()> {
    let keywords = parse_keywords(args);
    let given = keywords.len();
    store
        .update_keywords(keywords)
        .context("Failed to save keywords")?;

    let kept = &store.profile().personal_info.keywords;
    if given > kept.len() {
        println!("⚠️  Only the first {} keywords were kept", kept.len());
    }
    println!("✅ Keywords: {}", kept.join(", "));
    Ok(())
}

fn cmd_set_ingredient(
    store: &mut ProfileStore<FileStorage>,
    index: usize,
    patch: &IngredientPatch,
) -> Result<()> {
    if patch.is_empty() {
        bail!("Nothing to update. Pass --name, --image, --percentage or --trend");
    }
    store
        .update_ingredient(index, patch)
        .with_context(|| format!("Failed to update ingredient {}", index))?;
    println!("✅ Ingredient {} updated", index);
    print_grid(store.profile());
    Ok(())
}
